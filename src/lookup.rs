use crate::config::Config;
use crate::movie::Movie;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("Invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl LookupError {
    /// Short name of the failure category, for reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::Http(_) => "http",
            LookupError::Decode(_) => "decode",
        }
    }
}

/// Something that can look a film up by title.
pub trait FilmLookup {
    fn lookup(&self, title: &str) -> Result<Movie, LookupError>;
}

/// Title as sent in the `t` query parameter: spaces become `+`, nothing else changes.
pub fn query_term(title: &str) -> String {
    title.replace(' ', "+")
}

/// Blocking OMDb client. One GET per lookup, no timeout and no retry.
pub struct OmdbClient {
    agent: ureq::Agent,
    endpoint: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::Agent::config_builder().build().new_agent();
        Self {
            agent,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn request_url(&self, title: &str) -> String {
        format!(
            "{}?t={}&apikey={}",
            self.endpoint,
            query_term(title),
            self.api_key
        )
    }
}

impl FilmLookup for OmdbClient {
    fn lookup(&self, title: &str) -> Result<Movie, LookupError> {
        let url = self.request_url(title);
        let resp = self.agent.get(url.as_str()).call()?;
        let body = resp.into_body().read_to_string()?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Serve a single canned HTTP response and hand back the request line.
    fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                if header == "\r\n" || header.is_empty() {
                    break;
                }
            }
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            request_line.trim_end().to_string()
        });

        (endpoint, handle)
    }

    fn client_for(endpoint: &str) -> OmdbClient {
        OmdbClient::new(&Config {
            api_key: "secret".into(),
            endpoint: endpoint.into(),
            ..Config::default()
        })
    }

    #[test]
    fn test_query_term_only_replaces_spaces() {
        assert_eq!(query_term("The Matrix"), "The+Matrix");
        assert_eq!(query_term("Léon: The Professional"), "Léon:+The+Professional");
        assert_eq!(query_term("  two  spaces"), "++two++spaces");
        assert_eq!(query_term("Se7en"), "Se7en");
    }

    #[test]
    fn test_request_url() {
        let client = client_for("http://www.omdbapi.com/");
        assert_eq!(
            client.request_url("The Matrix"),
            "http://www.omdbapi.com/?t=The+Matrix&apikey=secret"
        );
    }

    #[test]
    fn test_lookup_decodes_response() {
        let (endpoint, server) = serve_once(
            "200 OK",
            r#"{"Title":"Blade Runner","Year":"1982","Runtime":"117 min","Response":"True"}"#,
        );
        let movie = client_for(&endpoint).lookup("Blade Runner").unwrap();

        assert_eq!(movie.title.as_deref(), Some("Blade Runner"));
        assert_eq!(movie.runtime.as_deref(), Some("117 min"));
        assert!(movie.is_found());
        assert_eq!(
            server.join().unwrap(),
            "GET /?t=Blade+Runner&apikey=secret HTTP/1.1"
        );
    }

    #[test]
    fn test_lookup_not_found_is_still_a_movie() {
        let (endpoint, server) =
            serve_once("200 OK", r#"{"Response":"False","Error":"Movie not found!"}"#);
        let movie = client_for(&endpoint).lookup("Unknown Film Xyzzy123").unwrap();
        assert!(!movie.is_found());
        server.join().unwrap();
    }

    #[test]
    fn test_lookup_bad_json_is_decode_error() {
        let (endpoint, server) = serve_once("200 OK", "<html>rate limited</html>");
        let err = client_for(&endpoint).lookup("Heat").unwrap_err();
        assert_eq!(err.kind(), "decode");
        server.join().unwrap();
    }

    #[test]
    fn test_lookup_http_error_status() {
        let (endpoint, server) = serve_once("401 Unauthorized", r#"{"Response":"False"}"#);
        let err = client_for(&endpoint).lookup("Heat").unwrap_err();
        assert_eq!(err.kind(), "http");
        assert!(err.to_string().starts_with("HTTP request failed"));
        server.join().unwrap();
    }
}

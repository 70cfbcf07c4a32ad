use crate::config::{API_KEY_URL, Config, ParsedArgs, USAGE};
use crate::events::{EventSink, UiEvent};
use crate::films;
use crate::lookup::{FilmLookup, OmdbClient};
use crate::movie::Movie;
use crate::writer;
use anyhow::Result;
use std::sync::Arc;
use std::thread;

const LOGO: &str = r#"    ___
 __/_  `.  .-"""-.
 \_,` | \-'  /   )`-')
  ") `"`    \  ((`"`
 ___Y  ,    .'7 /|
(_, ___/...-` (_/_/"#;

fn banner() -> String {
    format!(
        "{}      FilmSniffer (v{}) - Film lookup tool\n",
        LOGO,
        env!("CARGO_PKG_VERSION_MAJOR")
    )
}

/// Parse `args`, then look up every listed film against OMDb.
pub fn run(args: &[String], sink: Arc<dyn EventSink>) -> Result<()> {
    sink.send(UiEvent::Log(banner()));

    let ParsedArgs {
        config,
        warnings,
        help_requested,
    } = Config::from_args(args);

    for warning in &warnings {
        sink.send(UiEvent::Warning(warning.to_string()));
    }
    if help_requested {
        sink.send(UiEvent::Log(USAGE.into()));
    }

    if !config.has_key() {
        sink.send(UiEvent::Log(
            "Couldn't find an OMDb API key, specify key with '/key'".into(),
        ));
        sink.send(UiEvent::Log(format!(
            "(You can request a free API key here {})",
            API_KEY_URL
        )));
        return Ok(());
    }

    let client = OmdbClient::new(&config);
    run_with_sink(config, &client, &*sink)
}

/// Read the film list, look every title up through `client` and write the CSVs.
pub fn run_with_sink<L: FilmLookup>(mut config: Config, client: &L, sink: &dyn EventSink) -> Result<()> {
    sink.send(UiEvent::Log(format!(
        "Reading films from {} ...",
        config.path.display()
    )));
    films::load_into(&mut config)?;

    if config.films.is_empty() {
        sink.send(UiEvent::Log("Couldn't find any films, exiting...".into()));
        return Ok(());
    }

    sink.send(UiEvent::Log("Querying OMDb...".into()));
    let movies = lookup_all(&config, client, sink);

    sink.send(UiEvent::Log("Writing results to file...".into()));
    let report = writer::write_results(&config, &movies, sink);

    sink.send(UiEvent::Finished {
        written: report.written.len(),
        failed: report.failed.len(),
    });
    Ok(())
}

/// Look up every title in `config.films`, in order, one at a time.
///
/// Returns the films the API found. Each attempt, successful or not, is
/// followed by `config.pause`.
pub fn lookup_all<L: FilmLookup>(config: &Config, client: &L, sink: &dyn EventSink) -> Vec<Movie> {
    let total = config.films.len();
    let mut movies = Vec::new();
    sink.send(UiEvent::LookupsStarted { total });

    for title in &config.films {
        sink.send(UiEvent::LookupStarted {
            title: title.clone(),
        });

        match client.lookup(title) {
            Ok(movie) if movie.is_found() => {
                sink.send(UiEvent::FilmFound {
                    title: field(&movie.title),
                    year: field(&movie.year),
                    genre: field(&movie.genre),
                    runtime: field(&movie.runtime),
                });
                movies.push(movie);
            }
            Ok(movie) => {
                sink.send(UiEvent::FilmNotFound {
                    reason: movie.error,
                });
            }
            Err(e) => {
                sink.send(UiEvent::LookupFailed {
                    kind: e.kind(),
                    message: e.to_string(),
                });
                sink.send(UiEvent::FilmNotFound { reason: None });
            }
        }

        thread::sleep(config.pause);
    }

    sink.send(UiEvent::LookupsComplete {
        found: movies.len(),
        total,
    });
    movies
}

fn field(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

use serde::Deserialize;

/// The API's `Response` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ResponseStatus {
    True,
    False,
}

#[allow(dead_code)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

/// One film as returned by OMDb.
///
/// Every field is optional: `None` means the key was absent (or null) in the
/// response, which is distinct from an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Movie {
    pub title: Option<String>,
    pub year: Option<String>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub awards: Option<String>,
    pub poster: Option<String>,
    #[allow(dead_code)]
    pub ratings: Vec<Rating>,
    pub metascore: Option<String>,
    #[serde(rename = "imdbRating", alias = "ImdbRating")]
    pub imdb_rating: Option<String>,
    #[allow(dead_code)]
    #[serde(rename = "imdbVotes", alias = "ImdbVotes")]
    pub imdb_votes: Option<String>,
    #[allow(dead_code)]
    #[serde(rename = "imdbID", alias = "ImdbId")]
    pub imdb_id: Option<String>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    #[serde(rename = "DVD", alias = "Dvd")]
    pub dvd: Option<String>,
    pub box_office: Option<String>,
    pub production: Option<String>,
    pub website: Option<String>,
    pub response: Option<ResponseStatus>,
    /// Failure message sent alongside `Response: "False"`.
    pub error: Option<String>,
}

impl Movie {
    /// Only an explicit `Response: "False"` marks a miss.
    pub fn is_found(&self) -> bool {
        self.response != Some(ResponseStatus::False)
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub homeworld: String,
    #[serde(default)]
    pub species: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Everything the search window works from. Collections keep the upstream
/// listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub characters: Vec<Character>,
    pub planets: Vec<Planet>,
    pub species: Vec<Species>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && self.planets.is_empty() && self.species.is_empty()
    }
}

/// One page of a paginated listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub next: Option<String>,
    pub results: Vec<T>,
}

/// Numeric id from the last non-empty path segment, e.g. `.../planets/1/` -> 1.
pub fn resource_id(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

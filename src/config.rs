use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://swapi.dev/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime settings, overridable through `STARSEARCH_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub cache_dir: PathBuf,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            cache_dir: default_cache_dir(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("STARSEARCH_API_URL").filter(|v| !v.trim().is_empty()) {
            config.api_url = url.trim().to_string();
        }
        if let Some(dir) = lookup("STARSEARCH_CACHE_DIR").filter(|v| !v.trim().is_empty()) {
            config.cache_dir = PathBuf::from(dir);
        }
        if let Some(secs) = lookup("STARSEARCH_TIMEOUT_SECS") {
            match secs.trim().parse() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(_) => log::warn!("Ignoring invalid STARSEARCH_TIMEOUT_SECS={}", secs),
            }
        }

        config
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("starsearch"))
        .unwrap_or_else(|| PathBuf::from(".starsearch"))
}

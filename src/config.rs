use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/journal.json";
pub const DEFAULT_QUOTE_API_URL: &str = "https://dummyjson.com/quotes";
pub const DEFAULT_QUOTE_TIMEOUT_MS: u64 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub quote_api_url: String,
    pub quote_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let quote_api_url =
            lookup("QUOTE_API_URL").unwrap_or_else(|| DEFAULT_QUOTE_API_URL.to_string());
        let quote_timeout = lookup("QUOTE_TIMEOUT_MS")
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_QUOTE_TIMEOUT_MS));

        Self {
            port,
            data_path,
            quote_api_url,
            quote_timeout,
        }
    }
}

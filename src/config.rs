use std::env;
use std::time::Duration;

use crate::adapters::upstream::SourceUrls;
use crate::application::FetchPolicy;
use crate::domain::Category;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub window_size: usize,
    pub fetch_timeout: Duration,
    pub mock_delay_max: Duration,
    pub fetch_policy: FetchPolicy,
    pub source_urls: SourceUrls,
    pub log_level: String,
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

fn source_urls() -> SourceUrls {
    let base = env::var("NUMAVG_SOURCE_BASE").unwrap_or_else(|_| "https://example.com/api".to_string());
    let mut urls = SourceUrls::with_base(&base);

    for (category, key) in [
        (Category::Prime, "NUMAVG_PRIME_URL"),
        (Category::Fibonacci, "NUMAVG_FIBONACCI_URL"),
        (Category::Even, "NUMAVG_EVEN_URL"),
        (Category::Random, "NUMAVG_RANDOM_URL"),
    ] {
        if let Ok(url) = env::var(key) {
            urls.set(category, url);
        }
    }
    urls
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: parsed("NUMAVG_PORT").unwrap_or(8000),
            window_size: parsed("NUMAVG_WINDOW_SIZE").unwrap_or(10),
            fetch_timeout: Duration::from_millis(parsed("NUMAVG_FETCH_TIMEOUT_MS").unwrap_or(500)),
            mock_delay_max: Duration::from_millis(parsed("NUMAVG_MOCK_DELAY_MS").unwrap_or(300)),
            fetch_policy: parsed("NUMAVG_FETCH_POLICY").unwrap_or_default(),
            source_urls: source_urls(),
            log_level: env::var("NUMAVG_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

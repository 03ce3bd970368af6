use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::{Category, Number};
use crate::ports::{FetchError, NumberSource};

/// Upstream endpoint for each category
#[derive(Debug, Clone)]
pub struct SourceUrls {
    urls: HashMap<Category, String>,
}

impl SourceUrls {
    /// Same base URL for every category, with the category name as the final segment
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        let urls = Category::ALL
            .into_iter()
            .map(|c| (c, format!("{}/{}", base, c.name())))
            .collect();
        Self { urls }
    }

    /// Point one category at its own endpoint
    pub fn set(&mut self, category: Category, url: String) {
        self.urls.insert(category, url);
    }

    pub fn get(&self, category: Category) -> Option<&str> {
        self.urls.get(&category).map(String::as_str)
    }
}

/// Number source backed by third-party HTTP APIs
///
/// Every fetch opens a fresh connection; idle connections are not kept.
pub struct HttpNumberSource {
    client: Client,
    urls: SourceUrls,
}

impl HttpNumberSource {
    pub fn new(urls: SourceUrls, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()?;
        Ok(Self { client, urls })
    }

    fn parse_numbers(body: Value) -> Result<Vec<Number>, FetchError> {
        let Value::Array(items) = body else {
            return Err(FetchError::Malformed("expected a JSON array".to_string()));
        };

        items
            .into_iter()
            .map(|item| {
                item.as_f64()
                    .and_then(Number::new)
                    .ok_or_else(|| FetchError::Malformed(format!("not a number: {}", item)))
            })
            .collect()
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl NumberSource for HttpNumberSource {
    #[instrument(skip(self, category), fields(category = %category))]
    async fn fetch(&self, category: Category) -> Result<Vec<Number>, FetchError> {
        let url = self
            .urls
            .get(category)
            .ok_or_else(|| FetchError::Transport(format!("no upstream configured for {}", category.name())))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: Value = response.json().await?;
        let numbers = Self::parse_numbers(body)?;
        debug!(count = numbers.len(), "fetched upstream batch");
        Ok(numbers)
    }
}

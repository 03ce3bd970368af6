use async_trait::async_trait;

use crate::domain::{Category, Number};

/// Ways an upstream fetch can fail
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("upstream did not answer in time")]
    Timeout,

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("upstream request failed: {0}")]
    Transport(String),

    #[error("upstream payload is not a list of numbers: {0}")]
    Malformed(String),
}

/// Port for obtaining a batch of candidate numbers for a category
#[async_trait]
pub trait NumberSource: Send + Sync {
    async fn fetch(&self, category: Category) -> Result<Vec<Number>, FetchError>;
}

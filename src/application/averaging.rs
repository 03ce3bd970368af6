use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use crate::adapters::mock::MockNumberSource;
use crate::domain::{Category, Number, UnknownCategory, WindowReport};
use crate::ports::{FetchError, NumberSource, WindowStore};

/// How upstream failures are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// Every upstream failure is replaced by a generated batch
    #[default]
    Fallback,
    /// Timeouts add nothing; status, transport and payload failures reach the caller
    Strict,
}

impl FromStr for FetchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fallback" => Ok(Self::Fallback),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown fetch policy '{}'", other)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AverageError {
    #[error(transparent)]
    InvalidCategory(#[from] UnknownCategory),

    #[error("Error fetching from third-party API: {message}")]
    Upstream { status: u16, message: String },
}

/// Fetches, merges and averages numbers per category
pub struct AverageService {
    store: Arc<dyn WindowStore>,
    upstream: Arc<dyn NumberSource>,
    mock: MockNumberSource,
    fetch_timeout: Duration,
    policy: FetchPolicy,
}

impl AverageService {
    pub fn new(
        store: Arc<dyn WindowStore>,
        upstream: Arc<dyn NumberSource>,
        mock: MockNumberSource,
        fetch_timeout: Duration,
        policy: FetchPolicy,
    ) -> Self {
        Self {
            store,
            upstream,
            mock,
            fetch_timeout,
            policy,
        }
    }

    /// Run one fetch-merge-report round for the category named by `key`
    #[instrument(skip(self))]
    pub async fn handle(&self, key: &str, use_mock: bool) -> Result<WindowReport, AverageError> {
        let category: Category = key.parse()?;

        let window_prev_state = self.store.snapshot(category);
        let candidates = self.candidates(category, use_mock).await?;
        let accepted = self.store.merge_unique(category, &candidates);
        let window_curr_state = self.store.snapshot(category);

        let report = WindowReport::new(window_prev_state, window_curr_state, accepted);
        info!(
            category = %category,
            accepted = report.numbers.len(),
            size = report.window_curr_state.len(),
            avg = report.avg,
            "window updated"
        );
        Ok(report)
    }

    async fn candidates(&self, category: Category, use_mock: bool) -> Result<Vec<Number>, AverageError> {
        if use_mock {
            return Ok(self
                .mock
                .fetch(category)
                .await
                .unwrap_or_else(|_| self.mock.batch(category)));
        }

        match timeout(self.fetch_timeout, self.upstream.fetch(category)).await {
            Ok(Ok(numbers)) => Ok(numbers),
            Ok(Err(err)) => self.recover(category, err),
            Err(_) => self.recover(category, FetchError::Timeout),
        }
    }

    fn recover(&self, category: Category, err: FetchError) -> Result<Vec<Number>, AverageError> {
        match self.policy {
            FetchPolicy::Fallback => {
                warn!(category = %category, error = %err, "upstream fetch failed, using generated batch");
                Ok(self.mock.batch(category))
            }
            FetchPolicy::Strict => match err {
                FetchError::Timeout => {
                    warn!(category = %category, "upstream fetch timed out, window left unchanged");
                    Ok(Vec::new())
                }
                FetchError::Status(status) => {
                    debug!(category = %category, status, "passing upstream status through");
                    Err(AverageError::Upstream {
                        status,
                        message: err.to_string(),
                    })
                }
                FetchError::Transport(_) | FetchError::Malformed(_) => Err(AverageError::Upstream {
                    status: 502,
                    message: err.to_string(),
                }),
            },
        }
    }
}

use async_trait::async_trait;

use crate::flight::UnifiedFlight;
use crate::search::SearchCriteria;

#[async_trait]
pub trait FlightProvider: Send + Sync {
    /// Display name, also used as the `provider` field of every record it returns
    fn name(&self) -> &str;

    /// Fetch and normalize this provider's flights.
    ///
    /// Records must carry their validity flag; the caller drops invalid ones.
    /// Any retry policy lives inside the implementation and an `Err` is final
    /// for the current request.
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<UnifiedFlight>, ProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Failed to read provider payload: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode provider payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{provider} unavailable after {attempts} attempt(s)")]
    Unavailable { provider: String, attempts: u32 },

    #[error("{provider} did not respond within {after_ms}ms")]
    Timeout { provider: String, after_ms: u64 },

    #[error("{provider} search task panicked")]
    Panicked { provider: String },
}

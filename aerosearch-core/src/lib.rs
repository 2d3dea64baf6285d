pub mod flight;
pub mod format;
pub mod provider;
pub mod search;

pub use flight::{AirlineInfo, BaggageInfo, DurationInfo, FlightPoint, PriceInfo, UnifiedFlight};
pub use provider::{FlightProvider, ProviderError};
pub use search::{FilterOptions, ResponseMetadata, SearchCriteria, SearchResponse, SortKey};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

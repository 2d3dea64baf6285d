pub mod aggregator;
pub mod cache;
pub mod fetch;
pub mod filter;
pub mod ranking;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::{EngineConfig, FlightAggregator};
pub use cache::{route_key, CachedEntry, ResultCache, DEFAULT_TTL};
pub use fetch::{fetch_in_parallel, FetchOutcome};
pub use filter::{filter_flights, FlightFilter};
pub use ranking::{best_value_score, calculate_best_value, rank_flights, sort_flights};

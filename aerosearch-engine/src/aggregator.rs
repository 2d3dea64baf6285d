use std::sync::Arc;
use std::time::{Duration, Instant};

use aerosearch_core::{
    FlightProvider, ResponseMetadata, SearchCriteria, SearchResponse, UnifiedFlight,
};
use tracing::{debug, info};

use crate::cache::{route_key, ResultCache};
use crate::fetch::fetch_in_parallel;
use crate::filter::filter_flights;
use crate::ranking::rank_flights;

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Per-provider deadline. `None` waits for every provider however long it takes.
    pub provider_timeout: Option<Duration>,
}

/// Fans a search out to every provider, caches the merged set per route and
/// returns it filtered, scored and sorted for the request.
pub struct FlightAggregator {
    providers: Vec<Arc<dyn FlightProvider>>,
    cache: Arc<ResultCache>,
    config: EngineConfig,
}

impl FlightAggregator {
    pub fn new(
        providers: Vec<Arc<dyn FlightProvider>>,
        cache: Arc<ResultCache>,
        config: EngineConfig,
    ) -> Self {
        Self { providers, cache, config }
    }

    pub fn providers(&self) -> &[Arc<dyn FlightProvider>] {
        &self.providers
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    /// Never fails: provider outages show up in the response metadata.
    pub async fn search_flights(&self, criteria: SearchCriteria) -> SearchResponse {
        let start = Instant::now();
        let key = route_key(&criteria);
        let queried = self.providers.len();

        if let Some(entry) = self.cache.get(&key).await {
            debug!(
                "Cache hit for {} -> {} on {}",
                criteria.origin, criteria.destination, criteria.departure_date
            );
            // No fetch happened for this request, so every provider counts as succeeded.
            return build_response(criteria, entry.flights, start, queried, queried, true);
        }

        let outcome =
            fetch_in_parallel(&self.providers, &criteria, self.config.provider_timeout).await;
        info!(
            "Fetched {} flight(s) for {} -> {} on {} ({}/{} providers succeeded)",
            outcome.flights.len(),
            criteria.origin,
            criteria.destination,
            criteria.departure_date,
            outcome.succeeded,
            queried
        );

        self.cache.put(key, outcome.flights.clone()).await;

        build_response(criteria, outcome.flights, start, queried, outcome.succeeded, false)
    }
}

fn build_response(
    criteria: SearchCriteria,
    merged: Vec<UnifiedFlight>,
    start: Instant,
    queried: usize,
    succeeded: usize,
    cache_hit: bool,
) -> SearchResponse {
    let mut flights = filter_flights(merged, &criteria);
    rank_flights(&mut flights, criteria.sort_key());

    SearchResponse {
        metadata: ResponseMetadata {
            total_results: flights.len(),
            providers_queried: queried,
            providers_succeeded: succeeded,
            providers_failed: queried - succeeded,
            search_time_ms: start.elapsed().as_millis() as u64,
            cache_hit,
        },
        search_criteria: criteria,
        flights,
    }
}

use std::sync::Arc;
use std::time::Duration;

use aerosearch_core::{FlightProvider, ProviderError, SearchCriteria, UnifiedFlight};
use futures_util::future::join_all;
use tracing::{debug, warn};

/// Merged result of one fan-out over every registered provider.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Valid records from every provider that answered, in no particular cross-provider order.
    pub flights: Vec<UnifiedFlight>,
    pub succeeded: usize,
    pub failed: usize,
}

/// Query every provider concurrently and wait for all of them.
///
/// One spawned task per provider, joined at a single barrier. A provider that
/// errors, panics, or overruns `timeout` (when set) counts as failed and
/// contributes nothing; the others are unaffected. Records flagged invalid by
/// their adapter are dropped here.
pub async fn fetch_in_parallel(
    providers: &[Arc<dyn FlightProvider>],
    criteria: &SearchCriteria,
    timeout: Option<Duration>,
) -> FetchOutcome {
    let criteria = Arc::new(criteria.clone());

    let handles: Vec<_> = providers
        .iter()
        .map(|provider| {
            let provider = Arc::clone(provider);
            let criteria = Arc::clone(&criteria);
            tokio::spawn(
                async move { search_provider(provider.as_ref(), &criteria, timeout).await },
            )
        })
        .collect();

    let results = join_all(handles).await;

    let mut outcome = FetchOutcome::default();
    for (provider, joined) in providers.iter().zip(results) {
        let result = joined.unwrap_or_else(|_| {
            Err(ProviderError::Panicked {
                provider: provider.name().to_string(),
            })
        });

        match result {
            Ok(records) => {
                outcome.succeeded += 1;
                let returned = records.len();
                let valid: Vec<UnifiedFlight> =
                    records.into_iter().filter(|f| f.is_valid).collect();
                debug!(
                    "Provider {} returned {} record(s), {} invalid dropped",
                    provider.name(),
                    returned,
                    returned - valid.len()
                );
                outcome.flights.extend(valid);
            }
            Err(e) => {
                outcome.failed += 1;
                warn!("Provider {} failed: {}", provider.name(), e);
            }
        }
    }

    outcome
}

async fn search_provider(
    provider: &dyn FlightProvider,
    criteria: &SearchCriteria,
    timeout: Option<Duration>,
) -> Result<Vec<UnifiedFlight>, ProviderError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, provider.search(criteria))
            .await
            .unwrap_or_else(|_| {
                Err(ProviderError::Timeout {
                    provider: provider.name().to_string(),
                    after_ms: limit.as_millis() as u64,
                })
            }),
        None => provider.search(criteria).await,
    }
}

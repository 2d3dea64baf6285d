pub mod airasia;
pub mod app_config;
pub mod batik_air;
pub mod garuda;
pub mod lion_air;
pub mod mock;

use std::sync::Arc;

use aerosearch_core::FlightProvider;

pub use airasia::AirAsiaProvider;
pub use app_config::{CacheConfig, Config, ProvidersConfig, ServerConfig};
pub use batik_air::BatikAirProvider;
pub use garuda::GarudaProvider;
pub use lion_air::LionAirProvider;
pub use mock::MockSource;

/// The four airline adapters, all reading payloads from `config.mock_dir`.
pub fn build_providers(config: &ProvidersConfig) -> Vec<Arc<dyn FlightProvider>> {
    let mut source = MockSource::new(&config.mock_dir);
    if !config.simulate_latency {
        source = source.without_latency();
    }

    vec![
        Arc::new(GarudaProvider::new(source.clone())),
        Arc::new(LionAirProvider::new(source.clone())),
        Arc::new(BatikAirProvider::new(source.clone())),
        Arc::new(AirAsiaProvider::new(source).with_failure_rate(config.airasia_failure_rate)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerosearch_core::SearchCriteria;

    fn fixture_config() -> ProvidersConfig {
        ProvidersConfig {
            mock_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/../mock").into(),
            timeout_ms: None,
            simulate_latency: false,
            airasia_failure_rate: 0.0,
        }
    }

    #[test]
    fn test_builds_all_four_providers() {
        let providers = build_providers(&fixture_config());
        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Garuda Indonesia", "Lion Air", "Batik Air", "AirAsia"]);
    }

    #[tokio::test]
    async fn test_every_provider_reads_its_payload() {
        let criteria = SearchCriteria::default();
        for provider in build_providers(&fixture_config()) {
            let flights = provider.search(&criteria).await.unwrap();
            assert!(!flights.is_empty(), "{} returned nothing", provider.name());
        }
    }
}

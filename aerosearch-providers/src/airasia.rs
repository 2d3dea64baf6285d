use aerosearch_core::{
    AirlineInfo, BaggageInfo, DurationInfo, FlightPoint, FlightProvider, PriceInfo, ProviderError,
    SearchCriteria, UnifiedFlight,
};
use async_trait::async_trait;
use rand::Rng;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::mock::{city_for, parse_rfc3339, MockSource};

const NAME: &str = "AirAsia";
const PAYLOAD: &str = "airasia_search_response.json";
const AIRLINE_CODE: &str = "QZ";
const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Deserialize)]
struct AirAsiaResponse {
    flights: Vec<AirAsiaFlight>,
}

#[derive(Debug, Deserialize)]
struct AirAsiaFlight {
    flight_code: String,
    airline: String,
    from_airport: String,
    to_airport: String,
    depart_time: String,
    arrive_time: String,
    direct_flight: bool,
    #[serde(default)]
    stops: Vec<AirAsiaStop>,
    price_idr: f64,
    seats: u32,
    cabin_class: Option<String>,
    baggage_note: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AirAsiaStop {
    #[allow(dead_code)]
    airport: String,
}

/// Flaky upstream: every attempt can fail, so search retries up to three times.
pub struct AirAsiaProvider {
    source: MockSource,
    failure_rate: f64,
}

impl AirAsiaProvider {
    pub fn new(source: MockSource) -> Self {
        Self {
            source,
            failure_rate: 0.1,
        }
    }

    /// Probability that a single attempt fails, clamped to `[0, 1]`.
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = if rate.is_finite() { rate.clamp(0.0, 1.0) } else { 0.0 };
        self
    }

    fn attempt_fails(&self) -> bool {
        self.failure_rate > 0.0 && rand::thread_rng().gen_bool(self.failure_rate)
    }

    fn normalize(&self, raw: AirAsiaFlight) -> Option<UnifiedFlight> {
        let (Some(departure), Some(arrival)) =
            (parse_rfc3339(&raw.depart_time), parse_rfc3339(&raw.arrive_time))
        else {
            warn!("{}: skipping {} with unparseable times", NAME, raw.flight_code);
            return None;
        };

        let stops = if raw.direct_flight { 0 } else { raw.stops.len() as u32 };
        let departure_city = city_for(&raw.from_airport).to_string();
        let arrival_city = city_for(&raw.to_airport).to_string();
        let cabin_class = raw
            .cabin_class
            .filter(|c| !c.is_empty())
            .map(|c| c.to_lowercase())
            .unwrap_or_else(|| "economy".to_string());

        let mut flight = UnifiedFlight {
            id: format!("{}_{}", raw.flight_code, AIRLINE_CODE),
            provider: NAME.to_string(),
            airline: AirlineInfo {
                name: raw.airline,
                code: AIRLINE_CODE.to_string(),
            },
            flight_number: raw.flight_code,
            departure: FlightPoint::new(raw.from_airport, departure_city, departure),
            arrival: FlightPoint::new(raw.to_airport, arrival_city, arrival),
            duration: DurationInfo::between(&departure, &arrival),
            stops,
            price: PriceInfo::new(raw.price_idr, "IDR"),
            available_seats: raw.seats,
            cabin_class,
            aircraft: None,
            amenities: Vec::new(),
            baggage: raw.baggage_note.as_deref().map(BaggageInfo::from_note),
            score: 0.0,
            is_valid: false,
        };
        flight.is_valid = flight.is_chronological();
        Some(flight)
    }
}

#[async_trait]
impl FlightProvider for AirAsiaProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn search(
        &self,
        _criteria: &SearchCriteria,
    ) -> Result<Vec<UnifiedFlight>, ProviderError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            self.source.simulate_latency(50..150).await;
            if !self.attempt_fails() {
                break;
            }
            debug!("{}: attempt {} failed", NAME, attempt);
            if attempt >= MAX_ATTEMPTS {
                return Err(ProviderError::Unavailable {
                    provider: NAME.to_string(),
                    attempts: attempt,
                });
            }
        }

        let resp: AirAsiaResponse = self.source.load(PAYLOAD).await?;
        Ok(resp.flights.into_iter().filter_map(|f| self.normalize(f)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::fixture_source;

    #[tokio::test]
    async fn test_normalizes_payload() {
        let provider = AirAsiaProvider::new(fixture_source()).with_failure_rate(0.0);
        let flights = provider.search(&SearchCriteria::default()).await.unwrap();
        assert_eq!(flights.len(), 4);

        let qz7510 = &flights[0];
        assert_eq!(qz7510.id, "QZ7510_QZ");
        assert_eq!(qz7510.airline.code, "QZ");
        assert_eq!(qz7510.stops, 0);
        assert_eq!(qz7510.duration.total_minutes, 100);
        assert_eq!(qz7510.price.currency, "IDR");
        assert_eq!(qz7510.baggage.as_ref().unwrap().carry_on, "Cabin baggage only");

        let qz7250 = flights.iter().find(|f| f.flight_number == "QZ7250").unwrap();
        assert_eq!(qz7250.stops, 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_three_attempts() {
        let provider = AirAsiaProvider::new(fixture_source()).with_failure_rate(1.0);
        let err = provider.search(&SearchCriteria::default()).await.unwrap_err();
        match err {
            ProviderError::Unavailable { provider, attempts } => {
                assert_eq!(provider, "AirAsia");
                assert_eq!(attempts, MAX_ATTEMPTS);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_failure_rate_is_clamped() {
        let rate = |r: f64| {
            AirAsiaProvider::new(fixture_source())
                .with_failure_rate(r)
                .failure_rate
        };
        assert_eq!(rate(7.0), 1.0);
        assert_eq!(rate(-1.0), 0.0);
        assert_eq!(rate(f64::NAN), 0.0);
    }
}

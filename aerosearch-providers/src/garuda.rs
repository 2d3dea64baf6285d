use aerosearch_core::{
    AirlineInfo, BaggageInfo, DurationInfo, FlightPoint, FlightProvider, PriceInfo, ProviderError,
    SearchCriteria, UnifiedFlight,
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::mock::{parse_rfc3339, MockSource};

const NAME: &str = "Garuda Indonesia";
const PAYLOAD: &str = "garuda_indonesia_search_response.json";

#[derive(Debug, Deserialize)]
struct GarudaResponse {
    flights: Vec<GarudaFlight>,
}

#[derive(Debug, Deserialize)]
struct GarudaFlight {
    flight_id: String,
    airline: String,
    airline_code: String,
    departure: GarudaPoint,
    arrival: GarudaPoint,
    stops: u32,
    price: GarudaPrice,
    available_seats: u32,
    #[serde(default)]
    segments: Vec<GarudaSegment>,
    aircraft: Option<String>,
    #[serde(default)]
    amenities: Vec<String>,
    baggage: Option<GarudaBaggage>,
}

#[derive(Debug, Deserialize)]
struct GarudaPoint {
    airport: String,
    city: String,
    time: String,
}

#[derive(Debug, Deserialize)]
struct GarudaSegment {
    departure: GarudaSegmentTime,
    arrival: GarudaSegmentTime,
}

#[derive(Debug, Deserialize)]
struct GarudaSegmentTime {
    time: String,
}

#[derive(Debug, Deserialize)]
struct GarudaPrice {
    amount: f64,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct GarudaBaggage {
    carry_on: u32,
    checked: u32,
}

pub struct GarudaProvider {
    source: MockSource,
}

impl GarudaProvider {
    pub fn new(source: MockSource) -> Self {
        Self { source }
    }

    fn normalize(&self, raw: GarudaFlight) -> Option<UnifiedFlight> {
        let (Some(mut departure), Some(mut arrival)) =
            (parse_rfc3339(&raw.departure.time), parse_rfc3339(&raw.arrival.time))
        else {
            warn!("{}: skipping {} with unparseable times", NAME, raw.flight_id);
            return None;
        };

        // Connecting flights: gate-to-gate from the first and last segments.
        if raw.stops > 0 && raw.segments.len() >= 2 {
            let first = raw.segments.first().and_then(|s| parse_rfc3339(&s.departure.time));
            let last = raw.segments.last().and_then(|s| parse_rfc3339(&s.arrival.time));
            if let (Some(first), Some(last)) = (first, last) {
                departure = first;
                arrival = last;
            }
        }

        let mut flight = UnifiedFlight {
            id: format!("{}_GA", raw.flight_id),
            provider: NAME.to_string(),
            airline: AirlineInfo {
                name: raw.airline,
                code: raw.airline_code,
            },
            flight_number: raw.flight_id,
            departure: FlightPoint::new(raw.departure.airport, raw.departure.city, departure),
            arrival: FlightPoint::new(raw.arrival.airport, raw.arrival.city, arrival),
            duration: DurationInfo::between(&departure, &arrival),
            stops: raw.stops,
            price: PriceInfo::new(raw.price.amount, raw.price.currency),
            available_seats: raw.available_seats,
            cabin_class: "economy".to_string(),
            aircraft: raw.aircraft,
            amenities: raw.amenities,
            baggage: raw.baggage.map(|b| BaggageInfo {
                carry_on: format!("{} piece(s)", b.carry_on),
                checked: format!("{} piece(s)", b.checked),
            }),
            score: 0.0,
            is_valid: false,
        };
        flight.is_valid = flight.is_chronological();
        Some(flight)
    }
}

#[async_trait]
impl FlightProvider for GarudaProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn search(
        &self,
        _criteria: &SearchCriteria,
    ) -> Result<Vec<UnifiedFlight>, ProviderError> {
        self.source.simulate_latency(50..100).await;

        let resp: GarudaResponse = self.source.load(PAYLOAD).await?;
        Ok(resp.flights.into_iter().filter_map(|f| self.normalize(f)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::fixture_source;

    #[tokio::test]
    async fn test_normalizes_payload() {
        let provider = GarudaProvider::new(fixture_source());
        let flights = provider.search(&SearchCriteria::default()).await.unwrap();

        assert_eq!(flights.len(), 3);
        assert!(flights.iter().all(|f| f.is_valid && f.provider == "Garuda Indonesia"));

        let ga400 = &flights[0];
        assert_eq!(ga400.id, "GA400_GA");
        assert_eq!(ga400.airline.code, "GA");
        assert_eq!(ga400.duration.total_minutes, 110);
        assert_eq!(ga400.price.formatted_amount, "Rp1.250.000");
        assert_eq!(ga400.departure.local_date(), "2025-12-15");
        let baggage = ga400.baggage.as_ref().unwrap();
        assert_eq!(baggage.checked, "2 piece(s)");
        assert_eq!(ga400.amenities.len(), 3);
    }

    #[tokio::test]
    async fn test_connecting_flight_uses_segments() {
        let provider = GarudaProvider::new(fixture_source());
        let flights = provider.search(&SearchCriteria::default()).await.unwrap();

        let ga315 = flights.iter().find(|f| f.flight_number == "GA315").unwrap();
        assert_eq!(ga315.stops, 1);
        assert_eq!(ga315.departure.datetime, "2025-12-15T14:00:00+07:00");
        assert_eq!(ga315.arrival.datetime, "2025-12-15T19:10:00+08:00");
        assert_eq!(ga315.duration.formatted, "4h 10m");
    }

    #[test]
    fn test_reversed_times_are_flagged_invalid() {
        let provider = GarudaProvider::new(fixture_source());
        let raw: GarudaFlight = serde_json::from_value(serde_json::json!({
            "flight_id": "GA999",
            "airline": "Garuda Indonesia",
            "airline_code": "GA",
            "departure": {
                "airport": "CGK",
                "city": "Jakarta",
                "time": "2025-12-15T10:00:00+07:00"
            },
            "arrival": {
                "airport": "DPS",
                "city": "Denpasar",
                "time": "2025-12-15T09:00:00+08:00"
            },
            "stops": 0,
            "price": { "amount": 1000000, "currency": "IDR" },
            "available_seats": 5
        }))
        .unwrap();

        let flight = provider.normalize(raw).unwrap();
        assert!(!flight.is_valid);
        assert!(flight.baggage.is_none());
    }
}

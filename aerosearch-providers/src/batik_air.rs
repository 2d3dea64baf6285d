use aerosearch_core::{
    AirlineInfo, BaggageInfo, DurationInfo, FlightPoint, FlightProvider, PriceInfo, ProviderError,
    SearchCriteria, UnifiedFlight,
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::mock::{city_for, parse_compact_offset, MockSource};

const NAME: &str = "Batik Air";
const PAYLOAD: &str = "batik_air_search_response.json";

#[derive(Debug, Deserialize)]
struct BatikResponse {
    results: Vec<BatikFlight>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatikFlight {
    flight_number: String,
    airline_name: String,
    #[serde(rename = "airlineIATA")]
    airline_iata: String,
    origin: String,
    destination: String,
    departure_date_time: String,
    arrival_date_time: String,
    number_of_stops: u32,
    fare: BatikFare,
    seats_available: u32,
    aircraft_model: Option<String>,
    baggage_info: Option<String>,
    #[serde(default)]
    onboard_services: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatikFare {
    total_price: f64,
    currency_code: String,
}

pub struct BatikAirProvider {
    source: MockSource,
}

impl BatikAirProvider {
    pub fn new(source: MockSource) -> Self {
        Self { source }
    }

    fn normalize(&self, raw: BatikFlight) -> Option<UnifiedFlight> {
        let (Some(departure), Some(arrival)) = (
            parse_compact_offset(&raw.departure_date_time),
            parse_compact_offset(&raw.arrival_date_time),
        ) else {
            warn!("{}: skipping {} with unparseable times", NAME, raw.flight_number);
            return None;
        };

        let departure_city = city_for(&raw.origin).to_string();
        let arrival_city = city_for(&raw.destination).to_string();

        let mut flight = UnifiedFlight {
            id: format!("{}_ID", raw.flight_number),
            provider: NAME.to_string(),
            airline: AirlineInfo {
                name: raw.airline_name,
                code: raw.airline_iata,
            },
            flight_number: raw.flight_number,
            departure: FlightPoint::new(raw.origin, departure_city, departure),
            arrival: FlightPoint::new(raw.destination, arrival_city, arrival),
            duration: DurationInfo::between(&departure, &arrival),
            stops: raw.number_of_stops,
            price: PriceInfo::new(raw.fare.total_price, raw.fare.currency_code),
            available_seats: raw.seats_available,
            cabin_class: "economy".to_string(),
            aircraft: raw.aircraft_model,
            amenities: raw.onboard_services,
            baggage: raw.baggage_info.as_deref().map(BaggageInfo::from_note),
            score: 0.0,
            is_valid: false,
        };
        flight.is_valid = flight.is_chronological();
        Some(flight)
    }
}

#[async_trait]
impl FlightProvider for BatikAirProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn search(
        &self,
        _criteria: &SearchCriteria,
    ) -> Result<Vec<UnifiedFlight>, ProviderError> {
        self.source.simulate_latency(200..400).await;

        let resp: BatikResponse = self.source.load(PAYLOAD).await?;
        Ok(resp.results.into_iter().filter_map(|f| self.normalize(f)).collect())
    }
}

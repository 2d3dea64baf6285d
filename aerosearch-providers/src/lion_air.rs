use aerosearch_core::{
    AirlineInfo, BaggageInfo, DurationInfo, FlightPoint, FlightProvider, PriceInfo, ProviderError,
    SearchCriteria, UnifiedFlight,
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::mock::{parse_in_zone, MockSource};

const NAME: &str = "Lion Air";
const PAYLOAD: &str = "lion_air_search_response.json";

#[derive(Debug, Deserialize)]
struct LionResponse {
    data: LionData,
}

#[derive(Debug, Deserialize)]
struct LionData {
    available_flights: Vec<LionFlight>,
}

#[derive(Debug, Deserialize)]
struct LionFlight {
    id: String,
    carrier: LionCarrier,
    route: LionRoute,
    schedule: LionSchedule,
    stop_count: u32,
    pricing: LionPricing,
    seats_left: u32,
    plane_type: Option<String>,
    services: Option<LionServices>,
}

#[derive(Debug, Deserialize)]
struct LionCarrier {
    name: String,
    iata: String,
}

#[derive(Debug, Deserialize)]
struct LionRoute {
    from: LionAirport,
    to: LionAirport,
}

#[derive(Debug, Deserialize)]
struct LionAirport {
    code: String,
    city: String,
}

#[derive(Debug, Deserialize)]
struct LionSchedule {
    departure: String,
    departure_timezone: String,
    arrival: String,
    arrival_timezone: String,
}

#[derive(Debug, Deserialize)]
struct LionPricing {
    total: f64,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct LionServices {
    #[serde(default)]
    wifi_available: bool,
    #[serde(default)]
    meals_included: bool,
    baggage_allowance: Option<LionBaggage>,
}

#[derive(Debug, Deserialize)]
struct LionBaggage {
    cabin: String,
    hold: String,
}

pub struct LionAirProvider {
    source: MockSource,
}

impl LionAirProvider {
    pub fn new(source: MockSource) -> Self {
        Self { source }
    }

    fn normalize(&self, raw: LionFlight) -> Option<UnifiedFlight> {
        let schedule = &raw.schedule;
        let (Some(departure), Some(arrival)) = (
            parse_in_zone(&schedule.departure, &schedule.departure_timezone),
            parse_in_zone(&schedule.arrival, &schedule.arrival_timezone),
        ) else {
            warn!("{}: skipping {} with unparseable schedule", NAME, raw.id);
            return None;
        };

        let mut amenities = Vec::new();
        let mut baggage = None;
        if let Some(services) = raw.services {
            if services.wifi_available {
                amenities.push("wifi".to_string());
            }
            if services.meals_included {
                amenities.push("meal".to_string());
            }
            baggage = services.baggage_allowance.map(|b| BaggageInfo {
                carry_on: b.cabin,
                checked: b.hold,
            });
        }

        let mut flight = UnifiedFlight {
            id: format!("{}_JT", raw.id),
            provider: NAME.to_string(),
            airline: AirlineInfo {
                name: raw.carrier.name,
                code: raw.carrier.iata,
            },
            flight_number: raw.id,
            departure: FlightPoint::new(raw.route.from.code, raw.route.from.city, departure),
            arrival: FlightPoint::new(raw.route.to.code, raw.route.to.city, arrival),
            duration: DurationInfo::between(&departure, &arrival),
            stops: raw.stop_count,
            price: PriceInfo::new(raw.pricing.total, raw.pricing.currency),
            available_seats: raw.seats_left,
            cabin_class: "economy".to_string(),
            aircraft: raw.plane_type,
            amenities,
            baggage,
            score: 0.0,
            is_valid: false,
        };
        flight.is_valid = flight.is_chronological();
        Some(flight)
    }
}

#[async_trait]
impl FlightProvider for LionAirProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn search(
        &self,
        _criteria: &SearchCriteria,
    ) -> Result<Vec<UnifiedFlight>, ProviderError> {
        self.source.simulate_latency(100..200).await;

        let resp: LionResponse = self.source.load(PAYLOAD).await?;
        Ok(resp
            .data
            .available_flights
            .into_iter()
            .filter_map(|f| self.normalize(f))
            .collect())
    }
}

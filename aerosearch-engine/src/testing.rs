//! Fixtures shared by the engine's unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration as StdDuration;

use aerosearch_core::{
    AirlineInfo, DurationInfo, FlightPoint, FlightProvider, PriceInfo, ProviderError,
    SearchCriteria, UnifiedFlight,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset};

pub fn at(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

/// A valid, direct CGK -> DPS economy flight on 2025-03-01, departing 08:00 +07:00 for 110 minutes.
pub fn flight(id: &str, price: f64) -> UnifiedFlight {
    timed_flight(id, price, "2025-03-01T08:00:00+07:00", 110)
}

pub fn timed_flight(id: &str, price: f64, departure: &str, minutes: i64) -> UnifiedFlight {
    let dep = at(departure);
    let arr = dep + Duration::minutes(minutes);
    UnifiedFlight {
        id: id.to_string(),
        provider: "Test Provider".to_string(),
        airline: AirlineInfo {
            name: "Garuda Indonesia".to_string(),
            code: "GA".to_string(),
        },
        flight_number: id.to_string(),
        departure: FlightPoint::new("CGK", "Jakarta", dep),
        arrival: FlightPoint::new("DPS", "Denpasar", arr),
        duration: DurationInfo::between(&dep, &arr),
        stops: 0,
        price: PriceInfo::new(price, "IDR"),
        available_seats: 10,
        cabin_class: "economy".to_string(),
        aircraft: None,
        amenities: Vec::new(),
        baggage: None,
        score: 0.0,
        is_valid: true,
    }
}

pub fn criteria(sort_by: &str) -> SearchCriteria {
    SearchCriteria {
        origin: "CGK".to_string(),
        destination: "DPS".to_string(),
        departure_date: "2025-03-01".to_string(),
        passengers: 1,
        cabin_class: "economy".to_string(),
        sort_by: sort_by.to_string(),
        ..Default::default()
    }
}

/// Returns a fixed set of records, optionally after a delay, and counts its calls.
pub struct StaticProvider {
    pub name: String,
    pub flights: Vec<UnifiedFlight>,
    pub delay: Option<StdDuration>,
    pub calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new(name: &str, flights: Vec<UnifiedFlight>) -> Self {
        let flights = flights
            .into_iter()
            .map(|mut f| {
                f.provider = name.to_string();
                f
            })
            .collect();
        Self {
            name: name.to_string(),
            flights,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn delayed(mut self, delay: StdDuration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FlightProvider for StaticProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(
        &self,
        _criteria: &SearchCriteria,
    ) -> Result<Vec<UnifiedFlight>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.flights.clone())
    }
}

pub struct FailingProvider {
    pub name: String,
}

impl FailingProvider {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

#[async_trait]
impl FlightProvider for FailingProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(
        &self,
        _criteria: &SearchCriteria,
    ) -> Result<Vec<UnifiedFlight>, ProviderError> {
        Err(ProviderError::Unavailable {
            provider: self.name.clone(),
            attempts: 1,
        })
    }
}

pub struct PanickingProvider;

#[async_trait]
impl FlightProvider for PanickingProvider {
    fn name(&self) -> &str {
        "Panic Air"
    }

    async fn search(
        &self,
        _criteria: &SearchCriteria,
    ) -> Result<Vec<UnifiedFlight>, ProviderError> {
        panic!("malformed upstream payload");
    }
}

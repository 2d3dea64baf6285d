use std::cmp::Ordering;

use aerosearch_core::{SortKey, UnifiedFlight};

// Best-value weights. Fixed policy: one stop costs as much as 5,000,000 in price.
pub const PRICE_DIVISOR: f64 = 1000.0;
pub const MINUTE_WEIGHT: f64 = 5.0;
pub const STOP_WEIGHT: f64 = 5000.0;

/// Lower is better.
pub fn best_value_score(flight: &UnifiedFlight) -> f64 {
    flight.price.amount / PRICE_DIVISOR
        + flight.duration.total_minutes as f64 * MINUTE_WEIGHT
        + flight.stops as f64 * STOP_WEIGHT
}

/// Attach a fresh score to every record.
pub fn calculate_best_value(flights: &mut [UnifiedFlight]) {
    for flight in flights.iter_mut() {
        flight.score = best_value_score(flight);
    }
}

/// Stable sort by `key`; ties keep their incoming order.
pub fn sort_flights(flights: &mut [UnifiedFlight], key: SortKey) {
    flights.sort_by(|a, b| compare(a, b, key));
}

fn compare(a: &UnifiedFlight, b: &UnifiedFlight, key: SortKey) -> Ordering {
    match key {
        SortKey::PriceAsc => a.price.amount.total_cmp(&b.price.amount),
        SortKey::PriceDesc => b.price.amount.total_cmp(&a.price.amount),
        SortKey::DurationAsc => a.duration.total_minutes.cmp(&b.duration.total_minutes),
        SortKey::DurationDesc => b.duration.total_minutes.cmp(&a.duration.total_minutes),
        SortKey::DepartureTimeAsc => a.departure.timestamp.cmp(&b.departure.timestamp),
        SortKey::ArrivalTimeAsc => a.arrival.timestamp.cmp(&b.arrival.timestamp),
        SortKey::BestValue => a.score.total_cmp(&b.score),
    }
}

/// Score, then order. Scoring runs for every key so each record carries its score.
pub fn rank_flights(flights: &mut [UnifiedFlight], key: SortKey) {
    calculate_best_value(flights);
    sort_flights(flights, key);
}

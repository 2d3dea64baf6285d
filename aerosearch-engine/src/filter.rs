use std::collections::HashSet;

use aerosearch_core::{SearchCriteria, UnifiedFlight};
use chrono::{NaiveTime, Timelike};

const TIME_BOUND_FORMAT: &str = "%H:%M";

/// Inclusive optional bounds; a missing side is unbounded.
#[derive(Debug, Clone, Copy)]
struct Range<T> {
    min: Option<T>,
    max: Option<T>,
}

impl<T: PartialOrd + Copy> Range<T> {
    fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    fn contains(&self, value: T) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// `HH:MM` to minutes since midnight. Anything unparseable means "no bound".
fn parse_time_bound(raw: Option<&str>) -> Option<u32> {
    let time = NaiveTime::parse_from_str(raw?.trim(), TIME_BOUND_FORMAT).ok()?;
    Some(time.hour() * 60 + time.minute())
}

/// The request's constraints, parsed once and applied to every record.
pub struct FlightFilter<'a> {
    criteria: &'a SearchCriteria,
    price: Range<f64>,
    stops: Range<u32>,
    duration: Range<i64>,
    departure_window: Range<u32>,
    arrival_window: Range<u32>,
    airlines: HashSet<&'a str>,
}

impl<'a> FlightFilter<'a> {
    pub fn new(criteria: &'a SearchCriteria) -> Self {
        let opts = &criteria.filters;
        Self {
            criteria,
            price: Range::new(opts.min_price, opts.max_price),
            stops: Range::new(None, opts.max_stops),
            duration: Range::new(opts.min_duration, opts.max_duration),
            departure_window: Range::new(
                parse_time_bound(opts.min_dep_time.as_deref()),
                parse_time_bound(opts.max_dep_time.as_deref()),
            ),
            arrival_window: Range::new(
                parse_time_bound(opts.min_arr_time.as_deref()),
                parse_time_bound(opts.max_arr_time.as_deref()),
            ),
            airlines: opts.airlines.iter().map(String::as_str).collect(),
        }
    }

    pub fn matches(&self, flight: &UnifiedFlight) -> bool {
        let c = self.criteria;

        if flight.departure.airport != c.origin || flight.arrival.airport != c.destination {
            return false;
        }
        if !c.cabin_class.is_empty() && flight.cabin_class != c.cabin_class {
            return false;
        }
        if c.passengers > 0 && flight.available_seats < c.passengers {
            return false;
        }
        if flight.departure.local_date() != c.departure_date {
            return false;
        }

        if !self.price.contains(flight.price.amount)
            || !self.stops.contains(flight.stops)
            || !self.duration.contains(flight.duration.total_minutes)
        {
            return false;
        }

        if !self.airlines.is_empty() && !self.airlines.contains(flight.airline.name.as_str()) {
            return false;
        }

        self.departure_window.contains(flight.departure.minutes_since_midnight())
            && self.arrival_window.contains(flight.arrival.minutes_since_midnight())
    }
}

/// Keeps the records that satisfy every constraint in `criteria`, preserving order.
pub fn filter_flights(
    flights: Vec<UnifiedFlight>,
    criteria: &SearchCriteria,
) -> Vec<UnifiedFlight> {
    let filter = FlightFilter::new(criteria);
    flights.into_iter().filter(|f| filter.matches(f)).collect()
}

use chrono::{DateTime, FixedOffset, SecondsFormat, Timelike};
use serde::{Deserialize, Serialize};

use crate::format::{format_duration, format_idr};

/// A flight normalized from any provider's payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedFlight {
    pub id: String,
    pub provider: String,
    pub airline: AirlineInfo,
    pub flight_number: String,
    pub departure: FlightPoint,
    pub arrival: FlightPoint,
    pub duration: DurationInfo,
    pub stops: u32,
    pub price: PriceInfo,
    pub available_seats: u32,
    pub cabin_class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baggage: Option<BaggageInfo>,
    #[serde(default, rename = "best_value_score")]
    pub score: f64,
    /// Set by the adapter; invalid records never leave the fetch stage.
    #[serde(skip)]
    pub is_valid: bool,
}

impl UnifiedFlight {
    /// Arrival must be strictly after departure.
    pub fn is_chronological(&self) -> bool {
        self.arrival.time_of_day > self.departure.time_of_day
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirlineInfo {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightPoint {
    pub airport: String,
    pub city: String,
    pub datetime: String,
    pub timestamp: i64,
    /// Local wall-clock instant; date and time-of-day filters read this, not UTC.
    pub time_of_day: DateTime<FixedOffset>,
}

impl FlightPoint {
    pub fn new(
        airport: impl Into<String>,
        city: impl Into<String>,
        at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            airport: airport.into(),
            city: city.into(),
            datetime: at.to_rfc3339_opts(SecondsFormat::Secs, true),
            timestamp: at.timestamp(),
            time_of_day: at,
        }
    }

    pub fn local_date(&self) -> String {
        self.time_of_day.format("%Y-%m-%d").to_string()
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.time_of_day.hour() * 60 + self.time_of_day.minute()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationInfo {
    pub total_minutes: i64,
    pub formatted: String,
}

impl DurationInfo {
    pub fn between(departure: &DateTime<FixedOffset>, arrival: &DateTime<FixedOffset>) -> Self {
        let total_minutes = (*arrival - *departure).num_minutes();
        Self {
            total_minutes,
            formatted: format_duration(total_minutes),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaggageInfo {
    pub carry_on: String,
    pub checked: String,
}

impl BaggageInfo {
    /// Splits a free-text note such as `"7kg cabin, 20kg checked"`.
    pub fn from_note(note: &str) -> Self {
        let mut parts = note.split(',').map(str::trim);
        Self {
            carry_on: parts.next().unwrap_or_default().to_string(),
            checked: parts.next().unwrap_or_default().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceInfo {
    pub amount: f64,
    pub formatted_amount: String,
    pub currency: String,
}

impl PriceInfo {
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            formatted_amount: format_idr(amount),
            currency: currency.into(),
        }
    }
}

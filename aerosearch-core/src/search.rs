use serde::{Deserialize, Deserializer, Serialize};

use crate::flight::UnifiedFlight;
use crate::{CoreError, CoreResult};

pub const DEFAULT_SORT: &str = "best_value";

// Missing required fields deserialize as empty and are caught by `validate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchCriteria {
    pub origin: String,
    pub destination: String,
    pub departure_date: String, // YYYY-MM-DD
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub passengers: u32,
    #[serde(default)]
    pub cabin_class: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub filters: FilterOptions,
    #[serde(default)]
    pub sort_by: String,
}

impl SearchCriteria {
    /// Checks the fields every search needs before it can reach the aggregator.
    pub fn validate(&self) -> CoreResult<()> {
        let missing: Vec<&str> = [
            ("origin", &self.origin),
            ("destination", &self.destination),
            ("departureDate", &self.departure_date),
        ]
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::ValidationError(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )))
        }
    }

    pub fn sort_key(&self) -> SortKey {
        SortKey::parse(&self.sort_by)
    }
}

/// Optional display constraints. `None` (or an empty airline list) means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_stops: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub airlines: Vec<String>,
    #[serde(default, rename = "minDurationMinutes")]
    pub min_duration: Option<i64>,
    #[serde(default, rename = "maxDurationMinutes")]
    pub max_duration: Option<i64>,
    #[serde(default)]
    pub min_dep_time: Option<String>, // HH:MM
    #[serde(default)]
    pub max_dep_time: Option<String>,
    #[serde(default)]
    pub min_arr_time: Option<String>,
    #[serde(default)]
    pub max_arr_time: Option<String>,
}

/// Explicit `null` reads the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    DurationAsc,
    DurationDesc,
    DepartureTimeAsc,
    ArrivalTimeAsc,
    BestValue,
}

impl SortKey {
    /// Unknown or empty keys fall back to best value.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "price_asc" => SortKey::PriceAsc,
            "price_desc" => SortKey::PriceDesc,
            "duration_asc" => SortKey::DurationAsc,
            "duration_desc" => SortKey::DurationDesc,
            "dep_time_asc" => SortKey::DepartureTimeAsc,
            "arr_time_asc" => SortKey::ArrivalTimeAsc,
            _ => SortKey::BestValue,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::DurationAsc => "duration_asc",
            SortKey::DurationDesc => "duration_desc",
            SortKey::DepartureTimeAsc => "dep_time_asc",
            SortKey::ArrivalTimeAsc => "arr_time_asc",
            SortKey::BestValue => DEFAULT_SORT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub search_criteria: SearchCriteria,
    pub metadata: ResponseMetadata,
    pub flights: Vec<UnifiedFlight>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    pub total_results: usize,
    pub providers_queried: usize,
    pub providers_succeeded: usize,
    pub providers_failed: usize,
    pub search_time_ms: u64,
    pub cache_hit: bool,
}

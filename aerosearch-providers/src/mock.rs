//! Canned-payload plumbing shared by the providers: file loading, simulated
//! network latency and timestamp parsing.

use std::ops::Range;
use std::path::PathBuf;
use std::time::Duration;

use aerosearch_core::ProviderError;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rand::Rng;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct MockSource {
    dir: PathBuf,
    simulate_latency: bool,
}

impl MockSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            simulate_latency: true,
        }
    }

    pub fn without_latency(mut self) -> Self {
        self.simulate_latency = false;
        self
    }

    /// Sleeps for a random duration in `range_ms`, unless latency simulation is off.
    pub async fn simulate_latency(&self, range_ms: Range<u64>) {
        if !self.simulate_latency || range_ms.is_empty() {
            return;
        }
        let ms = rand::thread_rng().gen_range(range_ms);
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    pub async fn load<T: DeserializeOwned>(&self, file: &str) -> Result<T, ProviderError> {
        let raw = tokio::fs::read(self.dir.join(file)).await?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

pub fn parse_rfc3339(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}

/// `2025-12-15T07:15:00+0700`
pub fn parse_compact_offset(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z").ok()
}

/// Naive local time plus an IANA zone name. Unknown zones are read as Jakarta time.
pub fn parse_in_zone(raw: &str, zone: &str) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()?;
    naive.and_local_timezone(indonesian_zone_offset(zone)?).single()
}

fn indonesian_zone_offset(zone: &str) -> Option<FixedOffset> {
    let hours = match zone {
        "Asia/Makassar" => 8,
        "Asia/Jayapura" => 9,
        _ => 7,
    };
    FixedOffset::east_opt(hours * 3600)
}

/// City name for the airports the mock payloads cover; falls back to the code.
pub fn city_for(airport: &str) -> &str {
    match airport {
        "CGK" | "HLP" => "Jakarta",
        "DPS" => "Denpasar",
        "SUB" => "Surabaya",
        "UPG" => "Makassar",
        "KNO" => "Medan",
        "YIA" | "JOG" => "Yogyakarta",
        "SOC" => "Solo",
        "DJJ" => "Jayapura",
        other => other,
    }
}

#[cfg(test)]
pub(crate) fn fixture_source() -> MockSource {
    MockSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../mock")).without_latency()
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Query key for the weather provider: a free-text city name or a
/// coordinate pair. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::City(name) => f.write_str(name),
            Location::Coordinates { lat, lon } => write!(f, "{lat:.4}, {lon:.4}"),
        }
    }
}

/// A coordinate pair produced by a [`crate::geo::LocationSource`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Single-point-in-time weather snapshot for a location, in metric units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: u32,
    pub visibility_km: f64,
    pub cloudiness_pct: u8,
    /// Provider condition code, e.g. "01d".
    pub condition_code: String,
    pub condition: String,
    pub observed_at: DateTime<Utc>,
}

/// One day's representative snapshot, reduced from the 3-hourly forecast
/// feed by picking the entry nearest local noon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Local calendar date at the queried location.
    pub date: NaiveDate,
    pub temperature_c: f64,
    pub condition_code: String,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
}

/// A remembered city and its last-observed temperature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentSearch {
    pub city: String,
    pub temperature_c: i32,
}

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Timelike, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::{BTreeMap, btree_map::Entry};

use crate::{
    error::QueryError,
    model::{CurrentConditions, ForecastDay, Location},
};

use super::{FORECAST_DAYS, WeatherQuery};

pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const NOON_SECS: i64 = 12 * 3600;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, OPENWEATHER_BASE_URL.to_string())
    }

    /// Point the provider at a different base URL. Used by HTTP-level tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    async fn get_body(
        &self,
        endpoint: &'static str,
        location: &Location,
    ) -> Result<String, QueryError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut params = location_params(location);
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));

        let res = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| QueryError::FetchFailed {
                endpoint,
                reason: e.to_string(),
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| QueryError::FetchFailed {
            endpoint,
            reason: e.to_string(),
        })?;

        if status == StatusCode::NOT_FOUND {
            return Err(QueryError::NotFound);
        }

        if !status.is_success() {
            return Err(QueryError::FetchFailed {
                endpoint,
                reason: format!("status {}: {}", status, truncate_body(&body)),
            });
        }

        Ok(body)
    }

    async fn fetch_current(&self, location: &Location) -> Result<CurrentConditions, QueryError> {
        let body = self.get_body("weather", location).await?;

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|e| QueryError::Parse {
                endpoint: "weather",
                reason: e.to_string(),
            })?;

        let observed_at = DateTime::from_timestamp(parsed.dt, 0).unwrap_or_else(Utc::now);
        let (condition_code, condition) = condition_of(&parsed.weather);

        Ok(CurrentConditions {
            city: parsed.name,
            country: parsed.sys.country,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            pressure_hpa: parsed.main.pressure,
            visibility_km: parsed.visibility.map_or(0.0, |m| f64::from(m) / 1000.0),
            cloudiness_pct: parsed.clouds.all,
            condition_code,
            condition,
            observed_at,
        })
    }

    async fn fetch_forecast(&self, location: &Location) -> Result<Vec<ForecastDay>, QueryError> {
        let body = self.get_body("forecast", location).await?;

        let parsed: OwForecastResponse =
            serde_json::from_str(&body).map_err(|e| QueryError::Parse {
                endpoint: "forecast",
                reason: e.to_string(),
            })?;

        Ok(select_daily(&parsed.list, parsed.city.timezone, Utc::now()))
    }
}

#[async_trait]
impl WeatherQuery for OpenWeatherProvider {
    async fn current_and_forecast(
        &self,
        location: &Location,
    ) -> Result<(CurrentConditions, Vec<ForecastDay>), QueryError> {
        tracing::debug!(%location, "querying OpenWeather");

        let (current, forecast) =
            tokio::join!(self.fetch_current(location), self.fetch_forecast(location));

        Ok((current?, forecast?))
    }
}

fn location_params(location: &Location) -> Vec<(&'static str, String)> {
    match location {
        Location::City(name) => vec![("q", name.clone())],
        Location::Coordinates { lat, lon } => {
            vec![("lat", lat.to_string()), ("lon", lon.to_string())]
        }
    }
}

/// Reduce the 3-hourly feed to one representative entry per future local
/// calendar day: the entry nearest local noon. Today is excluded; fewer
/// than [`FORECAST_DAYS`] qualifying days yield fewer entries, never an
/// error.
fn select_daily(
    entries: &[OwForecastEntry],
    utc_offset_secs: i32,
    now: DateTime<Utc>,
) -> Vec<ForecastDay> {
    let offset = i64::from(utc_offset_secs);
    let Some(today) = local_date(now.timestamp(), offset) else {
        return Vec::new();
    };

    let mut best: BTreeMap<NaiveDate, (i64, &OwForecastEntry)> = BTreeMap::new();

    for entry in entries {
        let Some(local) = DateTime::from_timestamp(entry.dt + offset, 0) else {
            continue;
        };
        let date = local.date_naive();
        if date <= today {
            continue;
        }

        let noon_dist = (i64::from(local.time().num_seconds_from_midnight()) - NOON_SECS).abs();
        match best.entry(date) {
            Entry::Vacant(slot) => {
                slot.insert((noon_dist, entry));
            }
            Entry::Occupied(mut slot) => {
                if noon_dist < slot.get().0 {
                    slot.insert((noon_dist, entry));
                }
            }
        }
    }

    best.into_iter()
        .take(FORECAST_DAYS)
        .map(|(date, (_, entry))| {
            let (condition_code, condition) = condition_of(&entry.weather);
            ForecastDay {
                date,
                temperature_c: entry.main.temp,
                condition_code,
                condition,
                humidity_pct: entry.main.humidity,
                wind_speed_mps: entry.wind.speed,
            }
        })
        .collect()
}

fn local_date(unix: i64, offset_secs: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(unix + offset_secs, 0).map(|dt| dt.date_naive())
}

fn condition_of(weather: &[OwWeather]) -> (String, String) {
    weather
        .first()
        .map(|w| (w.icon.clone(), w.description.clone()))
        .unwrap_or_else(|| ("unknown".to_string(), "Unknown".to_string()))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    visibility: Option<u32>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    clouds: OwClouds,
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    /// Shift from UTC in seconds at the forecast location.
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(dt: i64, temp: f64) -> OwForecastEntry {
        OwForecastEntry {
            dt,
            main: OwMain {
                temp,
                feels_like: temp,
                humidity: 60,
                pressure: 1012,
            },
            weather: vec![OwWeather {
                description: "clear sky".to_string(),
                icon: "01d".to_string(),
            }],
            wind: OwWind { speed: 3.0 },
        }
    }

    fn ts(y: i32, mo: u32, d: u32, h: u32) -> i64 {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap().timestamp()
    }

    #[test]
    fn takes_at_most_three_future_days_in_order() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let mut entries = Vec::new();
        for day in 1..=5 {
            for hour in [0, 3, 6, 9, 12, 15, 18, 21] {
                entries.push(entry(ts(2024, 5, day, hour), 10.0));
            }
        }

        let days = select_daily(&entries, 0, now);

        assert_eq!(days.len(), 3);
        let dates: Vec<_> = days.iter().map(|d| d.date).collect();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
        // Today (May 1) never appears.
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    }

    #[test]
    fn picks_entry_nearest_local_noon() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let entries = vec![
            entry(ts(2024, 5, 2, 6), 6.0),
            entry(ts(2024, 5, 2, 12), 12.0),
            entry(ts(2024, 5, 2, 21), 21.0),
        ];

        let days = select_daily(&entries, 0, now);

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].temperature_c, 12.0);
    }

    #[test]
    fn fewer_qualifying_days_yield_fewer_entries() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let entries = vec![
            entry(ts(2024, 5, 1, 12), 10.0), // today, dropped
            entry(ts(2024, 5, 2, 12), 11.0),
        ];

        let days = select_daily(&entries, 0, now);

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    }

    #[test]
    fn utc_offset_shifts_day_bucketing() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        // 23:00 UTC on May 1 is already May 2 at UTC+2.
        let entries = vec![entry(ts(2024, 5, 1, 23), 15.0)];

        assert!(select_daily(&entries, 0, now).is_empty());

        let shifted = select_daily(&entries, 7200, now);
        assert_eq!(shifted.len(), 1);
        assert_eq!(
            shifted[0].date,
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
        );
    }

    #[test]
    fn empty_feed_is_not_an_error() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        assert!(select_daily(&[], 0, now).is_empty());
    }
}

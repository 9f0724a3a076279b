//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather query service (OpenWeatherMap current + forecast)
//! - The bounded recent-search store
//! - The location capability and search suggestions
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod geo;
pub mod model;
pub mod provider;
pub mod store;
pub mod suggest;

pub use config::Config;
pub use error::{LocationError, QueryError};
pub use geo::{IpLocator, LocationSource};
pub use model::{Coordinates, CurrentConditions, ForecastDay, Location, RecentSearch};
pub use provider::{FORECAST_DAYS, WeatherQuery, openweather::OpenWeatherProvider};
pub use store::{MAX_RECENT, RecentSearches};

use crate::{
    error::QueryError,
    model::{CurrentConditions, ForecastDay, Location},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Maximum number of reduced forecast days a query yields.
pub const FORECAST_DAYS: usize = 3;

/// Abstraction over the weather provider, so the interaction layer can be
/// exercised with an in-memory fake.
#[async_trait]
pub trait WeatherQuery: Send + Sync + Debug {
    /// Fetch current conditions and the reduced daily forecast for a
    /// location. All-or-nothing: a forecast without matching current data
    /// is meaningless, so either request failing fails the whole call.
    async fn current_and_forecast(
        &self,
        location: &Location,
    ) -> Result<(CurrentConditions, Vec<ForecastDay>), QueryError>;
}

//! Interaction controller: wires triggering events (text submit, suggestion
//! or recent-search pick, location request) to the query service, the
//! recent-search store, and transient UI state. One search runs at a time:
//! every query path takes `&mut self`, so a stale response can never
//! overwrite a newer one.

use skycast_core::{
    CurrentConditions, ForecastDay, Location, LocationError, LocationSource, QueryError,
    RecentSearch, RecentSearches, WeatherQuery, suggest,
};

/// Result of one successful search, handed to the renderer.
#[derive(Debug)]
pub struct Dashboard {
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
}

/// Transient state owned by the controller; never persisted.
#[derive(Debug, Default)]
pub struct UiState {
    pub loading: bool,
    pub suggestions: Vec<String>,
    pub error: Option<String>,
}

pub struct App<Q, L> {
    query: Q,
    locator: L,
    recent: RecentSearches,
    ui: UiState,
}

impl<Q: WeatherQuery, L: LocationSource> App<Q, L> {
    pub fn new(query: Q, locator: L, recent: RecentSearches) -> Self {
        Self {
            query,
            locator,
            recent,
            ui: UiState::default(),
        }
    }

    /// Text submission, suggestion pick, and recent-city pick all funnel
    /// here. Empty input fails locally; the query service is never invoked.
    pub async fn submit(&mut self, input: &str) -> Option<Dashboard> {
        let city = input.trim();
        if city.is_empty() {
            self.ui.error = Some("Please enter a city name".to_string());
            return None;
        }

        self.run_query(Location::City(city.to_string())).await
    }

    /// Geolocation path: resolve a position, then search by coordinates.
    /// Capability failures surface locally without a weather query.
    pub async fn locate(&mut self) -> Option<Dashboard> {
        match self.locator.locate().await {
            Ok(coords) => {
                self.run_query(Location::Coordinates {
                    lat: coords.lat,
                    lon: coords.lon,
                })
                .await
            }
            Err(e) => {
                self.ui.error = Some(location_message(&e));
                None
            }
        }
    }

    /// Keystroke handler: refresh the suggestion list from the static
    /// popular-city set.
    pub fn input_changed(&mut self, input: &str) {
        self.ui.suggestions = suggest::filter(input)
            .into_iter()
            .map(str::to_string)
            .collect();
    }

    pub fn dismiss_error(&mut self) {
        self.ui.error = None;
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn recent(&self) -> &[RecentSearch] {
        self.recent.entries()
    }

    async fn run_query(&mut self, location: Location) -> Option<Dashboard> {
        self.ui.loading = true;
        let result = self.query.current_and_forecast(&location).await;
        self.ui.loading = false;

        match result {
            Ok((current, forecast)) => {
                // Coordinate lookups resolve to the API-reported city name.
                if let Err(e) = self.recent.record(&current.city, current.temperature_c) {
                    tracing::warn!(error = %e, "failed to persist recent searches");
                }
                self.ui.suggestions.clear();
                self.ui.error = None;
                Some(Dashboard { current, forecast })
            }
            Err(e) => {
                self.ui.error = Some(query_message(&e));
                None
            }
        }
    }
}

fn query_message(err: &QueryError) -> String {
    match err {
        QueryError::NotFound => {
            "City not found. Please check the spelling and try again.".to_string()
        }
        QueryError::FetchFailed { .. } | QueryError::Parse { .. } => {
            "Failed to fetch weather data. Please try again.".to_string()
        }
    }
}

fn location_message(err: &LocationError) -> String {
    match err {
        LocationError::Unavailable => {
            "Location detection is not available. Please search by city name.".to_string()
        }
        LocationError::Denied => {
            "Unable to retrieve your location. Please search by city name.".to_string()
        }
    }
}

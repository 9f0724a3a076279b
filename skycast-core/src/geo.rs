//! Platform location capability.
//!
//! The production source resolves the machine's position from its public IP
//! via a free, keyless endpoint; tests substitute fakes through the
//! [`LocationSource`] trait.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{error::LocationError, model::Coordinates};

pub const IP_API_BASE_URL: &str = "http://ip-api.com";

/// Ask-once position lookup: yields a coordinate pair or a failure.
#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, LocationError>;
}

/// Resolves the caller's position from its public IP address.
#[derive(Debug, Clone)]
pub struct IpLocator {
    http: Client,
    base_url: String,
}

impl IpLocator {
    pub fn new() -> Self {
        Self::with_base_url(IP_API_BASE_URL.to_string())
    }

    /// Point the locator at a different base URL. Used by HTTP-level tests.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[async_trait]
impl LocationSource for IpLocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        let url = format!("{}/json", self.base_url);

        let res = self.http.get(&url).send().await.map_err(|e| {
            tracing::debug!(error = %e, "location request failed");
            LocationError::Unavailable
        })?;

        if !res.status().is_success() {
            return Err(LocationError::Unavailable);
        }

        let parsed: IpApiResponse = res.json().await.map_err(|e| {
            tracing::debug!(error = %e, "location response undecodable");
            LocationError::Unavailable
        })?;

        if parsed.status != "success" {
            return Err(LocationError::Denied);
        }

        match (parsed.lat, parsed.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates { lat, lon }),
            _ => Err(LocationError::Unavailable),
        }
    }
}

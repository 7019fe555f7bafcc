//! Open-Meteo client for geocoding and current weather
//!
//! This module provides HTTP client functionality for resolving city names
//! to coordinates and retrieving current weather from the Open-Meteo API.
//! No API key is required. Requests are made once with a fixed timeout,
//! with no retries; failures surface to the caller.

use crate::config::WeatherConfig;
use crate::models::{Location, WeatherReport};
use crate::{MeteoBotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Upstream lookups as seen by the conversation controller.
///
/// `resolve_city` distinguishes "no usable match" (`Ok(None)`) from an
/// upstream failure (`Err`); the caller prompts a retry for the former and
/// replies with a try-again-later message for the latter.
#[async_trait]
pub trait WeatherService: Send + Sync {
    /// Resolve a free-text city name to a location
    async fn resolve_city(&self, city: &str) -> Result<Option<Location>>;

    /// Fetch current weather for a resolved location
    async fn current_weather(&self, location: &Location) -> Result<WeatherReport>;
}

/// Weather API client for Open-Meteo
pub struct WeatherApiClient {
    /// HTTP client
    client: Client,
    /// API configuration
    config: WeatherConfig,
}

impl WeatherApiClient {
    /// Create a new weather API client
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("meteobot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MeteoBotError::weather(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MeteoBotError::weather(format!("Request to Open-Meteo failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MeteoBotError::weather(format!(
                "Open-Meteo request failed with status {status}"
            )));
        }

        response.json().await.map_err(|e| {
            MeteoBotError::weather(format!("Failed to parse Open-Meteo response: {e}"))
        })
    }
}

#[async_trait]
impl WeatherService for WeatherApiClient {
    async fn resolve_city(&self, city: &str) -> Result<Option<Location>> {
        let city = city.trim();
        let url = format!(
            "{}/v1/search?name={}&count=1&language=en&format=json",
            self.config.geocoding_base_url,
            urlencoding::encode(city)
        );

        debug!("Geocoding '{city}'");
        let response: openmeteo::GeocodingResponse = self.get_json(&url).await?;

        let location = first_match(response);
        match &location {
            Some(location) => debug!(
                "Resolved '{city}' to {}, {} at ({})",
                location.name,
                location.country,
                location.format_coordinates()
            ),
            None => info!("No geocoding match for '{city}'"),
        }

        Ok(location)
    }

    async fn current_weather(&self, location: &Location) -> Result<WeatherReport> {
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&current=temperature_2m,weather_code",
            self.config.forecast_base_url, location.latitude, location.longitude
        );

        debug!(
            "Fetching current weather for {} ({})",
            location.name,
            location.format_coordinates()
        );
        let response: openmeteo::ForecastResponse = self.get_json(&url).await?;

        report_from_response(location.clone(), response)
    }
}

/// Extract the first usable geocoding match. A match missing any of its
/// fields is treated the same as no match.
fn first_match(response: openmeteo::GeocodingResponse) -> Option<Location> {
    let first = response.results.unwrap_or_default().into_iter().next()?;
    Some(Location::new(
        first.name?,
        first.country?,
        first.latitude?,
        first.longitude?,
    ))
}

/// Build a report from the forecast response, rounding the temperature
/// to the nearest whole degree.
fn report_from_response(
    location: Location,
    response: openmeteo::ForecastResponse,
) -> Result<WeatherReport> {
    let current = response.current.ok_or_else(|| {
        MeteoBotError::weather("Open-Meteo forecast response contained no current block")
    })?;

    #[allow(clippy::cast_possible_truncation)]
    let temperature_c = current.temperature.round() as i32;

    Ok(WeatherReport::new(
        location,
        temperature_c,
        current.weather_code,
    ))
}

/// `OpenMeteo` API response structures
mod openmeteo {
    use serde::Deserialize;

    /// Geocoding response from `OpenMeteo`
    #[derive(Debug, Deserialize)]
    pub struct GeocodingResponse {
        pub results: Option<Vec<GeocodingResult>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResult {
        pub name: Option<String>,
        pub latitude: Option<f64>,
        pub longitude: Option<f64>,
        pub country: Option<String>,
    }

    /// Current weather response from `OpenMeteo`
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub current: Option<CurrentData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentData {
        #[serde(rename = "temperature_2m")]
        pub temperature: f64,
        pub weather_code: u8,
    }
}

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Request, Url};
use std::time::Duration;

use crate::{
    error::FetchError,
    model::{Coordinate, WeatherResponse},
};

use super::ForecastProvider;

pub const OPEN_METEO_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Hourly series requested alongside the current-weather block.
const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m,visibility";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    endpoint: Url,
    http: Client,
}

impl OpenMeteoProvider {
    /// `timeout` of `None` lets a request wait for as long as the transport does.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid forecast endpoint '{endpoint}'"))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { endpoint, http })
    }

    /// Build the GET request for a coordinate. Latitude and longitude are
    /// passed through as typed, in that order.
    pub fn build_request(&self, coordinate: &Coordinate) -> Result<Request, reqwest::Error> {
        self.http
            .get(self.endpoint.clone())
            .query(&[
                ("latitude", coordinate.latitude.as_str()),
                ("longitude", coordinate.longitude.as_str()),
                ("current_weather", "true"),
                ("hourly", HOURLY_FIELDS),
                ("timezone", "auto"),
            ])
            .build()
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn forecast(&self, coordinate: &Coordinate) -> Result<WeatherResponse, FetchError> {
        let request = self.build_request(coordinate)?;
        tracing::debug!(url = %request.url(), "Requesting Open-Meteo forecast");

        let res = self.http.execute(request).await?;

        let status = res.status();
        if !status.is_success() {
            tracing::debug!(%status, "Open-Meteo answered with a non-success status");
            return Err(FetchError::Status(status));
        }

        let body = res.text().await?;
        let parsed: WeatherResponse = serde_json::from_str(&body)?;

        Ok(parsed)
    }
}

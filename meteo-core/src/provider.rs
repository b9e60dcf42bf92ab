use crate::{
    Config, Coordinate, WeatherResponse, error::FetchError,
    provider::openmeteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc, time::Duration};

pub mod openmeteo;

/// Anything that can turn a coordinate into a forecast payload.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn forecast(&self, coordinate: &Coordinate) -> Result<WeatherResponse, FetchError>;
}

/// Construct the Open-Meteo provider using the endpoint and timeout from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn ForecastProvider>> {
    let timeout = config.timeout_secs.map(Duration::from_secs);
    let provider = OpenMeteoProvider::new(config.endpoint(), timeout)?;

    Ok(Arc::new(provider))
}

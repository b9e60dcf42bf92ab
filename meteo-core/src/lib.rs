//! Core library for the `meteo` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The Open-Meteo forecast provider and its error type
//! - The form state machine and current-hour lookup
//!
//! It is used by `meteo-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod form;
pub mod hourly;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::{FETCH_FAILED_MESSAGE, FetchError};
pub use form::{Action, FetchTicket, Form, RequestId, RequestState, SettlePolicy, run_fetch};
pub use hourly::{HourLookup, HourReading, current_hour};
pub use model::{Coordinate, CurrentWeather, HourlySeries, WeatherCondition, WeatherResponse};
pub use provider::{ForecastProvider, openmeteo::OpenMeteoProvider, provider_from_config};

use reqwest::StatusCode;
use thiserror::Error;

/// Message shown for any non-success HTTP status.
pub const FETCH_FAILED_MESSAGE: &str = "Could not fetch weather data";

/// Errors that can occur while fetching a forecast.
///
/// `Display` is what ends up in the error banner: the status variant collapses
/// to a fixed message, the others forward the underlying message verbatim.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint answered with a non-success status.
    #[error("Could not fetch weather data")]
    Status(StatusCode),

    /// Connection, DNS, TLS, timeout or body read failure.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The body was not the expected JSON.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

//! Lookup of the hourly entry that corresponds to the current-weather block.

use chrono::{DateTime, NaiveDateTime};

use crate::model::WeatherResponse;

/// Humidity and visibility for the current hour. Either may be `null` in the
/// payload (or past the end of a shorter series).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourReading {
    /// Relative humidity, percent.
    pub humidity: Option<f64>,
    /// Visibility, meters.
    pub visibility: Option<f64>,
}

/// Result of matching `current_weather.time` against `hourly.time`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HourLookup {
    Found { index: usize, reading: HourReading },
    /// No hourly timestamp equals the current one.
    Missing,
}

impl HourLookup {
    pub fn reading(&self) -> Option<HourReading> {
        match self {
            HourLookup::Found { reading, .. } => Some(*reading),
            HourLookup::Missing => None,
        }
    }
}

/// Parse an Open-Meteo timestamp into an instant.
///
/// With `timezone=auto` the API sends local wall-clock times without an offset
/// (`2025-03-01T14:00`); offsets are accepted too and normalised to UTC.
pub fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    const LOCAL_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
}

/// Find the first hourly entry whose instant equals the current-weather time
/// and return the humidity/visibility at that index.
///
/// Unparseable timestamps never match anything.
pub fn current_hour(data: &WeatherResponse) -> HourLookup {
    let Some(current) = parse_instant(&data.current_weather.time) else {
        return HourLookup::Missing;
    };

    let hourly = &data.hourly;
    let Some(index) = hourly.time.iter().position(|t| parse_instant(t) == Some(current)) else {
        return HourLookup::Missing;
    };

    HourLookup::Found {
        index,
        reading: HourReading {
            humidity: hourly.relative_humidity_2m.get(index).copied().flatten(),
            visibility: hourly.visibility.get(index).copied().flatten(),
        },
    }
}

use chrono::{Datelike, Timelike};
use meteo_core::{
    Coordinate, Form, HourLookup, RequestState, WeatherCondition, WeatherResponse,
    hourly::parse_instant,
};
use std::fmt;

const SEARCH_CAPTION: &str = "Search weather";
const LOADING_CAPTION: &str = "Loading...";

/// Thai solar calendar offset from the Gregorian year.
const BUDDHIST_ERA_OFFSET: i32 = 543;

pub fn submit_caption(loading: bool) -> &'static str {
    if loading { LOADING_CAPTION } else { SEARCH_CAPTION }
}

/// Visibility in meters, shown in kilometers with one decimal.
pub fn visibility_km(meters: f64) -> String {
    format!("{:.1}", meters / 1000.0)
}

/// Update time in the fixed th-TH style, e.g. `1/3/2568 14:00:00`.
/// Falls back to the raw text when it can't be parsed.
pub fn update_time(raw: &str) -> String {
    match parse_instant(raw) {
        Some(dt) => format!(
            "{}/{}/{} {}:{:02}:{:02}",
            dt.day(),
            dt.month(),
            dt.year() + BUDDHIST_ERA_OFFSET,
            dt.hour(),
            dt.minute(),
            dt.second()
        ),
        None => raw.to_string(),
    }
}

fn or_na(value: Option<f64>, f: impl FnOnce(f64) -> String) -> String {
    value.map(f).unwrap_or_else(|| "n/a".to_string())
}

/// Terminal rendering of the whole form.
pub struct FormView<'a>(pub &'a Form);

impl fmt::Display for FormView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = self.0;
        let coordinate = form.coordinate();

        writeln!(f, "==== Weather ====")?;
        writeln!(f, "Latitude:   {}", coordinate.latitude)?;
        writeln!(f, "Longitude:  {}", coordinate.longitude)?;

        match form.state() {
            RequestState::Idle => {}
            RequestState::Loading => writeln!(f, "\n{LOADING_CAPTION}")?,
            RequestState::Failure(message) => {
                writeln!(f, "\n[!] An error occurred")?;
                writeln!(f, "    {message}")?;
            }
            RequestState::Success(data) => {
                writeln!(f)?;
                write_results(f, coordinate, data, form.current_hour_data())?;
            }
        }

        writeln!(f, "\nData from Open-Meteo API")
    }
}

fn write_results(
    f: &mut fmt::Formatter<'_>,
    coordinate: &Coordinate,
    data: &WeatherResponse,
    hour: Option<HourLookup>,
) -> fmt::Result {
    let current = &data.current_weather;
    let condition = WeatherCondition::from_wmo_code(current.weathercode);

    writeln!(f, "Temperature:  {}°C", current.temperature)?;
    writeln!(f, "Wind speed:   {} km/h", current.windspeed)?;
    writeln!(f, "Weather code: {} (WMO, {})", current.weathercode, condition.description())?;

    match hour.and_then(|h| h.reading()) {
        Some(reading) => {
            writeln!(f, "Humidity:     {}", or_na(reading.humidity, |h| format!("{h}%")))?;
            writeln!(
                f,
                "Visibility:   {}",
                or_na(reading.visibility, |v| format!("{} km", visibility_km(v)))
            )?;
        }
        None => writeln!(f, "(no hourly humidity/visibility for {})", current.time)?,
    }

    writeln!(f, "Updated:      {}", update_time(&current.time))?;
    writeln!(f, "Coordinate:   {coordinate}")?;
    writeln!(f, "Timezone:     {}", data.timezone)
}

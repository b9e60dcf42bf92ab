//! Request state for the coordinate form.
//!
//! All transitions go through [`Form::update`]. Fetching is an effect: the
//! reducer hands back a [`FetchTicket`], the caller runs it with
//! [`run_fetch`] and feeds the resulting [`Action::Settled`] back in.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    Config,
    error::FetchError,
    hourly::{HourLookup, current_hour},
    model::{Coordinate, WeatherResponse},
    provider::ForecastProvider,
};

/// Monotonic id of an issued fetch. The first fetch is `1`.
pub type RequestId = u64;

/// What to do when a fetch settles after a newer one was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettlePolicy {
    /// Only the most recently issued fetch may change the state.
    #[default]
    LatestRequestOnly,
    /// Every fetch applies its result when it settles; the last one to settle
    /// wins, regardless of issue order.
    LastWriteWins,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(Arc<WeatherResponse>),
    Failure(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }
}

/// A fetch the caller must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub request: RequestId,
    pub coordinate: Coordinate,
}

#[derive(Debug)]
pub enum Action {
    SetLatitude(String),
    SetLongitude(String),
    /// The submit control. Ignored while a fetch is loading.
    Submit,
    Settled {
        request: RequestId,
        outcome: Result<WeatherResponse, FetchError>,
    },
}

#[derive(Debug, Clone)]
pub struct Form {
    coordinate: Coordinate,
    state: RequestState,
    policy: SettlePolicy,
    last_issued: RequestId,
}

impl Default for Form {
    fn default() -> Self {
        Self::new(Coordinate::default(), SettlePolicy::default())
    }
}

impl Form {
    pub fn new(coordinate: Coordinate, policy: SettlePolicy) -> Self {
        Self { coordinate, state: RequestState::Idle, policy, last_issued: 0 }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.default_coordinate(), config.settle_policy)
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn policy(&self) -> SettlePolicy {
        self.policy
    }

    pub fn submit_enabled(&self) -> bool {
        !self.state.is_loading()
    }

    pub fn update(&mut self, action: Action) -> Option<FetchTicket> {
        match action {
            Action::SetLatitude(latitude) => {
                self.coordinate.latitude = latitude;
                None
            }
            Action::SetLongitude(longitude) => {
                self.coordinate.longitude = longitude;
                None
            }
            Action::Submit => {
                if !self.submit_enabled() {
                    tracing::debug!("Submit ignored while a fetch is loading");
                    return None;
                }
                Some(self.fetch_weather())
            }
            Action::Settled { request, outcome } => {
                self.settle(request, outcome);
                None
            }
        }
    }

    /// Start a fetch for the current coordinate, with no guard against one
    /// already being in flight.
    pub fn fetch_weather(&mut self) -> FetchTicket {
        self.last_issued += 1;
        self.state = RequestState::Loading;

        tracing::debug!(request = self.last_issued, coordinate = %self.coordinate, "Issuing fetch");

        FetchTicket { request: self.last_issued, coordinate: self.coordinate.clone() }
    }

    fn settle(&mut self, request: RequestId, outcome: Result<WeatherResponse, FetchError>) {
        if request == 0 || request > self.last_issued {
            tracing::warn!(request, "Ignoring result for a fetch that was never issued");
            return;
        }

        if self.policy == SettlePolicy::LatestRequestOnly && request != self.last_issued {
            tracing::debug!(request, latest = self.last_issued, "Discarding stale fetch result");
            return;
        }

        self.state = match outcome {
            Ok(data) => RequestState::Success(Arc::new(data)),
            Err(err) => {
                tracing::debug!(request, error = ?err, "Fetch failed");
                RequestState::Failure(err.to_string())
            }
        };
    }

    /// Humidity and visibility for the current hour, or `None` when no
    /// forecast is loaded.
    pub fn current_hour_data(&self) -> Option<HourLookup> {
        let RequestState::Success(data) = &self.state else {
            return None;
        };

        let lookup = current_hour(data);
        if lookup == HourLookup::Missing {
            tracing::warn!(
                time = %data.current_weather.time,
                "No hourly entry matches the current-weather time"
            );
        }
        Some(lookup)
    }
}

/// Perform a fetch and wrap its outcome for [`Form::update`].
pub async fn run_fetch(provider: &dyn ForecastProvider, ticket: FetchTicket) -> Action {
    let outcome = provider.forecast(&ticket.coordinate).await;
    Action::Settled { request: ticket.request, outcome }
}

//! Client-side view state, driven by lookup outcomes.
//!
//! A view shows at most one city at a time. Selecting a city always starts a
//! new lookup; a result that arrives for any city other than the one being
//! loaded is stale and leaves the state untouched.

use crate::model::{ErrorBody, NormalizedWeather};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading {
        city: String,
    },
    Loaded(NormalizedWeather),
    Failed {
        city: String,
        error: ErrorBody,
    },
}

impl ViewState {
    /// Start a lookup for `city`, replacing whatever was shown.
    pub fn begin(self, city: impl Into<String>) -> Self {
        ViewState::Loading { city: city.into() }
    }

    /// Apply the outcome of a lookup for `city`.
    pub fn finish(self, city: &str, outcome: Result<NormalizedWeather, ErrorBody>) -> Self {
        match self {
            ViewState::Loading { city: ref loading } if loading == city => match outcome {
                Ok(weather) => ViewState::Loaded(weather),
                Err(error) => ViewState::Failed { city: city.to_string(), error },
            },
            other => other,
        }
    }

    /// City to offer for a manual retry, if the last lookup failed.
    pub fn retry_city(&self) -> Option<&str> {
        match self {
            ViewState::Failed { city, .. } => Some(city),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading { .. })
    }

    /// The city this view is about, if any.
    pub fn city(&self) -> Option<&str> {
        match self {
            ViewState::Idle => None,
            ViewState::Loading { city } | ViewState::Failed { city, .. } => Some(city),
            ViewState::Loaded(weather) => Some(&weather.city),
        }
    }
}

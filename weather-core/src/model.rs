use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for one city, in the units the dashboard displays.
///
/// Values keep full precision; rounding is left to whoever renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedWeather {
    pub city: String,
    /// °C
    pub temperature: f64,
    /// °C
    pub feels_like: f64,
    /// %
    pub humidity: u8,
    /// km/h
    pub wind_speed: f64,
    pub condition: String,
    pub description: String,
    pub icon: String,
    /// hPa
    pub pressure: f64,
    /// km
    pub visibility: f64,
    /// Unix seconds.
    pub timestamp: i64,
    pub sunrise: i64,
    pub sunset: i64,
}

impl NormalizedWeather {
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.timestamp)
    }

    pub fn sunrise_at(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.sunrise)
    }

    pub fn sunset_at(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.sunset)
    }
}

/// Error payload returned by the proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_cities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            available_cities: None,
            status_code: None,
        }
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

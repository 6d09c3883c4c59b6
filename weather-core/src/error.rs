use thiserror::Error;

use crate::model::ErrorBody;

const FETCH_FAILED: &str = "Failed to fetch weather data";

/// Every way a weather lookup can fail, classified for the proxy boundary.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("City parameter is required")]
    MissingCity,

    #[error("City not found: '{city}'")]
    CityNotFound {
        city: String,
        available: Vec<&'static str>,
    },

    #[error("Invalid API key. Please check your OpenWeatherMap API key.")]
    InvalidCredential,

    #[error("API rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("OpenWeatherMap service is currently unavailable.")]
    ProviderUnavailable,

    #[error("OpenWeatherMap request failed with status {status}")]
    ProviderError { status: u16 },

    #[error("Failed to reach OpenWeatherMap: {0}")]
    TransportError(#[source] reqwest::Error),

    #[error("Unexpected OpenWeatherMap payload: {0}")]
    MalformedPayload(String),
}

impl GatewayError {
    /// Map a non-2xx provider status to its classification.
    pub fn from_provider_status(status: u16) -> Self {
        match status {
            401 => GatewayError::InvalidCredential,
            429 => GatewayError::RateLimited,
            500 => GatewayError::ProviderUnavailable,
            status => GatewayError::ProviderError { status },
        }
    }

    /// HTTP status the proxy answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::MissingCity | GatewayError::CityNotFound { .. } => 400,
            GatewayError::InvalidCredential => 401,
            GatewayError::RateLimited => 429,
            GatewayError::ProviderUnavailable => 500,
            // Anything below 400 would not carry the JSON body through to the caller.
            GatewayError::ProviderError { status } if *status < 400 => 502,
            GatewayError::ProviderError { status } => *status,
            GatewayError::TransportError(_) | GatewayError::MalformedPayload(_) => 500,
        }
    }

    /// True for failures reported by the provider itself.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            GatewayError::InvalidCredential
                | GatewayError::RateLimited
                | GatewayError::ProviderUnavailable
                | GatewayError::ProviderError { .. }
        )
    }

    /// JSON body returned to the caller.
    pub fn to_body(&self) -> ErrorBody {
        match self {
            GatewayError::MissingCity => ErrorBody::new(
                "City parameter is required",
                "Please provide a city name in the query parameters",
            ),
            GatewayError::CityNotFound { available, .. } => ErrorBody {
                available_cities: Some(available.iter().map(|c| c.to_string()).collect()),
                ..ErrorBody::new("City not found", "Please provide a valid Pakistani city name")
            },
            GatewayError::ProviderError { .. } => ErrorBody {
                status_code: Some(self.status_code()),
                ..ErrorBody::new("Weather API Error", FETCH_FAILED)
            },
            e if e.is_provider_failure() => ErrorBody {
                status_code: Some(e.status_code()),
                ..ErrorBody::new("Weather API Error", e.to_string())
            },
            _ => ErrorBody::new(
                "Internal Server Error",
                format!("{FETCH_FAILED}. Please try again later."),
            ),
        }
    }
}

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    CityCoordinate, GatewayError, NormalizedWeather,
    config::{DEFAULT_PROVIDER_URL, RetryPolicy},
};

use super::WeatherProvider;

const MS_TO_KMH: f64 = 3.6;
const METERS_PER_KM: f64 = 1000.0;

/// Gateway to the OpenWeatherMap current-weather endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    retry: RetryPolicy,
    http: Client,
}

#[derive(Debug)]
pub struct OpenWeatherProviderBuilder {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
    retry: RetryPolicy,
}

impl OpenWeatherProviderBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn build(self) -> anyhow::Result<OpenWeatherProvider> {
        let mut http = Client::builder();
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }

        Ok(OpenWeatherProvider {
            api_key: self.api_key,
            base_url: self.base_url,
            retry: self.retry,
            http: http.build().context("Failed to build HTTP client for OpenWeatherMap")?,
        })
    }
}

impl OpenWeatherProvider {
    pub fn builder(api_key: String) -> OpenWeatherProviderBuilder {
        OpenWeatherProviderBuilder {
            api_key,
            base_url: DEFAULT_PROVIDER_URL.to_string(),
            timeout: None,
            retry: RetryPolicy::default(),
        }
    }

    async fn fetch_current(&self, city: &CityCoordinate) -> Result<NormalizedWeather, GatewayError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", city.latitude.to_string()),
                ("lon", city.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(GatewayError::TransportError)?;

        let status = res.status();
        let body = res.text().await.map_err(GatewayError::TransportError)?;

        if !status.is_success() {
            warn!(
                city = city.name,
                status = status.as_u16(),
                body = %truncate_body(&body),
                "OpenWeatherMap request failed"
            );
            return Err(GatewayError::from_provider_status(status.as_u16()));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::MalformedPayload(e.to_string()))?;

        normalize(city.name, parsed)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: f64,
    sys: OwSys,
}

/// Reshape a provider payload, converting wind to km/h and visibility to km.
fn normalize(city: &str, payload: OwCurrentResponse) -> Result<NormalizedWeather, GatewayError> {
    let OwCurrentResponse { dt, main, weather, wind, visibility, sys } = payload;

    let conditions = weather
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::MalformedPayload("empty `weather` array".to_string()))?;

    Ok(NormalizedWeather {
        city: city.to_string(),
        temperature: main.temp,
        feels_like: main.feels_like,
        humidity: main.humidity,
        wind_speed: wind.speed * MS_TO_KMH,
        condition: conditions.main,
        description: conditions.description,
        icon: conditions.icon,
        pressure: main.pressure,
        visibility: visibility / METERS_PER_KM,
        timestamp: dt,
        sunrise: sys.sunrise,
        sunset: sys.sunset,
    })
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_weather(
        &self,
        city: &CityCoordinate,
    ) -> Result<NormalizedWeather, GatewayError> {
        let mut attempt = 0;
        loop {
            match self.fetch_current(city).await {
                Err(GatewayError::RateLimited) if attempt < self.retry.max_retries => {
                    let delay = self.retry.backoff(attempt);
                    debug!(city = city.name, attempt, ?delay, "rate limited, backing off");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                outcome => return outcome,
            }
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

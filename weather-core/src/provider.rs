use crate::{
    CityCoordinate, Config, GatewayError, NormalizedWeather, cities,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions for a resolved city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_weather(&self, city: &CityCoordinate)
    -> Result<NormalizedWeather, GatewayError>;
}

/// Resolve `city` and fetch its current conditions with a single provider call.
///
/// Missing, empty and unknown names are rejected before any network traffic.
pub async fn lookup(
    provider: &dyn WeatherProvider,
    city: Option<&str>,
) -> Result<NormalizedWeather, GatewayError> {
    let name = city.filter(|c| !c.is_empty()).ok_or(GatewayError::MissingCity)?;
    let coordinate = cities::resolve(name)?;
    provider.fetch_weather(coordinate).await
}

/// Construct the OpenWeatherMap gateway from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeatherMap API key configured.\n\
             Hint: run `pakweather configure` or set {} in the environment.",
            crate::config::API_KEY_ENV
        )
    })?;

    let provider = OpenWeatherProvider::builder(api_key.to_owned())
        .base_url(config.provider.base_url.clone())
        .timeout(config.timeout())
        .retry(config.retry)
        .build()?;

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug, Default)]
    struct RecordingProvider {
        calls: AtomicUsize,
        last: Mutex<Option<&'static str>>,
    }

    #[async_trait]
    impl WeatherProvider for RecordingProvider {
        async fn fetch_weather(
            &self,
            city: &CityCoordinate,
        ) -> Result<NormalizedWeather, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(city.name);
            Err(GatewayError::ProviderUnavailable)
        }
    }

    #[tokio::test]
    async fn lookup_rejects_missing_and_empty_city_without_fetching() {
        let provider = RecordingProvider::default();

        for city in [None, Some("")] {
            let err = lookup(&provider, city).await.unwrap_err();
            assert!(matches!(err, GatewayError::MissingCity));
        }
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn lookup_rejects_unknown_city_without_fetching() {
        let provider = RecordingProvider::default();

        let err = lookup(&provider, Some("Gwadar")).await.unwrap_err();
        assert!(matches!(err, GatewayError::CityNotFound { .. }));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn lookup_fetches_resolved_city_once() {
        let provider = RecordingProvider::default();

        let err = lookup(&provider, Some("Peshawar")).await.unwrap_err();
        assert!(matches!(err, GatewayError::ProviderUnavailable));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*provider.last.lock().unwrap(), Some("Peshawar"));
    }

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No OpenWeatherMap API key configured"));
        assert!(msg.contains("OPENWEATHER_API_KEY"));
    }

    #[test]
    fn provider_from_config_rejects_empty_key() {
        let mut cfg = Config::default();
        cfg.set_api_key(String::new());
        assert!(provider_from_config(&cfg).is_err());
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());
        cfg.provider.timeout_secs = Some(3);

        assert!(provider_from_config(&cfg).is_ok());
    }
}

use pakweather_core::{ErrorBody, NormalizedWeather};
use pakweather_proxy::WEATHER_PATH;
use reqwest::Client;

pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:8787";

/// Talks to the pakweather proxy. Never contacts the weather provider directly.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    base_url: String,
    http: Client,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http: Client::new() }
    }

    fn weather_url(&self) -> String {
        format!("{}{WEATHER_PATH}", self.base_url.trim_end_matches('/'))
    }

    pub async fn fetch(&self, city: &str) -> Result<NormalizedWeather, ErrorBody> {
        let res = self
            .http
            .get(self.weather_url())
            .query(&[("city", city)])
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "proxy unreachable");
                ErrorBody::new(
                    "Proxy Unreachable",
                    format!("Could not reach the weather proxy at {}.", self.base_url),
                )
            })?;

        let status = res.status();
        if status.is_success() {
            return res.json::<NormalizedWeather>().await.map_err(|e| {
                tracing::debug!(error = %e, "unexpected proxy payload");
                ErrorBody::new("Internal Server Error", "The weather proxy sent an unexpected response.")
            });
        }

        let fallback = || ErrorBody {
            status_code: Some(status.as_u16()),
            ..ErrorBody::new("Weather API Error", format!("The weather proxy answered {status}."))
        };
        Err(res.json::<ErrorBody>().await.unwrap_or_else(|_| fallback()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    #[tokio::test]
    async fn fetch_decodes_weather() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(WEATHER_PATH))
            .and(query_param("city", "Lahore"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "city": "Lahore",
                "temperature": 30.6,
                "feelsLike": 32.0,
                "humidity": 55,
                "windSpeed": 11.2,
                "condition": "Haze",
                "description": "haze",
                "icon": "50d",
                "pressure": 1002,
                "visibility": 3.5,
                "timestamp": 1_718_000_000,
                "sunrise": 1_717_977_000,
                "sunset": 1_718_028_000
            })))
            .expect(1)
            .mount(&server)
            .await;

        let weather = ProxyClient::new(format!("{}/", server.uri())).fetch("Lahore").await.unwrap();
        assert_eq!(weather.city, "Lahore");
        assert_eq!(weather.pressure, 1002.0);
    }

    #[tokio::test]
    async fn fetch_surfaces_proxy_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "City not found",
                "message": "Please provide a valid Pakistani city name",
                "availableCities": ["Karachi", "Lahore"]
            })))
            .mount(&server)
            .await;

        let err = ProxyClient::new(server.uri()).fetch("Gilgit").await.unwrap_err();
        assert_eq!(err.error, "City not found");
        assert_eq!(err.available_cities, Some(vec!["Karachi".into(), "Lahore".into()]));
    }

    #[tokio::test]
    async fn fetch_handles_non_json_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = ProxyClient::new(server.uri()).fetch("Karachi").await.unwrap_err();
        assert_eq!(err.status_code, Some(502));
        assert_eq!(err.error, "Weather API Error");
    }

    #[tokio::test]
    async fn fetch_reports_unreachable_proxy() {
        let err = ProxyClient::new("http://127.0.0.1:1").fetch("Karachi").await.unwrap_err();
        assert_eq!(err.error, "Proxy Unreachable");
        assert!(err.message.contains("127.0.0.1:1"));
    }
}

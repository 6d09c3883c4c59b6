//! Core library for `pakweather`.
//!
//! This crate defines:
//! - The static table of supported cities and the name resolver
//! - The weather gateway: provider abstraction, OpenWeatherMap client, payload normalization
//! - The error taxonomy shared by the proxy and the client
//! - Configuration & credentials handling
//! - The client-side view state machine
//!
//! It is used by `pakweather-proxy` and `pakweather-cli`.

pub mod cities;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod view;

pub use cities::{CityCoordinate, available_cities, resolve};
pub use config::{Config, ProviderConfig, RetryPolicy, ServerConfig};
pub use error::GatewayError;
pub use model::{ErrorBody, NormalizedWeather};
pub use provider::{WeatherProvider, lookup, openweather::OpenWeatherProvider, provider_from_config};
pub use view::ViewState;

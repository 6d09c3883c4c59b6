//! HTTP front of the weather gateway.
//!
//! The proxy owns the provider credential; browsers and the CLI only ever talk
//! to these routes. Every response carries permissive CORS headers.

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{MethodRouter, get},
};
use pakweather_core::{GatewayError, WeatherProvider, lookup};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

/// Route of the weather lookup.
pub const WEATHER_PATH: &str = "/api/weather";
/// Path the dashboard used when the proxy ran as a Netlify function.
pub const LEGACY_WEATHER_PATH: &str = "/.netlify/functions/weather";

#[derive(Clone)]
pub struct AppState {
    provider: Arc<dyn WeatherProvider>,
}

pub fn build_app(provider: Arc<dyn WeatherProvider>) -> Router {
    let state = AppState { provider };

    Router::new()
        .route(WEATHER_PATH, weather_routes())
        .route(LEGACY_WEATHER_PATH, weather_routes())
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .with_state(state)
}

/// Bind `bind` and serve until Ctrl-C.
pub async fn serve(provider: Arc<dyn WeatherProvider>, bind: &str) -> Result<()> {
    let addr: SocketAddr =
        bind.parse().with_context(|| format!("Invalid HTTP bind address: {bind}"))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener on {addr}"))?;

    tracing::info!(%addr, "weather proxy listening");
    axum::serve(listener, build_app(provider))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = ?e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

fn weather_routes() -> MethodRouter<AppState> {
    get(weather).post(weather).options(preflight)
}

#[derive(Debug, Deserialize)]
struct WeatherQuery {
    city: Option<String>,
}

async fn weather(
    State(state): State<AppState>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Response {
    // An unreadable query string (e.g. a repeated `city`) has no usable city.
    let city = match query {
        Ok(Query(q)) => q.city,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable query string");
            None
        }
    };

    match lookup(state.provider.as_ref(), city.as_deref()).await {
        Ok(weather) => {
            tracing::info!(city = %weather.city, "weather served");
            (StatusCode::OK, Json(weather)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &GatewayError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        tracing::error!(error = %err, %status, "weather lookup failed");
    } else {
        tracing::warn!(error = %err, %status, "weather lookup rejected");
    }

    (status, Json(err.to_body())).into_response()
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

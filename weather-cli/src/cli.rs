use std::{io::IsTerminal, sync::Arc};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, Select};
use pakweather_core::{Config, ViewState, WeatherProvider, cities, provider_from_config};

use crate::{
    client::{DEFAULT_PROXY_URL, ProxyClient},
    render,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "pakweather", version, about = "Current weather for major Pakistani cities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key used by the proxy.
    Configure,

    /// Run the weather proxy.
    Serve {
        /// Address to listen on; overrides the config file and PAKWEATHER_BIND.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Show current weather for a city, fetched through the proxy.
    Show {
        /// City name, e.g. "Lahore". Prompts for one when omitted.
        city: Option<String>,

        /// Base URL of the proxy.
        #[arg(long, env = "PAKWEATHER_PROXY_URL", default_value = DEFAULT_PROXY_URL)]
        proxy: String,
    },

    /// List supported cities and their coordinates.
    Cities,
}

impl Cli {
    /// Default log filter; the proxy logs requests, interactive commands stay quiet.
    pub fn log_filter(&self) -> &'static str {
        match self.command {
            Command::Serve { .. } => "info,tower_http=info",
            _ => "warn",
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Serve { bind } => serve(bind).await,
            Command::Show { city, proxy } => show(city, &proxy).await,
            Command::Cities => {
                println!("{}", render::city_table(cities::all()));
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut cfg = Config::load_from(&path)?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }

    cfg.set_api_key(api_key.trim().to_string());
    let saved = cfg.save()?;

    println!("Saved configuration to {}", saved.display());
    Ok(())
}

async fn serve(bind: Option<String>) -> anyhow::Result<()> {
    let mut cfg = Config::load()?;
    if let Some(bind) = bind {
        cfg.server.bind = bind;
    }

    let provider: Arc<dyn WeatherProvider> = Arc::from(provider_from_config(&cfg)?);
    pakweather_proxy::serve(provider, &cfg.server.bind).await
}

async fn show(city: Option<String>, proxy: &str) -> anyhow::Result<()> {
    let interactive = std::io::stdin().is_terminal();
    let city = match city {
        Some(city) => city,
        None if interactive => Select::new("Select city", cities::available_cities())
            .prompt()
            .context("No city selected")?
            .to_string(),
        None => bail!("A city is required, e.g. `pakweather show Lahore`"),
    };

    let client = ProxyClient::new(proxy);
    let mut state = ViewState::default().begin(city.as_str());

    while state.is_loading() {
        state = state.finish(&city, client.fetch(&city).await);

        if let ViewState::Failed { error, .. } = &state {
            eprintln!("{}", render::failure(&city, error));
        }
        if state.retry_city().is_some() && interactive && confirm_retry() {
            state = state.begin(city.as_str());
        }
    }

    match state {
        ViewState::Loaded(weather) => {
            println!("{}", render::card(&weather));
            Ok(())
        }
        _ => bail!("weather lookup for {city} failed"),
    }
}

fn confirm_retry() -> bool {
    Confirm::new("Try again?").with_default(false).prompt().unwrap_or(false)
}

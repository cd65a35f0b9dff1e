//! Startup configuration.
//!
//! Everything is read once, from flags or the environment (a `.env` file is
//! loaded first), and turned into immutable provider and server configs.
//! Tracked indices and provider URLs are static and not configurable here.

use std::time::Duration;

use clap::Parser;
use providers::ProviderConfig;
use server::ServerConfig;

/// morning-brief - market, air quality and weather in one JSON document
#[derive(Parser)]
#[command(name = "morning-brief")]
#[command(about = "Aggregates market, air-quality and weather data into one JSON endpoint")]
#[command(version)]
pub struct Args {
    /// WAQI API token
    #[arg(long, env = "AQI_API_KEY", hide_env_values = true)]
    pub aqi_api_key: Option<String>,

    /// WeatherAPI key
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
    pub weather_api_key: Option<String>,

    /// Host to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Debug mode (verbose logging)
    #[arg(long, env = "DEBUG")]
    pub debug: bool,

    /// Ceiling for each upstream fetch, in seconds
    #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value_t = 10)]
    pub fetch_timeout_secs: u64,
}

/// Resolved configuration for the whole process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub providers: ProviderConfig,
    pub server: ServerConfig,
    pub debug: bool,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        let providers = ProviderConfig::new()
            .aqi_api_key(args.aqi_api_key)
            .weather_api_key(args.weather_api_key)
            .fetch_timeout(Duration::from_secs(args.fetch_timeout_secs));

        Self {
            providers,
            server: ServerConfig::new(args.host, args.port),
            debug: args.debug,
        }
    }
}

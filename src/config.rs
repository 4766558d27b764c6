//! Command-line and environment configuration

use std::fmt;
use std::path::PathBuf;

use clap::Parser;
use tui_dispatch_debug::DebugCliArgs;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Weather widget - current conditions for any city
#[derive(Parser, Debug)]
#[command(name = "weather-widget")]
#[command(about = "Look up current weather conditions for a city")]
pub struct Args {
    /// OpenWeather API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Provider base URL (the `/weather` endpoint is appended)
    #[arg(long, env = "OPENWEATHER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Search for this city on startup
    #[arg(long, short)]
    pub city: Option<String>,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub debug: DebugCliArgs,
}

impl Args {
    pub fn widget_config(&self) -> WidgetConfig {
        WidgetConfig::new(self.base_url.clone(), self.api_key.clone())
    }
}

/// The two opaque values the weather client needs
#[derive(Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub base_url: String,
    pub api_key: String,
}

impl WidgetConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            api_key: api_key.into(),
        }
    }
}

impl fmt::Debug for WidgetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

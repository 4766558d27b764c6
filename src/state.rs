//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Current conditions for one city, decoded from the provider
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReading {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    /// Lowercase phrase as the provider returns it
    pub description: String,
    /// Provider icon code, e.g. "10n"
    pub icon: String,
    pub humidity: u8,
    /// Meters per second
    pub wind_speed: f64,
    /// Hectopascals
    pub pressure: u32,
    /// Meters; some stations don't report it
    pub visibility: Option<u32>,
    /// Unix seconds
    pub sunrise: i64,
    /// Unix seconds
    pub sunset: i64,
}

/// Which panel is on screen. Exactly one at a time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum Panel {
    #[default]
    Idle,
    Loading,
    Result(WeatherReading),
    Error {
        message: String,
        /// Matches the pending auto-dismiss for this error
        generation: u64,
    },
}

/// Label shown on the search button
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ButtonLabel {
    #[default]
    Search,
    Loading,
}

/// The submit control next to the input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchButton {
    pub enabled: bool,
    pub label: ButtonLabel,
}

impl Default for SearchButton {
    fn default() -> Self {
        Self {
            enabled: true,
            label: ButtonLabel::Search,
        }
    }
}

/// Which part of the search bar receives keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Focus {
    #[default]
    Input,
    Button,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Button,
            Focus::Button => Focus::Input,
        }
    }
}

/// Spinner timing for the loading panel and button.
pub const LOADING_ANIM_TICK_MS: u64 = 80;
pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// How long an error stays on screen.
pub const ERROR_DISMISS_SECS: u64 = 5;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Default, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Text currently in the search input
    #[debug(section = "Search", label = "Query")]
    pub query: String,

    #[debug(section = "Search", label = "Button", debug_fmt)]
    pub button: SearchButton,

    #[debug(section = "Search", label = "Focus", debug_fmt)]
    pub focus: Focus,

    #[debug(section = "Weather", label = "Panel", debug_fmt)]
    pub panel: Panel,

    /// Id of the most recently issued request; older responses are dropped
    #[debug(section = "Weather", label = "Request")]
    pub request_id: u64,

    /// Bumped on every error shown
    #[debug(skip)]
    pub error_generation: u64,

    /// Spinner frame counter
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.panel, Panel::Loading)
    }

    pub fn reading(&self) -> Option<&WeatherReading> {
        match &self.panel {
            Panel::Result(reading) => Some(reading),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.panel {
            Panel::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.tick_count as usize % SPINNER_FRAMES.len()]
    }
}

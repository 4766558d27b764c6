//! Actions - every input the controller reacts to

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::WeatherReading;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Search category =====
    /// Input text changed
    SearchInputChange(String),

    /// Submit the given text (Enter in the input or the search button)
    SearchSubmit(String),

    // ===== Weather category =====
    /// Result: reading decoded for the given request
    WeatherDidLoad {
        request_id: u64,
        reading: WeatherReading,
    },

    /// Result: request failed, message is user-facing
    WeatherDidError { request_id: u64, message: String },

    // ===== Error category =====
    /// Result: auto-dismiss timer for the given error generation fired
    ErrorDidExpire(u64),

    // ===== UI category =====
    /// Move focus between the input and the search button
    UiFocusNext,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic tick for the spinner
    Tick,

    /// Exit the application
    Quit,
}

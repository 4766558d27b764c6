//! Effects - side effects declared by the reducer

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::action::Action;
use crate::api::WeatherClient;
use crate::state::ERROR_DISMISS_SECS;
use crate::validate::SearchQuery;

/// Task key for the in-flight weather request
pub const FETCH_TASK: &str = "weather";
/// Task key for the error auto-dismiss timer
pub const ERROR_DISMISS_TASK: &str = "error_dismiss";

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch current weather; the result is tagged with `request_id`
    FetchWeather { query: SearchQuery, request_id: u64 },
    /// Start (or restart) the error auto-dismiss timer
    ScheduleErrorDismiss { generation: u64 },
    /// Drop any pending error auto-dismiss timer
    CancelErrorDismiss,
}

/// Run one fetch and turn the outcome into an action.
pub async fn fetch_weather(
    client: Arc<WeatherClient>,
    query: SearchQuery,
    request_id: u64,
) -> Action {
    match client.fetch_current(&query).await {
        Ok(reading) => Action::WeatherDidLoad {
            request_id,
            reading,
        },
        Err(err) => {
            debug!("request {request_id} failed: {err}");
            Action::WeatherDidError {
                request_id,
                message: err.user_message().to_string(),
            }
        }
    }
}

/// Resolve after the error display period.
pub async fn error_dismiss_after(generation: u64) -> Action {
    tokio::time::sleep(Duration::from_secs(ERROR_DISMISS_SECS)).await;
    Action::ErrorDidExpire(generation)
}

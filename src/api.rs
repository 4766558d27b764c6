//! OpenWeather current-conditions client

use log::{debug, info, warn};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::WidgetConfig;
use crate::state::WeatherReading;
use crate::validate::SearchQuery;

/// Shown for any failure without a more specific message.
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

// ============================================================================
// Errors
// ============================================================================

/// Why a fetch produced no reading
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("city not found (404)")]
    CityNotFound,
    #[error("invalid API key (401)")]
    InvalidCredential,
    #[error("provider returned {0}")]
    Provider(StatusCode),
    #[error("request failed: {0}")]
    Transport(reqwest::Error),
    #[error("response parse error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response has no weather condition")]
    MissingCondition,
}

// The request URL carries the API key
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.without_url())
    }
}

impl FetchError {
    /// The sentence shown in the error panel.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::CityNotFound => "City not found. Please check the city name.",
            FetchError::InvalidCredential => "Invalid API key. Please check your configuration.",
            FetchError::Provider(_) => "Failed to fetch weather data. Please try again.",
            FetchError::Transport(_) | FetchError::Decode(_) | FetchError::MissingCondition => {
                FALLBACK_MESSAGE
            }
        }
    }
}

/// Map a response status to a failure, `None` for success.
pub fn classify_status(status: StatusCode) -> Option<FetchError> {
    if status.is_success() {
        return None;
    }
    Some(match status {
        StatusCode::NOT_FOUND => FetchError::CityNotFound,
        StatusCode::UNAUTHORIZED => FetchError::InvalidCredential,
        other => FetchError::Provider(other),
    })
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    sys: Sys,
    main: Main,
    weather: Vec<Condition>,
    wind: Wind,
    #[serde(default)]
    visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct Sys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct Main {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

impl TryFrom<CurrentResponse> for WeatherReading {
    type Error = FetchError;

    fn try_from(data: CurrentResponse) -> Result<Self, Self::Error> {
        let condition = data
            .weather
            .into_iter()
            .next()
            .ok_or(FetchError::MissingCondition)?;

        Ok(WeatherReading {
            city: data.name,
            country: data.sys.country,
            temperature: data.main.temp,
            feels_like: data.main.feels_like,
            description: condition.description,
            icon: condition.icon,
            humidity: data.main.humidity,
            wind_speed: data.wind.speed,
            pressure: data.main.pressure,
            visibility: data.visibility,
            sunrise: data.sys.sunrise,
            sunset: data.sys.sunset,
        })
    }
}

/// Decode a successful response body.
pub fn parse_reading(body: &str) -> Result<WeatherReading, FetchError> {
    let data: CurrentResponse = serde_json::from_str(body)?;
    WeatherReading::try_from(data)
}

// ============================================================================
// Client
// ============================================================================

#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    config: WidgetConfig,
}

impl WeatherClient {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// `{base}/weather?q={city}&appid={key}&units=metric`, city percent-encoded.
    pub fn request_url(&self, query: &SearchQuery) -> String {
        format!(
            "{}/weather?q={}&appid={}&units=metric",
            self.config.base_url,
            urlencoding::encode(query.as_str()),
            self.config.api_key
        )
    }

    /// Fetch current conditions with a single GET.
    pub async fn fetch_current(&self, query: &SearchQuery) -> Result<WeatherReading, FetchError> {
        debug!(
            "GET {}/weather for {:?}",
            self.config.base_url,
            query.as_str()
        );
        let response = self.http.get(self.request_url(query)).send().await?;

        let status = response.status();
        if let Some(err) = classify_status(status) {
            warn!("weather request for {:?} failed: {err}", query.as_str());
            return Err(err);
        }

        let body = response.text().await?;
        let reading = parse_reading(&body)?;
        info!(
            "loaded weather for {}, {} ({})",
            reading.city, reading.country, reading.icon
        );
        Ok(reading)
    }
}

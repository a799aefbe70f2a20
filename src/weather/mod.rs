//! Weather acquisition: the reading model, its error categories, and the
//! sources that produce readings.
//!
//! Nothing here is needed for the simulation to run; a failed or missing
//! reading just leaves the game on `GameConfig::default()`.

mod client;
mod worker;

use std::fmt;

pub use client::{parse_location, parse_report, FixedLocation, IpLocation, OpenWeatherClient};
pub use worker::{spawn_fetch, WeatherUpdate};

/// Primary condition category reported by the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeatherCondition {
    Clear,
    Rain,
    Drizzle,
    Snow,
    Thunderstorm,
    Fog,
    Mist,
    Haze,
    Clouds,
    /// Anything the provider reports that the game has no table entry for.
    Unknown,
}

impl WeatherCondition {
    /// Parse the provider's condition name, ignoring case.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "clear" => WeatherCondition::Clear,
            "rain" => WeatherCondition::Rain,
            "drizzle" => WeatherCondition::Drizzle,
            "snow" => WeatherCondition::Snow,
            "thunderstorm" => WeatherCondition::Thunderstorm,
            "fog" => WeatherCondition::Fog,
            "mist" => WeatherCondition::Mist,
            "haze" => WeatherCondition::Haze,
            "clouds" => WeatherCondition::Clouds,
            _ => WeatherCondition::Unknown,
        }
    }

    /// Short label for the weather panel.
    pub fn label(self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Mist => "Mist",
            WeatherCondition::Haze => "Haze",
            WeatherCondition::Clouds => "Clouds",
            WeatherCondition::Unknown => "Unknown",
        }
    }
}

/// One weather observation for the player's location.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherReading {
    pub condition: WeatherCondition,
    /// Provider condition code; distinguishes cloud-cover levels.
    pub code: u32,
    pub location: String,
    pub country: Option<String>,
    pub description: String,
    pub temperature_c: f64,
    pub humidity: u8,
    /// Metres per second.
    pub wind_speed: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Why a reading could not be produced.
#[derive(Clone, Debug, PartialEq)]
pub enum WeatherError {
    /// The player's position is unknown or lookup was refused.
    Location(String),
    /// The request never got an HTTP response.
    Network(String),
    /// The provider answered with an error, or was never asked (no key).
    Api(String),
    /// The response body is not a usable weather report.
    InvalidResponse(String),
}

impl WeatherError {
    /// One-line troubleshooting tip for the weather panel.
    pub fn hint(&self) -> &'static str {
        match self {
            WeatherError::Location(_) => "Set --lat/--lon or check that location lookup is reachable",
            WeatherError::Network(_) => "Verify your internet connection",
            WeatherError::Api(_) => "Check that you have a valid OpenWeather API key",
            WeatherError::InvalidResponse(_) => "The weather service sent an unexpected reply",
        }
    }
}

impl fmt::Display for WeatherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherError::Location(msg) => write!(f, "Location unavailable: {msg}"),
            WeatherError::Network(msg) => write!(f, "Network error: {msg}"),
            WeatherError::Api(msg) => write!(f, "Weather API error: {msg}"),
            WeatherError::InvalidResponse(msg) => write!(f, "Invalid weather response: {msg}"),
        }
    }
}

impl std::error::Error for WeatherError {}

/// Anything that can produce a reading.  Runs on a worker thread.
pub trait WeatherSource: Send + Sync {
    fn fetch(&self) -> Result<WeatherReading, WeatherError>;
}

/// Anything that can tell where the player is.
pub trait LocationSource: Send + Sync {
    fn locate(&self) -> Result<Coordinates, WeatherError>;
}

/// What the frame loop currently knows about the weather.
#[derive(Clone, Debug, PartialEq)]
pub enum WeatherStatus {
    /// Weather lookups are switched off; the base config is in use.
    Disabled,
    Loading,
    Ready(WeatherReading),
    Failed(WeatherError),
}

impl WeatherStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, WeatherStatus::Loading)
    }
}

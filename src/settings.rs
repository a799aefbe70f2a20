//! Runtime settings from command-line flags, with environment fallbacks.

use std::fmt;
use std::path::PathBuf;

use log::LevelFilter;

use crate::weather::Coordinates;

pub const USAGE: &str = "\
Usage: weather_flappy [OPTIONS]

Options:
  --api-key <KEY>   OpenWeather API key            (env OPENWEATHER_API_KEY)
  --lat <DEG>       Latitude, use with --lon       (env WEATHER_FLAPPY_LAT)
  --lon <DEG>       Longitude, use with --lat      (env WEATHER_FLAPPY_LON)
  --offline         Skip the weather lookup and play in clear skies
  --seed <N>        Fixed seed for the pipe layout
  --log <PATH>      Log file                       (env WEATHER_FLAPPY_LOG)
  -h, --help        Show this help

Log verbosity is read from WEATHER_FLAPPY_LOG_LEVEL (default: info).

How weather affects the game:
  Clear/Sunny    Perfect conditions, normal difficulty
  Rain           Increased gravity, harder to fly
  Snow           Reduced gravity, easier flying
  Thunderstorm   Maximum difficulty, extreme weather
  Fog/Mist       Moderate difficulty with a misty theme
  Cloudy         Slightly harder with closer pipes";

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub api_key: Option<String>,
    /// `None` means look the location up from the network.
    pub location: Option<Coordinates>,
    pub offline: bool,
    pub seed: Option<u64>,
    pub log_path: PathBuf,
    pub log_level: LevelFilter,
    pub show_help: bool,
}

#[derive(Debug, PartialEq)]
pub enum SettingsError {
    UnknownFlag(String),
    MissingValue(&'static str),
    InvalidNumber { flag: &'static str, value: String },
    /// Only one of latitude/longitude was given.
    HalfCoordinates,
    InvalidLogLevel(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::UnknownFlag(flag) => write!(f, "unknown option: {flag}"),
            SettingsError::MissingValue(flag) => write!(f, "{flag} needs a value"),
            SettingsError::InvalidNumber { flag, value } => {
                write!(f, "{flag}: '{value}' is not a valid number")
            }
            SettingsError::HalfCoordinates => {
                write!(f, "latitude and longitude must be given together")
            }
            SettingsError::InvalidLogLevel(level) => write!(f, "unknown log level: {level}"),
        }
    }
}

impl std::error::Error for SettingsError {}

fn default_log_path(home: Option<String>) -> PathBuf {
    PathBuf::from(home.unwrap_or_else(|| ".".to_string())).join(".weather_flappy.log")
}

fn parse_number<T: std::str::FromStr>(flag: &'static str, value: String) -> Result<T, SettingsError> {
    value
        .trim()
        .parse()
        .map_err(|_| SettingsError::InvalidNumber { flag, value })
}

impl Settings {
    /// Build settings from `args` (program name already stripped) and an
    /// environment lookup.  Flags win over environment variables.
    pub fn parse<I, E>(args: I, env: E) -> Result<Settings, SettingsError>
    where
        I: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut api_key = None;
        let mut lat = None;
        let mut lon = None;
        let mut offline = false;
        let mut seed = None;
        let mut log_path = None;
        let mut show_help = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let mut value = |flag: &'static str| args.next().ok_or(SettingsError::MissingValue(flag));
            match arg.as_str() {
                "--api-key" => api_key = Some(value("--api-key")?),
                "--lat" => lat = Some(parse_number::<f64>("--lat", value("--lat")?)?),
                "--lon" => lon = Some(parse_number::<f64>("--lon", value("--lon")?)?),
                "--offline" => offline = true,
                "--seed" => seed = Some(parse_number::<u64>("--seed", value("--seed")?)?),
                "--log" => log_path = Some(PathBuf::from(value("--log")?)),
                "-h" | "--help" => show_help = true,
                other => return Err(SettingsError::UnknownFlag(other.to_string())),
            }
        }

        let api_key = api_key.or_else(|| env("OPENWEATHER_API_KEY").filter(|k| !k.is_empty()));
        let lat = match lat {
            Some(v) => Some(v),
            None => env("WEATHER_FLAPPY_LAT")
                .map(|v| parse_number::<f64>("WEATHER_FLAPPY_LAT", v))
                .transpose()?,
        };
        let lon = match lon {
            Some(v) => Some(v),
            None => env("WEATHER_FLAPPY_LON")
                .map(|v| parse_number::<f64>("WEATHER_FLAPPY_LON", v))
                .transpose()?,
        };
        let location = match (lat, lon) {
            (Some(lat), Some(lon)) => Some(Coordinates { lat, lon }),
            (None, None) => None,
            _ => return Err(SettingsError::HalfCoordinates),
        };

        let log_path = log_path
            .or_else(|| env("WEATHER_FLAPPY_LOG").map(PathBuf::from))
            .unwrap_or_else(|| default_log_path(env("HOME")));
        let log_level = match env("WEATHER_FLAPPY_LOG_LEVEL") {
            Some(level) => level
                .parse()
                .map_err(|_| SettingsError::InvalidLogLevel(level))?,
            None => LevelFilter::Info,
        };

        Ok(Settings {
            api_key,
            location,
            offline,
            seed,
            log_path,
            log_level,
            show_help,
        })
    }

    /// Settings for this process.
    pub fn from_env() -> Result<Settings, SettingsError> {
        Settings::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
    }
}

//! HTTP sources: OpenWeather current conditions and IP-based location.

use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;

use super::{
    Coordinates, LocationSource, WeatherCondition, WeatherError, WeatherReading, WeatherSource,
};

const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const IP_LOCATION_URL: &str = "http://ip-api.com/json/?fields=status,message,lat,lon";
const USER_AGENT: &str = "weather-flappy";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Code the provider uses for a plain clear sky.
const CLEAR_SKY_CODE: u32 = 800;

// ── Wire formats ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ApiReport {
    main: ApiMain,
    #[serde(default)]
    weather: Vec<ApiCondition>,
    #[serde(default)]
    wind: Option<ApiWind>,
    name: String,
    #[serde(default)]
    sys: Option<ApiSys>,
}

#[derive(Deserialize)]
struct ApiMain {
    temp: f64,
    #[serde(default)]
    humidity: u8,
}

#[derive(Deserialize)]
struct ApiCondition {
    id: u32,
    main: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
struct ApiWind {
    speed: f64,
}

#[derive(Deserialize)]
struct ApiSys {
    country: Option<String>,
}

#[derive(Deserialize)]
struct IpLookup {
    status: String,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

// ── Parsing (pure) ───────────────────────────────────────────────────────────

/// Decode an OpenWeather "current weather" body.
///
/// A report without any condition entry, or with a blank condition name,
/// is treated as clear sky.
pub fn parse_report(body: &str) -> Result<WeatherReading, WeatherError> {
    let report: ApiReport =
        serde_json::from_str(body).map_err(|e| WeatherError::InvalidResponse(e.to_string()))?;
    Ok(reading_from(report))
}

fn reading_from(report: ApiReport) -> WeatherReading {
    let (condition, code, description) = match report.weather.into_iter().next() {
        Some(c) if !c.main.trim().is_empty() => {
            (WeatherCondition::from_name(&c.main), c.id, c.description)
        }
        Some(c) => (WeatherCondition::Clear, c.id, c.description),
        None => (WeatherCondition::Clear, CLEAR_SKY_CODE, "clear sky".to_string()),
    };

    WeatherReading {
        condition,
        code,
        location: report.name,
        country: report.sys.and_then(|s| s.country),
        description,
        temperature_c: report.main.temp,
        humidity: report.main.humidity,
        wind_speed: report.wind.map_or(0.0, |w| w.speed),
    }
}

/// Decode an ip-api.com lookup body.
pub fn parse_location(body: &str) -> Result<Coordinates, WeatherError> {
    let lookup: IpLookup =
        serde_json::from_str(body).map_err(|e| WeatherError::Location(e.to_string()))?;
    coordinates_from(lookup)
}

fn coordinates_from(lookup: IpLookup) -> Result<Coordinates, WeatherError> {
    if lookup.status != "success" {
        let reason = lookup.message.unwrap_or_else(|| lookup.status.clone());
        return Err(WeatherError::Location(reason));
    }

    match (lookup.lat, lookup.lon) {
        (Some(lat), Some(lon)) => Ok(Coordinates { lat, lon }),
        _ => Err(WeatherError::Location("lookup returned no coordinates".to_string())),
    }
}

// ── Transport ────────────────────────────────────────────────────────────────

fn agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
}

/// Turn a ureq failure into the matching error category.
fn classify(err: ureq::Error) -> WeatherError {
    match err {
        ureq::Error::Status(code, response) => {
            WeatherError::Api(format!("{} {}", code, response.status_text()))
        }
        ureq::Error::Transport(t) => WeatherError::Network(t.to_string()),
    }
}

// ── Location sources ─────────────────────────────────────────────────────────

/// Coordinates supplied up front (command line or environment).
pub struct FixedLocation(pub Coordinates);

impl LocationSource for FixedLocation {
    fn locate(&self) -> Result<Coordinates, WeatherError> {
        Ok(self.0)
    }
}

/// Approximate location from the public IP address.
pub struct IpLocation {
    agent: ureq::Agent,
    url: String,
}

impl IpLocation {
    pub fn new() -> Self {
        IpLocation {
            agent: agent(),
            url: IP_LOCATION_URL.to_string(),
        }
    }
}

impl Default for IpLocation {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationSource for IpLocation {
    fn locate(&self) -> Result<Coordinates, WeatherError> {
        let lookup: IpLookup = self
            .agent
            .get(&self.url)
            .call()
            .map_err(|e| WeatherError::Location(e.to_string()))?
            .into_json()
            .map_err(|e| WeatherError::Location(e.to_string()))?;
        coordinates_from(lookup)
    }
}

// ── OpenWeather ──────────────────────────────────────────────────────────────

/// Current conditions from OpenWeather for wherever `locator` says we are.
pub struct OpenWeatherClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: Option<String>,
    locator: Box<dyn LocationSource>,
}

impl OpenWeatherClient {
    pub fn new(api_key: Option<String>, locator: Box<dyn LocationSource>) -> Self {
        OpenWeatherClient {
            agent: agent(),
            base_url: OPENWEATHER_URL.to_string(),
            api_key,
            locator,
        }
    }
}

impl WeatherSource for OpenWeatherClient {
    fn fetch(&self) -> Result<WeatherReading, WeatherError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| WeatherError::Api("no API key configured".to_string()))?;

        let at = self.locator.locate()?;
        debug!("requesting weather for {:.3},{:.3}", at.lat, at.lon);

        let report: ApiReport = self
            .agent
            .get(&self.base_url)
            .query("lat", &at.lat.to_string())
            .query("lon", &at.lon.to_string())
            .query("appid", api_key)
            .query("units", "metric")
            .call()
            .map_err(classify)?
            .into_json()
            .map_err(|e| WeatherError::InvalidResponse(e.to_string()))?;

        let reading = reading_from(report);
        info!(
            "weather for {}: {} (code {})",
            reading.location,
            reading.condition.label(),
            reading.code
        );
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAINY: &str = r#"{
        "main": {"temp": 12.4, "humidity": 87, "pressure": 1009},
        "weather": [{"id": 501, "main": "Rain", "description": "moderate rain", "icon": "10d"}],
        "wind": {"speed": 5.1},
        "name": "Bergen",
        "sys": {"country": "NO"}
    }"#;

    #[test]
    fn parses_full_report() {
        let r = parse_report(RAINY).unwrap();
        assert_eq!(r.condition, WeatherCondition::Rain);
        assert_eq!(r.code, 501);
        assert_eq!(r.location, "Bergen");
        assert_eq!(r.country.as_deref(), Some("NO"));
        assert_eq!(r.description, "moderate rain");
        assert_eq!(r.humidity, 87);
        assert!((r.temperature_c - 12.4).abs() < 1e-9);
        assert!((r.wind_speed - 5.1).abs() < 1e-9);
    }

    #[test]
    fn empty_condition_list_means_clear() {
        let body = r#"{"main": {"temp": 20.0}, "weather": [], "name": "Lisbon"}"#;
        let r = parse_report(body).unwrap();
        assert_eq!(r.condition, WeatherCondition::Clear);
        assert_eq!(r.code, 800);
        assert_eq!(r.country, None);
        assert_eq!(r.wind_speed, 0.0);
    }

    #[test]
    fn blank_condition_name_means_clear() {
        let body = r#"{
            "main": {"temp": 24.0},
            "weather": [{"id": 800, "main": "  ", "description": "clear sky"}],
            "name": "Seville"
        }"#;
        let r = parse_report(body).unwrap();
        assert_eq!(r.condition, WeatherCondition::Clear);
        assert_eq!(r.code, 800);
        assert_eq!(r.description, "clear sky");

        let body = r#"{"main": {"temp": 24.0}, "weather": [{"id": 800, "main": ""}], "name": "Seville"}"#;
        assert_eq!(parse_report(body).unwrap().condition, WeatherCondition::Clear);
    }

    #[test]
    fn malformed_report_is_invalid_response() {
        let err = parse_report("{\"cod\": 401}").unwrap_err();
        assert!(matches!(err, WeatherError::InvalidResponse(_)));
        let err = parse_report("not json").unwrap_err();
        assert!(matches!(err, WeatherError::InvalidResponse(_)));
    }

    #[test]
    fn parses_ip_lookup() {
        let c = parse_location(r#"{"status":"success","lat":48.85,"lon":2.35}"#).unwrap();
        assert_eq!(c, Coordinates { lat: 48.85, lon: 2.35 });
    }

    #[test]
    fn failed_ip_lookup_is_location_error() {
        let err = parse_location(r#"{"status":"fail","message":"private range"}"#).unwrap_err();
        assert_eq!(err, WeatherError::Location("private range".to_string()));
    }

    #[test]
    fn missing_api_key_fails_before_any_request() {
        let client = OpenWeatherClient::new(
            None,
            Box::new(FixedLocation(Coordinates { lat: 0.0, lon: 0.0 })),
        );
        assert!(matches!(client.fetch(), Err(WeatherError::Api(_))));
    }
}

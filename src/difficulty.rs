/// Weather → difficulty tables.
///
/// `config_for_weather` is total: every condition, including ones the
/// provider invents later, lands on a fully populated `GameConfig`.

use crate::entities::{GameConfig, Rgb, Theme};
use crate::weather::{WeatherCondition, WeatherReading};

/// Condition codes the provider uses for the cloud-cover sub-levels.
const CLOUD_CODES: std::ops::RangeInclusive<u32> = 801..=804;

const BASE_THEME: Theme = Theme {
    background: (Rgb(0x87, 0xCE, 0xEB), Rgb(0x98, 0xD8, 0xE8)),
    bird: Rgb(0xFF, 0xD7, 0x00),
    pipe: Rgb(0x32, 0xCD, 0x32),
    text: Rgb(0x2C, 0x3E, 0x50),
    accent: Rgb(0x34, 0x98, 0xDB),
};

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            gravity: 0.6,
            jump_strength: -10.0,
            pipe_gap: 200.0,
            pipe_speed: 2.0,
            theme: BASE_THEME,
            weather_effect: "Clear sky".to_string(),
        }
    }
}

/// Map a weather reading to the gameplay configuration it produces.
pub fn config_for_weather(reading: &WeatherReading) -> GameConfig {
    let base = GameConfig::default();

    match reading.condition {
        WeatherCondition::Clear => GameConfig {
            theme: Theme {
                background: (Rgb(0x87, 0xCE, 0xEB), Rgb(0xFF, 0xD7, 0x00)),
                ..base.theme
            },
            weather_effect: format!(
                "Clear weather in {} - Perfect flying conditions!",
                reading.location
            ),
            ..base
        },
        WeatherCondition::Rain | WeatherCondition::Drizzle => GameConfig {
            gravity: 0.8,
            jump_strength: -12.0,
            pipe_gap: 160.0,
            pipe_speed: 4.0,
            theme: Theme {
                background: (Rgb(0x4A, 0x90, 0xE2), Rgb(0x5A, 0x7F, 0xBB)),
                bird: Rgb(0xE7, 0x4C, 0x3C),
                pipe: Rgb(0x2C, 0x3E, 0x50),
                text: Rgb(0xFF, 0xFF, 0xFF),
                accent: Rgb(0x34, 0x98, 0xDB),
            },
            weather_effect: "Rainy weather - Increased gravity!".to_string(),
        },
        WeatherCondition::Snow => GameConfig {
            gravity: 0.4,
            jump_strength: -8.0,
            pipe_gap: 220.0,
            pipe_speed: 2.5,
            theme: Theme {
                background: (Rgb(0xE8, 0xF4, 0xF8), Rgb(0xB8, 0xD4, 0xE3)),
                bird: Rgb(0xE6, 0x7E, 0x22),
                pipe: Rgb(0x34, 0x49, 0x5E),
                text: Rgb(0x2C, 0x3E, 0x50),
                accent: Rgb(0x34, 0x98, 0xDB),
            },
            weather_effect: "Snowy weather - Reduced gravity!".to_string(),
        },
        WeatherCondition::Thunderstorm => GameConfig {
            gravity: 0.9,
            jump_strength: -14.0,
            pipe_gap: 140.0,
            pipe_speed: 4.0,
            theme: Theme {
                background: (Rgb(0x2C, 0x3E, 0x50), Rgb(0x34, 0x49, 0x5E)),
                bird: Rgb(0xF3, 0x9C, 0x12),
                pipe: Rgb(0x1A, 0x25, 0x2F),
                text: Rgb(0xFF, 0xFF, 0xFF),
                accent: Rgb(0xE7, 0x4C, 0x3C),
            },
            weather_effect: "Thunderstorm - Maximum difficulty!".to_string(),
        },
        WeatherCondition::Fog | WeatherCondition::Mist | WeatherCondition::Haze => GameConfig {
            gravity: 0.5,
            jump_strength: -9.0,
            pipe_gap: 180.0,
            pipe_speed: 3.5,
            theme: Theme {
                background: (Rgb(0xBD, 0xC3, 0xC7), Rgb(0x95, 0xA5, 0xA6)),
                bird: Rgb(0x9B, 0x59, 0xB6),
                pipe: Rgb(0x7F, 0x8C, 0x8D),
                text: Rgb(0x2C, 0x3E, 0x50),
                accent: Rgb(0x8E, 0x44, 0xAD),
            },
            weather_effect: "Foggy weather - Limited visibility!".to_string(),
        },
        WeatherCondition::Clouds if CLOUD_CODES.contains(&reading.code) => GameConfig {
            gravity: 0.7,
            jump_strength: -11.0,
            pipe_gap: 170.0,
            pipe_speed: 3.5,
            theme: Theme {
                background: (Rgb(0x95, 0xA5, 0xA6), Rgb(0x7F, 0x8C, 0x8D)),
                bird: Rgb(0xE6, 0x7E, 0x22),
                pipe: Rgb(0x34, 0x49, 0x5E),
                text: Rgb(0xFF, 0xFF, 0xFF),
                accent: Rgb(0xD3, 0x54, 0x00),
            },
            weather_effect: "Cloudy weather - Moderate difficulty".to_string(),
        },
        WeatherCondition::Clouds | WeatherCondition::Unknown => base,
    }
}

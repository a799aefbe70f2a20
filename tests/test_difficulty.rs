use weather_flappy::difficulty::config_for_weather;
use weather_flappy::entities::{GameConfig, Rgb};
use weather_flappy::weather::{WeatherCondition, WeatherReading};

fn reading(condition: WeatherCondition, code: u32) -> WeatherReading {
    WeatherReading {
        condition,
        code,
        location: "Springfield".to_string(),
        country: Some("US".to_string()),
        description: String::new(),
        temperature_c: 18.0,
        humidity: 50,
        wind_speed: 3.0,
    }
}

fn physics(cfg: &GameConfig) -> (f64, f64, f64, f64) {
    (cfg.gravity, cfg.jump_strength, cfg.pipe_gap, cfg.pipe_speed)
}

// ── Base config ───────────────────────────────────────────────────────────────

#[test]
fn base_config_values() {
    let cfg = GameConfig::default();
    assert_eq!(physics(&cfg), (0.6, -10.0, 200.0, 2.0));
    assert_eq!(cfg.weather_effect, "Clear sky");
    assert_eq!(cfg.theme.background, (Rgb(0x87, 0xCE, 0xEB), Rgb(0x98, 0xD8, 0xE8)));
    assert_eq!(cfg.theme.bird, Rgb(0xFF, 0xD7, 0x00));
    assert_eq!(cfg.theme.pipe, Rgb(0x32, 0xCD, 0x32));
}

// ── Category table ────────────────────────────────────────────────────────────

#[test]
fn clear_keeps_base_physics_with_gold_sky() {
    let cfg = config_for_weather(&reading(WeatherCondition::Clear, 800));
    assert_eq!(physics(&cfg), (0.6, -10.0, 200.0, 2.0));
    assert_eq!(cfg.theme.background.1, Rgb(0xFF, 0xD7, 0x00));
    assert_eq!(cfg.theme.bird, GameConfig::default().theme.bird);
    assert!(cfg.weather_effect.contains("Springfield"));
}

#[test]
fn rain_and_drizzle_share_a_config() {
    let rain = config_for_weather(&reading(WeatherCondition::Rain, 500));
    let drizzle = config_for_weather(&reading(WeatherCondition::Drizzle, 300));
    assert_eq!(physics(&rain), (0.8, -12.0, 160.0, 4.0));
    assert_eq!(rain, drizzle);
    assert!(rain.weather_effect.contains("Increased gravity"));
    assert_eq!(rain.theme.bird, Rgb(0xE7, 0x4C, 0x3C));
}

#[test]
fn snow_lowers_gravity() {
    let cfg = config_for_weather(&reading(WeatherCondition::Snow, 601));
    assert_eq!(physics(&cfg), (0.4, -8.0, 220.0, 2.5));
    assert!(cfg.weather_effect.contains("Reduced gravity"));
}

#[test]
fn thunderstorm_is_hardest() {
    let cfg = config_for_weather(&reading(WeatherCondition::Thunderstorm, 211));
    assert_eq!(physics(&cfg), (0.9, -14.0, 140.0, 4.0));
    assert!(cfg.weather_effect.contains("Maximum difficulty"));
}

#[test]
fn fog_mist_and_haze_share_a_config() {
    let fog = config_for_weather(&reading(WeatherCondition::Fog, 741));
    let mist = config_for_weather(&reading(WeatherCondition::Mist, 701));
    let haze = config_for_weather(&reading(WeatherCondition::Haze, 721));
    assert_eq!(physics(&fog), (0.5, -9.0, 180.0, 3.5));
    assert_eq!(fog, mist);
    assert_eq!(fog, haze);
    assert!(fog.weather_effect.contains("Limited visibility"));
}

#[test]
fn clouds_in_range_are_moderate() {
    for code in 801..=804 {
        let cfg = config_for_weather(&reading(WeatherCondition::Clouds, code));
        assert_eq!(physics(&cfg), (0.7, -11.0, 170.0, 3.5));
        assert!(cfg.weather_effect.contains("Moderate difficulty"));
    }
}

#[test]
fn clouds_outside_range_fall_back_to_base() {
    assert_eq!(
        config_for_weather(&reading(WeatherCondition::Clouds, 805)),
        GameConfig::default()
    );
    assert_eq!(
        config_for_weather(&reading(WeatherCondition::Clouds, 800)),
        GameConfig::default()
    );
}

#[test]
fn unknown_condition_yields_base_config() {
    let cfg = config_for_weather(&reading(WeatherCondition::Unknown, 781));
    assert_eq!(cfg, GameConfig::default());
    assert_eq!(cfg.weather_effect, "Clear sky");
}

// ── Purity ────────────────────────────────────────────────────────────────────

#[test]
fn mapping_is_deterministic() {
    let all = [
        WeatherCondition::Clear,
        WeatherCondition::Rain,
        WeatherCondition::Drizzle,
        WeatherCondition::Snow,
        WeatherCondition::Thunderstorm,
        WeatherCondition::Fog,
        WeatherCondition::Mist,
        WeatherCondition::Haze,
        WeatherCondition::Clouds,
        WeatherCondition::Unknown,
    ];
    for condition in all {
        for code in [200, 500, 800, 802, 900] {
            let r = reading(condition, code);
            assert_eq!(config_for_weather(&r), config_for_weather(&r));
        }
    }
}

#[test]
fn location_only_affects_clear_text() {
    let mut a = reading(WeatherCondition::Rain, 500);
    let b = a.clone();
    a.location = "Elsewhere".to_string();
    assert_eq!(config_for_weather(&a), config_for_weather(&b));
}

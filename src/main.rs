mod display;

use std::io::{stdout, BufWriter, Write};
use std::rc::Rc;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use log::{error, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use display::PlayArea;
use weather_flappy::compute::{init_state, jump, reset, tick, with_config};
use weather_flappy::difficulty::config_for_weather;
use weather_flappy::entities::{GameConfig, GameState, Phase};
use weather_flappy::logging;
use weather_flappy::settings::{Settings, USAGE};
use weather_flappy::weather::{
    spawn_fetch, FixedLocation, IpLocation, LocationSource, OpenWeatherClient, WeatherSource,
    WeatherStatus, WeatherUpdate,
};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

// ── Input ─────────────────────────────────────────────────────────────────────

/// What a single terminal event asks the game to do.
enum Command {
    Jump,
    Reset,
    RetryWeather,
    Quit,
    Resize(u16, u16),
}

fn command_for(ev: Event, area: &PlayArea) -> Option<Command> {
    match ev {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) => match code {
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => Some(Command::Jump),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Reset),
            KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::RetryWeather),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }
            _ => None,
        },
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) if area.contains(column, row) => Some(Command::Jump),
        Event::Resize(w, h) => Some(Command::Resize(w, h)),
        _ => None,
    }
}

// ── Weather ───────────────────────────────────────────────────────────────────

fn weather_source(settings: &Settings) -> Option<Arc<dyn WeatherSource>> {
    if settings.offline {
        return None;
    }
    let locator: Box<dyn LocationSource> = match settings.location {
        Some(at) => Box::new(FixedLocation(at)),
        None => Box::new(IpLocation::new()),
    };
    Some(Arc::new(OpenWeatherClient::new(
        settings.api_key.clone(),
        locator,
    )))
}

/// Fold a finished fetch into the game.  On failure the current config
/// stays in place.
fn apply_weather(state: &GameState, update: WeatherUpdate) -> (GameState, WeatherStatus) {
    match update {
        Ok(reading) => {
            let config = config_for_weather(&reading);
            info!("new config: {}", config.weather_effect);
            (
                with_config(state, Rc::new(config)),
                WeatherStatus::Ready(reading),
            )
        }
        Err(e) => (state.clone(), WeatherStatus::Failed(e)),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn game_loop<W: Write>(
    out: &mut W,
    settings: &Settings,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = match settings.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let (width, height) = terminal::size()?;
    let mut area = PlayArea::new(width, height);
    let mut state = init_state(Rc::new(GameConfig::default()));

    let source = weather_source(settings);
    let (weather_tx, weather_rx) = mpsc::channel::<WeatherUpdate>();
    let mut weather = match &source {
        Some(source) => {
            spawn_fetch(Arc::clone(source), weather_tx.clone());
            WeatherStatus::Loading
        }
        None => WeatherStatus::Disabled,
    };

    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match command_for(ev, &area) {
                Some(Command::Jump) => {
                    let before = state.phase;
                    state = jump(&state);
                    if before != Phase::Playing {
                        info!("run started");
                    }
                }
                Some(Command::Reset) => state = reset(&state),
                Some(Command::RetryWeather) => {
                    if let Some(source) = &source {
                        if !weather.is_loading() {
                            info!("retrying weather lookup");
                            spawn_fetch(Arc::clone(source), weather_tx.clone());
                            weather = WeatherStatus::Loading;
                        }
                    }
                }
                Some(Command::Resize(w, h)) => area = PlayArea::new(w, h),
                Some(Command::Quit) => return Ok(()),
                None => {}
            }
        }

        // ── Weather results land between ticks ────────────────────────────────
        while let Ok(update) = weather_rx.try_recv() {
            let (next, status) = apply_weather(&state, update);
            state = next;
            weather = status;
        }

        // ── One simulation step per frame ─────────────────────────────────────
        let now = Instant::now();
        let elapsed_ms = now.duration_since(last_tick).as_secs_f64() * 1000.0;
        last_tick = now;

        let before = state.phase;
        state = tick(&state, elapsed_ms, &mut rng);
        if before == Phase::Playing && state.phase == Phase::GameOver {
            info!("game over, score {}", state.score);
        }

        display::render(out, &state, &weather, &area)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };
    if settings.show_help {
        println!("{USAGE}");
        return Ok(());
    }

    if let Err(e) = logging::init(&settings.log_path, settings.log_level) {
        eprintln!(
            "warning: logging disabled ({}): {e}",
            settings.log_path.display()
        );
    }
    info!("starting (offline: {})", settings.offline);
    if !settings.offline && settings.api_key.is_none() {
        warn!("no OpenWeather API key; playing with the default config");
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &settings, &rx);
    if let Err(e) = &result {
        error!("terminal error: {e}");
    }

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    log::logger().flush();

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_flappy::weather::{WeatherCondition, WeatherError, WeatherReading};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn space_and_click_both_jump() {
        let area = PlayArea::new(80, 30);
        assert!(matches!(command_for(press(KeyCode::Char(' ')), &area), Some(Command::Jump)));
        assert!(matches!(command_for(click(10, 10), &area), Some(Command::Jump)));
    }

    #[test]
    fn click_outside_play_area_is_ignored() {
        let area = PlayArea::new(80, 30);
        assert!(command_for(click(10, 1), &area).is_none());
    }

    #[test]
    fn failed_weather_keeps_config() {
        let state = init_state(Rc::new(GameConfig::default()));
        let err = WeatherError::Network("timed out".to_string());
        let (next, status) = apply_weather(&state, Err(err.clone()));
        assert_eq!(*next.config, GameConfig::default());
        assert_eq!(status, WeatherStatus::Failed(err));
    }

    #[test]
    fn reading_swaps_config() {
        let state = init_state(Rc::new(GameConfig::default()));
        let reading = WeatherReading {
            condition: WeatherCondition::Thunderstorm,
            code: 211,
            location: "Darwin".to_string(),
            country: Some("AU".to_string()),
            description: "thunderstorm".to_string(),
            temperature_c: 31.0,
            humidity: 70,
            wind_speed: 9.0,
        };
        let (next, status) = apply_weather(&state, Ok(reading.clone()));
        assert_eq!(next.config.gravity, 0.9);
        assert_eq!(next.phase, Phase::NotStarted);
        assert_eq!(status, WeatherStatus::Ready(reading));
    }
}

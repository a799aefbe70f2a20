/// All game entity types — pure data, no logic.

use std::rc::Rc;

// ── Playfield geometry (world units) ─────────────────────────────────────────

pub const PLAYFIELD_WIDTH: f64 = 800.0;
pub const PLAYFIELD_HEIGHT: f64 = 600.0;
pub const PIPE_WIDTH: f64 = 80.0;
pub const BIRD_RADIUS: f64 = 15.0;
pub const BIRD_START_X: f64 = 100.0;
pub const BIRD_START_Y: f64 = PLAYFIELD_HEIGHT / 2.0;

/// Smallest drawable height of either barrier of a pipe.
pub const MIN_PIPE_HEIGHT: f64 = 50.0;

/// A new pipe spawns once the rightmost one is this far left of the right edge.
pub const PIPE_SPAWN_DISTANCE: f64 = 300.0;

// ── Colours ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Linear blend from `a` to `b`; `t` is clamped to `0.0..=1.0`.
    pub fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
        Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    }
}

/// Cosmetic colour set derived from the weather.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// Background gradient, top stop then bottom stop.
    pub background: (Rgb, Rgb),
    pub bird: Rgb,
    pub pipe: Rgb,
    pub text: Rgb,
    pub accent: Rgb,
}

/// Physics constants plus theme, produced from one weather reading.
///
/// Immutable once built; a new reading replaces the whole value.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Downward acceleration per reference frame.
    pub gravity: f64,
    /// Upward velocity set by a jump (negative is up).
    pub jump_strength: f64,
    /// Vertical opening of newly spawned pipes.
    pub pipe_gap: f64,
    /// Horizontal scroll per reference frame.
    pub pipe_speed: f64,
    pub theme: Theme,
    /// Human-readable description of how the weather changes the game.
    pub weather_effect: String,
}

// ── Bird & pipes ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    pub velocity: f64,
    pub radius: f64,
}

impl Bird {
    /// The bird at its spawn point, at rest.
    pub fn at_start() -> Self {
        Bird {
            x: BIRD_START_X,
            y: BIRD_START_Y,
            velocity: 0.0,
            radius: BIRD_RADIUS,
        }
    }
}

/// A pair of opposed barriers with a gap between them.
///
/// `top_height + bottom_height + gap == PLAYFIELD_HEIGHT` for the gap in
/// force when the pipe spawned.
#[derive(Clone, Debug, PartialEq)]
pub struct Pipe {
    pub x: f64,
    /// Height of the top barrier, measured from the ceiling.
    pub top_height: f64,
    /// Height of the bottom barrier, measured from the floor.
    pub bottom_height: f64,
    pub width: f64,
    /// Set once the bird has flown past; scores at most once.
    pub passed: bool,
}

impl Pipe {
    /// X coordinate of the right-hand edge.
    pub fn trailing_edge(&self) -> f64 {
        self.x + self.width
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Playing,
    GameOver,
}

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
///
/// The config is shared, not owned: swapping it is a pointer replace and
/// never touches bird or pipes.
#[derive(Clone, Debug)]
pub struct GameState {
    pub bird: Bird,
    /// Spawn order, which is also left-to-right order.
    pub pipes: Vec<Pipe>,
    pub score: u32,
    pub phase: Phase,
    pub config: Rc<GameConfig>,
}

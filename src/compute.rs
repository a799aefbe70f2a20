/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use std::rc::Rc;

use rand::Rng;

use crate::entities::{
    Bird, GameConfig, GameState, Phase, Pipe, MIN_PIPE_HEIGHT, PIPE_SPAWN_DISTANCE, PIPE_WIDTH,
    PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH,
};

// ── Pacing constants ─────────────────────────────────────────────────────────

/// Frame interval the physics constants are tuned against (~60 FPS).
pub const REFERENCE_FRAME_MS: f64 = 16.67;

/// Longest elapsed time a single tick will integrate.
pub const MAX_TICK_MS: f64 = 250.0;

/// Upward kick on the very first start; softer than any configured jump.
pub const START_IMPULSE: f64 = -3.0;

/// Upward kick when restarting straight out of game over.
pub const RESTART_IMPULSE: f64 = -5.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh, not-yet-started game using `config`.
pub fn init_state(config: Rc<GameConfig>) -> GameState {
    GameState {
        bird: Bird::at_start(),
        pipes: Vec::new(),
        score: 0,
        phase: Phase::NotStarted,
        config,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Apply one jump input.  Starts, flaps, or restarts depending on phase.
pub fn jump(state: &GameState) -> GameState {
    match state.phase {
        Phase::NotStarted => GameState {
            bird: Bird {
                velocity: START_IMPULSE,
                ..Bird::at_start()
            },
            phase: Phase::Playing,
            ..state.clone()
        },
        Phase::Playing => GameState {
            bird: Bird {
                velocity: state.config.jump_strength,
                ..state.bird.clone()
            },
            ..state.clone()
        },
        Phase::GameOver => GameState {
            bird: Bird {
                velocity: RESTART_IMPULSE,
                ..Bird::at_start()
            },
            pipes: Vec::new(),
            score: 0,
            phase: Phase::Playing,
            config: Rc::clone(&state.config),
        },
    }
}

/// Back to the pre-start screen from any phase, keeping the current config.
pub fn reset(state: &GameState) -> GameState {
    init_state(Rc::clone(&state.config))
}

/// Swap in a new config.  Bird, pipes and score are untouched; pipes
/// already on screen keep the gap they spawned with.
pub fn with_config(state: &GameState, config: Rc<GameConfig>) -> GameState {
    GameState {
        config,
        ..state.clone()
    }
}

// ── Collision & spawning ─────────────────────────────────────────────────────

/// True if the bird touches the floor, the ceiling, or any barrier.
pub fn check_collision(bird: &Bird, pipes: &[Pipe]) -> bool {
    if bird.y + bird.radius >= PLAYFIELD_HEIGHT || bird.y - bird.radius <= 0.0 {
        return true;
    }

    pipes.iter().any(|pipe| {
        let overlaps_horizontally =
            bird.x + bird.radius > pipe.x && bird.x - bird.radius < pipe.trailing_edge();
        overlaps_horizontally
            && (bird.y - bird.radius < pipe.top_height
                || bird.y + bird.radius > PLAYFIELD_HEIGHT - pipe.bottom_height)
    })
}

/// New pipe at `x` with a `gap`-tall opening at a random height.
///
/// Both barriers are at least `MIN_PIPE_HEIGHT` tall whenever the gap
/// leaves room for that; an oversized gap pins the top barrier to the
/// minimum instead of failing.
pub fn generate_pipe(x: f64, gap: f64, rng: &mut impl Rng) -> Pipe {
    let max_top = (PLAYFIELD_HEIGHT - gap - MIN_PIPE_HEIGHT).max(MIN_PIPE_HEIGHT);
    let top_height = rng.gen_range(MIN_PIPE_HEIGHT..=max_top);
    Pipe {
        x,
        top_height,
        bottom_height: PLAYFIELD_HEIGHT - top_height - gap,
        width: PIPE_WIDTH,
        passed: false,
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by `elapsed_ms` of real time.  All randomness
/// comes through `rng` so callers control determinism.
///
/// Only the `Playing` phase moves; any other phase returns an unchanged copy.
pub fn tick(state: &GameState, elapsed_ms: f64, rng: &mut impl Rng) -> GameState {
    if state.phase != Phase::Playing {
        return state.clone();
    }

    let config = &state.config;
    let scale = elapsed_ms.clamp(0.0, MAX_TICK_MS) / REFERENCE_FRAME_MS;

    // ── 1. Bird physics ──────────────────────────────────────────────────────
    let velocity = state.bird.velocity + config.gravity * scale;
    let bird = Bird {
        y: state.bird.y + velocity * scale,
        velocity,
        ..state.bird.clone()
    };

    // ── 2. Scroll pipes and drop the ones fully off-screen ───────────────────
    let mut pipes: Vec<Pipe> = state
        .pipes
        .iter()
        .map(|p| Pipe {
            x: p.x - config.pipe_speed * scale,
            ..p.clone()
        })
        .filter(|p| p.trailing_edge() > 0.0)
        .collect();

    // ── 3. Spawn at the right edge when there is room ────────────────────────
    let should_spawn = pipes
        .last()
        .map_or(true, |last| last.x < PLAYFIELD_WIDTH - PIPE_SPAWN_DISTANCE);
    if should_spawn {
        pipes.push(generate_pipe(PLAYFIELD_WIDTH, config.pipe_gap, rng));
    }

    // ── 4. Score pipes the bird has cleared ──────────────────────────────────
    let mut score = state.score;
    for pipe in pipes.iter_mut() {
        if !pipe.passed && pipe.trailing_edge() < bird.x {
            pipe.passed = true;
            score += 1;
        }
    }

    // ── 5. Collision ends the run ────────────────────────────────────────────
    let phase = if check_collision(&bird, &pipes) {
        Phase::GameOver
    } else {
        Phase::Playing
    };

    GameState {
        bird,
        pipes,
        score,
        phase,
        config: Rc::clone(&state.config),
    }
}

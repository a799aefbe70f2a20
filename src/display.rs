/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use weather_flappy::entities::{
    GameState, Phase, Pipe, Rgb, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH,
};
use weather_flappy::weather::WeatherStatus;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::Cyan;
const C_PANEL: Color = Color::White;
const C_ERROR: Color = Color::Red;
const C_BORDER: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;
const C_OVERLAY_TEXT: Color = Color::White;
const C_OVERLAY_BG: Color = Color::Black;

/// Rows above the play area: title, two weather lines, top border.
const HEADER_ROWS: u16 = 4;
/// Rows below the play area: bottom border, controls hint.
const FOOTER_ROWS: u16 = 2;

fn term(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Where the 800×600 playfield lands on the terminal grid.
#[derive(Clone, Copy, Debug)]
pub struct PlayArea {
    pub term_width: u16,
    pub term_height: u16,
    pub left: u16,
    pub top: u16,
    pub cols: u16,
    pub rows: u16,
}

impl PlayArea {
    pub fn new(term_width: u16, term_height: u16) -> Self {
        PlayArea {
            term_width,
            term_height,
            left: 1,
            top: HEADER_ROWS,
            cols: term_width.saturating_sub(2),
            rows: term_height.saturating_sub(HEADER_ROWS + FOOTER_ROWS),
        }
    }

    /// True if the terminal cell lies inside the play area.
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.left
            && col < self.left + self.cols
            && row >= self.top
            && row < self.top + self.rows
    }

    fn col_of(&self, x: f64) -> i32 {
        (x / PLAYFIELD_WIDTH * self.cols as f64).floor() as i32
    }

    fn row_of(&self, y: f64) -> i32 {
        (y / PLAYFIELD_HEIGHT * self.rows as f64).floor() as i32
    }

    fn too_small(&self) -> bool {
        self.cols < 10 || self.rows < 6
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    weather: &WeatherStatus,
    area: &PlayArea,
) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_title(out, area)?;
    draw_weather_panel(out, state, weather, area)?;

    if area.too_small() {
        out.queue(cursor::MoveTo(1, area.top))?;
        out.queue(style::SetForegroundColor(C_ERROR))?;
        out.queue(Print("Terminal too small - please enlarge the window"))?;
    } else {
        draw_border(out, area)?;
        draw_background(out, state, area)?;
        for pipe in &state.pipes {
            draw_pipe(out, pipe, state, area)?;
        }
        draw_bird(out, state, area)?;
        draw_score(out, state, area)?;

        let final_score = format!("Final Score: {}", state.score);
        match state.phase {
            Phase::NotStarted => draw_overlay(
                out,
                area,
                &["Weather Flappy Bird", "", "Press SPACE or Click to Start"],
            )?,
            Phase::GameOver => draw_overlay(
                out,
                area,
                &[
                    "Game Over!",
                    final_score.as_str(),
                    "",
                    "Press SPACE or Click to Restart",
                ],
            )?,
            Phase::Playing => {}
        }
    }

    draw_controls_hint(out, area)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, area.term_height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Header ────────────────────────────────────────────────────────────────────

fn draw_title<W: Write>(out: &mut W, area: &PlayArea) -> std::io::Result<()> {
    let title = "~ WEATHER FLAPPY BIRD ~";
    let col = (area.term_width / 2).saturating_sub(title.len() as u16 / 2);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(title))?;
    Ok(())
}

fn draw_weather_panel<W: Write>(
    out: &mut W,
    state: &GameState,
    weather: &WeatherStatus,
    area: &PlayArea,
) -> std::io::Result<()> {
    let accent = term(state.config.theme.accent);
    let (first, first_color, second) = match weather {
        WeatherStatus::Disabled => (
            "Offline - weather lookup disabled".to_string(),
            C_PANEL,
            state.config.weather_effect.clone(),
        ),
        WeatherStatus::Loading => (
            "Getting your weather data...".to_string(),
            C_PANEL,
            state.config.weather_effect.clone(),
        ),
        WeatherStatus::Ready(r) => {
            let place = match &r.country {
                Some(country) => format!("{}, {}", r.location, country),
                None => r.location.clone(),
            };
            (
                format!(
                    "[{}] {}  {}°C  {}  humidity {}%  wind {:.1} m/s",
                    r.condition.label(),
                    place,
                    r.temperature_c.round(),
                    r.description,
                    r.humidity,
                    r.wind_speed
                ),
                C_PANEL,
                state.config.weather_effect.clone(),
            )
        }
        WeatherStatus::Failed(e) => (
            format!("Weather Error: {e}"),
            C_ERROR,
            format!("{} - press W to try again", e.hint()),
        ),
    };

    let max = area.term_width.saturating_sub(2) as usize;
    out.queue(cursor::MoveTo(1, 1))?;
    out.queue(style::SetForegroundColor(first_color))?;
    out.queue(Print(truncate(&first, max)))?;
    out.queue(cursor::MoveTo(1, 2))?;
    out.queue(style::SetForegroundColor(accent))?;
    out.queue(Print(truncate(&format!("» {second}"), max)))?;
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

// ── Playfield ─────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, area: &PlayArea) -> std::io::Result<()> {
    let bar = "─".repeat(area.cols as usize);
    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, area.top - 1))?;
    out.queue(Print(format!("┌{bar}┐")))?;
    out.queue(cursor::MoveTo(0, area.top + area.rows))?;
    out.queue(Print(format!("└{bar}┘")))?;

    for row in area.top..area.top + area.rows {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(area.left + area.cols, row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

/// Background colour of play-area row `row`.
fn sky_at(state: &GameState, area: &PlayArea, row: u16) -> Color {
    let (top, bottom) = state.config.theme.background;
    let t = row as f64 / area.rows.saturating_sub(1).max(1) as f64;
    term(Rgb::lerp(top, bottom, t))
}

fn draw_background<W: Write>(
    out: &mut W,
    state: &GameState,
    area: &PlayArea,
) -> std::io::Result<()> {
    let blank = " ".repeat(area.cols as usize);
    for row in 0..area.rows {
        out.queue(cursor::MoveTo(area.left, area.top + row))?;
        out.queue(style::SetBackgroundColor(sky_at(state, area, row)))?;
        out.queue(Print(&blank))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

fn draw_pipe<W: Write>(
    out: &mut W,
    pipe: &Pipe,
    state: &GameState,
    area: &PlayArea,
) -> std::io::Result<()> {
    let first = area.col_of(pipe.x).max(0);
    let last = area.col_of(pipe.trailing_edge()).min(area.cols as i32);
    if first >= last {
        return Ok(());
    }
    let width = (last - first) as usize;
    let body = "█".repeat(width);

    let top_end = area.row_of(pipe.top_height).clamp(0, area.rows as i32);
    let bottom_start = area
        .row_of(PLAYFIELD_HEIGHT - pipe.bottom_height)
        .clamp(0, area.rows as i32);

    out.queue(style::SetForegroundColor(term(state.config.theme.pipe)))?;
    let rows = (0..top_end).chain(bottom_start..area.rows as i32);
    for row in rows {
        out.queue(cursor::MoveTo(area.left + first as u16, area.top + row as u16))?;
        out.queue(Print(&body))?;
    }
    Ok(())
}

fn draw_bird<W: Write>(out: &mut W, state: &GameState, area: &PlayArea) -> std::io::Result<()> {
    let col = area.col_of(state.bird.x);
    let row = area.row_of(state.bird.y);
    if col < 0 || row < 0 || col >= area.cols as i32 || row >= area.rows as i32 {
        return Ok(());
    }
    out.queue(cursor::MoveTo(area.left + col as u16, area.top + row as u16))?;
    out.queue(style::SetBackgroundColor(sky_at(state, area, row as u16)))?;
    out.queue(style::SetForegroundColor(term(state.config.theme.bird)))?;
    out.queue(Print("●"))?;
    out.queue(style::ResetColor)?;
    Ok(())
}

fn draw_score<W: Write>(out: &mut W, state: &GameState, area: &PlayArea) -> std::io::Result<()> {
    let text = format!(" Score: {} ", state.score);
    let col = area.left + (area.cols / 2).saturating_sub(text.len() as u16 / 2);
    out.queue(cursor::MoveTo(col, area.top + 1))?;
    out.queue(style::SetBackgroundColor(sky_at(state, area, 1)))?;
    out.queue(style::SetForegroundColor(term(state.config.theme.text)))?;
    out.queue(Print(text))?;
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_overlay<W: Write>(out: &mut W, area: &PlayArea, lines: &[&str]) -> std::io::Result<()> {
    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 4;
    let inner = inner.min(area.cols as usize);
    let start_row = area.top + (area.rows / 2).saturating_sub(lines.len() as u16 / 2);
    let start_col = area.left + (area.cols / 2).saturating_sub(inner as u16 / 2);

    out.queue(style::SetBackgroundColor(C_OVERLAY_BG))?;
    out.queue(style::SetForegroundColor(C_OVERLAY_TEXT))?;
    for (i, line) in lines.iter().enumerate() {
        let text = truncate(&format!("{line:^inner$}"), inner);
        out.queue(cursor::MoveTo(start_col, start_row + i as u16))?;
        out.queue(Print(text))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, area: &PlayArea) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, area.term_height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(truncate(
        "SPACE / Click : Jump   R : Reset   W : Retry weather   Q : Quit",
        area.term_width.saturating_sub(2) as usize,
    )))?;
    Ok(())
}

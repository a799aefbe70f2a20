//! Background fetching so a slow weather service never stalls a frame.

use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::warn;

use super::{WeatherError, WeatherReading, WeatherSource};

/// Outcome of one fetch, delivered to the frame loop.
pub type WeatherUpdate = Result<WeatherReading, WeatherError>;

/// Run one fetch on its own thread and post the result to `tx`.
///
/// If the receiving side has already gone away the result is discarded.
pub fn spawn_fetch(source: Arc<dyn WeatherSource>, tx: Sender<WeatherUpdate>) -> JoinHandle<()> {
    thread::spawn(move || {
        let update = source.fetch();
        if let Err(e) = &update {
            warn!("weather fetch failed: {e}");
        }
        // Err here only means the game has shut down.
        let _ = tx.send(update);
    })
}

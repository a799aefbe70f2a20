pub mod compute;
pub mod difficulty;
pub mod entities;
pub mod logging;
pub mod settings;
pub mod weather;

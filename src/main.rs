//! Terminal Snake
//!
//! Steer the snake with the arrow keys, eat the food, avoid the walls and
//! your own tail. The best score is kept between sessions.

mod app;
mod config;
mod error;
mod food;
mod game;
mod grid;
mod input;
mod render;
mod snake;
mod storage;
mod terminal;

use app::App;
use config::{AppConfig, DebugConfig};
use error::AppError;

fn main() {
    let config = AppConfig::load();
    let log_level = match &config {
        Ok(config) => config.debug.log_level.clone(),
        Err(_) => DebugConfig::default().log_level,
    };
    // logs go to stderr, the board owns stdout
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let result = config
        .map_err(AppError::from)
        .and_then(|config| App::new(config).run());
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

//! Game configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml`
//! 2. `config/user.toml` (user overrides)
//! 3. Environment variables (`SNAKE_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::grid::{Cell, Direction, Grid};

const MIN_GRID_SIZE: i32 = 5;
// two terminal columns per cell
const MAX_GRID_SIZE: i32 = 100;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Board and starting position
    #[serde(default)]
    pub game: GameConfig,
    /// Tick timing
    #[serde(default)]
    pub speed: SpeedConfig,
    /// Best score persistence
    #[serde(default)]
    pub storage: StorageConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from the `config` directory and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }
        // SNAKE_GAME__GRID_SIZE=30 -> game.grid_size = 30
        figment = figment.merge(Env::prefixed("SNAKE_").split("__"));

        let config: AppConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the game cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let game = &self.game;
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&game.grid_size) {
            return Err(ConfigError::new(format!(
                "grid_size must be between {} and {}, got {}",
                MIN_GRID_SIZE, MAX_GRID_SIZE, game.grid_size
            )));
        }
        let grid = game.grid();
        if !grid.contains(&game.start_cell()) {
            return Err(ConfigError::new("initial snake position is off the board"));
        }
        if !grid.contains(&game.food_cell()) {
            return Err(ConfigError::new("initial food position is off the board"));
        }
        if game.start_cell() == game.food_cell() {
            return Err(ConfigError::new("initial food overlaps the snake"));
        }
        if self.speed.min_interval_ms == 0 || self.speed.min_interval_ms > self.speed.base_interval_ms {
            return Err(ConfigError::new(
                "min_interval_ms must be positive and not above base_interval_ms",
            ));
        }
        Ok(())
    }
}

/// Board configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of cells per side
    pub grid_size: i32,
    /// Starting head cell [x, y]
    pub initial_snake: [i32; 2],
    /// Starting food cell [x, y]
    pub initial_food: [i32; 2],
    /// Starting direction
    pub initial_direction: Direction,
}

impl GameConfig {
    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_size)
    }

    pub fn start_cell(&self) -> Cell {
        Cell::new(self.initial_snake[0], self.initial_snake[1])
    }

    pub fn food_cell(&self) -> Cell {
        Cell::new(self.initial_food[0], self.initial_food[1])
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_snake: [10, 10],
            initial_food: [15, 15],
            initial_direction: Direction::Right,
        }
    }
}

/// Tick timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    /// Interval between ticks at score 0, in milliseconds
    pub base_interval_ms: u64,
    /// Lower bound on the interval when speeding up
    pub min_interval_ms: u64,
    /// Shorten the interval by one millisecond per point scored
    pub speed_up: bool,
}

impl SpeedConfig {
    pub fn tick_interval_ms(&self, score: u32) -> u64 {
        if !self.speed_up {
            return self.base_interval_ms;
        }
        self.base_interval_ms
            .saturating_sub(score as u64)
            .max(self.min_interval_ms)
    }
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: 250,
            min_interval_ms: 50,
            speed_up: true,
        }
    }
}

/// Best score persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// File holding the best score
    pub best_score_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            best_score_path: PathBuf::from("best_score.json"),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace), `RUST_LOG` takes precedence
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn new(message: impl Into<String>) -> Self {
        ConfigError {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.game.grid_size, 20);
        assert_eq!(config.game.start_cell(), Cell::new(10, 10));
        assert_eq!(config.game.food_cell(), Cell::new(15, 15));
        assert_eq!(config.game.initial_direction, Direction::Right);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("grid_size"));
        assert!(toml.contains("best_score_path"));
    }

    #[test]
    #[serial]
    fn test_missing_directory_uses_defaults() {
        let config = AppConfig::load_from("does/not/exist").unwrap();
        assert_eq!(config.speed.base_interval_ms, 250);
    }

    #[test]
    #[serial]
    fn test_toml_overrides() {
        let dir = std::env::temp_dir().join(format!("termsnake-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("default.toml"),
            "[game]\ngrid_size = 30\ninitial_snake = [1, 1]\ninitial_food = [2, 2]\ninitial_direction = \"Down\"\n",
        )
        .unwrap();
        std::fs::write(dir.join("user.toml"), "[speed]\nspeed_up = false\nbase_interval_ms = 200\nmin_interval_ms = 50\n").unwrap();

        let config = AppConfig::load_from(&dir).unwrap();
        assert_eq!(config.game.grid_size, 30);
        assert_eq!(config.game.initial_direction, Direction::Down);
        assert!(!config.speed.speed_up);
        assert_eq!(config.speed.tick_interval_ms(100), 200);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    #[serial]
    fn test_env_overrides_toml() {
        std::env::set_var("SNAKE_GAME__GRID_SIZE", "25");
        std::env::set_var("SNAKE_DEBUG__LOG_LEVEL", "debug");
        let config = AppConfig::load_from("does/not/exist");
        std::env::remove_var("SNAKE_GAME__GRID_SIZE");
        std::env::remove_var("SNAKE_DEBUG__LOG_LEVEL");

        let config = config.unwrap();
        assert_eq!(config.game.grid_size, 25);
        assert_eq!(config.debug.log_level, "debug");
    }

    #[test]
    #[serial]
    fn test_env_values_are_validated() {
        std::env::set_var("SNAKE_GAME__GRID_SIZE", "3");
        let result = AppConfig::load_from("does/not/exist");
        std::env::remove_var("SNAKE_GAME__GRID_SIZE");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_huge_grid() {
        let mut config = AppConfig::default();
        config.game.grid_size = 50_000;
        assert!(config.validate().is_err());
        config.game.grid_size = 101;
        assert!(config.validate().is_err());
        config.game.grid_size = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_small_grid() {
        let mut config = AppConfig::default();
        config.game.grid_size = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_food_off_board() {
        let mut config = AppConfig::default();
        config.game.initial_food = [20, 3];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tick_interval_speeds_up_with_score() {
        let speed = SpeedConfig::default();
        assert_eq!(speed.tick_interval_ms(0), 250);
        assert_eq!(speed.tick_interval_ms(100), 150);
        assert_eq!(speed.tick_interval_ms(200), 50);
        assert_eq!(speed.tick_interval_ms(1000), 50);
    }
}

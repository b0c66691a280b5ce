use std::io;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Anything that stops the game from starting or ends it abnormally
#[derive(Debug)]
pub enum AppError {
    /// Terminal or stdin failure
    Io(io::Error),
    Config(ConfigError),
    Storage(StorageError),
    /// The stdin reader thread went away
    InputClosed,
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        AppError::Io(e)
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Storage(e)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "IO error: {}", e),
            AppError::Config(e) => write!(f, "{}", e),
            AppError::Storage(e) => write!(f, "Best score storage error: {}", e),
            AppError::InputClosed => write!(f, "Input channel disconnected"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Storage(e) => Some(e),
            AppError::InputClosed => None,
        }
    }
}

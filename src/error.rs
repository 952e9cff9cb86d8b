/// Error types.

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but cannot be played with
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that end a run early.  Game over and quitting are not errors.
#[derive(Error, Debug)]
pub enum GameError {
    /// Terminal I/O failed
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The input stream ended while the game was waiting on it
    #[error("input stream closed")]
    InputClosed,
}

/// Game configuration, loaded from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::entities::{BULLET_SIZE, PLAYER_SIZE, PLAYER_SPEED, PLAYER_X};
use crate::error::ConfigError;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SIDE_SHOOTER_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "side_shooter.toml";
/// Largest accepted playfield side.  Keeps spawn arithmetic well inside `i32`.
pub const MAX_PLAYFIELD: i32 = 100_000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Logical playfield width
    pub width: i32,

    /// Logical playfield height
    pub height: i32,

    /// Target ticks per second
    pub frame_rate: u32,

    /// How long the game-over screen stays up
    pub game_over_delay_ms: u64,

    /// Vertical player movement per tick
    pub player_speed: i32,

    /// Ticks between shots while fire is held; 0 fires every tick
    pub fire_cooldown_frames: u32,

    /// Log destination while the terminal is in raw mode
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            frame_rate: 60,
            game_over_delay_ms: 3000,
            player_speed: PLAYER_SPEED,
            fire_cooldown_frames: 0,
            log_file: None,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// `$SIDE_SHOOTER_CONFIG`, then `./side_shooter.toml` if it exists.
    pub fn locate() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        local.exists().then(|| local.to_path_buf())
    }

    /// Load from `path`, or fall back to defaults when there is none.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Enemies spawn with y in [50, height - 50].
        if self.height <= 100 {
            return Err(ConfigError::Invalid(format!(
                "height must be greater than 100, got {}",
                self.height
            )));
        }
        // The player column plus a freshly fired bullet must fit.
        let min_width = PLAYER_X + PLAYER_SIZE + BULLET_SIZE;
        if self.width <= min_width {
            return Err(ConfigError::Invalid(format!(
                "width must be greater than {}, got {}",
                min_width, self.width
            )));
        }
        if self.width > MAX_PLAYFIELD || self.height > MAX_PLAYFIELD {
            return Err(ConfigError::Invalid(format!(
                "playfield must be at most {0}x{0}, got {1}x{2}",
                MAX_PLAYFIELD, self.width, self.height
            )));
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::Invalid("frame_rate must be positive".into()));
        }
        if self.player_speed <= 0 {
            return Err(ConfigError::Invalid(format!(
                "player_speed must be positive, got {}",
                self.player_speed
            )));
        }
        Ok(())
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    pub fn game_over_delay(&self) -> Duration {
        Duration::from_millis(self.game_over_delay_ms)
    }
}

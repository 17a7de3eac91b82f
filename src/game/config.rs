use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Width of the playing field in cells
pub const GRID_WIDTH: usize = 32;
/// Height of the playing field in cells
pub const GRID_HEIGHT: usize = 24;

/// Tuning knobs for the game
///
/// The grid size is fixed at compile time; everything else can be loaded
/// from a JSON file. Fields missing from the file keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Length the snake grows to right after a reset
    pub initial_snake_length: usize,
    /// Moves per second at the start of a round
    pub base_speed: u32,
    /// Upper bound for moves per second
    pub max_speed: u32,
    /// Points awarded per food
    pub food_score: u32,
    /// The snake speeds up by one move per second every time the score
    /// reaches a multiple of this
    pub speedup_every: u32,
    /// Frames rendered per second
    pub frame_rate: u32,
    /// Seed for food placement and starting heading
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_snake_length: 3,
            base_speed: 10,
            max_speed: 20,
            food_score: 10,
            speedup_every: 50,
            frame_rate: 60,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load a configuration from a JSON file and validate it
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_snake_length == 0 {
            bail!("initial_snake_length must be at least 1");
        }
        if self.base_speed == 0 {
            bail!("base_speed must be at least 1");
        }
        if self.max_speed < self.base_speed {
            bail!(
                "max_speed ({}) must not be below base_speed ({})",
                self.max_speed,
                self.base_speed
            );
        }
        if self.speedup_every == 0 {
            bail!("speedup_every must be at least 1");
        }
        if self.frame_rate == 0 {
            bail!("frame_rate must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.base_speed, 10);
        assert_eq!(config.max_speed, 20);
        assert_eq!(config.food_score, 10);
        assert_eq!(config.speedup_every, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "base_speed": 5, "seed": 42 }}"#).unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_speed, 5);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_speed, 20);
        assert_eq!(config.frame_rate, 60);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "base_speed": 30, "max_speed": 20 }}"#).unwrap();

        let err = GameConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("max_speed"));
    }

    #[test]
    fn test_missing_file() {
        let err = GameConfig::from_file(Path::new("/nonexistent/snake.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_zero_values_rejected() {
        let config = GameConfig {
            frame_rate: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            initial_snake_length: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

//! Configuration file support for rollcall.
//!
//! Configuration is loaded from `~/.config/rollcall/config.toml` with the
//! following precedence:
//! 1. CLI arguments (highest priority)
//! 2. Configuration file
//! 3. Default values (lowest priority)
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.config/rollcall/config.toml
//! roster_file = "class-3b.xlsx"
//! sounds_dir = "sounds"
//! roll_speed_ms = 120
//! ```

use std::path::PathBuf;

use serde::Deserialize;

/// Lower bound for the spin tick cadence, in milliseconds
pub const SPEED_MIN_MS: u64 = 50;
/// Upper bound for the spin tick cadence, in milliseconds
pub const SPEED_MAX_MS: u64 = 300;
/// Default spin tick cadence, in milliseconds
pub const SPEED_DEFAULT_MS: u64 = 100;
/// Step applied by the speed keys
pub const SPEED_STEP_MS: u64 = 10;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Roster workbook to load at startup and save on exit
    pub roster_file: Option<PathBuf>,

    /// Directory holding the optional sound cues
    pub sounds_dir: Option<PathBuf>,

    /// Milliseconds between spin ticks, clamped to 50..=300
    pub roll_speed_ms: Option<u64>,
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rollcall")
            .join("config.toml")
    }

    /// Get the roster workbook path, falling back to the default.
    pub fn roster_file(&self) -> PathBuf {
        self.roster_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("students.xlsx"))
    }

    /// Get the sound cue directory, falling back to the default.
    pub fn sounds_dir(&self) -> PathBuf {
        self.sounds_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("sounds"))
    }

    /// Get the spin cadence in milliseconds, clamped to the documented bounds.
    pub fn roll_speed_ms(&self) -> u64 {
        self.roll_speed_ms
            .unwrap_or(SPEED_DEFAULT_MS)
            .clamp(SPEED_MIN_MS, SPEED_MAX_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.roster_file.is_none());
        assert!(config.sounds_dir.is_none());
        assert_eq!(config.roll_speed_ms(), SPEED_DEFAULT_MS);
        assert_eq!(config.roster_file(), PathBuf::from("students.xlsx"));
        assert_eq!(config.sounds_dir(), PathBuf::from("sounds"));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            roster_file = "class-3b.xlsx"
            sounds_dir = "assets/sounds"
            roll_speed_ms = 120
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.roster_file, Some(PathBuf::from("class-3b.xlsx")));
        assert_eq!(config.sounds_dir, Some(PathBuf::from("assets/sounds")));
        assert_eq!(config.roll_speed_ms(), 120);
    }

    #[test]
    fn test_speed_clamped_to_bounds() {
        let config: Config = toml::from_str("roll_speed_ms = 5").unwrap();
        assert_eq!(config.roll_speed_ms(), SPEED_MIN_MS);

        let config: Config = toml::from_str("roll_speed_ms = 5000").unwrap();
        assert_eq!(config.roll_speed_ms(), SPEED_MAX_MS);
    }
}

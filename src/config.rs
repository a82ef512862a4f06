//! Automaton configuration.
//!
//! Kept deliberately small: the automaton itself is a pure state machine,
//! so the only tunable is which input mode a fresh instance starts in.
//! Serialization follows the TOML load/save surface used across the
//! project's configs.

use serde::{Deserialize, Serialize};

/// Configuration for [`crate::HangulAutomaton`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Whether a fresh automaton starts in Korean mode. Off by default:
    /// the host begins in Latin pass-through and toggles explicitly.
    pub korean_mode_default: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            korean_mode_default: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_starts_latin() {
        assert!(!Config::default().korean_mode_default);
    }

    #[test]
    fn toml_round_trip() {
        let config = Config {
            korean_mode_default: true,
        };
        let text = config.to_toml_string().unwrap();
        let back = Config::from_toml_str(&text).unwrap();
        assert!(back.korean_mode_default);
    }

    #[test]
    fn parses_plain_toml() {
        let config = Config::from_toml_str("korean_mode_default = true").unwrap();
        assert!(config.korean_mode_default);
    }
}

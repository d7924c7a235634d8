use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::PlayerMode;

pub const DEFAULT_BOT_DELAY_MS: u64 = 500;
pub const MAX_BOT_DELAY_MS: u64 = 10_000;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TicTacToeSessionSettings {
    pub player_mode: PlayerMode,
    pub bot_delay_ms: u64,
    pub seed: Option<u64>,
}

impl TicTacToeSessionSettings {
    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.bot_delay_ms)
    }
}

impl Default for TicTacToeSessionSettings {
    fn default() -> Self {
        Self {
            player_mode: PlayerMode::X,
            bot_delay_ms: DEFAULT_BOT_DELAY_MS,
            seed: None,
        }
    }
}

impl Validate for TicTacToeSessionSettings {
    fn validate(&self) -> Result<(), String> {
        if self.bot_delay_ms > MAX_BOT_DELAY_MS {
            return Err(format!(
                "bot_delay_ms ({}) must not exceed {}",
                self.bot_delay_ms, MAX_BOT_DELAY_MS
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = TicTacToeSessionSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.bot_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_excessive_delay_is_rejected() {
        let settings = TicTacToeSessionSettings {
            bot_delay_ms: MAX_BOT_DELAY_MS + 1,
            ..TicTacToeSessionSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: TicTacToeSessionSettings =
            serde_yaml_ng::from_str("player_mode: both\n").unwrap();
        assert_eq!(settings.player_mode, PlayerMode::Both);
        assert_eq!(settings.bot_delay_ms, DEFAULT_BOT_DELAY_MS);
        assert_eq!(settings.seed, None);
    }
}

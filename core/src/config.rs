// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game session configuration

use crate::board::MAX_BOARD_SIZE;
use crate::GameError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_board_size")]
    pub board_size: u8,
}

fn default_board_size() -> u8 {
    9
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
        }
    }
}

impl GameConfig {
    pub fn new(board_size: u8) -> Self {
        Self { board_size }
    }

    /// Reject sizes the board cannot represent
    pub fn validate(&self) -> Result<(), GameError> {
        if self.board_size == 0 || self.board_size > MAX_BOARD_SIZE {
            return Err(GameError::InvalidBoardSize(self.board_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: GameConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GameConfig::default());

        let config: GameConfig = serde_json::from_str(r#"{"board_size": 13}"#).unwrap();
        assert_eq!(config.board_size, 13);
    }

    #[test]
    fn test_validate_bounds() {
        assert!(GameConfig::new(1).validate().is_ok());
        assert!(GameConfig::new(25).validate().is_ok());
        assert_eq!(
            GameConfig::new(0).validate(),
            Err(GameError::InvalidBoardSize(0))
        );
        assert_eq!(
            GameConfig::new(30).validate(),
            Err(GameError::InvalidBoardSize(30))
        );
    }
}

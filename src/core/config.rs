//! Game configuration.
//!
//! `GameConfig` carries the number bounds used for card generation and the
//! timing values the host needs. Defaults match a classic 75-ball game.
//! The server can override the bounds and draw delay when a client connects.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Numbers per column of a bingo card (B, I, N, G, O).
pub const NUMBERS_PER_COLUMN: u32 = 15;

/// Columns (and rows) on a card.
pub const CARD_SIZE: usize = 5;

/// Errors raised when loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML source could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// `min_number` exceeds `max_number`.
    #[error("min_number {min} exceeds max_number {max}")]
    InvalidRange { min: u32, max: u32 },

    /// `min_number` must be positive; zero and negatives collide with the FREE marker.
    #[error("min_number must be at least 1")]
    NonPositiveMin,
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Lowest number on the board.
    pub min_number: u32,

    /// Highest number on the board.
    pub max_number: u32,

    /// Delay between draws on the server, in milliseconds (display only).
    pub draw_delay_ms: u64,

    /// Card size requested from the generator. Only 5 is supported.
    pub card_size: usize,

    /// Countdown used when the server does not send one with the closing notice.
    pub closing_countdown_secs: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_number: 1,
            max_number: 75,
            draw_delay_ms: 3000,
            card_size: CARD_SIZE,
            closing_countdown_secs: 5,
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML. Missing keys keep their defaults.
    ///
    /// ```
    /// use bingo_sync::core::GameConfig;
    ///
    /// let config = GameConfig::from_toml_str("max_number = 90").unwrap();
    /// assert_eq!(config.min_number, 1);
    /// assert_eq!(config.max_number, 90);
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the number bounds.
    #[must_use]
    pub fn with_range(mut self, min: u32, max: u32) -> Self {
        self.min_number = min;
        self.max_number = max;
        self
    }

    /// Set the draw delay.
    #[must_use]
    pub fn with_draw_delay_ms(mut self, delay: u64) -> Self {
        self.draw_delay_ms = delay;
        self
    }

    /// Set the card size.
    #[must_use]
    pub fn with_card_size(mut self, size: usize) -> Self {
        self.card_size = size;
        self
    }

    /// Set the fallback closing countdown.
    #[must_use]
    pub fn with_closing_countdown(mut self, secs: u32) -> Self {
        self.closing_countdown_secs = secs;
        self
    }

    /// Check the number bounds.
    ///
    /// Card size is not checked here; the generator rejects unsupported
    /// sizes at generation time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_number == 0 {
            return Err(ConfigError::NonPositiveMin);
        }
        if self.min_number > self.max_number {
            return Err(ConfigError::InvalidRange {
                min: self.min_number,
                max: self.max_number,
            });
        }
        Ok(())
    }
}

//! Input checks for game results.
//!
//! Scoring strategies accept anything; the results workflow runs these
//! checks before scoring so malformed games never reach the standings.

use std::collections::HashSet;
use thiserror::Error;

use super::models::{GameResult, PlayerId, Rank};

/// Reasons a game result is rejected
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResultValidationError {
    #[error("field size must be at least 1")]
    EmptyField,

    #[error("field size {total_players} exceeds the maximum of {max}")]
    FieldTooLarge { total_players: u32, max: u32 },

    #[error("result #{index} has no player id")]
    MissingPlayerId { index: usize },

    #[error("player {player_id} has invalid rank {rank}")]
    InvalidRank { player_id: PlayerId, rank: Rank },

    #[error("player {player_id} ranked {rank} in a field of {total_players}")]
    RankExceedsField {
        player_id: PlayerId,
        rank: Rank,
        total_players: u32,
    },

    #[error("player {0} is listed more than once")]
    DuplicatePlayer(PlayerId),
}

/// Result type for game result validation
pub type ResultValidationResult<T> = Result<T, ResultValidationError>;

impl GameResult {
    /// Check the game is well formed.
    ///
    /// Rank gaps (e.g. 1, 2, 4) are accepted.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, checking the field size before the
    /// individual results.
    pub fn validate(&self, max_field_size: u32) -> ResultValidationResult<()> {
        if self.total_players == 0 {
            return Err(ResultValidationError::EmptyField);
        }

        if self.total_players > max_field_size {
            return Err(ResultValidationError::FieldTooLarge {
                total_players: self.total_players,
                max: max_field_size,
            });
        }

        let mut seen = HashSet::with_capacity(self.results.len());
        for (index, result) in self.results.iter().enumerate() {
            if result.player_id.trim().is_empty() {
                return Err(ResultValidationError::MissingPlayerId { index });
            }

            if result.rank == 0 {
                return Err(ResultValidationError::InvalidRank {
                    player_id: result.player_id.clone(),
                    rank: result.rank,
                });
            }

            if result.rank > self.total_players {
                return Err(ResultValidationError::RankExceedsField {
                    player_id: result.player_id.clone(),
                    rank: result.rank,
                    total_players: self.total_players,
                });
            }

            if !seen.insert(result.player_id.as_str()) {
                return Err(ResultValidationError::DuplicatePlayer(
                    result.player_id.clone(),
                ));
            }
        }

        Ok(())
    }
}

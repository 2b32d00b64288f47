//! League error types.

use chrono::NaiveDate;
use thiserror::Error;

use super::models::{EventId, LeagueId, SeasonId, SeriesId};
use crate::scoring::{GameType, PlayerId, ResultValidationError};

/// League errors
#[derive(Debug, Error)]
pub enum LeagueError {
    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("League not found: {0}")]
    LeagueNotFound(LeagueId),

    #[error("Season not found: {0}")]
    SeasonNotFound(SeasonId),

    #[error("Series not found: {0}")]
    SeriesNotFound(SeriesId),

    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("Player {player_id} is not on the roster of league {league_id}")]
    PlayerNotFound {
        league_id: LeagueId,
        player_id: PlayerId,
    },

    #[error("Player already on roster: {0}")]
    PlayerAlreadyExists(PlayerId),

    /// Blank names and similar malformed input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Season ends ({end}) before it starts ({start})")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Deleting a parent that still owns children
    #[error("{kind} {id} still has {children}")]
    NotEmpty {
        kind: &'static str,
        id: i64,
        children: &'static str,
    },

    #[error("Invalid series order: {0}")]
    InvalidSeriesOrder(String),

    #[error("Event {event_id} is a {expected} game, got {actual} results")]
    GameTypeMismatch {
        event_id: EventId,
        expected: GameType,
        actual: GameType,
    },

    #[error("Invalid results: {0}")]
    InvalidResults(#[from] ResultValidationError),
}

impl LeagueError {
    /// Get a client-safe error message
    ///
    /// Storage errors are replaced by a generic message so backend details
    /// don't leak to callers.
    pub fn client_message(&self) -> String {
        match self {
            LeagueError::Storage(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for league operations
pub type LeagueResult<T> = Result<T, LeagueError>;

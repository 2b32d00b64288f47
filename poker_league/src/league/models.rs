//! League data models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{GameType, PlayerId, Points, Rank};

/// League ID type
pub type LeagueId = i64;

/// Season ID type
pub type SeasonId = i64;

/// Series ID type
pub type SeriesId = i64;

/// Event (single tournament or consolation bracket) ID type
pub type EventId = i64;

/// Top-level organisation owning seasons and a player roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Time-boxed collection of series within a league
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub league_id: LeagueId,
    pub name: String,
    pub start_date: NaiveDate,
    /// Open-ended while `None`
    pub end_date: Option<NaiveDate>,
    /// Players qualifying for the season-ending event; league default if `None`
    pub qualification_spots: Option<u32>,
    pub created_at: DateTime<Utc>,
}

/// Recurring group of events within a season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub id: SeriesId,
    pub season_id: SeasonId,
    pub name: String,
    /// Display order within the season (0-indexed)
    pub position: u32,
    pub created_at: DateTime<Utc>,
}

/// Event lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// No results recorded yet
    Scheduled,
    /// Results recorded and scored
    Completed,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventStatus::Scheduled => write!(f, "scheduled"),
            EventStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A single scored game: a main tournament or a consolation bracket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub series_id: SeriesId,
    pub name: String,
    pub date: NaiveDate,
    pub game_type: GameType,
    pub status: EventStatus,
    /// Field size the results were scored against
    pub total_players: Option<u32>,
    pub created_at: DateTime<Utc>,
}

/// Roster entry for a league
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub league_id: LeagueId,
    pub display_name: String,
    pub active: bool,
    pub joined_at: DateTime<Utc>,
}

/// A scored finish stored for an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventResult {
    pub event_id: EventId,
    pub player_id: PlayerId,
    pub rank: Rank,
    /// Zero when the finish was outside the paid places
    pub points: Points,
}

/// Why a player qualified for the season-ending event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QualificationReason {
    /// Finished within the season's qualification spots
    Standings { position: u32 },
    /// Granted by a league organiser
    Manual { note: Option<String> },
}

impl QualificationReason {
    /// Whether the entry is recomputed from standings
    pub fn is_standings(&self) -> bool {
        matches!(self, QualificationReason::Standings { .. })
    }
}

/// Eligibility record for a season-ending event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualification {
    pub season_id: SeasonId,
    pub player_id: PlayerId,
    pub reason: QualificationReason,
    pub granted_at: DateTime<Utc>,
}

/// Request to create a season
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSeason {
    pub league_id: LeagueId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub qualification_spots: Option<u32>,
}

/// Request to create an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub series_id: SeriesId,
    pub name: String,
    pub date: NaiveDate,
    pub game_type: GameType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualification_reason_encoding() {
        let reason = QualificationReason::Standings { position: 3 };
        let json = serde_json::to_value(&reason).unwrap();
        assert_eq!(json["kind"], "standings");
        assert_eq!(json["position"], 3);

        let manual: QualificationReason =
            serde_json::from_str(r#"{"kind":"manual","note":"host pick"}"#).unwrap();
        assert_eq!(
            manual,
            QualificationReason::Manual {
                note: Some("host pick".to_string())
            }
        );
        assert!(!manual.is_standings());
    }

    #[test]
    fn test_event_status_display() {
        assert_eq!(EventStatus::Scheduled.to_string(), "scheduled");
        assert_eq!(EventStatus::Completed.to_string(), "completed");
    }
}

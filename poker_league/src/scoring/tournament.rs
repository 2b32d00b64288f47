//! Main tournament scoring.

use super::models::{GameResult, PointAwards, Points, Rank};
use super::strategy::{ScoringStrategy, award_by_rank};

/// Worst rank that still scores in a tournament
pub const MAX_SCORED_RANK: Rank = 10;

/// Field-size weighted scoring for the top ten finishers.
///
/// A finish at rank `R` is worth `total_players * (11 - R)`. Tied players
/// share the value of their literal rank, so a tie for first followed by a
/// finish at rank 3 awards the rank 3 value, not the rank 2 value.
///
/// Rank 0 is not rejected and scores `total_players * 11`; callers are
/// expected to validate first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TournamentScoring;

impl TournamentScoring {
    /// Points for a single rank in a field of `total_players`
    pub fn points_for_rank(total_players: u32, rank: Rank) -> Option<Points> {
        if rank > MAX_SCORED_RANK {
            return None;
        }
        Some(u64::from(total_players) * u64::from(MAX_SCORED_RANK + 1 - rank))
    }
}

impl ScoringStrategy for TournamentScoring {
    fn calculate_points(&self, game: &GameResult) -> PointAwards {
        award_by_rank(game, MAX_SCORED_RANK, |rank| {
            Self::points_for_rank(game.total_players, rank)
        })
    }
}

//! Consolation bracket scoring.

use super::models::{GameResult, PointAwards, Points, Rank};
use super::strategy::{ScoringStrategy, award_by_rank};

/// Fixed payouts for 1st, 2nd and 3rd place
pub const CONSOLATION_PAYOUTS: [Points; 3] = [100, 50, 25];

/// Fixed payouts for the top three of the consolation bracket.
///
/// Field size has no effect. Ties share the payout of their rank and ranks
/// beyond third are not paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsolationScoring;

impl ConsolationScoring {
    /// Payout for a single rank, `None` outside 1..=3
    pub fn points_for_rank(rank: Rank) -> Option<Points> {
        let index = usize::try_from(rank.checked_sub(1)?).ok()?;
        CONSOLATION_PAYOUTS.get(index).copied()
    }
}

impl ScoringStrategy for ConsolationScoring {
    fn calculate_points(&self, game: &GameResult) -> PointAwards {
        let max_rank = CONSOLATION_PAYOUTS.len() as Rank;
        award_by_rank(game, max_rank, Self::points_for_rank)
    }
}

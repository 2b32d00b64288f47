//! Scoring strategy trait and game-type dispatch.

use enum_dispatch::enum_dispatch;

use super::consolation::ConsolationScoring;
use super::models::{GameResult, GameType, PlayerResult, PointAwards, Points, Rank};
use super::tournament::TournamentScoring;

/// Turns a game's finishing positions into point awards.
///
/// Implementations are pure: the same input always yields the same awards.
#[enum_dispatch]
pub trait ScoringStrategy {
    #[must_use]
    fn calculate_points(&self, game: &GameResult) -> PointAwards;
}

/// Every scoring strategy, selected by [`GameType`]
#[enum_dispatch(ScoringStrategy)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scorer {
    TournamentScoring,
    ConsolationScoring,
}

impl Scorer {
    /// Strategy for a game type
    pub fn for_game_type(game_type: GameType) -> Self {
        match game_type {
            GameType::Tournament => TournamentScoring.into(),
            GameType::Consolation => ConsolationScoring.into(),
        }
    }
}

/// Score a game with the strategy matching its own game type
pub fn score_game(game: &GameResult) -> PointAwards {
    Scorer::for_game_type(game.game_type).calculate_points(game)
}

/// Award points group by group in ascending rank order.
///
/// Players sharing a rank form one group and all get `points_for(rank)`.
/// Scoring stops at the first group ranked above `max_rank`. A group for
/// which `points_for` returns `None` is skipped.
pub(crate) fn award_by_rank<F>(game: &GameResult, max_rank: Rank, points_for: F) -> PointAwards
where
    F: Fn(Rank) -> Option<Points>,
{
    let mut ranked: Vec<&PlayerResult> = game.results.iter().collect();
    ranked.sort_by_key(|result| result.rank);

    let mut awards = PointAwards::new();
    for group in ranked.chunk_by(|a, b| a.rank == b.rank) {
        let rank = group[0].rank;
        if rank > max_rank {
            break;
        }

        let Some(points) = points_for(rank) else {
            continue;
        };

        for result in group {
            // First listing wins if a player id repeats
            awards.entry(result.player_id.clone()).or_insert(points);
        }
    }

    log::debug!(
        "Scored {} game: {} of {} players awarded",
        game.game_type,
        awards.len(),
        game.results.len()
    );

    awards
}

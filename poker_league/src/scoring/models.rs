//! Scoring input and output models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Player identifier type
pub type PlayerId = String;

/// Finishing position (1 = first place)
pub type Rank = u32;

/// Point value awarded for a finish
pub type Points = u64;

/// Points awarded per player, ordered by player id.
///
/// Players without an entry were not awarded points.
pub type PointAwards = BTreeMap<PlayerId, Points>;

/// Kind of game being scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    /// Main tournament, scored by field size
    Tournament,
    /// Consolation bracket, fixed payouts for the top three
    Consolation,
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameType::Tournament => write!(f, "tournament"),
            GameType::Consolation => write!(f, "consolation"),
        }
    }
}

/// One player's finish in a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResult {
    /// Player identifier
    pub player_id: PlayerId,
    /// Finishing position; equal ranks are ties
    pub rank: Rank,
}

impl PlayerResult {
    /// Create a new player result
    pub fn new(player_id: impl Into<PlayerId>, rank: Rank) -> Self {
        Self {
            player_id: player_id.into(),
            rank,
        }
    }
}

/// Finishing positions of a completed game, ready to be scored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Which scoring mode applies
    pub game_type: GameType,
    /// Size of the field the game is scored against
    pub total_players: u32,
    /// Player finishes, in any order
    pub results: Vec<PlayerResult>,
}

impl GameResult {
    /// Create an empty game result
    pub fn new(game_type: GameType, total_players: u32) -> Self {
        Self {
            game_type,
            total_players,
            results: Vec::new(),
        }
    }

    /// Add a player finish
    pub fn with_result(mut self, player_id: impl Into<PlayerId>, rank: Rank) -> Self {
        self.results.push(PlayerResult::new(player_id, rank));
        self
    }

    /// Worst (largest) rank present, if any
    pub fn max_rank(&self) -> Option<Rank> {
        self.results.iter().map(|r| r.rank).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_order() {
        let game = GameResult::new(GameType::Tournament, 5)
            .with_result("alice", 2)
            .with_result("bob", 1);

        assert_eq!(game.results.len(), 2);
        assert_eq!(game.results[0], PlayerResult::new("alice", 2));
        assert_eq!(game.max_rank(), Some(2));
    }

    #[test]
    fn test_max_rank_empty() {
        assert_eq!(GameResult::new(GameType::Consolation, 8).max_rank(), None);
    }

    #[test]
    fn test_game_type_json_encoding() {
        let game = GameResult::new(GameType::Consolation, 12).with_result("p1", 1);
        let json = serde_json::to_value(&game).unwrap();

        assert_eq!(json["game_type"], "consolation");
        assert_eq!(json["total_players"], 12);
        assert_eq!(json["results"][0]["player_id"], "p1");
    }

    #[test]
    fn test_game_type_display() {
        assert_eq!(GameType::Tournament.to_string(), "tournament");
        assert_eq!(GameType::Consolation.to_string(), "consolation");
    }
}

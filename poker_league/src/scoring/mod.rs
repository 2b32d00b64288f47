//! Point scoring for completed games.
//!
//! Two strategies turn finishing positions into points:
//! - **Tournament**: the top ten finishers earn `total_players * (11 - rank)`
//! - **Consolation**: 1st/2nd/3rd earn a fixed 100/50/25
//!
//! Tied players share the value of their rank in both modes. Strategies are
//! pure functions and never validate their input; see
//! [`GameResult::validate`] for the checks the results workflow applies.
//!
//! ## Example
//!
//! ```
//! use poker_league::scoring::{GameResult, GameType, Scorer, ScoringStrategy};
//!
//! let game = GameResult::new(GameType::Tournament, 20)
//!     .with_result("p1", 1)
//!     .with_result("p2", 1)
//!     .with_result("p3", 3);
//!
//! let awards = Scorer::for_game_type(game.game_type).calculate_points(&game);
//! assert_eq!(awards["p1"], 200);
//! assert_eq!(awards["p2"], 200);
//! assert_eq!(awards["p3"], 160);
//! ```

pub mod consolation;
pub mod models;
pub mod strategy;
pub mod tournament;
pub mod validation;

pub use consolation::{CONSOLATION_PAYOUTS, ConsolationScoring};
pub use models::{GameResult, GameType, PlayerId, PlayerResult, PointAwards, Points, Rank};
pub use strategy::{Scorer, ScoringStrategy, score_game};
pub use tournament::{MAX_SCORED_RANK, TournamentScoring};
pub use validation::{ResultValidationError, ResultValidationResult};

//! # Poker League
//!
//! Point scoring and season bookkeeping for recurring poker leagues.
//!
//! The core of the crate is [`scoring`]: pure strategies that turn a game's
//! finishing positions into points. Around it sit the league records
//! (leagues, seasons, series, events and rosters), the results workflow that
//! scores and stores each event, standings tables and season qualification.
//!
//! ## Core Modules
//!
//! - [`scoring`]: Tournament and consolation point strategies
//! - [`league`]: League records, repository trait and in-memory storage
//! - [`results`]: Validating, scoring and storing event results
//! - [`standings`]: Series and season standings tables
//! - [`qualification`]: Season qualification from standings and by hand
//! - [`config`]: Environment-driven settings
//!
//! ## Example
//!
//! ```
//! use poker_league::{GameResult, GameType, score_game};
//!
//! let game = GameResult::new(GameType::Consolation, 8)
//!     .with_result("ana", 1)
//!     .with_result("ben", 2)
//!     .with_result("cy", 2);
//!
//! let awards = score_game(&game);
//! assert_eq!(awards["ana"], 100);
//! assert_eq!(awards["ben"], 50);
//! assert_eq!(awards["cy"], 50);
//! ```

pub mod config;
pub mod league;
pub mod qualification;
pub mod results;
pub mod scoring;
pub mod services;
pub mod standings;

pub use config::{ConfigError, LeagueConfig};
pub use league::{InMemoryLeagueRepository, LeagueError, LeagueRepository, LeagueSnapshot};
pub use scoring::{
    GameResult, GameType, PlayerResult, PointAwards, Scorer, ScoringStrategy, score_game,
};
pub use services::LeagueServices;
pub use standings::Standing;

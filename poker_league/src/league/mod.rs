//! League records: leagues, seasons, series, events and player rosters.
//!
//! All storage goes through the [`LeagueRepository`] trait. The crate ships
//! an in-memory implementation that can be loaded from and exported to a
//! [`LeagueSnapshot`].
//!
//! ## Example
//!
//! ```
//! use poker_league::league::{InMemoryLeagueRepository, LeagueManager};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let leagues = LeagueManager::new(Arc::new(InMemoryLeagueRepository::new()));
//!
//!     let league = leagues.create_league("Thursday Night Poker", None).await?;
//!     leagues.add_player(league.id, "ana", "Ana").await?;
//!
//!     assert_eq!(leagues.list_players(league.id, true).await?.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;
pub mod repository;
#[cfg(test)]
pub(crate) mod testing;

pub use errors::{LeagueError, LeagueResult};
pub use manager::LeagueManager;
pub use models::{
    Event, EventId, EventResult, EventStatus, League, LeagueId, NewEvent, NewSeason, Player,
    Qualification, QualificationReason, Season, SeasonId, Series, SeriesId,
};
pub use repository::{InMemoryLeagueRepository, LeagueRepository, LeagueSnapshot};

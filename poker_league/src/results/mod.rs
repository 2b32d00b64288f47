//! Recording event results.
//!
//! The results workflow ties the scoring core to league storage: it checks
//! the event and roster, validates the game, picks the scoring strategy for
//! the game type and stores one scored result per player.

pub mod manager;

pub use manager::ResultsManager;

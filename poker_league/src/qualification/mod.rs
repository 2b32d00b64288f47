//! Season qualification for the season-ending event.
//!
//! A refresh qualifies every player whose season standings position falls
//! within the season's qualification spots (or the configured default).
//! Organizers can also grant and revoke qualifications by hand; manual
//! grants are never touched by a refresh.

pub mod manager;

pub use manager::QualificationManager;

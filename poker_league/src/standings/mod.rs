//! Standings aggregated from stored event results.
//!
//! Players are ordered by total points, then wins, then best finish, then
//! player id. Positions use competition ranking on total points: players
//! with equal points share a position and the next position is skipped
//! (1, 2, 2, 4).

pub mod manager;

pub use manager::StandingsManager;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::league::{EventId, EventResult};
use crate::scoring::{PlayerId, Points, Rank};

/// A player's line in a standings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-indexed, shared between players on equal points
    pub position: u32,
    pub player_id: PlayerId,
    pub total_points: Points,
    /// Distinct events with a recorded result
    pub events_played: u32,
    /// First-place finishes
    pub wins: u32,
    pub best_finish: Option<Rank>,
}

#[derive(Default)]
struct Tally {
    total_points: Points,
    events: HashSet<EventId>,
    wins: u32,
    best_finish: Option<Rank>,
}

/// Aggregate results into an ordered standings table
pub fn compute(results: &[EventResult]) -> Vec<Standing> {
    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();

    for result in results {
        let tally = tallies.entry(result.player_id.as_str()).or_default();
        tally.total_points += result.points;
        tally.events.insert(result.event_id);
        if result.rank == 1 {
            tally.wins += 1;
        }
        tally.best_finish = Some(match tally.best_finish {
            Some(best) => best.min(result.rank),
            None => result.rank,
        });
    }

    let mut standings: Vec<Standing> = tallies
        .into_iter()
        .map(|(player_id, tally)| Standing {
            position: 0,
            player_id: player_id.to_string(),
            total_points: tally.total_points,
            events_played: tally.events.len() as u32,
            wins: tally.wins,
            best_finish: tally.best_finish,
        })
        .collect();

    standings.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| b.wins.cmp(&a.wins))
            .then_with(|| a.best_finish.cmp(&b.best_finish))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });

    let mut previous_points = None;
    let mut position = 0;
    for (index, standing) in standings.iter_mut().enumerate() {
        if previous_points != Some(standing.total_points) {
            position = index as u32 + 1;
            previous_points = Some(standing.total_points);
        }
        standing.position = position;
    }

    standings
}

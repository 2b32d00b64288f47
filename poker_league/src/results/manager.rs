//! Results manager: validates, scores and stores event results.

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::LeagueConfig;
use crate::league::{
    Event, EventId, EventResult, EventStatus, LeagueError, LeagueManager, LeagueRepository,
    LeagueResult,
};
use crate::scoring::{GameResult, PlayerResult, Scorer, ScoringStrategy};

/// Results manager
#[derive(Clone)]
pub struct ResultsManager {
    repo: Arc<dyn LeagueRepository>,
    leagues: LeagueManager,
    config: LeagueConfig,
}

impl ResultsManager {
    /// Create a new results manager
    pub fn new(repo: Arc<dyn LeagueRepository>, config: LeagueConfig) -> Self {
        Self {
            leagues: LeagueManager::new(Arc::clone(&repo)),
            repo,
            config,
        }
    }

    /// Score a game and store it as the results of an event
    ///
    /// Recording again replaces the previous results. Every listed player
    /// gets a stored result; finishes outside the paid places carry zero
    /// points.
    ///
    /// # Errors
    ///
    /// * `LeagueError::EventNotFound` - Unknown event
    /// * `LeagueError::GameTypeMismatch` - Game type differs from the event's
    /// * `LeagueError::InvalidResults` - Malformed game (strict mode only)
    /// * `LeagueError::PlayerNotFound` - A player isn't on the league roster
    pub async fn record_results(
        &self,
        event_id: EventId,
        game: &GameResult,
    ) -> LeagueResult<Vec<EventResult>> {
        let event = self.leagues.get_event(event_id).await?;

        if event.game_type != game.game_type {
            return Err(LeagueError::GameTypeMismatch {
                event_id,
                expected: event.game_type,
                actual: game.game_type,
            });
        }

        if let Err(e) = game.validate(self.config.max_field_size) {
            if self.config.strict_results {
                return Err(e.into());
            }
            log::warn!("Scoring malformed results for event {}: {}", event_id, e);
        }

        let league_id = self.leagues.league_of_event(&event).await?;
        for result in &game.results {
            self.leagues.get_player(league_id, &result.player_id).await?;
        }

        let awards = Scorer::for_game_type(game.game_type).calculate_points(game);

        let results: Vec<EventResult> = best_finishes(&game.results)
            .into_iter()
            .map(|result| EventResult {
                event_id,
                player_id: result.player_id.clone(),
                rank: result.rank,
                points: awards.get(&result.player_id).copied().unwrap_or(0),
            })
            .collect();

        // Refused once the event is gone; deleting the event drops them
        if !self.repo.replace_results(event_id, results.clone()).await? {
            return Err(LeagueError::EventNotFound(event_id));
        }
        let completed = Event {
            status: EventStatus::Completed,
            total_players: Some(game.total_players),
            ..event
        };
        if !self.repo.update_event(&completed).await? {
            return Err(LeagueError::EventNotFound(event_id));
        }

        log::info!(
            "Recorded {} results for event {} ({} awarded)",
            results.len(),
            event_id,
            awards.len()
        );

        Ok(results)
    }

    /// Remove an event's results and reopen it
    pub async fn clear_results(&self, event_id: EventId) -> LeagueResult<()> {
        let event = self.leagues.get_event(event_id).await?;

        if !self.repo.replace_results(event_id, Vec::new()).await? {
            return Err(LeagueError::EventNotFound(event_id));
        }
        let reopened = Event {
            status: EventStatus::Scheduled,
            total_players: None,
            ..event
        };
        if !self.repo.update_event(&reopened).await? {
            return Err(LeagueError::EventNotFound(event_id));
        }

        log::info!("Cleared results for event {}", event_id);
        Ok(())
    }

    /// Stored results of an event, best rank first
    pub async fn event_results(&self, event_id: EventId) -> LeagueResult<Vec<EventResult>> {
        self.leagues.get_event(event_id).await?;
        self.repo.results_for_event(event_id).await
    }

    /// Rebuild the scoring input of a completed event, e.g. to edit it
    ///
    /// Returns `None` while the event has no results.
    pub async fn game_result(&self, event_id: EventId) -> LeagueResult<Option<GameResult>> {
        let event = self.leagues.get_event(event_id).await?;
        let Some(total_players) = event.total_players else {
            return Ok(None);
        };

        let results = self
            .repo
            .results_for_event(event_id)
            .await?
            .into_iter()
            .map(|r| PlayerResult::new(r.player_id, r.rank))
            .collect();

        Ok(Some(GameResult {
            game_type: event.game_type,
            total_players,
            results,
        }))
    }
}

/// Results ordered by rank then player id, keeping one entry per player
fn best_finishes(results: &[PlayerResult]) -> Vec<&PlayerResult> {
    let mut ordered: Vec<&PlayerResult> = results.iter().collect();
    ordered.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.player_id.cmp(&b.player_id)));

    let mut seen = HashSet::with_capacity(ordered.len());
    ordered.retain(|&r| seen.insert(r.player_id.as_str()));
    ordered
}

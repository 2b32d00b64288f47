//! Standings manager for series and season tables.

use std::sync::Arc;

use super::{Standing, compute};
use crate::league::{
    EventResult, LeagueManager, LeagueRepository, LeagueResult, SeasonId, SeriesId,
};

/// Standings manager
#[derive(Clone)]
pub struct StandingsManager {
    repo: Arc<dyn LeagueRepository>,
    leagues: LeagueManager,
}

impl StandingsManager {
    /// Create a new standings manager
    pub fn new(repo: Arc<dyn LeagueRepository>) -> Self {
        Self {
            leagues: LeagueManager::new(Arc::clone(&repo)),
            repo,
        }
    }

    /// Standings over every event of a series
    pub async fn series_standings(&self, series_id: SeriesId) -> LeagueResult<Vec<Standing>> {
        let results = self.series_results(series_id).await?;
        Ok(compute(&results))
    }

    /// Standings over every event of every series in a season
    pub async fn season_standings(&self, season_id: SeasonId) -> LeagueResult<Vec<Standing>> {
        let mut results = Vec::new();
        for series in self.leagues.list_series(season_id).await? {
            results.extend(self.series_results(series.id).await?);
        }
        Ok(compute(&results))
    }

    async fn series_results(&self, series_id: SeriesId) -> LeagueResult<Vec<EventResult>> {
        let mut results = Vec::new();
        for event in self.leagues.list_events(series_id).await? {
            results.extend(self.repo.results_for_event(event.id).await?);
        }
        Ok(results)
    }
}

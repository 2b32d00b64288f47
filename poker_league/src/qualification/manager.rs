//! Qualification manager for season-ending event eligibility.

use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::config::LeagueConfig;
use crate::league::{
    LeagueError, LeagueManager, LeagueRepository, LeagueResult, Qualification,
    QualificationReason, SeasonId,
};
use crate::standings::StandingsManager;

/// Qualification manager
#[derive(Clone)]
pub struct QualificationManager {
    repo: Arc<dyn LeagueRepository>,
    leagues: LeagueManager,
    standings: StandingsManager,
    config: LeagueConfig,
}

impl QualificationManager {
    /// Create a new qualification manager
    pub fn new(repo: Arc<dyn LeagueRepository>, config: LeagueConfig) -> Self {
        Self {
            leagues: LeagueManager::new(Arc::clone(&repo)),
            standings: StandingsManager::new(Arc::clone(&repo)),
            repo,
            config,
        }
    }

    /// Recompute standings-based qualifications for a season
    ///
    /// Every player whose standings position is within the season's spots
    /// qualifies, so a tie on the cut line lets all tied players in. Players
    /// without points never qualify. Manual entries are kept as they are.
    ///
    /// # Returns
    ///
    /// * `LeagueResult<Vec<Qualification>>` - Standings entries by position,
    ///   then manual entries
    pub async fn refresh(&self, season_id: SeasonId) -> LeagueResult<Vec<Qualification>> {
        let spots = self.spots_for(season_id).await?;

        let existing = self.repo.list_qualifications(season_id).await?;
        let previous_grants: HashMap<&str, _> = existing
            .iter()
            .filter(|q| q.reason.is_standings())
            .map(|q| (q.player_id.as_str(), q.granted_at))
            .collect();
        let manual: Vec<Qualification> = existing
            .iter()
            .filter(|q| !q.reason.is_standings())
            .cloned()
            .collect();
        let manual_players: HashSet<&str> = manual.iter().map(|q| q.player_id.as_str()).collect();

        let now = Utc::now();
        let mut qualifications: Vec<Qualification> = self
            .standings
            .season_standings(season_id)
            .await?
            .into_iter()
            .filter(|s| s.position <= spots && s.total_points > 0)
            .filter(|s| !manual_players.contains(s.player_id.as_str()))
            .map(|s| Qualification {
                season_id,
                granted_at: previous_grants
                    .get(s.player_id.as_str())
                    .copied()
                    .unwrap_or(now),
                reason: QualificationReason::Standings {
                    position: s.position,
                },
                player_id: s.player_id,
            })
            .collect();
        qualifications.extend(manual);

        if !self
            .repo
            .replace_qualifications(season_id, qualifications.clone())
            .await?
        {
            return Err(LeagueError::SeasonNotFound(season_id));
        }

        log::info!(
            "Season {}: {} players qualified ({} spots)",
            season_id,
            qualifications.len(),
            spots
        );

        Ok(qualifications)
    }

    /// Qualify a player by hand
    ///
    /// Replaces any standings entry for the player so the grant survives
    /// later refreshes.
    pub async fn grant_manual(
        &self,
        season_id: SeasonId,
        player_id: &str,
        note: Option<&str>,
    ) -> LeagueResult<Qualification> {
        let season = self.leagues.get_season(season_id).await?;
        self.leagues.get_player(season.league_id, player_id).await?;

        let qualification = Qualification {
            season_id,
            player_id: player_id.to_string(),
            reason: QualificationReason::Manual {
                note: note.map(str::to_string),
            },
            granted_at: Utc::now(),
        };

        let mut qualifications = self.repo.list_qualifications(season_id).await?;
        qualifications.retain(|q| q.player_id != player_id);
        qualifications.push(qualification.clone());
        if !self
            .repo
            .replace_qualifications(season_id, qualifications)
            .await?
        {
            return Err(LeagueError::SeasonNotFound(season_id));
        }

        log::info!("Season {}: {} qualified manually", season_id, player_id);
        Ok(qualification)
    }

    /// Remove a player's qualification
    ///
    /// A standings entry comes back on the next [`refresh`](Self::refresh)
    /// if the player is still within the spots.
    ///
    /// # Returns
    ///
    /// * `LeagueResult<bool>` - Whether the player had qualified
    pub async fn revoke(&self, season_id: SeasonId, player_id: &str) -> LeagueResult<bool> {
        self.leagues.get_season(season_id).await?;

        let mut qualifications = self.repo.list_qualifications(season_id).await?;
        let before = qualifications.len();
        qualifications.retain(|q| q.player_id != player_id);
        let removed = qualifications.len() != before;

        if removed
            && !self
                .repo
                .replace_qualifications(season_id, qualifications)
                .await?
        {
            return Err(LeagueError::SeasonNotFound(season_id));
        }
        Ok(removed)
    }

    /// Current qualifications of a season
    pub async fn list(&self, season_id: SeasonId) -> LeagueResult<Vec<Qualification>> {
        self.leagues.get_season(season_id).await?;
        self.repo.list_qualifications(season_id).await
    }

    /// Whether a player currently holds a qualification
    pub async fn is_qualified(&self, season_id: SeasonId, player_id: &str) -> LeagueResult<bool> {
        Ok(self
            .list(season_id)
            .await?
            .iter()
            .any(|q| q.player_id == player_id))
    }

    /// Number of spots a season awards through standings
    pub async fn spots_for(&self, season_id: SeasonId) -> LeagueResult<u32> {
        let season = self.leagues.get_season(season_id).await?;
        match season.qualification_spots {
            Some(0) => Err(LeagueError::InvalidInput(format!(
                "Season {season_id} has zero qualification spots"
            ))),
            Some(spots) => Ok(spots),
            None => Ok(self.config.default_qualification_spots),
        }
    }
}

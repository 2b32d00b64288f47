//! League manager for league, season, series, event and roster records.

use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;

use super::errors::{LeagueError, LeagueResult};
use super::models::{
    Event, EventId, League, LeagueId, NewEvent, NewSeason, Player, Season, SeasonId, Series,
    SeriesId,
};
use super::repository::LeagueRepository;

/// League manager
#[derive(Clone)]
pub struct LeagueManager {
    repo: Arc<dyn LeagueRepository>,
}

impl LeagueManager {
    /// Create a new league manager
    pub fn new(repo: Arc<dyn LeagueRepository>) -> Self {
        Self { repo }
    }

    /// Create a new league
    pub async fn create_league(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> LeagueResult<League> {
        let name = required_name(name, "League name")?;
        let description = description.map(str::trim).filter(|d| !d.is_empty());

        let league = self.repo.insert_league(name, description).await?;
        log::info!("Created league {} '{}'", league.id, league.name);
        Ok(league)
    }

    /// Get a league by ID
    pub async fn get_league(&self, id: LeagueId) -> LeagueResult<League> {
        self.repo
            .get_league(id)
            .await?
            .ok_or(LeagueError::LeagueNotFound(id))
    }

    /// List all leagues
    pub async fn list_leagues(&self) -> LeagueResult<Vec<League>> {
        self.repo.list_leagues().await
    }

    /// Rename a league
    pub async fn rename_league(&self, id: LeagueId, name: &str) -> LeagueResult<League> {
        let mut league = self.get_league(id).await?;
        league.name = required_name(name, "League name")?.to_string();
        if !self.repo.update_league(&league).await? {
            return Err(LeagueError::LeagueNotFound(id));
        }
        Ok(league)
    }

    /// Delete a league
    ///
    /// # Errors
    ///
    /// * `LeagueError::NotEmpty` - The league still has seasons
    pub async fn delete_league(&self, id: LeagueId) -> LeagueResult<()> {
        self.get_league(id).await?;

        if !self.repo.list_seasons(id).await?.is_empty() {
            return Err(LeagueError::NotEmpty {
                kind: "League",
                id,
                children: "seasons",
            });
        }

        if !self.repo.delete_league(id).await? {
            return Err(LeagueError::LeagueNotFound(id));
        }
        log::info!("Deleted league {}", id);
        Ok(())
    }

    /// Create a season within a league
    pub async fn create_season(&self, season: NewSeason) -> LeagueResult<Season> {
        self.get_league(season.league_id).await?;
        required_name(&season.name, "Season name")?;
        check_date_range(season.start_date, season.end_date)?;
        check_spots(season.qualification_spots)?;

        let season = NewSeason {
            name: season.name.trim().to_string(),
            ..season
        };
        self.repo.insert_season(&season).await
    }

    /// Get a season by ID
    pub async fn get_season(&self, id: SeasonId) -> LeagueResult<Season> {
        self.repo
            .get_season(id)
            .await?
            .ok_or(LeagueError::SeasonNotFound(id))
    }

    /// List the seasons of a league, oldest first
    pub async fn list_seasons(&self, league_id: LeagueId) -> LeagueResult<Vec<Season>> {
        self.get_league(league_id).await?;
        self.repo.list_seasons(league_id).await
    }

    /// Update a season's name, dates and qualification spots
    ///
    /// The owning league can't be changed.
    pub async fn update_season(&self, season: Season) -> LeagueResult<Season> {
        let existing = self.get_season(season.id).await?;
        required_name(&season.name, "Season name")?;
        check_date_range(season.start_date, season.end_date)?;
        check_spots(season.qualification_spots)?;

        let season = Season {
            league_id: existing.league_id,
            created_at: existing.created_at,
            name: season.name.trim().to_string(),
            ..season
        };
        if !self.repo.update_season(&season).await? {
            return Err(LeagueError::SeasonNotFound(season.id));
        }
        Ok(season)
    }

    /// Delete a season
    ///
    /// # Errors
    ///
    /// * `LeagueError::NotEmpty` - The season still has series
    pub async fn delete_season(&self, id: SeasonId) -> LeagueResult<()> {
        self.get_season(id).await?;

        if !self.repo.list_series(id).await?.is_empty() {
            return Err(LeagueError::NotEmpty {
                kind: "Season",
                id,
                children: "series",
            });
        }

        if !self.repo.delete_season(id).await? {
            return Err(LeagueError::SeasonNotFound(id));
        }
        Ok(())
    }

    /// Create a series, placed after the season's existing series
    pub async fn create_series(&self, season_id: SeasonId, name: &str) -> LeagueResult<Series> {
        self.get_season(season_id).await?;
        let name = required_name(name, "Series name")?;
        self.repo.insert_series(season_id, name).await
    }

    /// Get a series by ID
    pub async fn get_series(&self, id: SeriesId) -> LeagueResult<Series> {
        self.repo
            .get_series(id)
            .await?
            .ok_or(LeagueError::SeriesNotFound(id))
    }

    /// List the series of a season in display order
    pub async fn list_series(&self, season_id: SeasonId) -> LeagueResult<Vec<Series>> {
        self.get_season(season_id).await?;
        self.repo.list_series(season_id).await
    }

    /// Set the display order of a season's series
    ///
    /// `ordered_ids` must list every series of the season exactly once.
    pub async fn reorder_series(
        &self,
        season_id: SeasonId,
        ordered_ids: &[SeriesId],
    ) -> LeagueResult<Vec<Series>> {
        let current = self.list_series(season_id).await?;

        let unique: HashSet<SeriesId> = ordered_ids.iter().copied().collect();
        if unique.len() != ordered_ids.len() {
            return Err(LeagueError::InvalidSeriesOrder(
                "series listed more than once".to_string(),
            ));
        }

        let existing: HashSet<SeriesId> = current.iter().map(|s| s.id).collect();
        if unique != existing {
            return Err(LeagueError::InvalidSeriesOrder(format!(
                "expected the {} series of season {}",
                existing.len(),
                season_id
            )));
        }

        let mut reordered = Vec::with_capacity(current.len());
        for (position, id) in ordered_ids.iter().enumerate() {
            if let Some(series) = current.iter().find(|s| s.id == *id) {
                let series = Series {
                    position: position as u32,
                    ..series.clone()
                };
                if !self.repo.update_series(&series).await? {
                    return Err(LeagueError::SeriesNotFound(series.id));
                }
                reordered.push(series);
            }
        }

        Ok(reordered)
    }

    /// Delete a series, closing the gap in the season's order
    ///
    /// # Errors
    ///
    /// * `LeagueError::NotEmpty` - The series still has events
    pub async fn delete_series(&self, id: SeriesId) -> LeagueResult<()> {
        let series = self.get_series(id).await?;

        if !self.repo.list_events(id).await?.is_empty() {
            return Err(LeagueError::NotEmpty {
                kind: "Series",
                id,
                children: "events",
            });
        }

        if !self.repo.delete_series(id).await? {
            return Err(LeagueError::SeriesNotFound(id));
        }

        for (position, remaining) in self
            .repo
            .list_series(series.season_id)
            .await?
            .into_iter()
            .enumerate()
        {
            if remaining.position != position as u32 {
                let remaining = Series {
                    position: position as u32,
                    ..remaining
                };
                if !self.repo.update_series(&remaining).await? {
                    return Err(LeagueError::SeriesNotFound(remaining.id));
                }
            }
        }

        Ok(())
    }

    /// Schedule an event within a series
    pub async fn create_event(&self, event: NewEvent) -> LeagueResult<Event> {
        self.get_series(event.series_id).await?;
        required_name(&event.name, "Event name")?;

        let event = NewEvent {
            name: event.name.trim().to_string(),
            ..event
        };
        self.repo.insert_event(&event).await
    }

    /// Get an event by ID
    pub async fn get_event(&self, id: EventId) -> LeagueResult<Event> {
        self.repo
            .get_event(id)
            .await?
            .ok_or(LeagueError::EventNotFound(id))
    }

    /// List the events of a series by date
    pub async fn list_events(&self, series_id: SeriesId) -> LeagueResult<Vec<Event>> {
        self.get_series(series_id).await?;
        self.repo.list_events(series_id).await
    }

    /// Delete an event together with its results
    pub async fn delete_event(&self, id: EventId) -> LeagueResult<()> {
        self.get_event(id).await?;
        if !self.repo.delete_event(id).await? {
            return Err(LeagueError::EventNotFound(id));
        }
        Ok(())
    }

    /// League that an event belongs to
    pub async fn league_of_event(&self, event: &Event) -> LeagueResult<LeagueId> {
        let series = self.get_series(event.series_id).await?;
        let season = self.get_season(series.season_id).await?;
        Ok(season.league_id)
    }

    /// Add a player to a league roster
    pub async fn add_player(
        &self,
        league_id: LeagueId,
        player_id: &str,
        display_name: &str,
    ) -> LeagueResult<Player> {
        self.get_league(league_id).await?;
        let player_id = required_name(player_id, "Player id")?;
        let display_name = required_name(display_name, "Display name")?;

        let player = Player {
            id: player_id.to_string(),
            league_id,
            display_name: display_name.to_string(),
            active: true,
            joined_at: Utc::now(),
        };
        if !self.repo.insert_player(&player).await? {
            return Err(LeagueError::PlayerAlreadyExists(player.id));
        }
        Ok(player)
    }

    /// Get a roster entry
    pub async fn get_player(&self, league_id: LeagueId, player_id: &str) -> LeagueResult<Player> {
        self.repo
            .get_player(league_id, player_id)
            .await?
            .ok_or_else(|| LeagueError::PlayerNotFound {
                league_id,
                player_id: player_id.to_string(),
            })
    }

    /// Mark a player active or inactive
    pub async fn set_player_active(
        &self,
        league_id: LeagueId,
        player_id: &str,
        active: bool,
    ) -> LeagueResult<Player> {
        let player = Player {
            active,
            ..self.get_player(league_id, player_id).await?
        };
        if !self.repo.update_player(&player).await? {
            return Err(LeagueError::PlayerNotFound {
                league_id,
                player_id: player.id,
            });
        }
        Ok(player)
    }

    /// List a league roster, optionally only active players
    pub async fn list_players(
        &self,
        league_id: LeagueId,
        active_only: bool,
    ) -> LeagueResult<Vec<Player>> {
        self.get_league(league_id).await?;
        let mut players = self.repo.list_players(league_id).await?;
        if active_only {
            players.retain(|p| p.active);
        }
        Ok(players)
    }
}

fn required_name<'a>(value: &'a str, what: &str) -> LeagueResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LeagueError::InvalidInput(format!("{what} can't be empty")));
    }
    Ok(trimmed)
}

fn check_spots(spots: Option<u32>) -> LeagueResult<()> {
    if spots == Some(0) {
        return Err(LeagueError::InvalidInput(
            "Qualification spots must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn check_date_range(
    start: chrono::NaiveDate,
    end: Option<chrono::NaiveDate>,
) -> LeagueResult<()> {
    match end {
        Some(end) if end < start => Err(LeagueError::InvalidDateRange { start, end }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::repository::InMemoryLeagueRepository;
    use crate::league::testing::YieldingRepository;
    use crate::scoring::GameType;
    use chrono::NaiveDate;

    fn manager() -> LeagueManager {
        LeagueManager::new(Arc::new(InMemoryLeagueRepository::new()))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_season(league_id: LeagueId) -> NewSeason {
        NewSeason {
            league_id,
            name: "Spring".to_string(),
            start_date: date(2026, 3, 1),
            end_date: Some(date(2026, 6, 1)),
            qualification_spots: Some(8),
        }
    }

    #[tokio::test]
    async fn test_create_league_trims_and_rejects_blank() {
        let mgr = manager();

        let league = mgr.create_league("  Home Game ", Some("  ")).await.unwrap();
        assert_eq!(league.name, "Home Game");
        assert_eq!(league.description, None);

        let err = mgr.create_league("   ", None).await.unwrap_err();
        assert!(matches!(err, LeagueError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_season_requires_league_and_valid_dates() {
        let mgr = manager();

        let err = mgr.create_season(new_season(42)).await.unwrap_err();
        assert!(matches!(err, LeagueError::LeagueNotFound(42)));

        let league = mgr.create_league("L", None).await.unwrap();
        let mut backwards = new_season(league.id);
        backwards.end_date = Some(date(2026, 1, 1));
        let err = mgr.create_season(backwards).await.unwrap_err();
        assert!(matches!(err, LeagueError::InvalidDateRange { .. }));

        let season = mgr.create_season(new_season(league.id)).await.unwrap();
        assert_eq!(mgr.list_seasons(league.id).await.unwrap(), vec![season]);
    }

    #[tokio::test]
    async fn test_update_season_keeps_owner() {
        let mgr = manager();
        let league = mgr.create_league("L", None).await.unwrap();
        let season = mgr.create_season(new_season(league.id)).await.unwrap();

        let updated = mgr
            .update_season(Season {
                league_id: 999,
                name: "Summer".to_string(),
                qualification_spots: Some(4),
                ..season.clone()
            })
            .await
            .unwrap();

        assert_eq!(updated.league_id, league.id);
        assert_eq!(updated.name, "Summer");
        assert_eq!(mgr.get_season(season.id).await.unwrap().qualification_spots, Some(4));
    }

    #[tokio::test]
    async fn test_zero_qualification_spots_rejected() {
        let mgr = manager();
        let league = mgr.create_league("L", None).await.unwrap();

        let err = mgr
            .create_season(NewSeason {
                qualification_spots: Some(0),
                ..new_season(league.id)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, LeagueError::InvalidInput(_)));
        assert!(mgr.list_seasons(league.id).await.unwrap().is_empty());

        let season = mgr.create_season(new_season(league.id)).await.unwrap();
        let err = mgr
            .update_season(Season {
                qualification_spots: Some(0),
                ..season.clone()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, LeagueError::InvalidInput(_)));
        assert_eq!(
            mgr.get_season(season.id).await.unwrap().qualification_spots,
            Some(8)
        );
    }

    #[tokio::test]
    async fn test_rename_league() {
        let mgr = manager();
        let league = mgr.create_league("Old Name", None).await.unwrap();

        let renamed = mgr.rename_league(league.id, " New Name ").await.unwrap();
        assert_eq!(renamed.name, "New Name");
        assert_eq!(mgr.get_league(league.id).await.unwrap().name, "New Name");

        assert!(matches!(
            mgr.rename_league(league.id, "  ").await,
            Err(LeagueError::InvalidInput(_))
        ));
        assert!(matches!(
            mgr.rename_league(77, "Ghost").await,
            Err(LeagueError::LeagueNotFound(77))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_adds_keep_first_roster_entry() {
        let mgr = LeagueManager::new(Arc::new(YieldingRepository::new()));
        let league = mgr.create_league("L", None).await.unwrap();

        let (first, second) = tokio::join!(
            mgr.add_player(league.id, "ana", "Ana"),
            mgr.add_player(league.id, "ana", "Impostor")
        );

        let added = first.as_ref().or(second.as_ref()).unwrap().display_name.clone();
        let refused = if first.is_ok() { second } else { first };
        assert!(matches!(refused, Err(LeagueError::PlayerAlreadyExists(_))));

        let roster = mgr.list_players(league.id, false).await.unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].display_name, added);
    }

    #[tokio::test]
    async fn test_concurrent_series_get_distinct_positions() {
        let mgr = LeagueManager::new(Arc::new(YieldingRepository::new()));
        let league = mgr.create_league("L", None).await.unwrap();
        let season = mgr.create_season(new_season(league.id)).await.unwrap();

        let (x, y) = tokio::join!(
            mgr.create_series(season.id, "X"),
            mgr.create_series(season.id, "Y")
        );
        let mut positions = vec![x.unwrap().position, y.unwrap().position];
        positions.sort_unstable();

        assert_eq!(positions, vec![0, 1]);
    }

    #[tokio::test]
    async fn test_delete_refuses_non_empty_parents() {
        let mgr = manager();
        let league = mgr.create_league("L", None).await.unwrap();
        let season = mgr.create_season(new_season(league.id)).await.unwrap();
        let series = mgr.create_series(season.id, "Main").await.unwrap();
        let event = mgr
            .create_event(NewEvent {
                series_id: series.id,
                name: "Week 1".to_string(),
                date: date(2026, 3, 5),
                game_type: GameType::Tournament,
            })
            .await
            .unwrap();

        assert!(matches!(
            mgr.delete_league(league.id).await,
            Err(LeagueError::NotEmpty { kind: "League", .. })
        ));
        assert!(matches!(
            mgr.delete_season(season.id).await,
            Err(LeagueError::NotEmpty { kind: "Season", .. })
        ));
        assert!(matches!(
            mgr.delete_series(series.id).await,
            Err(LeagueError::NotEmpty { kind: "Series", .. })
        ));

        mgr.delete_event(event.id).await.unwrap();
        mgr.delete_series(series.id).await.unwrap();
        mgr.delete_season(season.id).await.unwrap();
        mgr.delete_league(league.id).await.unwrap();
        assert!(mgr.list_leagues().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_series_positions_append_reorder_and_compact() {
        let mgr = manager();
        let league = mgr.create_league("L", None).await.unwrap();
        let season = mgr.create_season(new_season(league.id)).await.unwrap();

        let a = mgr.create_series(season.id, "A").await.unwrap();
        let b = mgr.create_series(season.id, "B").await.unwrap();
        let c = mgr.create_series(season.id, "C").await.unwrap();
        assert_eq!((a.position, b.position, c.position), (0, 1, 2));

        mgr.reorder_series(season.id, &[c.id, a.id, b.id]).await.unwrap();
        let names: Vec<String> = mgr
            .list_series(season.id)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["C", "A", "B"]);

        mgr.delete_series(a.id).await.unwrap();
        let positions: Vec<(String, u32)> = mgr
            .list_series(season.id)
            .await
            .unwrap()
            .into_iter()
            .map(|s| (s.name, s.position))
            .collect();
        assert_eq!(positions, vec![("C".to_string(), 0), ("B".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_reorder_rejects_incomplete_or_repeated_ids() {
        let mgr = manager();
        let league = mgr.create_league("L", None).await.unwrap();
        let season = mgr.create_season(new_season(league.id)).await.unwrap();
        let a = mgr.create_series(season.id, "A").await.unwrap();
        let b = mgr.create_series(season.id, "B").await.unwrap();

        assert!(matches!(
            mgr.reorder_series(season.id, &[a.id]).await,
            Err(LeagueError::InvalidSeriesOrder(_))
        ));
        assert!(matches!(
            mgr.reorder_series(season.id, &[a.id, a.id]).await,
            Err(LeagueError::InvalidSeriesOrder(_))
        ));
        assert!(matches!(
            mgr.reorder_series(season.id, &[a.id, b.id, 999]).await,
            Err(LeagueError::InvalidSeriesOrder(_))
        ));
    }

    #[tokio::test]
    async fn test_roster_management() {
        let mgr = manager();
        let league = mgr.create_league("L", None).await.unwrap();

        mgr.add_player(league.id, "p1", "Pat").await.unwrap();
        mgr.add_player(league.id, "p2", "Sam").await.unwrap();
        assert!(matches!(
            mgr.add_player(league.id, "p1", "Pat again").await,
            Err(LeagueError::PlayerAlreadyExists(_))
        ));

        let sam = mgr.set_player_active(league.id, "p2", false).await.unwrap();
        assert!(!sam.active);

        assert_eq!(mgr.list_players(league.id, false).await.unwrap().len(), 2);
        let active = mgr.list_players(league.id, true).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "p1");

        assert!(matches!(
            mgr.get_player(league.id, "nobody").await,
            Err(LeagueError::PlayerNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_league_of_event() {
        let mgr = manager();
        let league = mgr.create_league("L", None).await.unwrap();
        let season = mgr.create_season(new_season(league.id)).await.unwrap();
        let series = mgr.create_series(season.id, "Main").await.unwrap();
        let event = mgr
            .create_event(NewEvent {
                series_id: series.id,
                name: "Week 1".to_string(),
                date: date(2026, 3, 5),
                game_type: GameType::Consolation,
            })
            .await
            .unwrap();

        assert_eq!(mgr.league_of_event(&event).await.unwrap(), league.id);
    }
}

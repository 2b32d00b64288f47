//! Repository wrapper for exercising interleaved manager calls.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::errors::LeagueResult;
use super::models::{
    Event, EventId, EventResult, League, LeagueId, NewEvent, NewSeason, Player, Qualification,
    Season, SeasonId, Series, SeriesId,
};
use super::repository::{InMemoryLeagueRepository, LeagueRepository};

/// In-memory repository that yields to the scheduler before every lookup,
/// so concurrent callers interleave between their reads and writes the way
/// they do over a networked backend.
#[derive(Default)]
pub(crate) struct YieldingRepository {
    inner: InMemoryLeagueRepository,
    vanishing_event: Mutex<Option<EventId>>,
}

impl YieldingRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Delete `event_id` just before the next results write for it lands
    pub(crate) async fn vanish_before_results(&self, event_id: EventId) {
        *self.vanishing_event.lock().await = Some(event_id);
    }
}

#[async_trait]
impl LeagueRepository for YieldingRepository {
    async fn insert_league(&self, name: &str, description: Option<&str>) -> LeagueResult<League> {
        self.inner.insert_league(name, description).await
    }

    async fn get_league(&self, id: LeagueId) -> LeagueResult<Option<League>> {
        tokio::task::yield_now().await;
        self.inner.get_league(id).await
    }

    async fn list_leagues(&self) -> LeagueResult<Vec<League>> {
        tokio::task::yield_now().await;
        self.inner.list_leagues().await
    }

    async fn update_league(&self, league: &League) -> LeagueResult<bool> {
        self.inner.update_league(league).await
    }

    async fn delete_league(&self, id: LeagueId) -> LeagueResult<bool> {
        self.inner.delete_league(id).await
    }

    async fn insert_season(&self, season: &NewSeason) -> LeagueResult<Season> {
        self.inner.insert_season(season).await
    }

    async fn get_season(&self, id: SeasonId) -> LeagueResult<Option<Season>> {
        tokio::task::yield_now().await;
        self.inner.get_season(id).await
    }

    async fn list_seasons(&self, league_id: LeagueId) -> LeagueResult<Vec<Season>> {
        tokio::task::yield_now().await;
        self.inner.list_seasons(league_id).await
    }

    async fn update_season(&self, season: &Season) -> LeagueResult<bool> {
        self.inner.update_season(season).await
    }

    async fn delete_season(&self, id: SeasonId) -> LeagueResult<bool> {
        self.inner.delete_season(id).await
    }

    async fn insert_series(&self, season_id: SeasonId, name: &str) -> LeagueResult<Series> {
        self.inner.insert_series(season_id, name).await
    }

    async fn get_series(&self, id: SeriesId) -> LeagueResult<Option<Series>> {
        tokio::task::yield_now().await;
        self.inner.get_series(id).await
    }

    async fn list_series(&self, season_id: SeasonId) -> LeagueResult<Vec<Series>> {
        tokio::task::yield_now().await;
        self.inner.list_series(season_id).await
    }

    async fn update_series(&self, series: &Series) -> LeagueResult<bool> {
        self.inner.update_series(series).await
    }

    async fn delete_series(&self, id: SeriesId) -> LeagueResult<bool> {
        self.inner.delete_series(id).await
    }

    async fn insert_event(&self, event: &NewEvent) -> LeagueResult<Event> {
        self.inner.insert_event(event).await
    }

    async fn get_event(&self, id: EventId) -> LeagueResult<Option<Event>> {
        tokio::task::yield_now().await;
        self.inner.get_event(id).await
    }

    async fn list_events(&self, series_id: SeriesId) -> LeagueResult<Vec<Event>> {
        tokio::task::yield_now().await;
        self.inner.list_events(series_id).await
    }

    async fn update_event(&self, event: &Event) -> LeagueResult<bool> {
        self.inner.update_event(event).await
    }

    async fn delete_event(&self, id: EventId) -> LeagueResult<bool> {
        self.inner.delete_event(id).await
    }

    async fn insert_player(&self, player: &Player) -> LeagueResult<bool> {
        self.inner.insert_player(player).await
    }

    async fn get_player(
        &self,
        league_id: LeagueId,
        player_id: &str,
    ) -> LeagueResult<Option<Player>> {
        tokio::task::yield_now().await;
        self.inner.get_player(league_id, player_id).await
    }

    async fn list_players(&self, league_id: LeagueId) -> LeagueResult<Vec<Player>> {
        tokio::task::yield_now().await;
        self.inner.list_players(league_id).await
    }

    async fn update_player(&self, player: &Player) -> LeagueResult<bool> {
        self.inner.update_player(player).await
    }

    async fn replace_results(
        &self,
        event_id: EventId,
        results: Vec<EventResult>,
    ) -> LeagueResult<bool> {
        let vanishing = self.vanishing_event.lock().await.take();
        if vanishing == Some(event_id) {
            self.inner.delete_event(event_id).await?;
        }
        self.inner.replace_results(event_id, results).await
    }

    async fn results_for_event(&self, event_id: EventId) -> LeagueResult<Vec<EventResult>> {
        tokio::task::yield_now().await;
        self.inner.results_for_event(event_id).await
    }

    async fn list_qualifications(&self, season_id: SeasonId) -> LeagueResult<Vec<Qualification>> {
        tokio::task::yield_now().await;
        self.inner.list_qualifications(season_id).await
    }

    async fn replace_qualifications(
        &self,
        season_id: SeasonId,
        qualifications: Vec<Qualification>,
    ) -> LeagueResult<bool> {
        self.inner.replace_qualifications(season_id, qualifications).await
    }
}

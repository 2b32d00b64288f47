//! Repository trait for league storage and its in-memory implementation.
//!
//! Managers only talk to [`LeagueRepository`], so a hosted backend can be
//! swapped in at the composition root without touching business logic.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tokio::sync::RwLock;

use super::errors::LeagueResult;
use super::models::{
    Event, EventId, EventResult, EventStatus, League, LeagueId, NewEvent, NewSeason, Player,
    Qualification, Season, SeasonId, Series, SeriesId,
};
use crate::scoring::PlayerId;

/// Trait for league storage operations
///
/// Lookups return `Ok(None)` for missing records; updates and deletes
/// return `Ok(false)` when nothing matched. Inserts that must be unique or
/// ordered check and write in one step.
#[async_trait]
pub trait LeagueRepository: Send + Sync {
    async fn insert_league(&self, name: &str, description: Option<&str>) -> LeagueResult<League>;
    async fn get_league(&self, id: LeagueId) -> LeagueResult<Option<League>>;
    async fn list_leagues(&self) -> LeagueResult<Vec<League>>;
    async fn update_league(&self, league: &League) -> LeagueResult<bool>;
    async fn delete_league(&self, id: LeagueId) -> LeagueResult<bool>;

    async fn insert_season(&self, season: &NewSeason) -> LeagueResult<Season>;
    async fn get_season(&self, id: SeasonId) -> LeagueResult<Option<Season>>;
    async fn list_seasons(&self, league_id: LeagueId) -> LeagueResult<Vec<Season>>;
    async fn update_season(&self, season: &Season) -> LeagueResult<bool>;
    async fn delete_season(&self, id: SeasonId) -> LeagueResult<bool>;

    /// Insert a series after the season's last one
    async fn insert_series(&self, season_id: SeasonId, name: &str) -> LeagueResult<Series>;
    async fn get_series(&self, id: SeriesId) -> LeagueResult<Option<Series>>;
    /// Series of a season ordered by position
    async fn list_series(&self, season_id: SeasonId) -> LeagueResult<Vec<Series>>;
    async fn update_series(&self, series: &Series) -> LeagueResult<bool>;
    async fn delete_series(&self, id: SeriesId) -> LeagueResult<bool>;

    async fn insert_event(&self, event: &NewEvent) -> LeagueResult<Event>;
    async fn get_event(&self, id: EventId) -> LeagueResult<Option<Event>>;
    /// Events of a series ordered by date
    async fn list_events(&self, series_id: SeriesId) -> LeagueResult<Vec<Event>>;
    async fn update_event(&self, event: &Event) -> LeagueResult<bool>;
    async fn delete_event(&self, id: EventId) -> LeagueResult<bool>;

    /// Add a roster entry, `Ok(false)` if the player is already on it
    async fn insert_player(&self, player: &Player) -> LeagueResult<bool>;
    async fn get_player(
        &self,
        league_id: LeagueId,
        player_id: &str,
    ) -> LeagueResult<Option<Player>>;
    async fn list_players(&self, league_id: LeagueId) -> LeagueResult<Vec<Player>>;
    async fn update_player(&self, player: &Player) -> LeagueResult<bool>;

    /// Replace every stored result of an event, `Ok(false)` if the event
    /// doesn't exist
    async fn replace_results(
        &self,
        event_id: EventId,
        results: Vec<EventResult>,
    ) -> LeagueResult<bool>;
    async fn results_for_event(&self, event_id: EventId) -> LeagueResult<Vec<EventResult>>;

    async fn list_qualifications(&self, season_id: SeasonId) -> LeagueResult<Vec<Qualification>>;
    /// Replace every qualification of a season, `Ok(false)` if the season
    /// doesn't exist
    async fn replace_qualifications(
        &self,
        season_id: SeasonId,
        qualifications: Vec<Qualification>,
    ) -> LeagueResult<bool>;
}

/// Serializable image of a whole league store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueSnapshot {
    pub leagues: Vec<League>,
    pub seasons: Vec<Season>,
    pub series: Vec<Series>,
    pub events: Vec<Event>,
    pub players: Vec<Player>,
    pub results: Vec<EventResult>,
    pub qualifications: Vec<Qualification>,
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    leagues: BTreeMap<LeagueId, League>,
    seasons: BTreeMap<SeasonId, Season>,
    series: BTreeMap<SeriesId, Series>,
    events: BTreeMap<EventId, Event>,
    players: BTreeMap<(LeagueId, PlayerId), Player>,
    results: BTreeMap<EventId, Vec<EventResult>>,
    qualifications: BTreeMap<SeasonId, Vec<Qualification>>,
}

impl Store {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory [`LeagueRepository`]
///
/// IDs are shared across entity kinds and start at 1.
#[derive(Debug, Default)]
pub struct InMemoryLeagueRepository {
    store: RwLock<Store>,
}

impl InMemoryLeagueRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the contents of a snapshot
    ///
    /// New IDs are allocated above the largest ID in the snapshot.
    pub fn from_snapshot(snapshot: LeagueSnapshot) -> Self {
        let mut store = Store::default();

        let max_id = snapshot
            .leagues
            .iter()
            .map(|l| l.id)
            .chain(snapshot.seasons.iter().map(|s| s.id))
            .chain(snapshot.series.iter().map(|s| s.id))
            .chain(snapshot.events.iter().map(|e| e.id))
            .max()
            .unwrap_or(0);
        store.next_id = max_id;

        store.leagues = snapshot.leagues.into_iter().map(|l| (l.id, l)).collect();
        store.seasons = snapshot.seasons.into_iter().map(|s| (s.id, s)).collect();
        store.series = snapshot.series.into_iter().map(|s| (s.id, s)).collect();
        store.events = snapshot.events.into_iter().map(|e| (e.id, e)).collect();
        store.players = snapshot
            .players
            .into_iter()
            .map(|p| ((p.league_id, p.id.clone()), p))
            .collect();
        for result in snapshot.results {
            store.results.entry(result.event_id).or_default().push(result);
        }
        for qualification in snapshot.qualifications {
            store
                .qualifications
                .entry(qualification.season_id)
                .or_default()
                .push(qualification);
        }

        Self {
            store: RwLock::new(store),
        }
    }

    /// Export the current contents
    pub async fn snapshot(&self) -> LeagueSnapshot {
        let store = self.store.read().await;
        LeagueSnapshot {
            leagues: store.leagues.values().cloned().collect(),
            seasons: store.seasons.values().cloned().collect(),
            series: store.series.values().cloned().collect(),
            events: store.events.values().cloned().collect(),
            players: store.players.values().cloned().collect(),
            results: store.results.values().flatten().cloned().collect(),
            qualifications: store.qualifications.values().flatten().cloned().collect(),
        }
    }
}

#[async_trait]
impl LeagueRepository for InMemoryLeagueRepository {
    async fn insert_league(&self, name: &str, description: Option<&str>) -> LeagueResult<League> {
        let mut store = self.store.write().await;
        let league = League {
            id: store.allocate_id(),
            name: name.to_string(),
            description: description.map(str::to_string),
            created_at: Utc::now(),
        };
        store.leagues.insert(league.id, league.clone());
        Ok(league)
    }

    async fn get_league(&self, id: LeagueId) -> LeagueResult<Option<League>> {
        Ok(self.store.read().await.leagues.get(&id).cloned())
    }

    async fn list_leagues(&self) -> LeagueResult<Vec<League>> {
        Ok(self.store.read().await.leagues.values().cloned().collect())
    }

    async fn update_league(&self, league: &League) -> LeagueResult<bool> {
        let mut store = self.store.write().await;
        Ok(replace_existing(&mut store.leagues, league.id, league))
    }

    async fn delete_league(&self, id: LeagueId) -> LeagueResult<bool> {
        let mut store = self.store.write().await;
        store.players.retain(|(league_id, _), _| *league_id != id);
        Ok(store.leagues.remove(&id).is_some())
    }

    async fn insert_season(&self, season: &NewSeason) -> LeagueResult<Season> {
        let mut store = self.store.write().await;
        let season = Season {
            id: store.allocate_id(),
            league_id: season.league_id,
            name: season.name.clone(),
            start_date: season.start_date,
            end_date: season.end_date,
            qualification_spots: season.qualification_spots,
            created_at: Utc::now(),
        };
        store.seasons.insert(season.id, season.clone());
        Ok(season)
    }

    async fn get_season(&self, id: SeasonId) -> LeagueResult<Option<Season>> {
        Ok(self.store.read().await.seasons.get(&id).cloned())
    }

    async fn list_seasons(&self, league_id: LeagueId) -> LeagueResult<Vec<Season>> {
        let store = self.store.read().await;
        let mut seasons: Vec<Season> = store
            .seasons
            .values()
            .filter(|s| s.league_id == league_id)
            .cloned()
            .collect();
        seasons.sort_by_key(|s| (s.start_date, s.id));
        Ok(seasons)
    }

    async fn update_season(&self, season: &Season) -> LeagueResult<bool> {
        let mut store = self.store.write().await;
        Ok(replace_existing(&mut store.seasons, season.id, season))
    }

    async fn delete_season(&self, id: SeasonId) -> LeagueResult<bool> {
        let mut store = self.store.write().await;
        store.qualifications.remove(&id);
        Ok(store.seasons.remove(&id).is_some())
    }

    async fn insert_series(&self, season_id: SeasonId, name: &str) -> LeagueResult<Series> {
        let mut store = self.store.write().await;
        let position = store
            .series
            .values()
            .filter(|s| s.season_id == season_id)
            .map(|s| s.position + 1)
            .max()
            .unwrap_or(0);
        let series = Series {
            id: store.allocate_id(),
            season_id,
            name: name.to_string(),
            position,
            created_at: Utc::now(),
        };
        store.series.insert(series.id, series.clone());
        Ok(series)
    }

    async fn get_series(&self, id: SeriesId) -> LeagueResult<Option<Series>> {
        Ok(self.store.read().await.series.get(&id).cloned())
    }

    async fn list_series(&self, season_id: SeasonId) -> LeagueResult<Vec<Series>> {
        let store = self.store.read().await;
        let mut series: Vec<Series> = store
            .series
            .values()
            .filter(|s| s.season_id == season_id)
            .cloned()
            .collect();
        series.sort_by_key(|s| (s.position, s.id));
        Ok(series)
    }

    async fn update_series(&self, series: &Series) -> LeagueResult<bool> {
        let mut store = self.store.write().await;
        Ok(replace_existing(&mut store.series, series.id, series))
    }

    async fn delete_series(&self, id: SeriesId) -> LeagueResult<bool> {
        Ok(self.store.write().await.series.remove(&id).is_some())
    }

    async fn insert_event(&self, event: &NewEvent) -> LeagueResult<Event> {
        let mut store = self.store.write().await;
        let event = Event {
            id: store.allocate_id(),
            series_id: event.series_id,
            name: event.name.clone(),
            date: event.date,
            game_type: event.game_type,
            status: EventStatus::Scheduled,
            total_players: None,
            created_at: Utc::now(),
        };
        store.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn get_event(&self, id: EventId) -> LeagueResult<Option<Event>> {
        Ok(self.store.read().await.events.get(&id).cloned())
    }

    async fn list_events(&self, series_id: SeriesId) -> LeagueResult<Vec<Event>> {
        let store = self.store.read().await;
        let mut events: Vec<Event> = store
            .events
            .values()
            .filter(|e| e.series_id == series_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.date, e.id));
        Ok(events)
    }

    async fn update_event(&self, event: &Event) -> LeagueResult<bool> {
        let mut store = self.store.write().await;
        Ok(replace_existing(&mut store.events, event.id, event))
    }

    async fn delete_event(&self, id: EventId) -> LeagueResult<bool> {
        let mut store = self.store.write().await;
        store.results.remove(&id);
        Ok(store.events.remove(&id).is_some())
    }

    async fn insert_player(&self, player: &Player) -> LeagueResult<bool> {
        let mut store = self.store.write().await;
        match store.players.entry((player.league_id, player.id.clone())) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(player.clone());
                Ok(true)
            }
        }
    }

    async fn get_player(
        &self,
        league_id: LeagueId,
        player_id: &str,
    ) -> LeagueResult<Option<Player>> {
        let store = self.store.read().await;
        Ok(store
            .players
            .get(&(league_id, player_id.to_string()))
            .cloned())
    }

    async fn list_players(&self, league_id: LeagueId) -> LeagueResult<Vec<Player>> {
        let store = self.store.read().await;
        Ok(store
            .players
            .values()
            .filter(|p| p.league_id == league_id)
            .cloned()
            .collect())
    }

    async fn update_player(&self, player: &Player) -> LeagueResult<bool> {
        let mut store = self.store.write().await;
        let key = (player.league_id, player.id.clone());
        Ok(replace_existing(&mut store.players, key, player))
    }

    async fn replace_results(
        &self,
        event_id: EventId,
        results: Vec<EventResult>,
    ) -> LeagueResult<bool> {
        let mut store = self.store.write().await;
        if !store.events.contains_key(&event_id) {
            return Ok(false);
        }
        if results.is_empty() {
            store.results.remove(&event_id);
        } else {
            store.results.insert(event_id, results);
        }
        Ok(true)
    }

    async fn results_for_event(&self, event_id: EventId) -> LeagueResult<Vec<EventResult>> {
        let store = self.store.read().await;
        Ok(store.results.get(&event_id).cloned().unwrap_or_default())
    }

    async fn list_qualifications(&self, season_id: SeasonId) -> LeagueResult<Vec<Qualification>> {
        let store = self.store.read().await;
        Ok(store
            .qualifications
            .get(&season_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn replace_qualifications(
        &self,
        season_id: SeasonId,
        qualifications: Vec<Qualification>,
    ) -> LeagueResult<bool> {
        let mut store = self.store.write().await;
        if !store.seasons.contains_key(&season_id) {
            return Ok(false);
        }
        store.qualifications.insert(season_id, qualifications);
        Ok(true)
    }
}

fn replace_existing<K: Ord, V: Clone>(map: &mut BTreeMap<K, V>, key: K, value: &V) -> bool {
    match map.get_mut(&key) {
        Some(existing) => {
            *existing = value.clone();
            true
        }
        None => false,
    }
}

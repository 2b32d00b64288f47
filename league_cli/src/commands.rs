//! Command parsing and execution.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pico_args::Arguments;
use poker_league::league::{Qualification, SeasonId, SeriesId};
use poker_league::{
    GameResult, InMemoryLeagueRepository, LeagueConfig, LeagueError, LeagueServices,
    LeagueSnapshot, PointAwards, Standing, score_game,
};
use serde::de::DeserializeOwned;

/// Command line errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    League(#[from] LeagueError),
}

impl From<pico_args::Error> for CliError {
    fn from(err: pico_args::Error) -> Self {
        CliError::Usage(err.to_string())
    }
}

/// Which standings table to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandingsScope {
    Season(SeasonId),
    Series(SeriesId),
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Score { game: PathBuf },
    Standings { snapshot: PathBuf, scope: StandingsScope },
    Qualify { snapshot: PathBuf, season_id: SeasonId },
}

impl Command {
    /// Parse the subcommand and its arguments, rejecting leftovers
    pub fn parse(mut pargs: Arguments) -> Result<Self, CliError> {
        let subcommand: String = pargs
            .subcommand()?
            .ok_or_else(|| CliError::Usage("Missing command".to_string()))?;

        let command = match subcommand.as_str() {
            "score" => Command::Score {
                game: pargs.free_from_str()?,
            },
            "standings" => {
                let season: Option<SeasonId> = pargs.opt_value_from_str("--season")?;
                let series: Option<SeriesId> = pargs.opt_value_from_str("--series")?;
                let scope = match (season, series) {
                    (Some(id), None) => StandingsScope::Season(id),
                    (None, Some(id)) => StandingsScope::Series(id),
                    _ => {
                        return Err(CliError::Usage(
                            "standings needs exactly one of --season or --series".to_string(),
                        ));
                    }
                };
                Command::Standings {
                    snapshot: pargs.free_from_str()?,
                    scope,
                }
            }
            "qualify" => Command::Qualify {
                season_id: pargs.value_from_str("--season")?,
                snapshot: pargs.free_from_str()?,
            },
            other => return Err(CliError::Usage(format!("Unknown command '{other}'"))),
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            return Err(CliError::Usage(format!(
                "Unexpected arguments: {}",
                join_args(&remaining)
            )));
        }

        Ok(command)
    }

    /// Run the command and return its JSON output
    pub async fn run(&self, config: &LeagueConfig) -> Result<String, CliError> {
        match self {
            Command::Score { game } => {
                let game: GameResult = load_json(game)?;
                to_json(&score(&game, config)?)
            }
            Command::Standings { snapshot, scope } => {
                let snapshot: LeagueSnapshot = load_json(snapshot)?;
                to_json(&standings(snapshot, *scope, config).await?)
            }
            Command::Qualify {
                snapshot,
                season_id,
            } => {
                let snapshot: LeagueSnapshot = load_json(snapshot)?;
                to_json(&qualify(snapshot, *season_id, config).await?)
            }
        }
    }
}

/// Score a single game, validating it according to `config`
pub fn score(game: &GameResult, config: &LeagueConfig) -> Result<PointAwards, CliError> {
    if let Err(e) = game.validate(config.max_field_size) {
        if config.strict_results {
            return Err(LeagueError::from(e).into());
        }
        log::warn!("Scoring malformed game: {}", e);
    }

    let awards = score_game(game);
    log::info!(
        "Scored {} game: {} of {} players awarded",
        game.game_type,
        awards.len(),
        game.results.len()
    );
    Ok(awards)
}

/// Standings of a season or series stored in a snapshot
pub async fn standings(
    snapshot: LeagueSnapshot,
    scope: StandingsScope,
    config: &LeagueConfig,
) -> Result<Vec<Standing>, CliError> {
    let services = services_for(snapshot, config);
    let table = match scope {
        StandingsScope::Season(id) => services.standings.season_standings(id).await?,
        StandingsScope::Series(id) => services.standings.series_standings(id).await?,
    };
    Ok(table)
}

/// Qualifications of a season after a refresh from its standings
pub async fn qualify(
    snapshot: LeagueSnapshot,
    season_id: SeasonId,
    config: &LeagueConfig,
) -> Result<Vec<Qualification>, CliError> {
    let services = services_for(snapshot, config);
    Ok(services.qualifications.refresh(season_id).await?)
}

fn services_for(snapshot: LeagueSnapshot, config: &LeagueConfig) -> LeagueServices {
    let repo = Arc::new(InMemoryLeagueRepository::from_snapshot(snapshot));
    LeagueServices::new(repo, config.clone())
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(CliError::Serialize)
}

fn join_args(args: &[OsString]) -> String {
    args.iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

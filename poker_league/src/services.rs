//! Wiring of the league managers over a shared repository.

use std::sync::Arc;

use crate::config::LeagueConfig;
use crate::league::{LeagueManager, LeagueRepository};
use crate::qualification::QualificationManager;
use crate::results::ResultsManager;
use crate::standings::StandingsManager;

/// Every league manager, sharing one repository and configuration
#[derive(Clone)]
pub struct LeagueServices {
    pub leagues: LeagueManager,
    pub results: ResultsManager,
    pub standings: StandingsManager,
    pub qualifications: QualificationManager,
}

impl LeagueServices {
    pub fn new(repo: Arc<dyn LeagueRepository>, config: LeagueConfig) -> Self {
        log::debug!(
            "League services: strict_results={}, default_qualification_spots={}, max_field_size={}",
            config.strict_results,
            config.default_qualification_spots,
            config.max_field_size
        );

        Self {
            leagues: LeagueManager::new(Arc::clone(&repo)),
            results: ResultsManager::new(Arc::clone(&repo), config.clone()),
            standings: StandingsManager::new(Arc::clone(&repo)),
            qualifications: QualificationManager::new(repo, config),
        }
    }
}

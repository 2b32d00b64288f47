//! League configuration management.
//!
//! Consolidates environment variable reads and provides validated configuration.

/// League-wide settings loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueConfig {
    /// Reject malformed games instead of scoring them with a warning
    pub strict_results: bool,
    /// Qualification spots for seasons that don't set their own
    pub default_qualification_spots: u32,
    /// Largest field size accepted when recording results
    pub max_field_size: u32,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            strict_results: true,
            default_qualification_spots: 10,
            max_field_size: 1000,
        }
    }
}

impl LeagueConfig {
    /// Load configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `LEAGUE_STRICT_RESULTS`: Reject malformed games (default: true)
    /// - `LEAGUE_QUALIFICATION_SPOTS`: Default qualification spots (default: 10)
    /// - `LEAGUE_MAX_FIELD_SIZE`: Largest accepted field (default: 1000)
    ///
    /// # Errors
    ///
    /// Returns error if a loaded value fails [`LeagueConfig::validate`]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Unset or unparsable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            strict_results: parse_or(&lookup, "LEAGUE_STRICT_RESULTS", defaults.strict_results),
            default_qualification_spots: parse_or(
                &lookup,
                "LEAGUE_QUALIFICATION_SPOTS",
                defaults.default_qualification_spots,
            ),
            max_field_size: parse_or(&lookup, "LEAGUE_MAX_FIELD_SIZE", defaults.max_field_size),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_field_size == 0 {
            return Err(ConfigError::Invalid {
                var: "LEAGUE_MAX_FIELD_SIZE".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.default_qualification_spots == 0 {
            return Err(ConfigError::Invalid {
                var: "LEAGUE_QUALIFICATION_SPOTS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse a looked-up value with default fallback
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

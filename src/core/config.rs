//! League bot configuration
//!
//! Loaded from a TOML file; every field has a default so an empty or
//! missing file yields a working setup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{LeagueError, Result};
use crate::core::types::MAX_GAMES_PER_WEEK;

/// How AddScore picks its week when the message names none
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekPolicyKind {
    /// Fill the next slot of the latest week, opening a new week once it is full
    #[default]
    FillLatest,
    /// Always open a new week after the latest one
    AppendNew,
}

/// How a name fragment picks between several containing names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakKind {
    /// Shortest name, then catalog order
    #[default]
    ShortestName,
    FirstInCatalog,
    /// Refuse to guess; only an exact name settles a tie
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    /// JSON file holding the league records
    pub data_file: PathBuf,

    /// Entries shown by `best weeks`
    pub best_weeks_limit: usize,

    /// Entries shown by `best team weeks`
    pub best_team_weeks_limit: usize,

    /// Entries shown by `best games`
    pub best_games_limit: usize,

    /// Game positions contested per week when deriving win/loss
    pub standings_game_positions: usize,

    pub week_policy: WeekPolicyKind,

    pub tie_break: TieBreakKind,

    /// tracing-subscriber filter directive
    pub log_filter: String,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/league.json"),
            best_weeks_limit: 10,
            best_team_weeks_limit: 5,
            best_games_limit: 10,
            standings_game_positions: 4,
            week_policy: WeekPolicyKind::FillLatest,
            tie_break: TieBreakKind::ShortestName,
            log_filter: "bowl_league=info".to_string(),
        }
    }
}

impl LeagueConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a TOML file and validate
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            LeagueError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: LeagueConfig = toml::from_str(contents)
            .map_err(|e| LeagueError::Config(format!("Failed to parse config TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.best_weeks_limit == 0
            || self.best_team_weeks_limit == 0
            || self.best_games_limit == 0
        {
            return Err(LeagueError::Config(
                "leaderboard limits must be at least 1".into(),
            ));
        }

        if !(1..=MAX_GAMES_PER_WEEK).contains(&self.standings_game_positions) {
            return Err(LeagueError::Config(format!(
                "standings_game_positions ({}) must be between 1 and {}",
                self.standings_game_positions, MAX_GAMES_PER_WEEK
            )));
        }

        Ok(())
    }
}

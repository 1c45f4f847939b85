//! JSON file backed record store
//!
//! Keeps the whole league in memory and writes it back after every
//! accepted score.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{LeagueError, Result};
use crate::core::types::{Player, PlayerId, Season, SeasonAggregate, SeasonId, Team, Week, WeekRecord};
use crate::source::memory::{LeagueSnapshot, MemorySource};
use crate::source::ScoreRecordSource;

pub struct JsonFileSource {
    path: PathBuf,
    inner: MemorySource,
}

impl JsonFileSource {
    /// Load the league file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let contents = fs::read_to_string(&path).map_err(|e| {
            LeagueError::SourceUnavailable(format!("Failed to read {:?}: {}", path, e))
        })?;
        let snapshot: LeagueSnapshot = serde_json::from_str(&contents).map_err(|e| {
            LeagueError::SourceUnavailable(format!("Failed to parse {:?}: {}", path, e))
        })?;

        tracing::debug!(
            "Loaded {} seasons, {} players, {} week records from {:?}",
            snapshot.seasons.len(),
            snapshot.players.len(),
            snapshot.records.len(),
            path
        );

        Ok(Self {
            path,
            inner: MemorySource::new(snapshot),
        })
    }

    /// Write `snapshot` to `path`, replacing any existing file
    pub fn create(path: impl AsRef<Path>, snapshot: LeagueSnapshot) -> Result<Self> {
        let source = Self {
            path: path.as_ref().to_path_buf(),
            inner: MemorySource::new(snapshot),
        };
        source.save()?;
        Ok(source)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(self.inner.snapshot())?;
        fs::write(&self.path, json).map_err(|e| {
            LeagueError::SourceUnavailable(format!("Failed to write {:?}: {}", self.path, e))
        })
    }
}

impl ScoreRecordSource for JsonFileSource {
    fn list_records(&self, season: Option<SeasonId>) -> Result<Vec<WeekRecord>> {
        self.inner.list_records(season)
    }

    fn list_seasons(&self) -> Result<Vec<Season>> {
        self.inner.list_seasons()
    }

    fn list_teams(&self, season: SeasonId) -> Result<Vec<Team>> {
        self.inner.list_teams(season)
    }

    fn list_players(&self) -> Result<Vec<Player>> {
        self.inner.list_players()
    }

    fn list_aggregates(&self, season: SeasonId) -> Result<Vec<SeasonAggregate>> {
        self.inner.list_aggregates(season)
    }

    fn append_or_update_score(
        &mut self,
        player: PlayerId,
        season: SeasonId,
        week: Week,
        slot: u8,
        score: u16,
    ) -> Result<()> {
        let before = self.inner.clone();
        self.inner
            .append_or_update_score(player, season, week, slot, score)?;

        if let Err(e) = self.save() {
            // Keep memory consistent with what is on disk
            self.inner = before;
            return Err(e);
        }
        Ok(())
    }
}

//! Record store seam
//!
//! The statistics and command layers only ever see league data through
//! `ScoreRecordSource`. Storage technology lives behind it.

pub mod catalog;
pub mod json_file;
pub mod memory;

pub use catalog::Catalog;
pub use json_file::JsonFileSource;
pub use memory::{LeagueSnapshot, MemorySource};

use crate::core::error::Result;
use crate::core::types::{
    Player, PlayerId, Season, SeasonAggregate, SeasonId, Team, Week, WeekRecord,
};

/// Narrow read/append interface onto the league's records
///
/// Reads never mutate. `append_or_update_score` is the only write and is a
/// plain read-modify-write: callers that accept concurrent writers must
/// serialize it per (player, season, week).
pub trait ScoreRecordSource {
    /// Week records in canonical (recorded) order, optionally for one season
    fn list_records(&self, season: Option<SeasonId>) -> Result<Vec<WeekRecord>>;

    fn list_seasons(&self) -> Result<Vec<Season>>;

    fn list_teams(&self, season: SeasonId) -> Result<Vec<Team>>;

    fn list_players(&self) -> Result<Vec<Player>>;

    /// Season-level summaries for legacy seasons
    fn list_aggregates(&self, season: SeasonId) -> Result<Vec<SeasonAggregate>>;

    /// Write `score` into 1-based `slot` of the player's week, creating the
    /// week record when it does not exist yet
    fn append_or_update_score(
        &mut self,
        player: PlayerId,
        season: SeasonId,
        week: Week,
        slot: u8,
        score: u16,
    ) -> Result<()>;
}

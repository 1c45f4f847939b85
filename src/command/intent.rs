//! Resolved command intents

use crate::core::error::EntityKind;
use crate::core::types::{PlayerId, SeasonId, SeasonScope, TeamId, Week};

/// Which league-wide rollup was asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeagueStatKind {
    /// Averages plus every leaderboard
    Summary,
    PlayerAverages,
    BestWeeks,
    BestTeamWeeks,
    BestGames,
}

/// Why a message did not become a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnrecognizedReason {
    /// No rule matched the text
    NoRuleMatched,
    /// A rule matched but one of its names did not resolve
    Unresolved { kind: EntityKind, fragment: String },
}

/// A parsed message with every entity resolved
///
/// Team commands carry a single season; a team only exists within one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ShowTeamStandings {
        season: SeasonId,
    },
    ShowTeamDetail {
        team: TeamId,
        season: SeasonId,
        week: Option<Week>,
    },
    ShowTeamWeekly {
        team: TeamId,
        season: SeasonId,
    },
    ShowPlayerStats {
        player: PlayerId,
        scope: SeasonScope,
        week: Option<Week>,
    },
    AddScore {
        player: PlayerId,
        season: SeasonId,
        week: Option<Week>,
        /// Already checked to lie within 0-300
        score: u16,
    },
    ListSeasons,
    ListPlayers {
        scope: SeasonScope,
    },
    ListTeams {
        season: SeasonId,
    },
    ShowLeagueStat {
        kind: LeagueStatKind,
        scope: SeasonScope,
    },
    Help,
    Unrecognized(UnrecognizedReason),
}

impl Intent {
    pub fn unresolved(kind: EntityKind, fragment: impl Into<String>) -> Self {
        Intent::Unrecognized(UnrecognizedReason::Unresolved {
            kind,
            fragment: fragment.into(),
        })
    }

    /// Whether handling this intent writes to the record source
    pub fn is_write(&self) -> bool {
        matches!(self, Intent::AddScore { .. })
    }
}

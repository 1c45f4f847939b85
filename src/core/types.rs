//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Highest score a single game can hold
pub const MAX_GAME_SCORE: u16 = 300;

/// Number of game slots a week record holds
pub const MAX_GAMES_PER_WEEK: usize = 5;

/// Highest week number a score can be entered for
pub const MAX_WEEK: Week = 99;

/// Unique identifier for players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// Unique identifier for teams (a team belongs to exactly one season)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(pub u32);

/// Unique identifier for seasons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeasonId(pub u32);

/// Week number within a season (1-based)
pub type Week = u32;

/// What kind of data a season carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataShape {
    /// Individual game scores are recorded per player per week
    Detailed,
    /// Legacy season: only season-level totals per player survive
    Aggregate,
}

impl DataShape {
    pub fn label(&self) -> &'static str {
        match self {
            DataShape::Detailed => "game by game",
            DataShape::Aggregate => "season totals only",
        }
    }
}

/// Which seasons a query looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonScope {
    Season(SeasonId),
    AllSeasons,
}

impl SeasonScope {
    pub fn includes(&self, season: SeasonId) -> bool {
        match self {
            SeasonScope::Season(id) => *id == season,
            SeasonScope::AllSeasons => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    /// Ordinal used for "most recent" and `season N` lookups
    pub number: u32,
    pub name: String,
    pub shape: DataShape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub season_id: SeasonId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

/// One player's recorded week within a season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekRecord {
    pub player_id: PlayerId,
    pub season_id: SeasonId,
    pub team_id: TeamId,
    #[serde(default)]
    pub opponent_id: Option<TeamId>,
    pub week: Week,
    /// Game scores in slot order, at most `MAX_GAMES_PER_WEEK`
    #[serde(default)]
    pub games: Vec<u16>,
    /// Stored week average; stands in for the week total when absent
    #[serde(default)]
    pub average: f64,
    #[serde(default)]
    pub is_playoff: bool,
    #[serde(default)]
    pub is_absent: bool,
    #[serde(default)]
    pub is_substitute: bool,
}

impl WeekRecord {
    pub fn new(player_id: PlayerId, season_id: SeasonId, team_id: TeamId, week: Week) -> Self {
        Self {
            player_id,
            season_id,
            team_id,
            opponent_id: None,
            week,
            games: Vec::new(),
            average: 0.0,
            is_playoff: false,
            is_absent: false,
            is_substitute: false,
        }
    }

    pub fn with_opponent(mut self, opponent: TeamId) -> Self {
        self.opponent_id = Some(opponent);
        self
    }

    /// Set the games and refresh the stored average from them
    pub fn with_games(mut self, games: &[u16]) -> Self {
        self.games = games.to_vec();
        self.refresh_average();
        self
    }

    /// Mark absent, keeping `average` as the stand-in value
    pub fn absent(mut self, stand_in_average: f64) -> Self {
        self.is_absent = true;
        self.average = stand_in_average;
        self
    }

    pub fn substitute(mut self) -> Self {
        self.is_substitute = true;
        self
    }

    pub fn playoff(mut self) -> Self {
        self.is_playoff = true;
        self
    }

    pub fn total_pins(&self) -> u32 {
        self.games.iter().map(|&g| u32::from(g)).sum()
    }

    /// Mean of the recorded games, or the stored average when none were bowled
    pub fn week_average(&self) -> f64 {
        if self.games.is_empty() {
            self.average
        } else {
            self.total_pins() as f64 / self.games.len() as f64
        }
    }

    /// Pins this record adds to its team's week total
    pub fn team_pins(&self) -> f64 {
        if self.is_absent {
            self.average
        } else {
            self.total_pins() as f64
        }
    }

    /// Whether the games count toward the owner's own statistics
    pub fn counts_for_player(&self) -> bool {
        !self.is_absent
    }

    /// Whether the record counts toward any team-level figure
    pub fn counts_for_team(&self) -> bool {
        !self.is_substitute
    }

    /// Whether the games take part in per-game win/loss
    pub fn counts_for_match(&self) -> bool {
        !self.is_substitute && !self.is_absent
    }

    /// 1-based slot the next game would land in
    pub fn next_open_slot(&self) -> Option<u8> {
        (self.games.len() < MAX_GAMES_PER_WEEK).then(|| self.games.len() as u8 + 1)
    }

    pub fn refresh_average(&mut self) {
        if !self.games.is_empty() {
            self.average = self.total_pins() as f64 / self.games.len() as f64;
        }
    }
}

/// Season-level summary for one player in a legacy season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonAggregate {
    pub player_id: PlayerId,
    pub season_id: SeasonId,
    pub team_id: TeamId,
    pub total_games: u32,
    pub total_pins: u32,
    #[serde(default)]
    pub average: Option<f64>,
    #[serde(default)]
    pub high_game: Option<u16>,
    #[serde(default)]
    pub low_game: Option<u16>,
    /// Partially surviving per-week values, index 0 is week 1
    #[serde(default)]
    pub weekly: Vec<Option<f64>>,
}

impl SeasonAggregate {
    /// Stored average, falling back to pins over games
    pub fn effective_average(&self) -> Option<f64> {
        self.average.or_else(|| {
            (self.total_games > 0).then(|| self.total_pins as f64 / self.total_games as f64)
        })
    }
}

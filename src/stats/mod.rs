//! Statistics over a season scope
//!
//! `StatsAggregator` loads each season in scope once and dispatches on the
//! season's data shape: detailed seasons flatten individual games, legacy
//! seasons fall back to their stored season totals.

pub mod entry;
pub mod league;
pub mod outcome;
pub mod player;
pub mod team;

pub use entry::{
    add_score, policy_for, AppendNewWeek, FillLatestWeek, ScoreReceipt, ScoreRequest,
    WeekTargetPolicy,
};
pub use league::{
    BestGame, BestTeamWeek, BestWeek, Leaderboard, LeagueSummary, PlayerAverageEntry,
};
pub use outcome::{RecordStatus, WinLoss};
pub use player::{GameSummary, PlayerStats, PlayerTally, PlayerTotals, PlayerWeek};
pub use team::{
    LineupEntry, RosterAverage, TeamDetail, TeamStanding, TeamWeekDetail, TeamWeekSummary,
    TeamWeekly,
};

use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use crate::core::config::LeagueConfig;
use crate::core::error::{LeagueError, Result};
use crate::core::types::{
    DataShape, PlayerId, Season, SeasonAggregate, SeasonId, SeasonScope, TeamId, Week,
    WeekRecord,
};
use crate::source::{Catalog, ScoreRecordSource};

/// One season's records, in the form its data shape provides
#[derive(Debug, Clone, PartialEq)]
pub enum SeasonData {
    Detailed(Vec<WeekRecord>),
    Aggregate(Vec<SeasonAggregate>),
}

/// Read-only statistics over a record source
pub struct StatsAggregator<'a> {
    source: &'a dyn ScoreRecordSource,
    catalog: &'a Catalog,
    config: &'a LeagueConfig,
}

impl<'a> StatsAggregator<'a> {
    pub fn new(
        source: &'a dyn ScoreRecordSource,
        catalog: &'a Catalog,
        config: &'a LeagueConfig,
    ) -> Self {
        Self {
            source,
            catalog,
            config,
        }
    }

    pub fn load_season(&self, season: &Season) -> Result<SeasonData> {
        Ok(match season.shape {
            DataShape::Detailed => SeasonData::Detailed(self.source.list_records(Some(season.id))?),
            DataShape::Aggregate => SeasonData::Aggregate(self.source.list_aggregates(season.id)?),
        })
    }

    /// Seasons covered by `scope`, oldest first
    pub fn scope_seasons(&self, scope: SeasonScope) -> Result<Vec<&'a Season>> {
        match scope {
            SeasonScope::Season(id) => Ok(vec![self.catalog.season(id)?]),
            SeasonScope::AllSeasons => {
                let mut seasons: Vec<&Season> = self.catalog.seasons.iter().collect();
                seasons.sort_by_key(|s| s.number);
                Ok(seasons)
            }
        }
    }

    pub fn scope_label(&self, scope: SeasonScope) -> String {
        match scope {
            SeasonScope::Season(id) => self
                .catalog
                .season(id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|_| "Unknown season".to_string()),
            SeasonScope::AllSeasons => "All seasons".to_string(),
        }
    }

    fn load_scope(&self, scope: SeasonScope) -> Result<Vec<(&'a Season, SeasonData)>> {
        self.scope_seasons(scope)?
            .into_iter()
            .map(|season| Ok((season, self.load_season(season)?)))
            .collect()
    }

    fn detailed_records(&self, season: &Season) -> Result<Vec<WeekRecord>> {
        match self.load_season(season)? {
            SeasonData::Detailed(records) => Ok(records),
            SeasonData::Aggregate(_) => Err(LeagueError::NoData(format!(
                "{} only has season totals, no weekly records",
                season.name
            ))),
        }
    }

    pub fn player_stats(&self, player: PlayerId, scope: SeasonScope) -> Result<PlayerStats> {
        let name = self.catalog.player(player)?.name.clone();
        let mut tally = PlayerTally::new();
        let mut team: Option<TeamId> = None;

        for (_, data) in self.load_scope(scope)? {
            match data {
                SeasonData::Detailed(records) => {
                    let mine: Vec<&WeekRecord> =
                        records.iter().filter(|r| r.player_id == player).collect();
                    if let Some(latest) = mine.iter().max_by_key(|r| r.week) {
                        team = Some(latest.team_id);
                    }
                    tally.add_records(mine);
                }
                SeasonData::Aggregate(summaries) => {
                    for summary in summaries.iter().filter(|s| s.player_id == player) {
                        team = Some(summary.team_id);
                        tally.add_summary(summary);
                    }
                }
            }
        }

        let label = self.scope_label(scope);
        let totals = tally
            .finish()
            .ok_or_else(|| LeagueError::NoData(format!("{} has no games in {}", name, label)))?;

        Ok(PlayerStats {
            name,
            team: team.map(|t| self.catalog.team_name(t).to_string()),
            scope: label,
            totals,
        })
    }

    pub fn player_week(&self, player: PlayerId, season: SeasonId, week: Week) -> Result<PlayerWeek> {
        let name = self.catalog.player(player)?.name.clone();
        let season = self.catalog.season(season)?;
        let missing = || LeagueError::NoData(format!("No data for {} in week {}", name, week));

        match self.load_season(season)? {
            SeasonData::Detailed(records) => {
                let record = records
                    .iter()
                    .find(|r| r.player_id == player && r.week == week)
                    .ok_or_else(missing)?;
                Ok(PlayerWeek {
                    name: name.clone(),
                    team: self.catalog.team_name(record.team_id).to_string(),
                    season: season.name.clone(),
                    week,
                    games: record.games.clone(),
                    average: record.week_average(),
                    total: record.total_pins(),
                    absent: record.is_absent,
                    substitute: record.is_substitute,
                    summary_only: false,
                })
            }
            SeasonData::Aggregate(summaries) => {
                let (summary, average) = summaries
                    .iter()
                    .filter(|s| s.player_id == player)
                    .find_map(|s| {
                        let index = usize::try_from(week.checked_sub(1)?).ok()?;
                        Some((s, (*s.weekly.get(index)?)?))
                    })
                    .ok_or_else(missing)?;
                Ok(PlayerWeek {
                    name: name.clone(),
                    team: self.catalog.team_name(summary.team_id).to_string(),
                    season: season.name.clone(),
                    week,
                    games: Vec::new(),
                    average,
                    total: 0,
                    absent: false,
                    substitute: false,
                    summary_only: true,
                })
            }
        }
    }

    /// Team standings for one season, best record first
    pub fn team_standings(&self, season: SeasonId) -> Result<Vec<TeamStanding>> {
        let season = self.catalog.season(season)?;
        let teams = self.catalog.teams(season.id);
        if teams.is_empty() {
            return Err(LeagueError::NoData(format!("No teams in {}", season.name)));
        }

        let positions = self.config.standings_game_positions;
        let mut standings: Vec<TeamStanding> = match self.load_season(season)? {
            SeasonData::Detailed(records) => teams
                .iter()
                .map(|t| TeamStanding {
                    team: t.id,
                    name: t.name.clone(),
                    record: RecordStatus::Derived(team::season_record(&records, t.id, positions)),
                    average: team::season_average(&records, t.id),
                    total_pins: team::season_pins(&records, t.id),
                })
                .collect(),
            SeasonData::Aggregate(summaries) => teams
                .iter()
                .map(|t| {
                    let members = summaries.iter().filter(|s| s.team_id == t.id);
                    TeamStanding {
                        team: t.id,
                        name: t.name.clone(),
                        record: RecordStatus::Unavailable,
                        average: summary_team_average(members.clone()),
                        total_pins: members.map(|s| f64::from(s.total_pins)).sum(),
                    }
                })
                .collect(),
        };

        team::sort_standings(&mut standings);
        Ok(standings)
    }

    /// Season standings re-ranked by team average
    pub fn teams_by_average(&self, season: SeasonId) -> Result<Vec<TeamStanding>> {
        let mut standings = self.team_standings(season)?;
        standings.sort_by_key(|s| Reverse(s.average.map(OrderedFloat)));
        Ok(standings)
    }

    pub fn team_detail(&self, team: TeamId, season: SeasonId) -> Result<TeamDetail> {
        let season = self.catalog.season(season)?;
        let name = self.catalog.team_name(team).to_string();
        let no_games = || LeagueError::NoData(format!("{} has no games in {}", name, season.name));

        match self.load_season(season)? {
            SeasonData::Detailed(records) => {
                if team::weeks_played(&records, team).is_empty() {
                    return Err(no_games());
                }
                let roster = team::roster_averages(&records, team)
                    .into_iter()
                    .map(|(player, average, games)| RosterAverage {
                        player,
                        name: self.catalog.player_name(player).to_string(),
                        average,
                        games,
                    })
                    .collect();
                let positions = self.config.standings_game_positions;
                Ok(TeamDetail {
                    name: name.clone(),
                    season: season.name.clone(),
                    record: RecordStatus::Derived(team::season_record(&records, team, positions)),
                    average: team::season_average(&records, team),
                    total_pins: team::season_pins(&records, team),
                    roster,
                })
            }
            SeasonData::Aggregate(summaries) => {
                let members: Vec<&SeasonAggregate> =
                    summaries.iter().filter(|s| s.team_id == team).collect();
                if members.is_empty() {
                    return Err(no_games());
                }
                let mut roster: Vec<RosterAverage> = members
                    .iter()
                    .filter_map(|s| {
                        Some(RosterAverage {
                            player: s.player_id,
                            name: self.catalog.player_name(s.player_id).to_string(),
                            average: s.effective_average()?,
                            games: s.total_games,
                        })
                    })
                    .collect();
                roster.sort_by_key(|r| Reverse(OrderedFloat(r.average)));
                Ok(TeamDetail {
                    name: name.clone(),
                    season: season.name.clone(),
                    record: RecordStatus::Unavailable,
                    average: summary_team_average(members.iter().copied()),
                    total_pins: members.iter().map(|s| f64::from(s.total_pins)).sum(),
                    roster,
                })
            }
        }
    }

    /// Week by week results; legacy seasons report the record as unavailable
    pub fn team_weekly(&self, team: TeamId, season: SeasonId) -> Result<TeamWeekly> {
        let season = self.catalog.season(season)?;
        let name = self.catalog.team_name(team).to_string();

        let records = match self.load_season(season)? {
            SeasonData::Detailed(records) => records,
            SeasonData::Aggregate(_) => {
                return Ok(TeamWeekly {
                    name,
                    season: season.name.clone(),
                    record: RecordStatus::Unavailable,
                    weeks: Vec::new(),
                })
            }
        };

        let positions = self.config.standings_game_positions;
        let weeks: Vec<TeamWeekSummary> = team::weeks_played(&records, team)
            .into_iter()
            .map(|week| {
                let ours = team::lineup(&records, team, week);
                let result = team::week_result(&records, team, week, positions);
                TeamWeekSummary {
                    week,
                    opponent: result.map(|(o, _)| self.catalog.team_name(o).to_string()),
                    record: result.map(|(_, r)| r),
                    pins_for: team::week_pins(&ours),
                    pins_against: result
                        .map(|(o, _)| team::week_pins(&team::lineup(&records, o, week))),
                    average: team::week_average(&ours),
                }
            })
            .collect();

        if weeks.is_empty() {
            return Err(LeagueError::NoData(format!(
                "No weekly data for {} in {}",
                name, season.name
            )));
        }

        let mut total = WinLoss::default();
        for record in weeks.iter().filter_map(|w| w.record) {
            total += record;
        }

        Ok(TeamWeekly {
            name,
            season: season.name.clone(),
            record: RecordStatus::Derived(total),
            weeks,
        })
    }

    pub fn team_week(&self, team: TeamId, season: SeasonId, week: Week) -> Result<TeamWeekDetail> {
        let season = self.catalog.season(season)?;
        let name = self.catalog.team_name(team).to_string();
        let records = self.detailed_records(season)?;

        let players: Vec<LineupEntry> = records
            .iter()
            .filter(|r| r.team_id == team && r.week == week)
            .map(|r| LineupEntry {
                name: self.catalog.player_name(r.player_id).to_string(),
                games: r.games.clone(),
                average: r.week_average(),
                absent: r.is_absent,
                substitute: r.is_substitute,
            })
            .collect();
        if players.is_empty() {
            return Err(LeagueError::NoData(format!(
                "No data for {} in week {}",
                name, week
            )));
        }

        let ours = team::lineup(&records, team, week);
        let result =
            team::week_result(&records, team, week, self.config.standings_game_positions);

        Ok(TeamWeekDetail {
            name,
            season: season.name.clone(),
            week,
            opponent: result.map(|(o, _)| self.catalog.team_name(o).to_string()),
            record: result.map(|(_, r)| r),
            players,
            total_pins: team::week_pins(&ours),
            average: team::week_average(&ours),
        })
    }

    pub fn player_averages(&self, scope: SeasonScope) -> Result<Vec<PlayerAverageEntry>> {
        let seasons = self.load_scope(scope)?;
        let entries = league::player_averages(self.catalog, &seasons);
        if entries.is_empty() {
            return Err(self.no_games(scope));
        }
        Ok(entries)
    }

    pub fn best_weeks(&self, scope: SeasonScope) -> Result<Leaderboard<BestWeek>> {
        let seasons = self.load_scope(scope)?;
        self.non_empty(
            scope,
            league::best_weeks(self.catalog, &seasons, self.config.best_weeks_limit),
        )
    }

    pub fn best_team_weeks(&self, scope: SeasonScope) -> Result<Leaderboard<BestTeamWeek>> {
        let seasons = self.load_scope(scope)?;
        self.non_empty(
            scope,
            league::best_team_weeks(self.catalog, &seasons, self.config.best_team_weeks_limit),
        )
    }

    pub fn best_games(&self, scope: SeasonScope) -> Result<Leaderboard<BestGame>> {
        let seasons = self.load_scope(scope)?;
        self.non_empty(
            scope,
            league::best_games(self.catalog, &seasons, self.config.best_games_limit),
        )
    }

    /// Every rollup at once, reading each season a single time
    pub fn league_summary(&self, scope: SeasonScope) -> Result<LeagueSummary> {
        let seasons = self.load_scope(scope)?;
        let averages = league::player_averages(self.catalog, &seasons);
        if averages.is_empty() {
            return Err(self.no_games(scope));
        }

        Ok(LeagueSummary {
            scope: self.scope_label(scope),
            averages,
            best_weeks: league::best_weeks(self.catalog, &seasons, self.config.best_weeks_limit),
            best_team_weeks: league::best_team_weeks(
                self.catalog,
                &seasons,
                self.config.best_team_weeks_limit,
            ),
            best_games: league::best_games(self.catalog, &seasons, self.config.best_games_limit),
        })
    }

    fn non_empty<T>(&self, scope: SeasonScope, board: Leaderboard<T>) -> Result<Leaderboard<T>> {
        if board.entries.is_empty() && board.summary_only.is_empty() {
            return Err(self.no_games(scope));
        }
        Ok(board)
    }

    fn no_games(&self, scope: SeasonScope) -> LeagueError {
        LeagueError::NoData(format!("No games recorded in {}", self.scope_label(scope)))
    }
}

/// Average of the members' stored averages
fn summary_team_average<'s>(members: impl Iterator<Item = &'s SeasonAggregate>) -> Option<f64> {
    let averages: Vec<f64> = members.filter_map(|s| s.effective_average()).collect();
    (!averages.is_empty()).then(|| averages.iter().sum::<f64>() / averages.len() as f64)
}

//! Command execution - runs resolved intents against the record source

use crate::command::intent::{Intent, LeagueStatKind, UnrecognizedReason};
use crate::core::config::LeagueConfig;
use crate::core::error::Result;
use crate::core::types::{Season, SeasonId, SeasonScope};
use crate::source::{Catalog, ScoreRecordSource};
use crate::stats::{
    add_score, BestGame, BestTeamWeek, BestWeek, Leaderboard, LeagueSummary, PlayerAverageEntry,
    PlayerStats, PlayerWeek, ScoreReceipt, ScoreRequest, StatsAggregator, TeamDetail,
    TeamStanding, TeamWeekDetail, TeamWeekly, WeekTargetPolicy,
};

/// Computed answer to one intent, ready for formatting
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Standings {
        season: String,
        standings: Vec<TeamStanding>,
    },
    TeamDetail(TeamDetail),
    TeamWeek(TeamWeekDetail),
    TeamWeekly(TeamWeekly),
    PlayerStats(PlayerStats),
    PlayerWeek(PlayerWeek),
    ScoreAdded(ScoreReceipt),
    /// Newest first
    Seasons(Vec<Season>),
    Players {
        scope: String,
        players: Vec<PlayerAverageEntry>,
    },
    Teams {
        season: String,
        teams: Vec<TeamStanding>,
    },
    Summary(LeagueSummary),
    Averages {
        scope: String,
        players: Vec<PlayerAverageEntry>,
    },
    BestWeeks {
        scope: String,
        board: Leaderboard<BestWeek>,
    },
    BestTeamWeeks {
        scope: String,
        board: Leaderboard<BestTeamWeek>,
    },
    BestGames {
        scope: String,
        board: Leaderboard<BestGame>,
    },
    Help,
    Unrecognized(UnrecognizedReason),
}

/// Executes intents; reads go through `StatsAggregator`, writes through `add_score`
pub struct CommandExecutor;

impl CommandExecutor {
    pub fn execute(
        source: &mut dyn ScoreRecordSource,
        catalog: &Catalog,
        config: &LeagueConfig,
        policy: &dyn WeekTargetPolicy,
        intent: Intent,
    ) -> Result<Outcome> {
        let stats = StatsAggregator::new(&*source, catalog, config);
        let season_name = |id: SeasonId| stats.scope_label(SeasonScope::Season(id));

        Ok(match intent {
            Intent::AddScore {
                player,
                season,
                week,
                score,
            } => {
                let request = ScoreRequest {
                    player,
                    season,
                    week,
                    score: u32::from(score),
                };
                Outcome::ScoreAdded(add_score(source, catalog, &request, policy)?)
            }
            Intent::ShowTeamStandings { season } => Outcome::Standings {
                season: season_name(season),
                standings: stats.team_standings(season)?,
            },
            Intent::ShowTeamDetail {
                team,
                season,
                week: Some(week),
            } => Outcome::TeamWeek(stats.team_week(team, season, week)?),
            Intent::ShowTeamDetail {
                team,
                season,
                week: None,
            } => Outcome::TeamDetail(stats.team_detail(team, season)?),
            Intent::ShowTeamWeekly { team, season } => {
                Outcome::TeamWeekly(stats.team_weekly(team, season)?)
            }
            Intent::ShowPlayerStats {
                player,
                scope: SeasonScope::Season(season),
                week: Some(week),
            } => Outcome::PlayerWeek(stats.player_week(player, season, week)?),
            Intent::ShowPlayerStats { player, scope, .. } => {
                Outcome::PlayerStats(stats.player_stats(player, scope)?)
            }
            Intent::ListSeasons => {
                let mut seasons = catalog.seasons.clone();
                seasons.sort_by_key(|s| std::cmp::Reverse(s.number));
                Outcome::Seasons(seasons)
            }
            Intent::ListPlayers { scope } => Outcome::Players {
                scope: stats.scope_label(scope),
                players: stats.player_averages(scope)?,
            },
            Intent::ListTeams { season } => Outcome::Teams {
                season: season_name(season),
                teams: stats.teams_by_average(season)?,
            },
            Intent::ShowLeagueStat { kind, scope } => {
                let label = stats.scope_label(scope);
                match kind {
                    LeagueStatKind::Summary => Outcome::Summary(stats.league_summary(scope)?),
                    LeagueStatKind::PlayerAverages => Outcome::Averages {
                        scope: label,
                        players: stats.player_averages(scope)?,
                    },
                    LeagueStatKind::BestWeeks => Outcome::BestWeeks {
                        scope: label,
                        board: stats.best_weeks(scope)?,
                    },
                    LeagueStatKind::BestTeamWeeks => Outcome::BestTeamWeeks {
                        scope: label,
                        board: stats.best_team_weeks(scope)?,
                    },
                    LeagueStatKind::BestGames => Outcome::BestGames {
                        scope: label,
                        board: stats.best_games(scope)?,
                    },
                }
            }
            Intent::Help => Outcome::Help,
            Intent::Unrecognized(reason) => Outcome::Unrecognized(reason),
        })
    }
}

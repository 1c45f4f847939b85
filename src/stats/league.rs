//! League-wide rollups and leaderboards

use std::cmp::Reverse;

use ahash::AHashMap;
use ordered_float::OrderedFloat;

use crate::core::types::{PlayerId, Season, TeamId, Week};
use crate::source::Catalog;
use crate::stats::player::PlayerTally;
use crate::stats::team::{lineup, week_pins};
use crate::stats::SeasonData;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAverageEntry {
    pub player: PlayerId,
    pub name: String,
    pub team: Option<String>,
    pub average: f64,
    pub games: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BestWeek {
    pub name: String,
    pub team: String,
    pub season: String,
    pub week: Week,
    pub average: f64,
    /// Pins bowled; unknown for stored weekly values
    pub total: Option<u32>,
    pub games: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BestTeamWeek {
    pub team: String,
    pub season: String,
    pub week: Week,
    pub pins: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BestGame {
    pub name: String,
    pub team: String,
    pub season: String,
    /// Unknown for a legacy season's stored high game
    pub week: Option<Week>,
    pub score: u16,
}

/// Ranked entries plus the seasons that could not take part
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard<T> {
    pub entries: Vec<T>,
    pub summary_only: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeagueSummary {
    pub scope: String,
    pub averages: Vec<PlayerAverageEntry>,
    pub best_weeks: Leaderboard<BestWeek>,
    pub best_team_weeks: Leaderboard<BestTeamWeek>,
    pub best_games: Leaderboard<BestGame>,
}

/// Stable descending sort on `key`, keeping the first `limit` entries
///
/// Equal keys keep their original order, so the first recorded wins a tie.
pub fn top_n<T>(mut entries: Vec<T>, limit: usize, key: impl Fn(&T) -> f64) -> Vec<T> {
    entries.sort_by_key(|e| Reverse(OrderedFloat(key(e))));
    entries.truncate(limit);
    entries
}

fn tally_slot(
    index: &mut AHashMap<PlayerId, usize>,
    tallies: &mut Vec<(PlayerId, PlayerTally, TeamId)>,
    player: PlayerId,
    team: TeamId,
) -> usize {
    let i = *index.entry(player).or_insert_with(|| {
        tallies.push((player, PlayerTally::new(), team));
        tallies.len() - 1
    });
    // Latest team seen wins
    tallies[i].2 = team;
    i
}

/// Every player's average over the given seasons, best first
pub fn player_averages(
    catalog: &Catalog,
    seasons: &[(&Season, SeasonData)],
) -> Vec<PlayerAverageEntry> {
    let mut index: AHashMap<PlayerId, usize> = AHashMap::new();
    let mut tallies: Vec<(PlayerId, PlayerTally, TeamId)> = Vec::new();

    for (_, data) in seasons {
        match data {
            SeasonData::Detailed(records) => {
                for record in records {
                    let i = tally_slot(&mut index, &mut tallies, record.player_id, record.team_id);
                    tallies[i].1.add_records(std::iter::once(record));
                }
            }
            SeasonData::Aggregate(summaries) => {
                for summary in summaries {
                    let i =
                        tally_slot(&mut index, &mut tallies, summary.player_id, summary.team_id);
                    tallies[i].1.add_summary(summary);
                }
            }
        }
    }

    let entries: Vec<PlayerAverageEntry> = tallies
        .iter()
        .filter_map(|(player, tally, team)| {
            let totals = tally.finish()?;
            Some(PlayerAverageEntry {
                player: *player,
                name: catalog.player_name(*player).to_string(),
                team: Some(catalog.team_name(*team).to_string()),
                average: totals.average,
                games: totals.games,
            })
        })
        .collect();

    let count = entries.len();
    top_n(entries, count, |e| e.average)
}

/// Best individual weeks by week average, absent and substitute weeks excluded
pub fn best_weeks(
    catalog: &Catalog,
    seasons: &[(&Season, SeasonData)],
    limit: usize,
) -> Leaderboard<BestWeek> {
    let mut entries = Vec::new();

    for (season, data) in seasons {
        match data {
            SeasonData::Detailed(records) => {
                entries.extend(
                    records
                        .iter()
                        .filter(|r| r.counts_for_match() && !r.games.is_empty())
                        .map(|r| BestWeek {
                            name: catalog.player_name(r.player_id).to_string(),
                            team: catalog.team_name(r.team_id).to_string(),
                            season: season.name.clone(),
                            week: r.week,
                            average: r.week_average(),
                            total: Some(r.total_pins()),
                            games: r.games.len(),
                        }),
                );
            }
            SeasonData::Aggregate(summaries) => {
                for summary in summaries {
                    for (i, value) in summary.weekly.iter().enumerate() {
                        if let Some(average) = value {
                            entries.push(BestWeek {
                                name: catalog.player_name(summary.player_id).to_string(),
                                team: catalog.team_name(summary.team_id).to_string(),
                                season: season.name.clone(),
                                week: i as Week + 1,
                                average: *average,
                                total: None,
                                games: 0,
                            });
                        }
                    }
                }
            }
        }
    }

    Leaderboard {
        entries: top_n(entries, limit, |e| e.average),
        summary_only: Vec::new(),
    }
}

/// Best team week pin totals; legacy seasons cannot take part
pub fn best_team_weeks(
    catalog: &Catalog,
    seasons: &[(&Season, SeasonData)],
    limit: usize,
) -> Leaderboard<BestTeamWeek> {
    let mut entries = Vec::new();
    let mut summary_only = Vec::new();

    for (season, data) in seasons {
        let records = match data {
            SeasonData::Detailed(records) => records,
            SeasonData::Aggregate(_) => {
                summary_only.push(season.name.clone());
                continue;
            }
        };

        let mut seen: Vec<(TeamId, Week)> = Vec::new();
        for record in records.iter().filter(|r| r.counts_for_team()) {
            let key = (record.team_id, record.week);
            if !seen.contains(&key) {
                seen.push(key);
            }
        }

        entries.extend(seen.into_iter().map(|(team, week)| BestTeamWeek {
            team: catalog.team_name(team).to_string(),
            season: season.name.clone(),
            week,
            pins: week_pins(&lineup(records, team, week)),
        }));
    }

    Leaderboard {
        entries: top_n(entries, limit, |e| e.pins),
        summary_only,
    }
}

/// Highest single games; legacy seasons offer each player's stored high game
pub fn best_games(
    catalog: &Catalog,
    seasons: &[(&Season, SeasonData)],
    limit: usize,
) -> Leaderboard<BestGame> {
    let mut entries = Vec::new();

    for (season, data) in seasons {
        match data {
            SeasonData::Detailed(records) => {
                for record in records.iter().filter(|r| r.counts_for_player()) {
                    entries.extend(record.games.iter().map(|&score| BestGame {
                        name: catalog.player_name(record.player_id).to_string(),
                        team: catalog.team_name(record.team_id).to_string(),
                        season: season.name.clone(),
                        week: Some(record.week),
                        score,
                    }));
                }
            }
            SeasonData::Aggregate(summaries) => {
                entries.extend(summaries.iter().filter_map(|s| {
                    Some(BestGame {
                        name: catalog.player_name(s.player_id).to_string(),
                        team: catalog.team_name(s.team_id).to_string(),
                        season: season.name.clone(),
                        week: None,
                        score: s.high_game?,
                    })
                }));
            }
        }
    }

    Leaderboard {
        entries: top_n(entries, limit, |e| f64::from(e.score)),
        summary_only: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_n_is_stable_descending() {
        let entries = vec![("a", 150.0), ("b", 200.0), ("c", 150.0), ("d", 200.0), ("e", 100.0)];
        let top = top_n(entries, 4, |e| e.1);
        let names: Vec<&str> = top.iter().map(|e| e.0).collect();
        assert_eq!(names, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_top_n_with_fewer_entries_than_limit() {
        let top = top_n(vec![1.0, 3.0], 10, |e| *e);
        assert_eq!(top, vec![3.0, 1.0]);
    }
}

//! Team statistics for a single detailed season
//!
//! Every function here drops substitute records before computing. Absent
//! records stay in the pin totals through their stored average but never
//! bowl in a game comparison.

use ahash::AHashMap;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;

use crate::core::types::{PlayerId, TeamId, Week, WeekRecord};
use crate::stats::outcome::{compare_lineups, RecordStatus, WinLoss};
use crate::stats::player::flattened_games;

#[derive(Debug, Clone, PartialEq)]
pub struct TeamStanding {
    pub team: TeamId,
    pub name: String,
    pub record: RecordStatus,
    pub average: Option<f64>,
    pub total_pins: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RosterAverage {
    pub player: PlayerId,
    pub name: String,
    pub average: f64,
    pub games: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamDetail {
    pub name: String,
    pub season: String,
    pub record: RecordStatus,
    pub average: Option<f64>,
    pub total_pins: f64,
    pub roster: Vec<RosterAverage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamWeekSummary {
    pub week: Week,
    pub opponent: Option<String>,
    pub record: Option<WinLoss>,
    pub pins_for: f64,
    pub pins_against: Option<f64>,
    pub average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamWeekly {
    pub name: String,
    pub season: String,
    pub record: RecordStatus,
    pub weeks: Vec<TeamWeekSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineupEntry {
    pub name: String,
    pub games: Vec<u16>,
    pub average: f64,
    pub absent: bool,
    pub substitute: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamWeekDetail {
    pub name: String,
    pub season: String,
    pub week: Week,
    pub opponent: Option<String>,
    pub record: Option<WinLoss>,
    /// Everyone who bowled for the team that week, substitutes included
    pub players: Vec<LineupEntry>,
    pub total_pins: f64,
    pub average: Option<f64>,
}

/// The team's counting records for one week, in record order
pub fn lineup(records: &[WeekRecord], team: TeamId, week: Week) -> Vec<&WeekRecord> {
    records
        .iter()
        .filter(|r| r.team_id == team && r.week == week && r.counts_for_team())
        .collect()
}

/// Weeks the team has counting records for, ascending
pub fn weeks_played(records: &[WeekRecord], team: TeamId) -> Vec<Week> {
    let mut weeks: Vec<Week> = records
        .iter()
        .filter(|r| r.team_id == team && r.counts_for_team())
        .map(|r| r.week)
        .collect();
    weeks.sort_unstable();
    weeks.dedup();
    weeks
}

/// Team pins for a week; absent players add their stored average
pub fn week_pins(lineup: &[&WeekRecord]) -> f64 {
    lineup
        .iter()
        .filter(|r| r.counts_for_team())
        .map(|r| r.team_pins())
        .sum()
}

/// Mean of the bowling players' week averages
pub fn week_average(lineup: &[&WeekRecord]) -> Option<f64> {
    let averages: Vec<f64> = lineup
        .iter()
        .filter(|r| r.counts_for_match() && !r.games.is_empty())
        .map(|r| r.week_average())
        .collect();
    (!averages.is_empty()).then(|| averages.iter().sum::<f64>() / averages.len() as f64)
}

pub fn week_opponent(lineup: &[&WeekRecord]) -> Option<TeamId> {
    lineup.iter().find_map(|r| r.opponent_id)
}

/// Opponent and game outcomes for one week, `None` without an opponent
pub fn week_result(
    records: &[WeekRecord],
    team: TeamId,
    week: Week,
    positions: usize,
) -> Option<(TeamId, WinLoss)> {
    let ours = lineup(records, team, week);
    let opponent = week_opponent(&ours)?;
    let theirs = lineup(records, opponent, week);
    Some((opponent, compare_lineups(&ours, &theirs, positions)))
}

pub fn season_record(records: &[WeekRecord], team: TeamId, positions: usize) -> WinLoss {
    let mut total = WinLoss::default();
    for week in weeks_played(records, team) {
        if let Some((_, record)) = week_result(records, team, week, positions) {
            total += record;
        }
    }
    total
}

/// Mean of the team's weekly averages
pub fn season_average(records: &[WeekRecord], team: TeamId) -> Option<f64> {
    let averages: Vec<f64> = weeks_played(records, team)
        .into_iter()
        .filter_map(|week| week_average(&lineup(records, team, week)))
        .collect();
    (!averages.is_empty()).then(|| averages.iter().sum::<f64>() / averages.len() as f64)
}

pub fn season_pins(records: &[WeekRecord], team: TeamId) -> f64 {
    weeks_played(records, team)
        .into_iter()
        .map(|week| week_pins(&lineup(records, team, week)))
        .sum()
}

/// Per-player averages on the team, best first, ties in roster order
pub fn roster_averages(records: &[WeekRecord], team: TeamId) -> Vec<(PlayerId, f64, u32)> {
    let mut order: Vec<PlayerId> = Vec::new();
    let mut by_player: AHashMap<PlayerId, Vec<&WeekRecord>> = AHashMap::new();

    for record in records
        .iter()
        .filter(|r| r.team_id == team && r.counts_for_team())
    {
        by_player
            .entry(record.player_id)
            .or_insert_with(|| {
                order.push(record.player_id);
                Vec::new()
            })
            .push(record);
    }

    let mut roster: Vec<(PlayerId, f64, u32)> = order
        .into_iter()
        .filter_map(|player| {
            let games = flattened_games(by_player.get(&player)?.iter().copied());
            if games.is_empty() {
                return None;
            }
            let pins: u32 = games.iter().map(|&g| u32::from(g)).sum();
            Some((player, pins as f64 / games.len() as f64, games.len() as u32))
        })
        .collect();

    roster.sort_by_key(|&(_, avg, _)| Reverse(OrderedFloat(avg)));
    roster
}

/// Standings order: most wins, then fewest losses; unavailable records last
pub fn sort_standings(standings: &mut [TeamStanding]) {
    standings.sort_by_key(|s| match s.record {
        RecordStatus::Derived(r) => (0, Reverse(r.wins), r.losses),
        RecordStatus::Unavailable => (1, Reverse(0), 0),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SeasonId;

    const A: TeamId = TeamId(1);
    const B: TeamId = TeamId(2);

    fn rec(player: u32, team: TeamId, week: Week, games: &[u16]) -> WeekRecord {
        let opponent = if team == A { B } else { A };
        WeekRecord::new(PlayerId(player), SeasonId(1), team, week)
            .with_opponent(opponent)
            .with_games(games)
    }

    fn season() -> Vec<WeekRecord> {
        vec![
            rec(1, A, 1, &[200, 180, 160, 150]),
            rec(2, A, 1, &[100, 120, 140, 160]),
            rec(3, B, 1, &[150, 150, 150, 150]),
            rec(4, B, 1, &[150, 150, 150, 150]),
            rec(1, A, 2, &[210, 190, 170, 150]),
            rec(2, A, 2, &[0, 0, 0, 0]).absent(130.0),
            rec(3, B, 2, &[160, 160, 160, 160]),
            rec(4, B, 2, &[100, 100, 100, 100]),
        ]
    }

    #[test]
    fn test_week_result_and_mirror() {
        let records = season();
        // Week 1 totals: A 300/300/300/310, B 300 each
        let (opp, a) = week_result(&records, A, 1, 4).unwrap();
        assert_eq!(opp, B);
        assert_eq!(a, WinLoss::new(1, 0, 3));
        let (_, b) = week_result(&records, B, 1, 4).unwrap();
        assert_eq!(b, a.mirror());
    }

    #[test]
    fn test_absent_player_does_not_bowl_in_comparison() {
        let records = season();
        // Week 2: A fields only player 1 (210/190/170/150) vs B 260 each
        let (_, a) = week_result(&records, A, 2, 4).unwrap();
        assert_eq!(a, WinLoss::new(0, 4, 0));
        assert_eq!(season_record(&records, A, 4), WinLoss::new(1, 4, 3));
    }

    #[test]
    fn test_week_pins_use_absent_placeholder() {
        let records = season();
        let week2 = lineup(&records, A, 2);
        assert_eq!(week_pins(&week2), 720.0 + 130.0);
        assert_eq!(season_pins(&records, A), 1210.0 + 850.0);
    }

    #[test]
    fn test_weekly_average_is_average_of_averages() {
        let records = vec![
            rec(1, A, 1, &[200, 200]),
            rec(2, A, 1, &[100, 100, 100, 100]),
        ];
        // Pooled would be 133.3; average of averages is 150
        assert_eq!(week_average(&lineup(&records, A, 1)), Some(150.0));
    }

    #[test]
    fn test_absent_excluded_from_week_average() {
        let records = season();
        assert_eq!(week_average(&lineup(&records, A, 2)), Some(180.0));
        let avg = season_average(&records, A).unwrap();
        assert!((avg - (151.25 + 180.0) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_substitutes_do_not_change_team_figures() {
        let base = season();
        let mut with_sub = base.clone();
        with_sub.push(rec(9, A, 1, &[300, 300, 300, 300]).substitute());

        assert_eq!(season_record(&base, A, 4), season_record(&with_sub, A, 4));
        assert_eq!(season_record(&base, B, 4), season_record(&with_sub, B, 4));
        assert_eq!(season_pins(&base, A), season_pins(&with_sub, A));
        assert_eq!(season_average(&base, A), season_average(&with_sub, A));
        assert_eq!(roster_averages(&base, A), roster_averages(&with_sub, A));
    }

    #[test]
    fn test_roster_averages_sorted_best_first() {
        let records = season();
        let roster = roster_averages(&records, A);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].0, PlayerId(1));
        assert!((roster[0].1 - 176.25).abs() < 1e-9);
        assert_eq!(roster[0].2, 8);
        assert_eq!(roster[1], (PlayerId(2), 130.0, 4));
    }

    #[test]
    fn test_week_without_opponent_has_no_result() {
        let records = vec![WeekRecord::new(PlayerId(1), SeasonId(1), A, 3).with_games(&[150])];
        assert!(week_result(&records, A, 3, 4).is_none());
        assert_eq!(season_record(&records, A, 4), WinLoss::default());
    }

    #[test]
    fn test_sort_standings() {
        let standing = |team: u32, record: RecordStatus| TeamStanding {
            team: TeamId(team),
            name: format!("T{}", team),
            record,
            average: None,
            total_pins: 0.0,
        };
        let mut standings = vec![
            standing(1, RecordStatus::Derived(WinLoss::new(3, 5, 0))),
            standing(2, RecordStatus::Unavailable),
            standing(3, RecordStatus::Derived(WinLoss::new(5, 3, 0))),
            standing(4, RecordStatus::Derived(WinLoss::new(5, 2, 1))),
        ];
        sort_standings(&mut standings);
        let order: Vec<u32> = standings.iter().map(|s| s.team.0).collect();
        assert_eq!(order, vec![4, 3, 1, 2]);
    }
}

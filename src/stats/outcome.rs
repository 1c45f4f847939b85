//! Per-game win/loss/tie between opposing lineups

use std::fmt;
use std::ops::AddAssign;

use crate::core::types::WeekRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WinLoss {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl WinLoss {
    pub fn new(wins: u32, losses: u32, ties: u32) -> Self {
        Self { wins, losses, ties }
    }

    /// The same games seen from the opponent's side
    pub fn mirror(&self) -> Self {
        Self {
            wins: self.losses,
            losses: self.wins,
            ties: self.ties,
        }
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

impl AddAssign for WinLoss {
    fn add_assign(&mut self, rhs: Self) {
        self.wins += rhs.wins;
        self.losses += rhs.losses;
        self.ties += rhs.ties;
    }
}

/// Renders as `W-L`, or `W-L-T` once a tie exists
impl fmt::Display for WinLoss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ties > 0 {
            write!(f, "{}-{}-{}", self.wins, self.losses, self.ties)
        } else {
            write!(f, "{}-{}", self.wins, self.losses)
        }
    }
}

/// A team record, which legacy seasons cannot provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Derived(WinLoss),
    /// Only season totals exist, so game outcomes are unknown
    Unavailable,
}

impl RecordStatus {
    pub fn derived(&self) -> Option<WinLoss> {
        match self {
            RecordStatus::Derived(record) => Some(*record),
            RecordStatus::Unavailable => None,
        }
    }
}

/// Team total for each game position, `None` where nobody bowled that game
///
/// Absent and substitute records are skipped.
pub fn game_totals(lineup: &[&WeekRecord], positions: usize) -> Vec<Option<u32>> {
    (0..positions)
        .map(|pos| {
            let scores: Vec<u32> = lineup
                .iter()
                .filter(|r| r.counts_for_match())
                .filter_map(|r| r.games.get(pos).map(|&g| u32::from(g)))
                .collect();
            (!scores.is_empty()).then(|| scores.iter().sum())
        })
        .collect()
}

/// Compare two lineups game position by game position
///
/// A position is contested only when both sides bowled it.
pub fn compare_lineups(ours: &[&WeekRecord], theirs: &[&WeekRecord], positions: usize) -> WinLoss {
    let our_totals = game_totals(ours, positions);
    let their_totals = game_totals(theirs, positions);

    let mut record = WinLoss::default();
    for pair in our_totals.iter().zip(&their_totals) {
        if let (Some(a), Some(b)) = pair {
            match a.cmp(b) {
                std::cmp::Ordering::Greater => record.wins += 1,
                std::cmp::Ordering::Less => record.losses += 1,
                std::cmp::Ordering::Equal => record.ties += 1,
            }
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PlayerId, SeasonId, TeamId};

    fn rec(player: u32, team: u32, games: &[u16]) -> WeekRecord {
        WeekRecord::new(PlayerId(player), SeasonId(1), TeamId(team), 1).with_games(games)
    }

    #[test]
    fn test_display() {
        assert_eq!(WinLoss::new(3, 1, 0).to_string(), "3-1");
        assert_eq!(WinLoss::new(2, 1, 1).to_string(), "2-1-1");
    }

    #[test]
    fn test_compare_by_game_position() {
        let a1 = rec(1, 1, &[150, 200, 100, 180]);
        let a2 = rec(2, 1, &[150, 100, 100, 180]);
        let b1 = rec(3, 2, &[200, 100, 150, 180]);
        let b2 = rec(4, 2, &[100, 150, 50, 180]);

        // Totals: A = 300, 300, 200, 360; B = 300, 250, 200, 360
        let record = compare_lineups(&[&a1, &a2], &[&b1, &b2], 4);
        assert_eq!(record, WinLoss::new(1, 0, 3));
    }

    #[test]
    fn test_mirror_matches_reverse_comparison() {
        let a = rec(1, 1, &[190, 120, 160]);
        let b = rec(2, 2, &[180, 140, 160]);
        let ours = compare_lineups(&[&a], &[&b], 4);
        let theirs = compare_lineups(&[&b], &[&a], 4);
        assert_eq!(ours, WinLoss::new(1, 1, 1));
        assert_eq!(theirs, ours.mirror());
    }

    #[test]
    fn test_uncontested_positions_are_skipped() {
        let a = rec(1, 1, &[190, 120, 160, 150]);
        let b = rec(2, 2, &[180, 140]);
        assert_eq!(compare_lineups(&[&a], &[&b], 4).games(), 2);
        assert_eq!(compare_lineups(&[&a], &[&b], 1).games(), 1);
    }

    #[test]
    fn test_absent_and_substitute_excluded() {
        let a = rec(1, 1, &[100]);
        let absent = rec(2, 1, &[300]).absent(180.0);
        let sub = rec(3, 1, &[300]).substitute();
        let b = rec(4, 2, &[150]);
        let record = compare_lineups(&[&a, &absent, &sub], &[&b], 4);
        assert_eq!(record, WinLoss::new(0, 1, 0));
        assert_eq!(game_totals(&[&absent, &sub], 2), vec![None, None]);
    }
}

//! Individual player statistics

use crate::core::types::{SeasonAggregate, Week, WeekRecord};

/// Mean, spread and extremes of a set of games
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSummary {
    pub games: u32,
    pub total_pins: u32,
    pub average: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub high: u16,
    pub low: u16,
}

/// Summarize a flattened game set; `None` when it is empty
pub fn summarize_games(games: &[u16]) -> Option<GameSummary> {
    let high = *games.iter().max()?;
    let low = *games.iter().min()?;
    let n = games.len() as f64;
    let total_pins: u32 = games.iter().map(|&g| u32::from(g)).sum();
    let average = total_pins as f64 / n;
    let variance = games
        .iter()
        .map(|&g| {
            let d = f64::from(g) - average;
            d * d
        })
        .sum::<f64>()
        / n;

    Some(GameSummary {
        games: games.len() as u32,
        total_pins,
        average,
        std_dev: variance.sqrt(),
        high,
        low,
    })
}

/// Games from every record that counts toward its owner, in record order
pub fn flattened_games<'r>(records: impl IntoIterator<Item = &'r WeekRecord>) -> Vec<u16> {
    records
        .into_iter()
        .filter(|r| r.counts_for_player())
        .flat_map(|r| r.games.iter().copied())
        .collect()
}

/// Player figures over a scope that may mix both season shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTotals {
    pub games: u32,
    pub total_pins: u32,
    pub average: f64,
    /// Unknown once a season-totals-only season is folded in
    pub std_dev: Option<f64>,
    pub high: Option<u16>,
    pub low: Option<u16>,
    pub from_summaries: bool,
}

/// Accumulates a player's games and legacy season totals
#[derive(Debug, Clone, Default)]
pub struct PlayerTally {
    games: Vec<u16>,
    summary_games: u32,
    summary_pins: u32,
    summary_high: Option<u16>,
    summary_low: Option<u16>,
    summary_average: Option<f64>,
    summaries: usize,
}

impl PlayerTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_records<'r>(&mut self, records: impl IntoIterator<Item = &'r WeekRecord>) {
        self.games.extend(flattened_games(records));
    }

    pub fn add_summary(&mut self, summary: &SeasonAggregate) {
        let pins = if summary.total_pins > 0 {
            summary.total_pins
        } else {
            summary
                .effective_average()
                .map(|avg| (avg * summary.total_games as f64).round() as u32)
                .unwrap_or(0)
        };

        self.summary_games += summary.total_games;
        self.summary_pins += pins;
        self.summary_high = self.summary_high.max(summary.high_game);
        self.summary_low = match (self.summary_low, summary.low_game) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.summary_average = summary.effective_average();
        self.summaries += 1;
    }

    pub fn game_count(&self) -> u32 {
        self.games.len() as u32 + self.summary_games
    }

    pub fn finish(&self) -> Option<PlayerTotals> {
        if self.summaries == 0 {
            return summarize_games(&self.games).map(|s| PlayerTotals {
                games: s.games,
                total_pins: s.total_pins,
                average: s.average,
                std_dev: Some(s.std_dev),
                high: Some(s.high),
                low: Some(s.low),
                from_summaries: false,
            });
        }

        let games = self.game_count();
        if games == 0 {
            return None;
        }

        let flat_pins: u32 = self.games.iter().map(|&g| u32::from(g)).sum();
        let total_pins = flat_pins + self.summary_pins;

        // A lone legacy season keeps its stored average
        let average = match (self.games.is_empty(), self.summaries, self.summary_average) {
            (true, 1, Some(avg)) => avg,
            _ => total_pins as f64 / games as f64,
        };

        let low = match (self.games.iter().min().copied(), self.summary_low) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };

        Some(PlayerTotals {
            games,
            total_pins,
            average,
            std_dev: None,
            high: self.games.iter().max().copied().max(self.summary_high),
            low,
            from_summaries: true,
        })
    }
}

/// A player's statistics over one scope
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStats {
    pub name: String,
    /// Team in the most recent season of the scope
    pub team: Option<String>,
    pub scope: String,
    pub totals: PlayerTotals,
}

/// One player's single week
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerWeek {
    pub name: String,
    pub team: String,
    pub season: String,
    pub week: Week,
    pub games: Vec<u16>,
    pub average: f64,
    pub total: u32,
    pub absent: bool,
    pub substitute: bool,
    /// Only a stored weekly value survives for this week
    pub summary_only: bool,
}

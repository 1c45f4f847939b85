//! Score entry
//!
//! The only write path. Everything is validated against the catalog and the
//! current season records before the source is touched, so a rejected entry
//! never mutates the store.

use crate::core::config::WeekPolicyKind;
use crate::core::error::{LeagueError, Result};
use crate::core::types::{
    DataShape, PlayerId, SeasonId, Week, WeekRecord, MAX_GAMES_PER_WEEK, MAX_GAME_SCORE,
    MAX_WEEK,
};
use crate::source::{Catalog, ScoreRecordSource};

/// A score to record for a resolved player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRequest {
    pub player: PlayerId,
    pub season: SeasonId,
    /// Explicit week; the target policy decides when absent
    pub week: Option<Week>,
    pub score: u32,
}

/// What was written
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReceipt {
    pub player: String,
    pub season: String,
    pub week: Week,
    pub slot: u8,
    pub score: u16,
    /// The week's games after the write
    pub games: Vec<u16>,
}

impl ScoreReceipt {
    pub fn week_average(&self) -> f64 {
        if self.games.is_empty() {
            return 0.0;
        }
        let total: u32 = self.games.iter().map(|&g| u32::from(g)).sum();
        total as f64 / self.games.len() as f64
    }
}

/// Picks the week a score lands in when the message names none
pub trait WeekTargetPolicy: Send + Sync {
    /// `records` are the season's records in canonical order
    fn target_week(&self, player: PlayerId, records: &[WeekRecord]) -> Result<Week>;
}

fn week_after(week: Week) -> Result<Week> {
    week.checked_add(1).ok_or_else(|| {
        LeagueError::Validation(format!("there is no week after week {}", week))
    })
}

/// Fill the league's latest week, moving on once the player's slots there are used
#[derive(Debug, Default, Clone, Copy)]
pub struct FillLatestWeek;

impl WeekTargetPolicy for FillLatestWeek {
    fn target_week(&self, player: PlayerId, records: &[WeekRecord]) -> Result<Week> {
        let Some(latest) = records.iter().map(|r| r.week).max() else {
            return Ok(1);
        };

        match records
            .iter()
            .find(|r| r.player_id == player && r.week == latest)
        {
            Some(r) if r.is_absent || r.next_open_slot().is_none() => week_after(latest),
            _ => Ok(latest),
        }
    }
}

/// Always open a new week after the player's latest one
#[derive(Debug, Default, Clone, Copy)]
pub struct AppendNewWeek;

impl WeekTargetPolicy for AppendNewWeek {
    fn target_week(&self, player: PlayerId, records: &[WeekRecord]) -> Result<Week> {
        records
            .iter()
            .filter(|r| r.player_id == player)
            .map(|r| r.week)
            .max()
            .map_or(Ok(1), week_after)
    }
}

pub fn policy_for(kind: WeekPolicyKind) -> Box<dyn WeekTargetPolicy> {
    match kind {
        WeekPolicyKind::FillLatest => Box::new(FillLatestWeek),
        WeekPolicyKind::AppendNew => Box::new(AppendNewWeek),
    }
}

/// Record one game score into the first open slot of the target week
pub fn add_score(
    source: &mut dyn ScoreRecordSource,
    catalog: &Catalog,
    request: &ScoreRequest,
    policy: &dyn WeekTargetPolicy,
) -> Result<ScoreReceipt> {
    let result = write_score(source, catalog, request, policy);
    match &result {
        Ok(receipt) => tracing::info!(
            "Recorded {} for {} in {} week {} game {}",
            receipt.score,
            receipt.player,
            receipt.season,
            receipt.week,
            receipt.slot
        ),
        Err(e) => tracing::warn!("Rejected score {} ({:?}): {}", request.score, request.player, e),
    }
    result
}

fn write_score(
    source: &mut dyn ScoreRecordSource,
    catalog: &Catalog,
    request: &ScoreRequest,
    policy: &dyn WeekTargetPolicy,
) -> Result<ScoreReceipt> {
    let score = u16::try_from(request.score)
        .ok()
        .filter(|&s| s <= MAX_GAME_SCORE)
        .ok_or_else(|| {
            LeagueError::Validation(format!(
                "score {} is outside 0-{}",
                request.score, MAX_GAME_SCORE
            ))
        })?;

    let player = catalog.player(request.player)?;
    let season = catalog.season(request.season)?;
    if season.shape == DataShape::Aggregate {
        return Err(LeagueError::Validation(format!(
            "{} only keeps season totals, individual games cannot be added",
            season.name
        )));
    }

    let records = source.list_records(Some(season.id))?;
    if !records.iter().any(|r| r.player_id == player.id) {
        return Err(LeagueError::Validation(format!(
            "{} is not on a team in {}",
            player.name, season.name
        )));
    }

    let week = match request.week {
        Some(week) => week,
        None => policy.target_week(player.id, &records)?,
    };
    if week == 0 {
        return Err(LeagueError::Validation("weeks start at 1".to_string()));
    }
    if week > MAX_WEEK {
        return Err(LeagueError::Validation(format!(
            "week {} is past the last week ({})",
            week, MAX_WEEK
        )));
    }

    let existing = records
        .iter()
        .find(|r| r.player_id == player.id && r.week == week);
    let (slot, mut games) = match existing {
        Some(r) if r.is_absent => {
            return Err(LeagueError::Validation(format!(
                "{} is marked absent in week {}",
                player.name, week
            )))
        }
        Some(r) => {
            let slot = r.next_open_slot().ok_or_else(|| {
                LeagueError::Validation(format!(
                    "{} already has {} games in week {}",
                    player.name, MAX_GAMES_PER_WEEK, week
                ))
            })?;
            (slot, r.games.clone())
        }
        None => (1, Vec::new()),
    };

    source.append_or_update_score(player.id, season.id, week, slot, score)?;
    games.push(score);

    Ok(ScoreReceipt {
        player: player.name.clone(),
        season: season.name.clone(),
        week,
        slot,
        score,
        games,
    })
}

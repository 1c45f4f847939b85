//! In-memory record store

use serde::{Deserialize, Serialize};

use crate::core::error::{LeagueError, Result};
use crate::core::types::{
    DataShape, Player, PlayerId, Season, SeasonAggregate, SeasonId, Team, TeamId, Week,
    WeekRecord, MAX_GAMES_PER_WEEK, MAX_GAME_SCORE,
};
use crate::source::ScoreRecordSource;

/// Everything the league knows, in the shape it is persisted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub players: Vec<Player>,
    /// Canonical record order is insertion order
    #[serde(default)]
    pub records: Vec<WeekRecord>,
    #[serde(default)]
    pub aggregates: Vec<SeasonAggregate>,
}

impl LeagueSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_season(&mut self, number: u32, shape: DataShape) -> SeasonId {
        let id = SeasonId(self.seasons.len() as u32 + 1);
        self.seasons.push(Season {
            id,
            number,
            name: format!("Season {}", number),
            shape,
        });
        id
    }

    pub fn add_team(&mut self, season: SeasonId, name: &str) -> TeamId {
        let id = TeamId(self.teams.len() as u32 + 1);
        self.teams.push(Team {
            id,
            season_id: season,
            name: name.to_string(),
        });
        id
    }

    pub fn add_player(&mut self, name: &str) -> PlayerId {
        let id = PlayerId(self.players.len() as u32 + 1);
        self.players.push(Player {
            id,
            name: name.to_string(),
        });
        id
    }

    pub fn push_record(&mut self, record: WeekRecord) {
        self.records.push(record);
    }

    pub fn push_aggregate(&mut self, aggregate: SeasonAggregate) {
        self.aggregates.push(aggregate);
    }

    /// Team the player bowled for in a season, from their latest week
    ///
    /// Weeks bowled as a substitute only count when the player has no
    /// regular week in the season.
    fn roster_team(&self, player: PlayerId, season: SeasonId) -> Option<TeamId> {
        self.records
            .iter()
            .filter(|r| r.player_id == player && r.season_id == season)
            .max_by_key(|r| (!r.is_substitute, r.week))
            .map(|r| r.team_id)
    }

    fn write_score(
        &mut self,
        player: PlayerId,
        season: SeasonId,
        week: Week,
        slot: u8,
        score: u16,
    ) -> Result<()> {
        if score > MAX_GAME_SCORE {
            return Err(LeagueError::Validation(format!(
                "score {} is outside 0-{}",
                score, MAX_GAME_SCORE
            )));
        }
        if slot == 0 || usize::from(slot) > MAX_GAMES_PER_WEEK {
            return Err(LeagueError::Validation(format!(
                "game slot {} is outside 1-{}",
                slot, MAX_GAMES_PER_WEEK
            )));
        }
        let index = usize::from(slot) - 1;

        if let Some(record) = self
            .records
            .iter_mut()
            .find(|r| r.player_id == player && r.season_id == season && r.week == week)
        {
            if index < record.games.len() {
                record.games[index] = score;
            } else if index == record.games.len() {
                record.games.push(score);
            } else {
                return Err(LeagueError::Validation(format!(
                    "game slot {} skips past {} recorded games",
                    slot,
                    record.games.len()
                )));
            }
            record.refresh_average();
            return Ok(());
        }

        if slot != 1 {
            return Err(LeagueError::Validation(format!(
                "week {} has no games yet, slot {} cannot be filled",
                week, slot
            )));
        }
        let team = self.roster_team(player, season).ok_or_else(|| {
            LeagueError::Validation(format!(
                "player {:?} is not on a roster in season {:?}",
                player, season
            ))
        })?;
        let opponent = self
            .records
            .iter()
            .find(|r| r.season_id == season && r.team_id == team && r.week == week)
            .and_then(|r| r.opponent_id);

        let mut record = WeekRecord::new(player, season, team, week).with_games(&[score]);
        record.opponent_id = opponent;
        self.records.push(record);
        Ok(())
    }
}

/// Record store held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    snapshot: LeagueSnapshot,
}

impl MemorySource {
    pub fn new(snapshot: LeagueSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &LeagueSnapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> LeagueSnapshot {
        self.snapshot
    }
}

impl ScoreRecordSource for MemorySource {
    fn list_records(&self, season: Option<SeasonId>) -> Result<Vec<WeekRecord>> {
        Ok(self
            .snapshot
            .records
            .iter()
            .filter(|r| season.map_or(true, |s| r.season_id == s))
            .cloned()
            .collect())
    }

    fn list_seasons(&self) -> Result<Vec<Season>> {
        Ok(self.snapshot.seasons.clone())
    }

    fn list_teams(&self, season: SeasonId) -> Result<Vec<Team>> {
        Ok(self
            .snapshot
            .teams
            .iter()
            .filter(|t| t.season_id == season)
            .cloned()
            .collect())
    }

    fn list_players(&self) -> Result<Vec<Player>> {
        Ok(self.snapshot.players.clone())
    }

    fn list_aggregates(&self, season: SeasonId) -> Result<Vec<SeasonAggregate>> {
        Ok(self
            .snapshot
            .aggregates
            .iter()
            .filter(|a| a.season_id == season)
            .cloned()
            .collect())
    }

    fn append_or_update_score(
        &mut self,
        player: PlayerId,
        season: SeasonId,
        week: Week,
        slot: u8,
        score: u16,
    ) -> Result<()> {
        self.snapshot.write_score(player, season, week, slot, score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn league() -> (MemorySource, PlayerId, SeasonId, TeamId, TeamId) {
        let mut snap = LeagueSnapshot::new();
        let season = snap.add_season(9, DataShape::Detailed);
        let pins = snap.add_team(season, "Pin Seekers");
        let stoned = snap.add_team(season, "Rolling Stoned");
        let dylan = snap.add_player("Dylan");
        let mia = snap.add_player("Mia");
        snap.push_record(
            WeekRecord::new(dylan, season, pins, 1)
                .with_opponent(stoned)
                .with_games(&[150, 160]),
        );
        snap.push_record(
            WeekRecord::new(mia, season, pins, 2)
                .with_opponent(stoned)
                .with_games(&[170]),
        );
        (MemorySource::new(snap), dylan, season, pins, stoned)
    }

    #[test]
    fn test_append_fills_next_slot() {
        let (mut source, dylan, season, _, _) = league();
        source
            .append_or_update_score(dylan, season, 1, 3, 200)
            .unwrap();
        let records = source.list_records(Some(season)).unwrap();
        assert_eq!(records[0].games, vec![150, 160, 200]);
        assert!((records[0].average - 170.0).abs() < 1e-9);
    }

    #[test]
    fn test_append_creates_week_with_roster_team_and_opponent() {
        let (mut source, dylan, season, pins, stoned) = league();
        source
            .append_or_update_score(dylan, season, 2, 1, 180)
            .unwrap();
        let created = source.snapshot().records.last().unwrap();
        assert_eq!(created.player_id, dylan);
        assert_eq!(created.week, 2);
        assert_eq!(created.team_id, pins);
        assert_eq!(created.opponent_id, Some(stoned));
        assert_eq!(created.games, vec![180]);
    }

    #[test]
    fn test_new_week_ignores_team_subbed_for() {
        let (source, dylan, season, pins, stoned) = league();
        let mut snap = source.into_snapshot();
        snap.push_record(
            WeekRecord::new(dylan, season, stoned, 2)
                .with_opponent(pins)
                .with_games(&[140])
                .substitute(),
        );
        let mut source = MemorySource::new(snap);

        source
            .append_or_update_score(dylan, season, 3, 1, 190)
            .unwrap();
        let created = source.snapshot().records.last().unwrap();
        assert_eq!(created.week, 3);
        assert_eq!(created.team_id, pins);
        assert!(!created.is_substitute);
    }

    #[test]
    fn test_new_week_for_substitute_only_player() {
        let (source, _, season, pins, stoned) = league();
        let mut snap = source.into_snapshot();
        let jo = snap.add_player("Jo");
        snap.push_record(
            WeekRecord::new(jo, season, stoned, 2)
                .with_opponent(pins)
                .with_games(&[130])
                .substitute(),
        );
        let mut source = MemorySource::new(snap);

        source.append_or_update_score(jo, season, 3, 1, 150).unwrap();
        assert_eq!(source.snapshot().records.last().unwrap().team_id, stoned);
    }

    #[test]
    fn test_update_replaces_existing_slot() {
        let (mut source, dylan, season, _, _) = league();
        source
            .append_or_update_score(dylan, season, 1, 1, 99)
            .unwrap();
        assert_eq!(source.snapshot().records[0].games, vec![99, 160]);
    }

    #[test]
    fn test_rejects_gap_and_bad_slot() {
        let (mut source, dylan, season, _, _) = league();
        assert!(source.append_or_update_score(dylan, season, 1, 4, 100).is_err());
        assert!(source.append_or_update_score(dylan, season, 1, 0, 100).is_err());
        assert!(source.append_or_update_score(dylan, season, 5, 2, 100).is_err());
        assert!(source.append_or_update_score(dylan, season, 1, 3, 301).is_err());
        assert_eq!(source.snapshot().records.len(), 2);
    }

    #[test]
    fn test_rejects_player_without_roster() {
        let (mut source, _, season, _, _) = league();
        let result = source.append_or_update_score(PlayerId(99), season, 1, 1, 100);
        assert!(matches!(result, Err(LeagueError::Validation(_))));
    }

    #[test]
    fn test_list_filters_by_season() {
        let (source, _, season, _, _) = league();
        assert_eq!(source.list_records(Some(season)).unwrap().len(), 2);
        assert_eq!(source.list_records(Some(SeasonId(42))).unwrap().len(), 0);
        assert_eq!(source.list_records(None).unwrap().len(), 2);
        assert_eq!(source.list_teams(season).unwrap().len(), 2);
    }
}

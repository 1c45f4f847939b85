//! Name catalogs read from a record source once per message

use ahash::AHashMap;

use crate::core::error::{EntityKind, LeagueError, Result};
use crate::core::types::{Player, PlayerId, Season, SeasonId, Team, TeamId};
use crate::resolve::most_recent_season;
use crate::source::ScoreRecordSource;

/// Players, seasons and per-season teams, in source order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub seasons: Vec<Season>,
    pub players: Vec<Player>,
    teams: AHashMap<SeasonId, Vec<Team>>,
    player_index: AHashMap<PlayerId, usize>,
    team_names: AHashMap<TeamId, String>,
}

impl Catalog {
    pub fn load(source: &dyn ScoreRecordSource) -> Result<Self> {
        let seasons = source.list_seasons()?;
        let players = source.list_players()?;

        let mut teams = AHashMap::new();
        for season in &seasons {
            teams.insert(season.id, source.list_teams(season.id)?);
        }

        Ok(Self::from_parts(seasons, players, teams))
    }

    fn from_parts(
        seasons: Vec<Season>,
        players: Vec<Player>,
        teams: AHashMap<SeasonId, Vec<Team>>,
    ) -> Self {
        let player_index = players
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect();
        let team_names = teams
            .values()
            .flatten()
            .map(|t| (t.id, t.name.clone()))
            .collect();

        Self {
            seasons,
            players,
            teams,
            player_index,
            team_names,
        }
    }

    /// Teams of one season in source order
    pub fn teams(&self, season: SeasonId) -> &[Team] {
        self.teams.get(&season).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn season(&self, id: SeasonId) -> Result<&Season> {
        self.seasons
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| LeagueError::not_found(EntityKind::Season, format!("{:?}", id)))
    }

    pub fn latest_season(&self) -> Option<&Season> {
        most_recent_season(&self.seasons)
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.player_index
            .get(&id)
            .map(|&i| &self.players[i])
            .ok_or_else(|| LeagueError::not_found(EntityKind::Player, format!("{:?}", id)))
    }

    pub fn player_name(&self, id: PlayerId) -> &str {
        self.player_index
            .get(&id)
            .map(|&i| self.players[i].name.as_str())
            .unwrap_or("Unknown")
    }

    pub fn team_name(&self, id: TeamId) -> &str {
        self.team_names
            .get(&id)
            .map(String::as_str)
            .unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DataShape;
    use crate::source::{LeagueSnapshot, MemorySource};

    #[test]
    fn test_catalog_groups_teams_by_season() {
        let mut snap = LeagueSnapshot::new();
        let s9 = snap.add_season(9, DataShape::Aggregate);
        let s10 = snap.add_season(10, DataShape::Detailed);
        snap.add_team(s9, "Rolling Stoned");
        let current = snap.add_team(s10, "Rolling Stoned");
        snap.add_team(s10, "Pin Seekers");
        let dylan = snap.add_player("Dylan");

        let catalog = Catalog::load(&MemorySource::new(snap)).unwrap();
        assert_eq!(catalog.teams(s9).len(), 1);
        assert_eq!(catalog.teams(s10).len(), 2);
        assert_eq!(catalog.teams(SeasonId(77)).len(), 0);
        assert_eq!(catalog.latest_season().unwrap().number, 10);
        assert_eq!(catalog.team_name(current), "Rolling Stoned");
        assert_eq!(catalog.player_name(dylan), "Dylan");
        assert_eq!(catalog.player_name(PlayerId(99)), "Unknown");
        assert!(catalog.player(PlayerId(99)).is_err());
    }
}

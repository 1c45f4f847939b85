//! Property tests for the record rules
//!
//! Generated lineups and score entries check the invariants the reports
//! lean on: mirrored results, substitutes invisible to team figures,
//! absences invisible to player figures, and one game per accepted entry.

use bowl_league::core::types::{DataShape, PlayerId, SeasonId, TeamId, WeekRecord};
use bowl_league::source::{Catalog, LeagueSnapshot, MemorySource, ScoreRecordSource};
use bowl_league::stats::outcome::compare_lineups;
use bowl_league::stats::player::{flattened_games, summarize_games};
use bowl_league::stats::team::{season_average, season_pins, season_record};
use bowl_league::stats::{add_score, AppendNewWeek, FillLatestWeek, ScoreRequest, WeekTargetPolicy};
use proptest::prelude::*;

const POSITIONS: usize = 4;

fn games_strategy() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(0u16..=300, 0..=4)
}

fn lineup_strategy() -> impl Strategy<Value = Vec<Vec<u16>>> {
    prop::collection::vec(games_strategy(), 1..=4)
}

fn records_for(team: u32, opponent: u32, week: u32, lineup: &[Vec<u16>]) -> Vec<WeekRecord> {
    lineup
        .iter()
        .enumerate()
        .map(|(i, games)| {
            WeekRecord::new(PlayerId(team * 10 + i as u32), SeasonId(1), TeamId(team), week)
                .with_opponent(TeamId(opponent))
                .with_games(games)
        })
        .collect()
}

/// Two teams meeting every week, one lineup pair per week
fn season_strategy() -> impl Strategy<Value = Vec<WeekRecord>> {
    prop::collection::vec((lineup_strategy(), lineup_strategy()), 1..=3).prop_map(|weeks| {
        weeks
            .iter()
            .enumerate()
            .flat_map(|(i, (home, away))| {
                let week = i as u32 + 1;
                let mut records = records_for(1, 2, week, home);
                records.extend(records_for(2, 1, week, away));
                records
            })
            .collect()
    })
}

fn single_player_league(games: &[u16]) -> (MemorySource, PlayerId, SeasonId) {
    let mut snap = LeagueSnapshot::new();
    let season = snap.add_season(1, DataShape::Detailed);
    let team = snap.add_team(season, "Gutter Gang");
    let player = snap.add_player("Robin");
    snap.push_record(WeekRecord::new(player, season, team, 1).with_games(games));
    (MemorySource::new(snap), player, season)
}

fn game_count(source: &MemorySource) -> usize {
    flattened_games(&source.snapshot().records).len()
}

proptest! {
    /// Property: one side's result is the exact mirror of the other's
    #[test]
    fn prop_results_mirror(ours in lineup_strategy(), theirs in lineup_strategy()) {
        let a = records_for(1, 2, 1, &ours);
        let b = records_for(2, 1, 1, &theirs);
        let a_refs: Vec<&WeekRecord> = a.iter().collect();
        let b_refs: Vec<&WeekRecord> = b.iter().collect();

        let forward = compare_lineups(&a_refs, &b_refs, POSITIONS);
        let backward = compare_lineups(&b_refs, &a_refs, POSITIONS);
        prop_assert_eq!(forward, backward.mirror());
        prop_assert!(forward.games() as usize <= POSITIONS);
    }

    /// Property: substitute records never move a team figure
    #[test]
    fn prop_substitutes_invisible_to_team(
        records in season_strategy(),
        subs in prop::collection::vec((1u32..=2, 1u32..=4, games_strategy()), 0..=4)
    ) {
        let mut with_subs = records.clone();
        for (i, (team, week, games)) in subs.iter().enumerate() {
            let opponent = 3 - team;
            with_subs.push(
                WeekRecord::new(PlayerId(100 + i as u32), SeasonId(1), TeamId(*team), *week)
                    .with_opponent(TeamId(opponent))
                    .with_games(games)
                    .substitute(),
            );
        }

        for team in [TeamId(1), TeamId(2)] {
            prop_assert_eq!(
                season_record(&records, team, POSITIONS),
                season_record(&with_subs, team, POSITIONS)
            );
            prop_assert_eq!(season_pins(&records, team), season_pins(&with_subs, team));
            prop_assert_eq!(season_average(&records, team), season_average(&with_subs, team));
        }
    }

    /// Property: absent weeks add nothing to the owner's game set
    #[test]
    fn prop_absent_excluded_from_player(
        played in prop::collection::vec(games_strategy(), 1..=4),
        stand_in in 0.0f64..=300.0
    ) {
        let mut records: Vec<WeekRecord> = played
            .iter()
            .enumerate()
            .map(|(i, games)| {
                WeekRecord::new(PlayerId(1), SeasonId(1), TeamId(1), i as u32 + 1).with_games(games)
            })
            .collect();
        let before = summarize_games(&flattened_games(&records));

        records.push(
            WeekRecord::new(PlayerId(1), SeasonId(1), TeamId(1), played.len() as u32 + 1)
                .with_games(&[300, 300])
                .absent(stand_in),
        );
        prop_assert_eq!(before, summarize_games(&flattened_games(&records)));
    }

    /// Property: an accepted entry adds exactly one game
    #[test]
    fn prop_accepted_entry_adds_one_game(
        existing in prop::collection::vec(0u16..=300, 1..=4),
        score in 0u32..=300,
        append in any::<bool>()
    ) {
        let (mut source, player, season) = single_player_league(&existing);
        let catalog = Catalog::load(&source).unwrap();
        let policy: Box<dyn WeekTargetPolicy> = if append {
            Box::new(AppendNewWeek)
        } else {
            Box::new(FillLatestWeek)
        };
        let before = game_count(&source);

        let request = ScoreRequest { player, season, week: None, score };
        let receipt = add_score(&mut source, &catalog, &request, policy.as_ref()).unwrap();

        prop_assert_eq!(game_count(&source), before + 1);
        prop_assert_eq!(u32::from(receipt.score), score);
        prop_assert_eq!(receipt.games.last().copied(), Some(receipt.score));
    }

    /// Property: an out-of-range entry leaves the store untouched
    #[test]
    fn prop_rejected_entry_leaves_store(
        existing in prop::collection::vec(0u16..=300, 1..=4),
        score in 301u32..100_000,
        week in prop::option::of(1u32..=6)
    ) {
        let (mut source, player, season) = single_player_league(&existing);
        let catalog = Catalog::load(&source).unwrap();
        let before = source.snapshot().clone();

        let request = ScoreRequest { player, season, week, score };
        prop_assert!(add_score(&mut source, &catalog, &request, &FillLatestWeek).is_err());
        prop_assert_eq!(source.snapshot(), &before);
        prop_assert_eq!(source.list_records(None).unwrap().len(), 1);
    }
}

//! Plain-text rendering of outcomes and errors

use std::fmt::Write;

use crate::command::executor::Outcome;
use crate::command::intent::UnrecognizedReason;
use crate::core::error::LeagueError;
use crate::stats::{
    BestGame, BestTeamWeek, BestWeek, Leaderboard, PlayerAverageEntry, PlayerStats, PlayerWeek,
    RecordStatus, ScoreReceipt, TeamDetail, TeamStanding, TeamWeekDetail, TeamWeekly,
};

pub const HELP_TEXT: &str = "\
BowlBot commands

Teams:
  team | teams | standings          season standings
  team <name>                       record, average, pins and roster
  team <name> week <N>              one week: opponent, games, team total
  team <name> record                week by week results
  list teams                        teams ranked by average

Players:
  player <name> | <name> stats      average, std dev, high, low
  player <name> week <N>            one week's games
  players                           everyone ranked by average

Scores:
  add score <score> <player>        record a game (0-300)
  enter score <score> <player>
  <player> <score>                  quick add, e.g. `Dylan 180`
  add score <score> <player> week <N>

League:
  stats                             league summary
  averages                          player averages
  best weeks | best team weeks | best games

Seasons:
  seasons                           list seasons
  add `season N` or `sN` to any command, e.g. `team Rolling Stoned s9`
  add `all time` or `career` for every season
  without a season the most recent one is used";

fn record(status: &RecordStatus) -> String {
    match status {
        RecordStatus::Derived(r) => r.to_string(),
        RecordStatus::Unavailable => "unavailable (season totals only)".to_string(),
    }
}

fn average(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}", v))
}

fn games(scores: &[u16]) -> String {
    scores
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render(outcome: &Outcome) -> String {
    let text = match outcome {
        Outcome::Standings { season, standings } => render_standings(season, standings),
        Outcome::TeamDetail(detail) => render_team_detail(detail),
        Outcome::TeamWeek(week) => render_team_week(week),
        Outcome::TeamWeekly(weekly) => render_team_weekly(weekly),
        Outcome::PlayerStats(stats) => render_player_stats(stats),
        Outcome::PlayerWeek(week) => render_player_week(week),
        Outcome::ScoreAdded(receipt) => render_receipt(receipt),
        Outcome::Seasons(seasons) => {
            let mut out = String::from("Seasons\n");
            for season in seasons {
                let _ = writeln!(out, "  {} ({})", season.name, season.shape.label());
            }
            out
        }
        Outcome::Players { scope, players } => {
            render_averages(&format!("Players ({})", scope), players)
        }
        Outcome::Teams { season, teams } => {
            let mut out = format!("Teams by average ({})\n", season);
            for (i, team) in teams.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{}. {}: {} | {}",
                    i + 1,
                    team.name,
                    average(team.average),
                    record(&team.record)
                );
            }
            out
        }
        Outcome::Summary(summary) => {
            let mut out = format!("League statistics ({})\n\n", summary.scope);
            let top: Vec<PlayerAverageEntry> =
                summary.averages.iter().take(10).cloned().collect();
            out.push_str(&render_averages("Top averages", &top));
            out.push('\n');
            out.push_str(&render_best_weeks("Best weeks", &summary.best_weeks));
            out.push('\n');
            out.push_str(&render_best_team_weeks("Best team weeks", &summary.best_team_weeks));
            out.push('\n');
            out.push_str(&render_best_games("Best games", &summary.best_games));
            out
        }
        Outcome::Averages { scope, players } => {
            render_averages(&format!("Player averages ({})", scope), players)
        }
        Outcome::BestWeeks { scope, board } => {
            render_best_weeks(&format!("Best weeks ({})", scope), board)
        }
        Outcome::BestTeamWeeks { scope, board } => {
            render_best_team_weeks(&format!("Best team weeks ({})", scope), board)
        }
        Outcome::BestGames { scope, board } => {
            render_best_games(&format!("Best games ({})", scope), board)
        }
        Outcome::Help => HELP_TEXT.to_string(),
        Outcome::Unrecognized(reason) => render_unrecognized(reason),
    };
    text.trim_end().to_string()
}

fn render_standings(season: &str, standings: &[TeamStanding]) -> String {
    let mut out = format!("Standings ({})\n", season);
    for (i, team) in standings.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {}\n   {} | Avg: {} | Pins: {:.0}",
            i + 1,
            team.name,
            record(&team.record),
            average(team.average),
            team.total_pins
        );
    }
    out
}

fn render_team_detail(detail: &TeamDetail) -> String {
    let mut out = format!("{} ({})\n", detail.name, detail.season);
    let _ = writeln!(out, "Record: {}", record(&detail.record));
    let _ = writeln!(out, "Team average: {}", average(detail.average));
    let _ = writeln!(out, "Total pins: {:.0}", detail.total_pins);
    if !detail.roster.is_empty() {
        out.push_str("\nPlayers:\n");
        for player in &detail.roster {
            let _ = writeln!(
                out,
                "  {}: {:.1} ({} games)",
                player.name, player.average, player.games
            );
        }
    }
    out
}

fn render_team_week(week: &TeamWeekDetail) -> String {
    let mut out = format!("{} - Week {} ({})\n", week.name, week.week, week.season);
    if let Some(opponent) = &week.opponent {
        let _ = writeln!(out, "vs {}", opponent);
    }
    if let Some(result) = week.record {
        let _ = writeln!(out, "Record: {}", result);
    }
    out.push_str("\nPlayers:\n");
    for player in &week.players {
        let note = if player.absent {
            " (absent)"
        } else if player.substitute {
            " (sub)"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "  {}{}: {} (Avg: {:.1})",
            player.name,
            note,
            games(&player.games),
            player.average
        );
    }
    let _ = writeln!(out, "\nTeam total: {:.0}", week.total_pins);
    let _ = writeln!(out, "Team average: {}", average(week.average));
    out
}

fn render_team_weekly(weekly: &TeamWeekly) -> String {
    let mut out = format!("{} weekly record ({})\n", weekly.name, weekly.season);
    let _ = writeln!(out, "Total record: {}", record(&weekly.record));
    if weekly.weeks.is_empty() {
        out.push_str("No week by week results exist for this season.\n");
        return out;
    }
    out.push('\n');
    for week in &weekly.weeks {
        let opponent = week.opponent.as_deref().unwrap_or("no opponent");
        let result = week
            .record
            .map_or_else(|| "-".to_string(), |r| r.to_string());
        let against = week
            .pins_against
            .map_or_else(|| "-".to_string(), |p| format!("{:.0}", p));
        let _ = writeln!(
            out,
            "Week {} vs {}\n  {} | {:.0} - {} | Avg: {}",
            week.week,
            opponent,
            result,
            week.pins_for,
            against,
            average(week.average)
        );
    }
    out
}

fn render_player_stats(stats: &PlayerStats) -> String {
    let totals = &stats.totals;
    let mut out = format!("{} ({})\n", stats.name, stats.scope);
    if let Some(team) = &stats.team {
        let _ = writeln!(out, "Team: {}", team);
    }
    let _ = writeln!(out, "Average: {:.1}", totals.average);
    let _ = writeln!(out, "Games: {}", totals.games);
    let _ = writeln!(out, "Total pins: {}", totals.total_pins);
    match totals.std_dev {
        Some(sd) => {
            let _ = writeln!(out, "Std dev: {:.2}", sd);
        }
        None => out.push_str("Std dev: unavailable (season totals only)\n"),
    }
    if let Some(high) = totals.high {
        let _ = writeln!(out, "High game: {}", high);
    }
    if let Some(low) = totals.low {
        let _ = writeln!(out, "Low game: {}", low);
    }
    out
}

fn render_player_week(week: &PlayerWeek) -> String {
    let mut out = format!("{} - Week {} ({})\n", week.name, week.week, week.season);
    let _ = writeln!(out, "Team: {}", week.team);
    if week.summary_only {
        let _ = writeln!(out, "Week average: {:.1} (no individual games kept)", week.average);
        return out;
    }
    if week.absent {
        let _ = writeln!(out, "Absent (average {:.1} used)", week.average);
        return out;
    }
    let _ = writeln!(out, "Games: {}", games(&week.games));
    let _ = writeln!(out, "Week average: {:.1}", week.average);
    let _ = writeln!(out, "Total: {}", week.total);
    if week.substitute {
        out.push_str("Bowled as a substitute\n");
    }
    out
}

fn render_receipt(receipt: &ScoreReceipt) -> String {
    format!(
        "Added {} for {} ({} week {}, game {})\nWeek so far: {} (Avg: {:.1})",
        receipt.score,
        receipt.player,
        receipt.season,
        receipt.week,
        receipt.slot,
        games(&receipt.games),
        receipt.week_average()
    )
}

fn render_averages(title: &str, players: &[PlayerAverageEntry]) -> String {
    let mut out = format!("{}\n", title);
    for (i, p) in players.iter().enumerate() {
        let team = p.team.as_deref().unwrap_or("no team");
        let _ = writeln!(
            out,
            "{}. {} ({}): {:.1} ({} games)",
            i + 1,
            p.name,
            team,
            p.average,
            p.games
        );
    }
    out
}

fn summary_note<T>(out: &mut String, board: &Leaderboard<T>) {
    if !board.summary_only.is_empty() {
        let _ = writeln!(
            out,
            "Not included (season totals only): {}",
            board.summary_only.join(", ")
        );
    }
}

fn render_best_weeks(title: &str, board: &Leaderboard<BestWeek>) -> String {
    let mut out = format!("{}\n", title);
    for (i, w) in board.entries.iter().enumerate() {
        let pins = w
            .total
            .map_or_else(String::new, |t| format!("{} pins, ", t));
        let _ = writeln!(
            out,
            "{}. {} ({}) - {} week {}: {}avg {:.1}",
            i + 1,
            w.name,
            w.team,
            w.season,
            w.week,
            pins,
            w.average
        );
    }
    summary_note(&mut out, board);
    out
}

fn render_best_team_weeks(title: &str, board: &Leaderboard<BestTeamWeek>) -> String {
    let mut out = format!("{}\n", title);
    for (i, w) in board.entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} - {} week {}: {:.0} pins",
            i + 1,
            w.team,
            w.season,
            w.week,
            w.pins
        );
    }
    summary_note(&mut out, board);
    out
}

fn render_best_games(title: &str, board: &Leaderboard<BestGame>) -> String {
    let mut out = format!("{}\n", title);
    for (i, g) in board.entries.iter().enumerate() {
        let when = match g.week {
            Some(week) => format!("{} week {}", g.season, week),
            None => format!("{}, season high", g.season),
        };
        let _ = writeln!(out, "{}. {} ({}) - {}: {}", i + 1, g.name, g.team, when, g.score);
    }
    summary_note(&mut out, board);
    out
}

fn render_unrecognized(reason: &UnrecognizedReason) -> String {
    match reason {
        UnrecognizedReason::NoRuleMatched => {
            "I didn't understand that. Type `help` for the list of commands.".to_string()
        }
        UnrecognizedReason::Unresolved { kind, fragment } => {
            format!("No {} matching '{}'. Type `help` for examples.", kind, fragment)
        }
    }
}

/// User-facing text for a failed command
pub fn render_error(error: &LeagueError) -> String {
    match error {
        LeagueError::EntityNotFound { kind, name } => format!("No {} matching '{}'.", kind, name),
        LeagueError::AmbiguousEntity {
            kind,
            name,
            candidates,
        } => format!(
            "'{}' matches {} {}s, please be more specific.",
            name, candidates, kind
        ),
        LeagueError::UnrecognizedCommand(text) if text.is_empty() => {
            "Send a command, or type `help` for the list.".to_string()
        }
        LeagueError::UnrecognizedCommand(text) => {
            format!("I didn't understand '{}'. Type `help` for commands.", text)
        }
        LeagueError::Validation(msg) => format!("Can't do that: {}.", msg),
        LeagueError::NoData(msg) => format!("{}.", msg.trim_end_matches('.')),
        LeagueError::SourceUnavailable(_) | LeagueError::IoError(_) | LeagueError::SerdeError(_) => {
            "The score sheet is unavailable right now, please try again later.".to_string()
        }
        LeagueError::Config(msg) => format!("Configuration problem: {}", msg),
    }
}

//! Ordered text rules
//!
//! Each rule looks at normalized text with every qualifier already removed
//! and either produces a `Draft` holding raw name fragments or passes. The
//! table is tried top to bottom and the first match wins, so specific
//! phrasings sit above the catch-all `[name] [number]` rule.

use crate::command::intent::LeagueStatKind;
use crate::core::types::MAX_GAME_SCORE;

/// A matched rule before any name is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Help,
    ListSeasons,
    ListPlayers,
    ListTeams,
    LeagueStat(LeagueStatKind),
    /// `score` is the raw token; it is validated during resolution
    AddScore { score: String, player: String },
    TeamWeekly { team: String },
    Standings,
    Team { team: String },
    Player { player: String },
}

pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&str) -> Option<Draft>,
}

/// Precedence order; earlier entries win
pub const RULES: &[Rule] = &[
    Rule { name: "help", apply: help },
    Rule { name: "list_seasons", apply: list_seasons },
    Rule { name: "list_players", apply: list_players },
    Rule { name: "list_teams", apply: list_teams },
    Rule { name: "league_stat", apply: league_stat },
    Rule { name: "add_score", apply: add_score },
    Rule { name: "team_weekly", apply: team_weekly },
    Rule { name: "standings", apply: standings },
    Rule { name: "team", apply: team },
    Rule { name: "player", apply: player },
    Rule { name: "name_and_score", apply: name_and_score },
];

/// First rule in the table that matches `text`
pub fn first_match(text: &str) -> Option<(&'static str, Draft)> {
    RULES
        .iter()
        .find_map(|rule| (rule.apply)(text).map(|draft| (rule.name, draft)))
}

fn help(text: &str) -> Option<Draft> {
    matches!(text, "help" | "?" | "commands").then_some(Draft::Help)
}

fn list_seasons(text: &str) -> Option<Draft> {
    matches!(text, "seasons" | "list seasons" | "show seasons").then_some(Draft::ListSeasons)
}

fn list_players(text: &str) -> Option<Draft> {
    matches!(text, "players" | "list players" | "show players").then_some(Draft::ListPlayers)
}

fn list_teams(text: &str) -> Option<Draft> {
    matches!(text, "list teams" | "show teams").then_some(Draft::ListTeams)
}

fn league_stat(text: &str) -> Option<Draft> {
    let kind = match text {
        "stats" | "league stats" | "league" => LeagueStatKind::Summary,
        "averages" | "player averages" => LeagueStatKind::PlayerAverages,
        "best weeks" | "top weeks" | "best player weeks" => LeagueStatKind::BestWeeks,
        "best team weeks" | "top team weeks" => LeagueStatKind::BestTeamWeeks,
        "best games" | "top games" | "high games" => LeagueStatKind::BestGames,
        _ => return None,
    };
    Some(Draft::LeagueStat(kind))
}

fn is_number(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// `add score <score> <name>`, `enter score <score> <name>`, `score <n> <name>`
///
/// After an add/enter prefix the score may also trail the name.
fn add_score(text: &str) -> Option<Draft> {
    let words: Vec<&str> = text.split(' ').collect();
    let (explicit, rest) = match words.as_slice() {
        ["add" | "enter", "score" | "scores", rest @ ..] => (true, rest),
        ["score", first, rest @ ..] if is_number(first) && !rest.is_empty() => {
            (false, &words[1..])
        }
        _ => return None,
    };

    // An explicit prefix keeps partial entries so they can be reported
    match rest {
        [] => Some(Draft::AddScore {
            score: String::new(),
            player: String::new(),
        }),
        [only] if explicit && is_number(only) => Some(Draft::AddScore {
            score: only.to_string(),
            player: String::new(),
        }),
        [only] if explicit => Some(Draft::AddScore {
            score: String::new(),
            player: only.to_string(),
        }),
        [score, name @ ..] if is_number(score) => Some(Draft::AddScore {
            score: score.to_string(),
            player: name.join(" "),
        }),
        [name @ .., score] if is_number(score) => Some(Draft::AddScore {
            score: score.to_string(),
            player: name.join(" "),
        }),
        [score, name @ ..] => Some(Draft::AddScore {
            score: score.to_string(),
            player: name.join(" "),
        }),
    }
}

/// `team <name> record`, `team <name> weekly`, `record <name>`, `<name> record`
fn team_weekly(text: &str) -> Option<Draft> {
    let name = text
        .strip_prefix("team ")
        .and_then(|t| t.strip_suffix(" record").or_else(|| t.strip_suffix(" weekly")))
        .or_else(|| text.strip_prefix("record "))
        .or_else(|| text.strip_suffix(" record"))?;

    let name = name.trim();
    (!name.is_empty()).then(|| Draft::TeamWeekly {
        team: name.to_string(),
    })
}

fn standings(text: &str) -> Option<Draft> {
    matches!(
        text,
        "team" | "teams" | "standings" | "standing" | "team scores" | "team standings"
    )
    .then_some(Draft::Standings)
}

fn team(text: &str) -> Option<Draft> {
    let name = text
        .strip_prefix("team ")
        .or_else(|| text.strip_prefix("teams "))?;
    Some(Draft::Team {
        team: name.to_string(),
    })
}

/// `player <name>`, `score <name>`, `<name> score`, `<name> stats`
fn player(text: &str) -> Option<Draft> {
    let name = text
        .strip_prefix("player ")
        .or_else(|| text.strip_prefix("score "))
        .or_else(|| text.strip_prefix("scores "))
        .or_else(|| text.strip_prefix("stats "))
        .or_else(|| text.strip_suffix(" score"))
        .or_else(|| text.strip_suffix(" scores"))
        .or_else(|| text.strip_suffix(" stats"))
        .or_else(|| text.strip_suffix(" stat"))?;

    let name = name.trim();
    if name.is_empty() || matches!(name, "my" | "score" | "scores") {
        return None;
    }
    Some(Draft::Player {
        player: name.to_string(),
    })
}

/// Catch-all: a trailing score within range after a name
fn name_and_score(text: &str) -> Option<Draft> {
    let (name, last) = text.rsplit_once(' ')?;
    if !last.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let score: u32 = last.parse().ok()?;
    if score > u32::from(MAX_GAME_SCORE) || name.trim().is_empty() {
        return None;
    }
    Some(Draft::AddScore {
        score: last.to_string(),
        player: name.trim().to_string(),
    })
}

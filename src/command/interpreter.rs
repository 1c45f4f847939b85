//! Free text to resolved intents
//!
//! normalize -> extract qualifiers -> first matching rule -> resolve names

use crate::command::intent::{Intent, UnrecognizedReason};
use crate::command::rules::{first_match, Draft};
use crate::core::error::{EntityKind, LeagueError, Result};
use crate::core::types::{Season, SeasonScope, Week, MAX_GAME_SCORE};
use crate::resolve::EntityResolver;
use crate::source::Catalog;

/// Lowercase and collapse runs of whitespace
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Scope qualifiers pulled out of a message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Qualifiers {
    /// Season fragment in resolver form, e.g. `season 9`
    pub season: Option<String>,
    pub week: Option<Week>,
    pub all_time: bool,
    /// What is left once the qualifiers are removed
    pub rest: String,
}

fn digits(token: &str) -> Option<u32> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Remove the first season qualifier, the first week qualifier and any
/// all-time phrase from normalized text
pub fn extract_qualifiers(normalized: &str) -> Qualifiers {
    let words: Vec<&str> = normalized.split(' ').filter(|w| !w.is_empty()).collect();
    let mut quals = Qualifiers::default();
    let mut kept: Vec<&str> = Vec::with_capacity(words.len());

    let mut i = 0;
    while i < words.len() {
        let word = words[i];
        let next = words.get(i + 1).copied();

        if quals.season.is_none() {
            if word == "season" {
                if let Some(n) = next.and_then(digits) {
                    quals.season = Some(format!("season {}", n));
                    i += 2;
                    continue;
                }
            } else if let Some(n) = word.strip_prefix('s').and_then(digits) {
                quals.season = Some(format!("season {}", n));
                i += 1;
                continue;
            }
        }

        if quals.week.is_none() && matches!(word, "week" | "wk") {
            if let Some(n) = next.and_then(digits) {
                quals.week = Some(n);
                i += 2;
                continue;
            }
        }

        match (word, next) {
            ("all", Some("time" | "seasons")) => {
                quals.all_time = true;
                i += 2;
                continue;
            }
            ("alltime" | "career", _) => {
                quals.all_time = true;
                i += 1;
                continue;
            }
            _ => {}
        }

        kept.push(word);
        i += 1;
    }

    quals.rest = kept.join(" ");
    quals
}

/// Parse and range-check a score token
pub fn parse_score(token: &str) -> Result<u16> {
    let value: i64 = token
        .parse()
        .map_err(|_| LeagueError::Validation(format!("'{}' is not a score", token)))?;
    u16::try_from(value)
        .ok()
        .filter(|&s| s <= MAX_GAME_SCORE)
        .ok_or_else(|| {
            LeagueError::Validation(format!("score {} is outside 0-{}", value, MAX_GAME_SCORE))
        })
}

/// Turns chat messages into intents against the current catalog
#[derive(Default)]
pub struct CommandInterpreter {
    resolver: EntityResolver,
}

impl CommandInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolver(resolver: EntityResolver) -> Self {
        Self { resolver }
    }

    /// Interpret one message
    ///
    /// Unmatched text and unresolvable names come back as
    /// `Intent::Unrecognized`. A blank message is `UnrecognizedCommand`.
    /// A missing, malformed or out-of-range score is a validation error, as
    /// is an explicit `add score` without a player name. With a rejecting
    /// tie-break an ambiguous name is `AmbiguousEntity`.
    pub fn interpret(&self, text: &str, catalog: &Catalog) -> Result<Intent> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Err(LeagueError::UnrecognizedCommand(normalized));
        }
        let quals = extract_qualifiers(&normalized);
        tracing::debug!("Qualifiers for '{}': {:?}", text, quals);

        let Some((rule, draft)) = first_match(&quals.rest) else {
            tracing::debug!("No rule matched '{}'", quals.rest);
            return Ok(Intent::Unrecognized(UnrecognizedReason::NoRuleMatched));
        };
        tracing::debug!("Rule '{}' matched: {:?}", rule, draft);

        // Only list-style commands work without a season
        if matches!(draft, Draft::Help) {
            return Ok(Intent::Help);
        }
        if matches!(draft, Draft::ListSeasons) {
            return Ok(Intent::ListSeasons);
        }

        let season = match self.season(&quals, catalog)? {
            Ok(season) => season,
            Err(unresolved) => return Ok(unresolved),
        };
        let scope = if quals.all_time {
            SeasonScope::AllSeasons
        } else {
            SeasonScope::Season(season.id)
        };

        let intent = match draft {
            Draft::Help => Intent::Help,
            Draft::ListSeasons => Intent::ListSeasons,
            Draft::ListPlayers => Intent::ListPlayers { scope },
            Draft::ListTeams => Intent::ListTeams { season: season.id },
            Draft::LeagueStat(kind) => Intent::ShowLeagueStat { kind, scope },
            Draft::Standings => Intent::ShowTeamStandings { season: season.id },
            Draft::AddScore { score, player } => {
                if score.is_empty() {
                    return Err(LeagueError::Validation(
                        "add score needs a score, e.g. `add score 180 Dylan`".to_string(),
                    ));
                }
                let score = parse_score(&score)?;
                if player.is_empty() {
                    return Err(LeagueError::Validation(format!(
                        "add score {} needs a player name, e.g. `add score {} Dylan`",
                        score, score
                    )));
                }
                match self.resolver.resolve(&player, &catalog.players)? {
                    Some(m) => Intent::AddScore {
                        player: m.entity.id,
                        season: season.id,
                        week: quals.week,
                        score,
                    },
                    None => Intent::unresolved(EntityKind::Player, player),
                }
            }
            Draft::TeamWeekly { team } => {
                match self.resolver.resolve(&team, catalog.teams(season.id))? {
                    Some(m) => Intent::ShowTeamWeekly {
                        team: m.entity.id,
                        season: season.id,
                    },
                    None => Intent::unresolved(EntityKind::Team, team),
                }
            }
            Draft::Team { team } => match self.resolver.resolve(&team, catalog.teams(season.id))? {
                Some(m) => Intent::ShowTeamDetail {
                    team: m.entity.id,
                    season: season.id,
                    week: quals.week,
                },
                None => Intent::unresolved(EntityKind::Team, team),
            },
            Draft::Player { player } => match self.resolver.resolve(&player, &catalog.players)? {
                Some(m) => Intent::ShowPlayerStats {
                    player: m.entity.id,
                    // A single week always belongs to one season
                    scope: if quals.week.is_some() {
                        SeasonScope::Season(season.id)
                    } else {
                        scope
                    },
                    week: quals.week,
                },
                None => Intent::unresolved(EntityKind::Player, player),
            },
        };

        tracing::debug!("Interpreted '{}' as {:?}", text, intent);
        Ok(intent)
    }

    /// The qualified season, or the most recent one
    ///
    /// The inner `Err` is the intent to return when the qualifier names a
    /// season that does not exist.
    fn season<'c>(
        &self,
        quals: &Qualifiers,
        catalog: &'c Catalog,
    ) -> Result<std::result::Result<&'c Season, Intent>> {
        match self
            .resolver
            .resolve_season(quals.season.as_deref(), &catalog.seasons)?
        {
            Some(season) => Ok(Ok(season)),
            None => match &quals.season {
                Some(fragment) => Ok(Err(Intent::unresolved(EntityKind::Season, fragment.clone()))),
                None => Err(LeagueError::NoData("No seasons recorded yet".to_string())),
            },
        }
    }
}

//! Fuzzy name resolution against the league catalogs

use crate::core::error::{EntityKind, LeagueError, Result};
use crate::core::types::{Player, Season, Team};

/// Anything that can be looked up by display name
pub trait Named {
    const KIND: EntityKind;

    fn name(&self) -> &str;
}

impl Named for Player {
    const KIND: EntityKind = EntityKind::Player;

    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Team {
    const KIND: EntityKind = EntityKind::Team;

    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Season {
    const KIND: EntityKind = EntityKind::Season;

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchReason {
    ExactName,
    PartialName,
    /// Several names contain the fragment; the tie-break picked one
    Ambiguous { candidates: usize },
}

/// A resolved catalog entry
#[derive(Debug)]
pub struct EntityMatch<'a, T> {
    pub entity: &'a T,
    pub reason: MatchReason,
}

/// Picks one of several names that all contain the fragment
pub trait TieBreakStrategy: Send + Sync {
    /// `contenders` holds (catalog index, name) in catalog order and is never
    /// empty. Returns a position within `contenders`, or `None` to refuse.
    fn choose(&self, fragment: &str, contenders: &[(usize, &str)]) -> Option<usize>;
}

/// Shortest (most specific) name wins, then catalog order
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortestName;

impl TieBreakStrategy for ShortestName {
    fn choose(&self, _fragment: &str, contenders: &[(usize, &str)]) -> Option<usize> {
        contenders
            .iter()
            .enumerate()
            .min_by_key(|(_, (index, name))| (name.chars().count(), *index))
            .map(|(pos, _)| pos)
    }
}

/// First containing name in catalog order wins
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstInCatalog;

impl TieBreakStrategy for FirstInCatalog {
    fn choose(&self, _fragment: &str, _contenders: &[(usize, &str)]) -> Option<usize> {
        Some(0)
    }
}

/// Only an exact name settles a tie; anything else asks for a longer fragment
#[derive(Debug, Default, Clone, Copy)]
pub struct RejectAmbiguous;

impl TieBreakStrategy for RejectAmbiguous {
    fn choose(&self, fragment: &str, contenders: &[(usize, &str)]) -> Option<usize> {
        contenders
            .iter()
            .position(|(_, name)| name.to_lowercase() == fragment)
    }
}

/// Resolves free-text fragments to players, teams and seasons
pub struct EntityResolver {
    strategy: Box<dyn TieBreakStrategy>,
}

impl Default for EntityResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityResolver {
    pub fn new() -> Self {
        Self::with_strategy(ShortestName)
    }

    pub fn with_strategy(strategy: impl TieBreakStrategy + 'static) -> Self {
        Self {
            strategy: Box::new(strategy),
        }
    }

    /// Case-insensitive containment match of `fragment` against `candidates`
    ///
    /// Returns `None` when nothing contains the fragment, and
    /// `AmbiguousEntity` when the tie-break strategy declines to pick.
    pub fn resolve<'a, T: Named>(
        &self,
        fragment: &str,
        candidates: &'a [T],
    ) -> Result<Option<EntityMatch<'a, T>>> {
        let needle = fragment.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }

        let contenders: Vec<(usize, &str)> = candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.name().to_lowercase().contains(&needle))
            .map(|(i, c)| (i, c.name()))
            .collect();

        if contenders.is_empty() {
            return Ok(None);
        }

        let pos = match contenders.len() {
            1 => 0,
            n => self
                .strategy
                .choose(&needle, &contenders)
                .ok_or_else(|| LeagueError::AmbiguousEntity {
                    kind: T::KIND,
                    name: fragment.trim().to_string(),
                    candidates: n,
                })?
                .min(n - 1),
        };
        let (index, name) = contenders[pos];

        let reason = if name.to_lowercase() == needle {
            MatchReason::ExactName
        } else if contenders.len() > 1 {
            tracing::debug!(
                "'{}' matched {} names, picked '{}'",
                fragment,
                contenders.len(),
                name
            );
            MatchReason::Ambiguous {
                candidates: contenders.len(),
            }
        } else {
            MatchReason::PartialName
        };

        Ok(Some(EntityMatch {
            entity: &candidates[index],
            reason,
        }))
    }

    /// Resolve a season fragment; no fragment means the most recent season
    ///
    /// `season 9` and `s9` pick by ordinal. Anything else is matched by name.
    pub fn resolve_season<'a>(
        &self,
        fragment: Option<&str>,
        seasons: &'a [Season],
    ) -> Result<Option<&'a Season>> {
        let Some(fragment) = fragment else {
            return Ok(most_recent_season(seasons));
        };

        match season_number(fragment) {
            Some(number) => Ok(seasons.iter().find(|s| s.number == number)),
            None => Ok(self.resolve(fragment, seasons)?.map(|m| m.entity)),
        }
    }
}

/// The season with the highest ordinal
pub fn most_recent_season(seasons: &[Season]) -> Option<&Season> {
    seasons.iter().max_by_key(|s| s.number)
}

/// Parse `season <N>` or `s<N>` (case-insensitive, digits only)
pub fn season_number(fragment: &str) -> Option<u32> {
    let lower = fragment.trim().to_lowercase();
    let mut words = lower.split_whitespace();
    let first = words.next()?;

    let digits = match (first, words.next(), words.next()) {
        ("season", Some(n), None) => n,
        (word, None, None) => word.strip_prefix('s')?,
        _ => return None,
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{DataShape, PlayerId, SeasonId};

    fn players(names: &[&str]) -> Vec<Player> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Player {
                id: PlayerId(i as u32 + 1),
                name: n.to_string(),
            })
            .collect()
    }

    fn seasons(numbers: &[u32]) -> Vec<Season> {
        numbers
            .iter()
            .enumerate()
            .map(|(i, &n)| Season {
                id: SeasonId(i as u32 + 1),
                number: n,
                name: format!("Season {}", n),
                shape: DataShape::Detailed,
            })
            .collect()
    }

    #[test]
    fn test_resolve_by_name() {
        let catalog = players(&["Marcus", "Elena"]);
        let resolver = EntityResolver::new();
        let m = resolver.resolve("marcus", &catalog).unwrap().unwrap();
        assert_eq!(m.entity.name, "Marcus");
        assert_eq!(m.reason, MatchReason::ExactName);
    }

    #[test]
    fn test_resolve_partial_is_case_insensitive() {
        let catalog = players(&["Dylan Brooks", "Elena"]);
        let m = EntityResolver::new().resolve("BROOK", &catalog).unwrap().unwrap();
        assert_eq!(m.entity.name, "Dylan Brooks");
        assert_eq!(m.reason, MatchReason::PartialName);
    }

    #[test]
    fn test_shortest_name_wins() {
        let catalog = players(&["Danny Long", "Dan", "Dana"]);
        let m = EntityResolver::new().resolve("dan", &catalog).unwrap().unwrap();
        assert_eq!(m.entity.name, "Dan");
        assert_eq!(m.reason, MatchReason::ExactName);

        let m = EntityResolver::new().resolve("an", &catalog).unwrap().unwrap();
        assert_eq!(m.entity.name, "Dan");
        assert_eq!(m.reason, MatchReason::Ambiguous { candidates: 3 });
    }

    #[test]
    fn test_equal_length_falls_back_to_catalog_order() {
        let catalog = players(&["Mike", "Mila"]);
        let m = EntityResolver::new().resolve("mi", &catalog).unwrap().unwrap();
        assert_eq!(m.entity.name, "Mike");
    }

    #[test]
    fn test_strategy_is_replaceable() {
        let catalog = players(&["Danny Long", "Dan"]);
        let m = EntityResolver::with_strategy(FirstInCatalog)
            .resolve("dan", &catalog)
            .unwrap()
            .unwrap();
        assert_eq!(m.entity.name, "Danny Long");
    }

    #[test]
    fn test_reject_strategy_reports_ambiguity() {
        let catalog = players(&["Dylan", "Dylan Marks", "Marcus"]);
        let resolver = EntityResolver::with_strategy(RejectAmbiguous);

        let err = resolver.resolve("dyl", &catalog).unwrap_err();
        assert!(matches!(
            err,
            LeagueError::AmbiguousEntity {
                kind: EntityKind::Player,
                candidates: 2,
                ..
            }
        ));

        // An exact name or a single containing name still resolves
        let m = resolver.resolve("dylan", &catalog).unwrap().unwrap();
        assert_eq!(m.entity.name, "Dylan");
        let m = resolver.resolve("marc", &catalog).unwrap().unwrap();
        assert_eq!(m.entity.name, "Marcus");
    }

    #[test]
    fn test_not_found() {
        let catalog = players(&["Marcus"]);
        assert!(EntityResolver::new().resolve("zed", &catalog).unwrap().is_none());
        assert!(EntityResolver::new().resolve("  ", &catalog).unwrap().is_none());
    }

    #[test]
    fn test_season_number_patterns() {
        assert_eq!(season_number("season 9"), Some(9));
        assert_eq!(season_number("Season 10"), Some(10));
        assert_eq!(season_number("S9"), Some(9));
        assert_eq!(season_number("s"), None);
        assert_eq!(season_number("s9x"), None);
        assert_eq!(season_number("stoned"), None);
        assert_eq!(season_number("season nine"), None);
    }

    #[test]
    fn test_resolve_season() {
        let catalog = seasons(&[8, 10, 9]);
        let resolver = EntityResolver::new();
        assert_eq!(resolver.resolve_season(None, &catalog).unwrap().unwrap().number, 10);
        assert_eq!(resolver.resolve_season(Some("s9"), &catalog).unwrap().unwrap().number, 9);
        assert_eq!(
            resolver.resolve_season(Some("season 8"), &catalog).unwrap().unwrap().number,
            8
        );
        assert!(resolver.resolve_season(Some("s42"), &catalog).unwrap().is_none());
        assert!(resolver.resolve_season(None, &[]).unwrap().is_none());
    }
}

//! Entity resolution
//!
//! Turns name fragments typed in chat into catalog entries.

pub mod resolver;

pub use resolver::{
    most_recent_season, season_number, EntityMatch, EntityResolver, FirstInCatalog, MatchReason,
    Named, RejectAmbiguous, ShortestName, TieBreakStrategy,
};

pub mod config;
pub mod error;
pub mod types;

pub use config::{LeagueConfig, TieBreakKind, WeekPolicyKind};
pub use error::{EntityKind, LeagueError, Result};

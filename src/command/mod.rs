//! Command pipeline
//!
//! Converts chat text into executed outcomes:
//! text -> CommandInterpreter -> Intent -> CommandExecutor -> Outcome

pub mod executor;
pub mod intent;
pub mod interpreter;
pub mod rules;

pub use executor::{CommandExecutor, Outcome};
pub use intent::{Intent, LeagueStatKind, UnrecognizedReason};
pub use interpreter::{extract_qualifiers, normalize, parse_score, CommandInterpreter, Qualifiers};
pub use rules::{first_match, Draft, Rule, RULES};

use std::fmt;

use thiserror::Error;

/// Which catalog a name was looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Team,
    Season,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Player => "player",
            EntityKind::Team => "team",
            EntityKind::Season => "season",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("No {kind} matching '{name}'")]
    EntityNotFound { kind: EntityKind, name: String },

    #[error("'{name}' matches {candidates} {kind}s")]
    AmbiguousEntity {
        kind: EntityKind,
        name: String,
        candidates: usize,
    },

    #[error("Unrecognized command: {0}")]
    UnrecognizedCommand(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("No data: {0}")]
    NoData(String),

    #[error("Score source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl LeagueError {
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        LeagueError::EntityNotFound {
            kind,
            name: name.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;

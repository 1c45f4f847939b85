//! Message handling boundary
//!
//! One message runs read -> interpret -> compute -> respond to completion
//! before the next is accepted. Every error is turned into a reply here.

use crate::bot::format::{render, render_error};
use crate::command::{CommandExecutor, CommandInterpreter, Outcome};
use crate::core::config::{LeagueConfig, TieBreakKind};
use crate::core::error::{LeagueError, Result};
use crate::resolve::{EntityResolver, FirstInCatalog, RejectAmbiguous};
use crate::source::{Catalog, ScoreRecordSource};
use crate::stats::{policy_for, WeekTargetPolicy};

/// Chat-facing league bot over a record source
pub struct LeagueBot<S: ScoreRecordSource> {
    source: S,
    config: LeagueConfig,
    interpreter: CommandInterpreter,
    policy: Box<dyn WeekTargetPolicy>,
}

impl<S: ScoreRecordSource> LeagueBot<S> {
    pub fn new(source: S, config: LeagueConfig) -> Self {
        let resolver = match config.tie_break {
            TieBreakKind::ShortestName => EntityResolver::new(),
            TieBreakKind::FirstInCatalog => EntityResolver::with_strategy(FirstInCatalog),
            TieBreakKind::Reject => EntityResolver::with_strategy(RejectAmbiguous),
        };
        Self {
            policy: policy_for(config.week_policy),
            interpreter: CommandInterpreter::with_resolver(resolver),
            source,
            config,
        }
    }

    pub fn with_policy(mut self, policy: impl WeekTargetPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Answer one message; `sender` is carried for logging only
    pub fn handle_message(&mut self, text: &str, sender: &str) -> String {
        tracing::debug!("Message from {}: {}", sender, text);
        match self.process(text) {
            Ok(outcome) => render(&outcome),
            Err(e) => {
                match &e {
                    LeagueError::SourceUnavailable(_)
                    | LeagueError::IoError(_)
                    | LeagueError::SerdeError(_) => {
                        tracing::error!("Score source failed for {}: {}", sender, e)
                    }
                    _ => tracing::debug!("Command from {} failed: {}", sender, e),
                }
                render_error(&e)
            }
        }
    }

    /// Interpret and execute without rendering
    pub fn process(&mut self, text: &str) -> Result<Outcome> {
        let catalog = Catalog::load(&self.source)?;
        let intent = self.interpreter.interpret(text, &catalog)?;
        if intent.is_write() {
            tracing::debug!("Write requested: {:?}", intent);
        }
        CommandExecutor::execute(
            &mut self.source,
            &catalog,
            &self.config,
            self.policy.as_ref(),
            intent,
        )
    }
}

//! Bowl League - Entry Point
//!
//! Loads the league file and answers chat-style messages, either a single
//! `--message` or interactively from stdin.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use bowl_league::bot::LeagueBot;
use bowl_league::core::config::LeagueConfig;
use bowl_league::core::error::Result;
use bowl_league::source::{JsonFileSource, ScoreRecordSource};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Bowling league bot - scores and stats from plain text messages
#[derive(Parser, Debug)]
#[command(name = "bowl-league")]
#[command(about = "Answer bowling league questions and record scores")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// League JSON file, overrides `data_file` from the config
    #[arg(long)]
    data: Option<PathBuf>,

    /// Answer one message and exit
    #[arg(long, short = 'm')]
    message: Option<String>,

    /// Who the messages come from
    #[arg(long, default_value = "console")]
    sender: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => LeagueConfig::load(path)?,
        None => LeagueConfig::default(),
    };
    if let Some(data) = &args.data {
        config.data_file = data.clone();
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let source = JsonFileSource::open(&config.data_file)?;
    tracing::info!(
        "Bowl League ready with {} seasons from {:?}",
        source.list_seasons()?.len(),
        source.path()
    );

    let mut bot = LeagueBot::new(source, config);

    if let Some(message) = &args.message {
        println!("{}", bot.handle_message(message, &args.sender));
        return Ok(());
    }

    println!("\n=== BOWL LEAGUE ===");
    println!("Type `help` for commands, `quit` to exit.");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }

        println!("{}\n", bot.handle_message(input, &args.sender));
    }

    println!("\nGoodbye!");
    Ok(())
}

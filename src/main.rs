//! Pokegrid - command-line front end
//!
//! Catalog lookups, an interactive board, and action-log replay.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use pokegrid::{
    Action, GameConfig, GameSession, GameState, GridEngine, HELP, LevelCatalog, LevelId,
    OverwritePolicy, Pokedex, ScriptCommand, parse_line, render_board, sprite_url,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = GameConfig::load(cli.config.as_deref())?;
    if cli.release_on_overwrite {
        config = config.with_overwrite_policy(OverwritePolicy::Release);
    }
    debug!(?config, "Effective configuration");

    match cli.command {
        Command::Pokemon { query } => show_pokemon(&config, &query),
        Command::Levels => list_levels(),
        Command::Level { id } => show_level(id),
        Command::Play { level, script } => run_play(&config, level, script),
        Command::Replay { file } => run_replay(&config, &file),
    }
}

/// Print one Pokemon with its sprite URL
#[instrument(skip(config))]
fn show_pokemon(config: &GameConfig, query: &str) -> Result<()> {
    let pokedex = Pokedex::load_bundled()?;
    let Some(pokemon) = pokedex.resolve(query) else {
        bail!("No Pokemon named or numbered '{}'", query);
    };

    println!("{}", pokemon);
    println!("  moves:  {}", pokemon.moves().join(", "));
    println!("  sprite: {}", sprite_url(config.sprite_cdn_url(), *pokemon.id()));
    Ok(())
}

/// Print every level name
fn list_levels() -> Result<()> {
    let levels = LevelCatalog::load_bundled()?;
    for level in levels.all() {
        println!("{}. {}", level.id(), level.name());
    }
    Ok(())
}

/// Print one level's row and column criteria
fn show_level(id: u32) -> Result<()> {
    let levels = LevelCatalog::load_bundled()?;
    let Some(level) = levels.get(LevelId(id)) else {
        bail!("No level {} (there are {})", id, levels.count());
    };

    println!("Level {}: {}", level.id(), level.name());
    for (index, criteria) in level.rows().iter().enumerate() {
        println!("  row {}: {}", index, criteria);
    }
    for (index, criteria) in level.columns().iter().enumerate() {
        println!("  col {}: {}", index, criteria);
    }
    Ok(())
}

/// Drive a session from stdin or a script file
#[instrument(skip(config))]
fn run_play(config: &GameConfig, level: Option<u32>, script: Option<PathBuf>) -> Result<()> {
    let pokedex = Pokedex::load_bundled()?;
    let levels = LevelCatalog::load_bundled()?;
    let mut session = GameSession::new(GridEngine::new(*config.overwrite_policy()));

    if let Some(id) = level {
        if levels.get(LevelId(id)).is_none() {
            bail!("No level {} (there are {})", id, levels.count());
        }
        session.dispatch(Action::SetLevel(LevelId(id)))?;
    }

    let interactive = script.is_none();
    let reader: Box<dyn BufRead> = match &script {
        Some(path) => Box::new(std::io::BufReader::new(
            std::fs::File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?,
        )),
        None => Box::new(std::io::stdin().lock()),
    };

    info!(interactive, "Starting play loop");
    if interactive {
        println!("{}", HELP);
        print_board(session.state(), &levels);
        prompt()?;
    }

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_line(&line, &pokedex) {
            Ok(None) => {}
            Ok(Some(ScriptCommand::Quit)) => break,
            Ok(Some(ScriptCommand::Help)) => println!("{}", HELP),
            Ok(Some(ScriptCommand::Show)) => print_board(session.state(), &levels),
            Ok(Some(ScriptCommand::Undo)) => {
                if session.undo() {
                    print_board(session.state(), &levels);
                } else {
                    println!("Nothing to undo");
                }
            }
            Ok(Some(ScriptCommand::Redo)) => {
                if session.redo() {
                    print_board(session.state(), &levels);
                } else {
                    println!("Nothing to redo");
                }
            }
            Ok(Some(ScriptCommand::Dispatch(action))) => match session.dispatch(action) {
                Ok(state) => {
                    if interactive {
                        print_board(state, &levels);
                    }
                }
                Err(e) => {
                    warn!(line = number + 1, error = %e, "Action rejected");
                    eprintln!("line {}: {}", number + 1, e);
                }
            },
            Err(e) => eprintln!("line {}: {}", number + 1, e),
        }
        if interactive {
            prompt()?;
        }
    }

    if !interactive {
        print_board(session.state(), &levels);
    }
    Ok(())
}

/// Apply a JSON action log and print the resulting board
#[instrument(skip(config))]
fn run_replay(config: &GameConfig, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read action log {}", file.display()))?;
    let actions: Vec<Action> =
        serde_json::from_str(&content).context("Action log is not a JSON array of actions")?;

    let levels = LevelCatalog::load_bundled()?;
    let mut session = GameSession::new(GridEngine::new(*config.overwrite_policy()));

    info!(count = actions.len(), "Replaying actions");
    for (index, action) in actions.into_iter().enumerate() {
        session
            .dispatch(action)
            .with_context(|| format!("Action {} failed", index))?;
    }

    print_board(session.state(), &levels);
    Ok(())
}

fn print_board(state: &GameState, levels: &LevelCatalog) {
    let level = state.level().and_then(|id| levels.get(id));
    print!("{}", render_board(state, level.as_deref()));
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a pursuit game in the terminal.

mod board;
mod input;
mod settings;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use pursuit_core::Event;
use pursuit_world::{self as world, query, World};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{
    input::{parse_input, Input, HELP},
    settings::{EvasionArg, Overrides},
};

/// Two pursuers try to corner one evader on a square grid.
#[derive(Debug, Parser)]
#[command(name = "pursuit", version)]
struct Cli {
    /// TOML file describing the board; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of tiles along each edge of the grid.
    #[arg(long)]
    side: Option<u32>,
    /// Maximum distance a piece may travel per move.
    #[arg(long)]
    move_range: Option<u32>,
    /// Rounds the evader must survive.
    #[arg(long)]
    max_rounds: Option<u32>,
    /// Strategy driving the evader.
    #[arg(long, value_enum)]
    evasion: Option<EvasionArg>,
    /// Seed for the random evasion strategy.
    #[arg(long)]
    seed: Option<u64>,
}

/// Entry point for the pursuit command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let overrides = Overrides {
        side: cli.side,
        move_range: cli.move_range,
        max_rounds: cli.max_rounds,
        evasion: cli.evasion,
        seed: cli.seed,
    };
    let config = settings::load(cli.config.as_deref(), overrides)?;
    info!(?config, "starting game");

    let mut world = World::new(config).context("failed to build the game world")?;
    info!(evasion = ?query::evasion_kind(&world), "evader strategy ready");
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "{HELP}\n\n{}", board::render(&world))?;
    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        match parse_input(&line) {
            Ok(Input::Command(command)) => {
                let mut events = Vec::new();
                world::apply(&mut world, command, &mut events);
                report(&mut stdout, &events)?;
                writeln!(stdout, "{}", board::render(&world))?;
            }
            Ok(Input::Show) => writeln!(stdout, "{}", board::render(&world))?,
            Ok(Input::Help) => writeln!(stdout, "{HELP}")?,
            Ok(Input::Quit) => break,
            Err(error) => writeln!(stdout, "{error}")?,
        }
    }

    Ok(())
}

fn report(out: &mut impl Write, events: &[Event]) -> io::Result<()> {
    for event in events {
        debug!(?event, "world event");
        match event {
            Event::CommandIgnored { phase, .. } => {
                writeln!(out, "not allowed during {phase:?}")?;
            }
            Event::EvaderStranded { reason, .. } => {
                writeln!(out, "the evader is stuck: {reason}")?;
            }
            _ => {}
        }
    }
    Ok(())
}

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use sweeper_core::Game;

use command::Command;
use config::Args;

mod command;
mod config;
mod render;

fn main() -> Result<()> {
    let args = Args::parse();
    logger(args.verbosity.log_level_filter()).init();

    let settings = args.settings()?;
    let mut game = match args.seed {
        Some(seed) => Game::with_seed(settings, seed),
        None => Game::new(settings),
    }
    .context("failed to start game")?;

    run(&mut game, io::stdin().lock(), io::stdout().lock())
}

/// Log records go to stderr so they never interleave with the board on stdout.
fn logger(level: LevelFilter) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .target(env_logger::Target::Stderr);
    builder
}

/// Reads one command per line until `q` or end of input, printing the board after every change.
fn run(game: &mut Game, input: impl BufRead, mut output: impl Write) -> Result<()> {
    render::board(&mut output, game)?;

    for line in input.lines() {
        let line = line.context("failed to read command")?;
        match line.parse() {
            Ok(Command::Reveal(x, y)) => {
                let outcome = game.reveal_cell(x, y);
                if !outcome.has_update() {
                    writeln!(output, "nothing to reveal at ({x}, {y})")?;
                    continue;
                }
            }
            Ok(Command::Restart) => game.restart()?,
            Ok(Command::Quit) => break,
            Err(err) => {
                log::debug!("Rejected command {:?}", line);
                writeln!(output, "{err}")?;
                continue;
            }
        }
        render::board(&mut output, game)?;
    }

    output.flush()?;
    Ok(())
}

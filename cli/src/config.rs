use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use sweeper_core::{Coord, Lives, Settings};

/// Terminal Minesweeper. Reveal cells with `x y`, start over with `n`, leave with `q`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// TOML file with `width`, `height`, `density`, `lives` and `zen`, flags take precedence
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub width: Option<Coord>,

    #[arg(long)]
    pub height: Option<Coord>,

    /// Fraction of cells holding a bomb, from 0 to 0.5
    #[arg(long)]
    pub density: Option<f32>,

    #[arg(long)]
    pub lives: Option<Lives>,

    /// Ignore losses and keep revealing after the game ends
    #[arg(long)]
    pub zen: bool,

    /// Fix RNG seed for reproducible bomb layouts
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

impl Args {
    /// Defaults, then the config file, then flags.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => load_settings(path)?,
            None => Settings::default(),
        };

        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(density) = self.density {
            settings.density = density;
        }
        if let Some(lives) = self.lives {
            settings.lives = lives;
        }
        settings.zen |= self.zen;

        settings.validate().context("invalid game settings")?;
        Ok(settings)
    }
}

fn load_settings(path: &Path) -> Result<Settings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let settings: Settings = toml::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    log::debug!("Loaded settings from {}: {:?}", path.display(), settings);
    Ok(settings)
}

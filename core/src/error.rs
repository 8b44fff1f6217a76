use thiserror::Error;

use crate::{Coord, DENSITY_MAX, DENSITY_MIN, Lives, MAX_SIZE, MIN_SIZE};

#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum GameError {
    #[error("Invalid width {0}, expected {min}..={max}", min = MIN_SIZE, max = MAX_SIZE)]
    InvalidWidth(Coord),
    #[error("Invalid height {0}, expected {min}..={max}", min = MIN_SIZE, max = MAX_SIZE)]
    InvalidHeight(Coord),
    #[error("Invalid bomb density {0}, expected {min}..={max}", min = DENSITY_MIN, max = DENSITY_MAX)]
    InvalidDensity(f32),
    #[error("Invalid lives {0}, at least one is required")]
    InvalidLives(Lives),
    #[error("Invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, GameError>;

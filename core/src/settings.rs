use serde::{Deserialize, Serialize};

use crate::*;

pub const MIN_SIZE: Coord = 3;
pub const MAX_SIZE: Coord = 32;

pub const DENSITY_MIN: f32 = 0.0;
pub const DENSITY_MAX: f32 = 0.5;
pub const DENSITY_DEFAULT: f32 = 0.2;

pub const LIVES_DEFAULT: Lives = 3;

pub const WIDTH_DEFAULT: Coord = 20;
pub const HEIGHT_DEFAULT: Coord = 10;

/// Everything needed to set up a game. Only [`Settings::validate`] decides what is acceptable.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: Coord,
    pub height: Coord,
    pub density: f32,
    pub lives: Lives,
    /// Loss conditions are ignored and reveals stay open after the game ends.
    pub zen: bool,
}

impl Settings {
    pub const fn new(width: Coord, height: Coord, density: f32, lives: Lives) -> Self {
        Self {
            width,
            height,
            density,
            lives,
            zen: false,
        }
    }

    pub const fn with_zen(self, zen: bool) -> Self {
        Self { zen, ..self }
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    /// Bombs placed for these settings, `floor(width * height * density)`.
    pub fn bomb_count(&self) -> CellCount {
        (f32::from(self.total_cells()) * self.density).floor() as CellCount
    }

    pub fn validate(&self) -> Result<()> {
        let sizes = MIN_SIZE..=MAX_SIZE;
        if !sizes.contains(&self.width) {
            return Err(GameError::InvalidWidth(self.width));
        }
        if !sizes.contains(&self.height) {
            return Err(GameError::InvalidHeight(self.height));
        }
        validate_density(self.density)?;
        if self.lives < 1 {
            return Err(GameError::InvalidLives(self.lives));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(WIDTH_DEFAULT, HEIGHT_DEFAULT, DENSITY_DEFAULT, LIVES_DEFAULT)
    }
}

/// NaN fails the range check as well.
pub(crate) fn validate_density(density: f32) -> Result<f32> {
    if (DENSITY_MIN..=DENSITY_MAX).contains(&density) {
        Ok(density)
    } else {
        Err(GameError::InvalidDensity(density))
    }
}

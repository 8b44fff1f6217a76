use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::CellCount;

pub type Neighbours = SmallVec<[CellCount; 8]>;

/// Player-visible state of one cell, as polled by a front-end.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Revealed(u8),
    Bomb,
    OutOfBounds,
}

/// Arena entry of a [`Grid`](crate::Grid). Only built through the grid constructors, which keep every neighbour
/// index inside the arena.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub(crate) is_hidden: bool,
    pub(crate) is_bomb: bool,
    pub(crate) neighbours: Neighbours,
}

impl Cell {
    pub(crate) fn new(neighbours: Neighbours) -> Self {
        Self {
            is_hidden: true,
            is_bomb: false,
            neighbours,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    pub fn is_bomb(&self) -> bool {
        self.is_bomb
    }

    pub fn neighbours(&self) -> &[CellCount] {
        &self.neighbours
    }
}

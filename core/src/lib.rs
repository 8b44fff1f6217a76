//! Minesweeper game model: a fixed-size grid with random bomb placement, flood-fill reveals and a game that
//! tracks lives and decides when the player has won or lost.
//!
//! Front-ends own a [`Game`], call [`Game::reveal_cell`] on input and poll [`Game::cell_state_at`] and
//! [`Game::state`] to render.

pub use cell::*;
pub use error::*;
pub use game::*;
pub use grid::*;
pub use settings::*;
pub use types::*;

mod cell;
mod error;
mod game;
mod grid;
mod settings;
mod types;

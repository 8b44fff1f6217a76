use core::num::Saturating;

use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::settings::validate_density;
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Active,
    Lost,
    Won,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game of Minesweeper: a grid plus the tallies that decide winning and losing.
///
/// The game owns its grid and its random source. Starting over replaces both the bomb layout and the counters
/// in one step.
#[derive(Clone, Debug)]
pub struct Game {
    settings: Settings,
    grid: Grid,
    bombs_triggered: Saturating<CellCount>,
    safe_reveals: Saturating<CellCount>,
    state: GameState,
    rng: SmallRng,
}

impl Game {
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_rng(settings, SmallRng::from_os_rng())
    }

    /// Same as [`Game::new`], but every bomb layout is reproducible from `seed`.
    pub fn with_seed(settings: Settings, seed: u64) -> Result<Self> {
        Self::with_rng(settings, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(settings: Settings, mut rng: SmallRng) -> Result<Self> {
        let mut grid = Grid::new(&settings)?;
        grid.place_bombs(&mut rng);
        Ok(Self::from_parts(settings, grid, rng))
    }

    /// A game with bombs at exactly `bombs`. Later restarts go back to random placement.
    pub fn from_layout(settings: Settings, bombs: &[Coord2]) -> Result<Self> {
        let grid = Grid::from_bombs(&settings, bombs)?;
        Ok(Self::from_parts(settings, grid, SmallRng::from_os_rng()))
    }

    fn from_parts(settings: Settings, grid: Grid, rng: SmallRng) -> Self {
        let game = Self {
            settings,
            grid,
            bombs_triggered: Saturating(0),
            safe_reveals: Saturating(0),
            state: GameState::Active,
            rng,
        };
        game.log_new_game();
        game
    }

    /// Applies `settings` and starts over on a freshly built grid.
    ///
    /// Invalid settings are rejected before anything changes, the running game stays as it was.
    pub fn new_game(&mut self, settings: Settings) -> Result<()> {
        let mut grid = Grid::new(&settings)?;
        grid.place_bombs(&mut self.rng);
        self.reset(settings, grid);
        Ok(())
    }

    /// Starts over with the current settings and a new bomb layout.
    pub fn restart(&mut self) -> Result<()> {
        self.new_game(self.settings)
    }

    fn reset(&mut self, settings: Settings, grid: Grid) {
        self.settings = settings;
        self.grid = grid;
        self.bombs_triggered = Saturating(0);
        self.safe_reveals = Saturating(0);
        self.state = GameState::Active;
        self.log_new_game();
    }

    fn log_new_game(&self) {
        log::debug!(
            "New game: {}x{}, {} bombs, {} lives{}",
            self.grid.width(),
            self.grid.height(),
            self.grid.bomb_count(),
            self.settings.lives,
            if self.settings.zen { ", zen" } else { "" }
        );
    }

    /// Changes the density used by the next [`Game::restart`], the running grid keeps its bombs.
    pub fn set_density(&mut self, density: f32) -> Result<()> {
        self.settings.density = validate_density(density)?;
        Ok(())
    }

    pub fn reveal_cell(&mut self, x: Coord, y: Coord) -> RevealOutcome {
        if self.state.is_finished() && !self.settings.zen {
            return RevealOutcome::NoChange;
        }

        let outcome = self.grid.reveal_at(x, y);
        match outcome {
            RevealOutcome::NoChange => return outcome,
            RevealOutcome::Bomb => self.bombs_triggered += 1,
            RevealOutcome::Revealed(count) => self.safe_reveals += count,
        }
        self.update_state();
        outcome
    }

    fn update_state(&mut self) {
        let next_state = if !self.settings.zen && self.lives_remaining() < 1 {
            GameState::Lost
        } else if self.safe_cells_remaining() == 0 {
            GameState::Won
        } else {
            GameState::Active
        };

        if next_state != self.state {
            log::debug!(
                "Game state {:?} -> {:?} ({} safe reveals, {} bombs triggered)",
                self.state,
                next_state,
                self.safe_reveals.0,
                self.bombs_triggered.0
            );
            self.state = next_state;
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_finished()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> Coord {
        self.grid.width()
    }

    pub fn height(&self) -> Coord {
        self.grid.height()
    }

    pub fn cell_count(&self) -> CellCount {
        self.grid.cell_count()
    }

    pub fn bomb_count(&self) -> CellCount {
        self.grid.bomb_count()
    }

    pub fn bombs_triggered(&self) -> CellCount {
        self.bombs_triggered.0
    }

    pub fn safe_reveals(&self) -> CellCount {
        self.safe_reveals.0
    }

    pub fn max_lives(&self) -> Lives {
        self.settings.lives
    }

    /// Negative once a zen game has triggered more bombs than it had lives.
    pub fn lives_remaining(&self) -> i32 {
        i32::from(self.settings.lives) - i32::from(self.bombs_triggered.0)
    }

    pub fn safe_cells_remaining(&self) -> CellCount {
        (Saturating(self.grid.safe_cell_count()) - self.safe_reveals).0
    }

    pub fn cell_state(&self, index: CellCount) -> CellState {
        self.grid.cell_state(index)
    }

    pub fn cell_state_at(&self, x: Coord, y: Coord) -> CellState {
        self.grid.cell_state_at(x, y)
    }

    pub fn index_of(&self, x: Coord, y: Coord) -> Option<CellCount> {
        self.grid.index_of(x, y)
    }

    pub fn neighbours_of(&self, x: Coord, y: Coord) -> &[CellCount] {
        self.grid.neighbours_of(x, y)
    }

    pub fn bomb_indices(&self) -> Vec<CellCount> {
        self.grid.bomb_indices()
    }

    pub fn snapshot(&self) -> Array2<CellState> {
        self.grid.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: Coord2, lives: Lives, bombs: &[Coord2]) -> Game {
        Game::from_layout(Settings::new(size.0, size.1, 0.0, lives), bombs).unwrap()
    }

    #[test]
    fn empty_board_is_won_in_one_reveal() {
        let mut game = Game::with_seed(Settings::new(5, 5, 0.0, 1), 1).unwrap();

        assert_eq!(game.reveal_cell(2, 2), RevealOutcome::Revealed(25));
        assert_eq!(game.safe_reveals(), 25);
        assert_eq!(game.state(), GameState::Won);
        assert!(game.is_over());
    }

    #[test]
    fn construction_rejects_narrow_grid() {
        let err = Game::new(Settings::new(2, 5, 0.1, 1)).unwrap_err();
        assert_eq!(err, GameError::InvalidWidth(2));
    }

    #[test]
    fn losing_last_life_ends_game() {
        let mut game = layout((3, 3), 2, &[(0, 0), (2, 2)]);

        assert_eq!(game.reveal_cell(0, 0), RevealOutcome::Bomb);
        assert_eq!(game.state(), GameState::Active);
        assert_eq!(game.lives_remaining(), 1);

        assert_eq!(game.reveal_cell(2, 2), RevealOutcome::Bomb);
        assert_eq!(game.state(), GameState::Lost);
        assert_eq!(game.bombs_triggered(), 2);

        assert_eq!(game.reveal_cell(1, 1), RevealOutcome::NoChange);
        assert_eq!(game.cell_state_at(1, 1), CellState::Hidden);
    }

    #[test]
    fn revealing_every_safe_cell_wins_with_lives_left() {
        let mut game = layout((3, 3), 2, &[(0, 0)]);

        game.reveal_cell(0, 0);
        for y in 0..3 {
            for x in 0..3 {
                game.reveal_cell(x, y);
            }
        }

        assert_eq!(game.safe_cells_remaining(), 0);
        assert_eq!(game.state(), GameState::Won);
        assert_eq!(game.lives_remaining(), 1);
    }

    #[test]
    fn safe_cells_remaining_counts_down() {
        let mut game = layout((3, 3), 1, &[(0, 0)]);
        assert_eq!(game.safe_cells_remaining(), 8);

        assert_eq!(game.reveal_cell(1, 1), RevealOutcome::Revealed(1));
        assert_eq!(game.safe_reveals(), 1);
        assert_eq!(game.safe_cells_remaining(), 7);
        assert_eq!(game.bombs_triggered(), 0);
    }

    #[test]
    fn zen_mode_never_loses() {
        let settings = Settings::new(3, 3, 0.0, 1).with_zen(true);
        let mut game = Game::from_layout(settings, &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(game.reveal_cell(0, 0), RevealOutcome::Bomb);
        assert_eq!(game.reveal_cell(2, 2), RevealOutcome::Bomb);
        assert_eq!(game.state(), GameState::Active);
        assert_eq!(game.lives_remaining(), -1);

        assert_eq!(game.reveal_cell(1, 1), RevealOutcome::Revealed(1));
        assert_eq!(game.state(), GameState::Active);
    }

    #[test]
    fn zen_mode_keeps_revealing_after_win() {
        let settings = Settings::new(3, 3, 0.0, 1).with_zen(true);
        let mut game = Game::from_layout(settings, &[(0, 0)]).unwrap();

        for (x, y) in [(1, 0), (2, 0), (0, 1), (1, 1), (0, 2)] {
            game.reveal_cell(x, y);
        }
        assert_eq!(game.state(), GameState::Won);

        assert_eq!(game.reveal_cell(0, 0), RevealOutcome::Bomb);
        assert_eq!(game.state(), GameState::Won);
        assert_eq!(game.bombs_triggered(), 1);
    }

    #[test]
    fn failed_new_game_keeps_current_game() {
        let mut game = layout((4, 4), 1, &[(3, 3)]);
        game.reveal_cell(0, 0);
        let revealed = game.safe_reveals();

        let err = game.new_game(Settings::new(5, 5, 0.6, 1)).unwrap_err();

        assert_eq!(err, GameError::InvalidDensity(0.6));
        assert_eq!(game.safe_reveals(), revealed);
        assert_eq!(game.width(), 4);
    }

    #[test]
    fn new_game_resets_counters_and_resizes() {
        let mut game = layout((3, 3), 1, &[(0, 0)]);
        game.reveal_cell(0, 0);
        assert_eq!(game.state(), GameState::Lost);

        game.new_game(Settings::new(8, 6, 0.25, 3)).unwrap();

        assert_eq!(game.state(), GameState::Active);
        assert_eq!(game.bombs_triggered(), 0);
        assert_eq!(game.safe_reveals(), 0);
        assert_eq!(game.cell_count(), 48);
        assert_eq!(game.bomb_count(), 12);
        assert_eq!(game.bomb_indices().len(), 12);
        assert_eq!(game.max_lives(), 3);
    }

    #[test]
    fn set_density_applies_on_restart() {
        let mut game = Game::with_seed(Settings::new(10, 10, 0.2, 1), 3).unwrap();

        assert_eq!(game.set_density(0.7), Err(GameError::InvalidDensity(0.7)));
        assert_eq!(game.settings().density, 0.2);

        game.set_density(0.5).unwrap();
        assert_eq!(game.bomb_count(), 20);
        game.restart().unwrap();
        assert_eq!(game.bomb_count(), 50);
        assert_eq!(game.bomb_indices().len(), 50);
    }

    #[test]
    fn seeded_games_share_layout() {
        let settings = Settings::new(16, 16, 0.15, 3);
        let a = Game::with_seed(settings, 42).unwrap();
        let b = Game::with_seed(settings, 42).unwrap();

        assert_eq!(a.bomb_indices(), b.bomb_indices());
    }
}

use std::collections::VecDeque;

use ndarray::Array2;
use rand::Rng;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    /// Number of safe cells newly revealed, flood fill included.
    Revealed(CellCount),
    Bomb,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed(_) => true,
            Bomb => true,
        }
    }
}

/// Fixed-size board stored as a flat row-major arena, `index = y * width + x`.
///
/// Each cell keeps the indices of its neighbours, computed once when the grid is built. The dimensions never
/// change; a different size means a new grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: Coord,
    height: Coord,
    bomb_count: CellCount,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds an all-hidden grid without bombs, call [`Grid::place_bombs`] to lay them out.
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::build(settings.size(), settings.bomb_count()))
    }

    /// Builds a grid with bombs at exactly `bombs`, duplicates are counted once.
    pub fn from_bombs(settings: &Settings, bombs: &[Coord2]) -> Result<Self> {
        settings.validate()?;
        let mut grid = Self::build(settings.size(), 0);

        for &(x, y) in bombs {
            let index = grid.index_of(x, y).ok_or(GameError::InvalidCoords)?;
            grid.cells[usize::from(index)].is_bomb = true;
        }
        grid.bomb_count = grid.cells.iter().filter(|cell| cell.is_bomb).count() as CellCount;

        Ok(grid)
    }

    fn build(size: Coord2, bomb_count: CellCount) -> Self {
        let (width, height) = size;
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|coords| {
                let neighbours = NeighborIter::new(coords, size)
                    .map(|(x, y)| flat_index(width, x, y))
                    .collect();
                Cell::new(neighbours)
            })
            .collect();

        Self {
            width,
            height,
            bomb_count,
            cells,
        }
    }

    /// Hides every cell and places `bomb_count` bombs at distinct random indices.
    ///
    /// Indices are drawn uniformly and redrawn when they already hold a bomb, until the count is reached.
    pub fn place_bombs<R: Rng>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            cell.is_hidden = true;
            cell.is_bomb = false;
        }

        let total = self.cell_count();
        let mut placed: CellCount = 0;
        let mut draws: u32 = 0;
        while placed < self.bomb_count {
            let cell = &mut self.cells[usize::from(rng.random_range(0..total))];
            draws += 1;
            if !cell.is_bomb {
                cell.is_bomb = true;
                placed += 1;
            }
        }

        log::debug!(
            "Placed {} bombs on {}x{} grid in {} draws",
            placed,
            self.width,
            self.height,
            draws
        );
    }

    /// Reveals the cell at `(x, y)`, flooding outwards from cells without neighbouring bombs.
    pub fn reveal_at(&mut self, x: Coord, y: Coord) -> RevealOutcome {
        let Some(index) = self.index_of(x, y) else {
            return RevealOutcome::NoChange;
        };

        let cell = &mut self.cells[usize::from(index)];
        if !cell.is_hidden {
            return RevealOutcome::NoChange;
        }
        cell.is_hidden = false;
        if cell.is_bomb {
            return RevealOutcome::Bomb;
        }

        let mut revealed: CellCount = 1;
        let mut to_visit = VecDeque::from([index]);

        // a cell is queued only at the moment it is revealed, so each one is expanded at most once
        while let Some(visit_index) = to_visit.pop_front() {
            if self.neighbour_bombs(visit_index) != 0 {
                continue;
            }

            let neighbours = self.cells[usize::from(visit_index)].neighbours.clone();
            for neighbour_index in neighbours {
                let neighbour = &mut self.cells[usize::from(neighbour_index)];
                if neighbour.is_hidden {
                    neighbour.is_hidden = false;
                    revealed += 1;
                    to_visit.push_back(neighbour_index);
                }
            }
        }

        log::trace!("Revealed {} cells from ({}, {})", revealed, x, y);
        RevealOutcome::Revealed(revealed)
    }

    pub fn cell_state(&self, index: CellCount) -> CellState {
        let Some(cell) = self.cells.get(usize::from(index)) else {
            return CellState::OutOfBounds;
        };

        match (cell.is_hidden, cell.is_bomb) {
            (true, _) => CellState::Hidden,
            (false, true) => CellState::Bomb,
            (false, false) => CellState::Revealed(self.neighbour_bombs(index)),
        }
    }

    pub fn cell_state_at(&self, x: Coord, y: Coord) -> CellState {
        self.index_of(x, y)
            .map_or(CellState::OutOfBounds, |index| self.cell_state(index))
    }

    /// Number of bombs around the cell at `index`, zero for indices outside the grid.
    pub fn neighbour_bombs(&self, index: CellCount) -> u8 {
        self.cells.get(usize::from(index)).map_or(0, |cell| {
            cell.neighbours
                .iter()
                .filter(|&&neighbour| self.cells[usize::from(neighbour)].is_bomb)
                .count() as u8
        })
    }

    /// Neighbour indices of `(x, y)`, empty when the coordinates are outside the grid.
    pub fn neighbours_of(&self, x: Coord, y: Coord) -> &[CellCount] {
        match self.index_of(x, y) {
            Some(index) => self.cells[usize::from(index)].neighbours(),
            None => &[],
        }
    }

    pub fn index_of(&self, x: Coord, y: Coord) -> Option<CellCount> {
        if x < self.width && y < self.height {
            Some(flat_index(self.width, x, y))
        } else {
            None
        }
    }

    pub fn coords_of(&self, index: CellCount) -> Option<Coord2> {
        if index < self.cell_count() {
            let width = CellCount::from(self.width);
            Some(((index % width) as Coord, (index / width) as Coord))
        } else {
            None
        }
    }

    /// Indices of every bomb, in ascending order.
    pub fn bomb_indices(&self) -> Vec<CellCount> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_bomb)
            .map(|(index, _)| index as CellCount)
            .collect()
    }

    /// Number of safe cells currently revealed.
    pub fn revealed_safe_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| !cell.is_hidden && !cell.is_bomb)
            .count() as CellCount
    }

    /// Player-visible board indexed `[y, x]`. The standard layout matches the cell index order.
    pub fn snapshot(&self) -> Array2<CellState> {
        Array2::from_shape_fn(
            (usize::from(self.height), usize::from(self.width)),
            |(y, x)| self.cell_state(flat_index(self.width, x as Coord, y as Coord)),
        )
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn width(&self) -> Coord {
        self.width
    }

    pub fn height(&self) -> Coord {
        self.height
    }

    pub fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub fn cell_count(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn bomb_count(&self) -> CellCount {
        self.bomb_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.cell_count() - self.bomb_count
    }
}

const fn flat_index(width: Coord, x: Coord, y: Coord) -> CellCount {
    (y as CellCount) * (width as CellCount) + (x as CellCount)
}

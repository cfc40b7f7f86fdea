use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::{patterns::Pattern, types::CellPos};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    Empty { width: usize, height: usize },
    #[error("grid of {width}x{height} cells is too large to allocate")]
    TooLarge { width: usize, height: usize },
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

/// One grid cell.
///
/// `next` is scratch space for [`crate::step::advance`]; it only carries
/// meaning between the staging and commit passes of a single step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub alive: bool,
    pub next: bool,
}

/// Fixed-size dense Game of Life board, stored row-major.
///
/// Coordinates are `(x, y)` with `0 <= x < width` and `0 <= y < height`.
/// The dimensions never change after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-dead grid.
    ///
    /// ### Panics
    /// Panics if either dimension is zero or the cell count overflows; see
    /// [`Grid::try_new`].
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Ok(grid) => grid,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(GridError::TooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        })
    }

    /// Builds a grid with the given cells alive, all others dead.
    ///
    /// ### Panics
    /// Panics if any position is out of range.
    pub fn with_alive(width: usize, height: usize, alive: &[CellPos]) -> Self {
        let mut grid = Self::new(width, height);
        for &(x, y) in alive {
            grid.set(x, y, true);
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if self.contains(x, y) {
            Ok(y * self.width + x)
        } else {
            Err(GridError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Index for callers that have already established the range contract.
    /// An out-of-range coordinate here is a bug in the caller.
    #[inline]
    fn checked_index(&self, x: usize, y: usize) -> usize {
        match self.index(x, y) {
            Ok(i) => i,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_get(&self, x: usize, y: usize) -> Result<bool, GridError> {
        self.index(x, y).map(|i| self.cells[i].alive)
    }

    pub fn try_set(&mut self, x: usize, y: usize, alive: bool) -> Result<(), GridError> {
        let i = self.index(x, y)?;
        self.cells[i].alive = alive;
        Ok(())
    }

    /// Whether the cell at `(x, y)` is alive.
    ///
    /// ### Panics
    /// Panics if `(x, y)` is outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[self.checked_index(x, y)].alive
    }

    /// Sets the cell at `(x, y)`; no other cell is touched.
    ///
    /// ### Panics
    /// Panics if `(x, y)` is outside the grid.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        let i = self.checked_index(x, y);
        self.cells[i].alive = alive;
    }

    /// Flips the cell at `(x, y)` and returns its new state.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let i = self.checked_index(x, y);
        self.cells[i].alive = !self.cells[i].alive;
        self.cells[i].alive
    }

    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
        debug!(width = self.width, height = self.height, "grid cleared");
    }

    /// Sets a random subset of cells alive.
    ///
    /// Draws `floor(width * height * density)` uniform coordinate pairs with
    /// replacement and sets each one alive. Repeated draws land on cells that
    /// are already alive, so the resulting population is usually below the
    /// draw count. Cells that were alive before stay alive.
    ///
    /// ### Parameters
    /// - `density` - Draw count as a fraction of the cell count, clamped to `[0, 1]`.
    /// - `rng` - Source of coordinates.
    ///
    /// ### Returns
    /// The number of coordinate pairs drawn.
    pub fn randomize(&mut self, density: f32, rng: &mut impl Rng) -> usize {
        let draws = ((self.cells.len() as f64) * f64::from(density.clamp(0.0, 1.0))) as usize;
        for _ in 0..draws {
            let x = rng.random_range(0..self.width);
            let y = rng.random_range(0..self.height);
            self.set(x, y, true);
        }
        debug!(draws, population = self.population(), "grid randomized");
        draws
    }

    /// Writes `pattern` with its top-left corner at `(x, y)`.
    ///
    /// Dead template cells overwrite live grid cells. Nothing is written if
    /// the template would cross the right or bottom edge.
    ///
    /// ### Returns
    /// `true` if the pattern was written.
    pub fn stamp(&mut self, pattern: &Pattern, x: usize, y: usize) -> bool {
        let fits = x
            .checked_add(pattern.width())
            .zip(y.checked_add(pattern.height()))
            .is_some_and(|(right, bottom)| right <= self.width && bottom <= self.height);
        if !fits {
            debug!(pattern = pattern.name, x, y, "stamp rejected: template leaves the grid");
            return false;
        }

        for (dx, dy, alive) in pattern.cells() {
            self.set(x + dx, y + dy, alive);
        }
        debug!(pattern = pattern.name, x, y, "pattern stamped");
        true
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.alive).count()
    }

    /// Positions of all alive cells in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = CellPos> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| if c.alive { Some((i % w, i / w)) } else { None })
    }
}

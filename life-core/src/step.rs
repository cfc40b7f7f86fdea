//! Generation update for the Game of Life.
//!
//! A step runs in two passes over the grid:
//! 1. Stage: every cell's next state is computed from the current `alive`
//!    flags only and written to [`Cell::next`].
//! 2. Commit: every `next` flag is copied into `alive`.
//!
//! No neighbour count ever observes a cell that has already advanced.
//! The board is bounded: cells past the edges do not exist and count as
//! nothing, so corner cells have at most 3 neighbours and edge cells at
//! most 5.

use tracing::trace;

use crate::grid::{Cell, Grid};

/// Counts the alive cells adjacent to `(x, y)`.
///
/// Scans the 3x3 block centred on the cell, clipped to the grid, then
/// removes the centre cell's own contribution.
///
/// ### Panics
/// Panics if `(x, y)` is outside the grid.
pub fn live_neighbours(grid: &Grid, x: usize, y: usize) -> u8 {
    assert!(
        grid.contains(x, y),
        "cell ({x}, {y}) is outside the {}x{} grid",
        grid.width(),
        grid.height()
    );
    count_neighbours(grid.cells(), grid.width(), grid.height(), x, y)
}

/// Neighbour count over row-major `cells`; reads `alive` only.
fn count_neighbours(cells: &[Cell], width: usize, height: usize, x: usize, y: usize) -> u8 {
    let x_end = (x + 1).min(width - 1);
    let y_end = (y + 1).min(height - 1);

    let mut count: u8 = 0;
    for j in y.saturating_sub(1)..=y_end {
        for i in x.saturating_sub(1)..=x_end {
            if cells[j * width + i].alive {
                count += 1;
            }
        }
    }

    if cells[y * width + x].alive { count - 1 } else { count }
}

/// Conway's B3/S23 rule as an ordered case analysis.
#[inline]
pub fn next_state(alive: bool, neighbours: u8) -> bool {
    match (alive, neighbours) {
        // Underpopulation.
        (true, n) if n < 2 => false,
        // Overpopulation.
        (true, n) if n > 3 => false,
        (true, _) => true,
        // Birth.
        (false, 3) => true,
        (false, _) => false,
    }
}

/// Advances `grid` by one generation in place.
///
/// ### Returns
/// The number of cells whose state changed. Zero means the grid is a
/// still life (or empty).
pub fn advance(grid: &mut Grid) -> usize {
    let (w, h) = (grid.width(), grid.height());
    let cells = grid.cells_mut();

    // Stage: only `next` is written, so later counts still see this generation.
    for y in 0..h {
        for x in 0..w {
            let n = count_neighbours(cells, w, h, x, y);
            let cell = &mut cells[y * w + x];
            cell.next = next_state(cell.alive, n);
        }
    }

    let changed: usize = cells.iter_mut().map(|cell| usize::from(commit(cell))).sum();

    trace!(changed, "generation advanced");
    changed
}

/// Moves the staged state into `alive`; returns whether it changed.
#[inline]
fn commit(cell: &mut Cell) -> bool {
    let changed = cell.alive != cell.next;
    cell.alive = cell.next;
    cell.next = false;
    changed
}

/// Returns the generation after `grid`, leaving `grid` untouched.
pub fn step(grid: &Grid) -> Grid {
    let mut next = grid.clone();
    advance(&mut next);
    next
}

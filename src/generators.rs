use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::cells::{CellState, Position};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::{ColumnsCount, OpenRatio, RowsCount};

/// A reproducible generator when given a seed, otherwise one seeded from the OS.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Fill a grid with cells that are each open with probability `open_ratio`.
///
/// The ratio is clamped to 0..=1. The start and goal cells are always opened, so any
/// blocking happens along the way. Fails if the grid is too large to index.
pub fn random_grid<R: Rng>(rows: RowsCount,
                           columns: ColumnsCount,
                           open_ratio: OpenRatio,
                           rng: &mut R)
                           -> Result<Grid> {

    let probability = if open_ratio.0.is_nan() { 0.0 } else { open_ratio.0.max(0.0).min(1.0) };
    let mut grid = Grid::new(rows, columns)?;

    for row in 0..rows.0 {
        for column in 0..columns.0 {
            if rng.gen_bool(probability) {
                grid.set_cell(Position::new(row, column), CellState::Open);
            }
        }
    }

    let start = grid.start();
    grid.set_cell(start, CellState::Open);
    if let Some(goal) = grid.goal() {
        grid.set_cell(goal, CellState::Open);
    }

    debug!("Generated a {}x{} grid with {} open cells",
           rows.0, columns.0, grid.open_cells_count());
    Ok(grid)
}

use std::path::Path;

use image::DynamicImage;
use log::info;

use crate::cells::{CellState, Position};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::{ColumnsCount, RowsCount};

/// Pixels darker than this are blocked cells.
const OPEN_LUMA_THRESHOLD: u8 = 128;

/// Build a grid with one cell per pixel, rows down the image and columns across it.
///
/// Dark pixels (luma below 128) are blocked, everything else is open.
pub fn grid_from_image(data_image: &DynamicImage) -> Result<Grid> {

    let gray_scale_image = data_image.to_luma8();
    let (w, h) = gray_scale_image.dimensions();
    let mut grid = Grid::new(RowsCount(h as usize), ColumnsCount(w as usize))?;

    for (x, y, pixel) in gray_scale_image.enumerate_pixels() {
        let gray_scale_value = pixel.0[0];
        if gray_scale_value >= OPEN_LUMA_THRESHOLD {
            grid.set_cell(Position::new(y as usize, x as usize), CellState::Open);
        }
    }

    Ok(grid)
}

pub fn load_grid_image<P: AsRef<Path>>(file_path: P) -> Result<Grid> {
    let file_path = file_path.as_ref();
    let img = image::open(file_path)
        .chain_err(|| format!("Failed to load maze image {}", file_path.display()))?;
    let grid = grid_from_image(&img)?;
    info!("Loaded a {}x{} grid from {} with {} open cells",
          grid.rows().0, grid.columns().0, file_path.display(), grid.open_cells_count());
    Ok(grid)
}

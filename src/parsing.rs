//! Loading grids from the driver's text format.
//!
//! The first line holds the dimensions `n m`, the next `n` lines hold `m` cell
//! values each, 0 for blocked and 1 for open:
//!
//! ```text
//! 3 3
//! 1 0 0
//! 1 1 0
//! 0 1 1
//! ```
//!
//! Blank lines are skipped. Anything malformed is rejected here, before a search
//! ever sees the grid.

use std::io::Read;

use error_chain::bail;
use log::debug;

use crate::cells::{CellState, CellValue};
use crate::errors::*;
use crate::grid::Grid;


pub fn read_grid<R: Read>(mut reader: R) -> Result<Grid> {
    let mut text = String::new();
    reader.read_to_string(&mut text).chain_err(|| "Failed to read the grid")?;
    parse_grid(&text)
}

pub fn parse_grid(input: &str) -> Result<Grid> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|&(_, line)| !line.is_empty());

    let (line_number, dimensions_line) = lines.next().ok_or(ErrorKind::MissingDimensions)?;
    let dimensions = dimensions_line.split_whitespace().collect::<Vec<_>>();
    if dimensions.len() != 2 {
        bail!(ErrorKind::MalformedDimensions(line_number, dimensions_line.to_string()));
    }
    let rows = parse_dimension(line_number, dimensions[0])?;
    let columns = parse_dimension(line_number, dimensions[1])?;
    debug!("Reading a {}x{} grid", rows, columns);

    // `rows` is unchecked input, it only bounds the loop.
    let mut values = Vec::new();
    for row_index in 0..rows {
        let (_, line) = lines.next().ok_or(ErrorKind::MissingRows(rows, row_index))?;
        let row = line
            .split_whitespace()
            .enumerate()
            .map(|(column_index, token)| parse_cell(row_index, column_index, token))
            .collect::<Result<Vec<CellValue>>>()?;
        if row.len() != columns {
            bail!(ErrorKind::RowLength(row_index, columns, row.len()));
        }
        values.push(row);
    }

    if let Some((line_number, _)) = lines.next() {
        bail!(ErrorKind::TrailingRows(line_number));
    }

    Grid::from_values(&values)
}

fn parse_dimension(line_number: usize, token: &str) -> Result<usize> {
    match token.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => bail!(ErrorKind::InvalidDimension(line_number, token.to_string())),
    }
}

fn parse_cell(row: usize, column: usize, token: &str) -> Result<CellValue> {
    token
        .parse::<CellValue>()
        .ok()
        .and_then(CellState::from_value)
        .map(CellState::value)
        .ok_or_else(|| ErrorKind::InvalidCell(row, column, token.to_string()).into())
}

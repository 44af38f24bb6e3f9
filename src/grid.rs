use bit_set::BitSet;
use error_chain::bail;
use std::fmt;

use crate::cells::{CellState, CellValue, Move, Position, PositionSmallVec};
use crate::errors::*;
use crate::units::{ColumnsCount, RowsCount};


/// A rectangular maze of open and blocked cells.
///
/// Only the open cells are stored, as bits in row-major order.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    open_cells: BitSet,
    rows: usize,
    columns: usize,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {:?}, columns: {:?}, open cells: {:?}",
               self.rows, self.columns, self.open_cells_count())
    }
}

impl Grid {
    /// A grid where every cell is blocked.
    ///
    /// Fails if `rows * columns` cells cannot be indexed.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Grid> {
        if rows.0.checked_mul(columns.0).is_none() {
            bail!(ErrorKind::GridTooLarge(rows.0, columns.0));
        }
        // The bit set grows as cells open, the dimensions alone reserve nothing.
        Ok(Grid {
            open_cells: BitSet::new(),
            rows: rows.0,
            columns: columns.0,
        })
    }

    /// A grid where every cell is open.
    pub fn open(rows: RowsCount, columns: ColumnsCount) -> Result<Grid> {
        let mut grid = Grid::new(rows, columns)?;
        for index in 0..grid.size() {
            grid.open_cells.insert(index);
        }
        Ok(grid)
    }

    /// Build a grid from rows of 0 (blocked) / 1 (open) values.
    ///
    /// Every row must be as long as the first one.
    pub fn from_values(values: &[Vec<CellValue>]) -> Result<Grid> {
        let rows = values.len();
        let columns = values.first().map_or(0, |row| row.len());
        let mut grid = Grid::new(RowsCount(rows), ColumnsCount(columns))?;

        for (row_index, row) in values.iter().enumerate() {
            if row.len() != columns {
                bail!(ErrorKind::RowLength(row_index, columns, row.len()));
            }
            for (column_index, &value) in row.iter().enumerate() {
                let state = CellState::from_value(value)
                    .ok_or_else(|| ErrorKind::InvalidCell(row_index, column_index, value.to_string()))?;
                grid.set_cell(Position::new(row_index, column_index), state);
            }
        }

        Ok(grid)
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.rows)
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.columns)
    }

    /// Never overflows, `new` rejects dimensions whose product does.
    #[inline]
    pub fn size(&self) -> usize {
        self.rows * self.columns
    }

    /// A grid with zero rows or zero columns has no cells at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    #[inline]
    pub fn open_cells_count(&self) -> usize {
        self.open_cells.len()
    }

    /// Is the position within the grid's dimensions
    #[inline]
    pub fn is_valid_position(&self, position: Position) -> bool {
        position.row < self.rows && position.column < self.columns
    }

    /// The state of the cell at `position`, None if it is off the grid.
    #[inline]
    pub fn cell(&self, position: Position) -> Option<CellState> {
        self.position_to_index(position).map(|index| {
            if self.open_cells.contains(index) {
                CellState::Open
            } else {
                CellState::Blocked
            }
        })
    }

    #[inline]
    pub fn is_open(&self, position: Position) -> bool {
        self.cell(position).map_or(false, CellState::is_open)
    }

    /// Returns false, changing nothing, if the position is off the grid.
    pub fn set_cell(&mut self, position: Position, state: CellState) -> bool {
        if let Some(index) = self.position_to_index(position) {
            match state {
                CellState::Open => self.open_cells.insert(index),
                CellState::Blocked => self.open_cells.remove(index),
            };
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn start(&self) -> Position {
        Position::origin()
    }

    /// The bottom-right cell, None for an empty grid.
    pub fn goal(&self) -> Option<Position> {
        if self.is_empty() {
            None
        } else {
            Some(Position::new(self.rows - 1, self.columns - 1))
        }
    }

    #[inline]
    pub fn is_goal(&self, position: Position) -> bool {
        self.goal() == Some(position)
    }

    /// Positions reachable by one move from `position` that lie within the grid,
    /// open or not, in exploration order.
    pub fn neighbours(&self, position: Position) -> PositionSmallVec {
        Move::EXPLORATION_ORDER
            .iter()
            .map(|&mv| position.step(mv))
            .filter(|&next| self.is_valid_position(next))
            .collect()
    }

    /// All positions, row-major.
    pub fn iter(&self) -> impl Iterator<Item = Position> {
        let columns = self.columns;
        (0..self.size()).map(move |index| Position::new(index / columns, index % columns))
    }

    #[inline]
    fn position_to_index(&self, position: Position) -> Option<usize> {
        if self.is_valid_position(position) {
            Some(position.row * self.columns + position.column)
        } else {
            None
        }
    }
}

/// Writes the grid in the text format the driver reads: `n m` then one line of values per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} {}", self.rows, self.columns)?;
        for row in 0..self.rows {
            for column in 0..self.columns {
                if column > 0 {
                    write!(f, " ")?;
                }
                let state = self.cell(Position::new(row, column)).unwrap_or(CellState::Blocked);
                write!(f, "{}", state.value())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

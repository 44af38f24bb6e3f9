use crate::cells::{CellState, Position};
use crate::grid::Grid;
use crate::grid_traits::GridDisplay;
use crate::utils::{self, FnvHashSet};

const WALL_LR_3: &str = "───";
const WALL_UD: &str = "│";
const WALL_RD: &str = "┌";
const WALL_LD: &str = "┐";
const WALL_RU: &str = "└";
const WALL_LU: &str = "┘";
const BLOCKED_CELL: &str = "▓▓▓";
const EMPTY_CELL: &str = "   ";


#[derive(Debug)]
pub struct PathDisplay {
    on_path_positions: FnvHashSet<Position>,
}
impl PathDisplay {
    pub fn new(route: &[Position]) -> Self {
        let mut on_path_positions = utils::fnv_hashset(route.len());
        on_path_positions.extend(route.iter().cloned());
        PathDisplay { on_path_positions }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, position: Position) -> String {
        if self.on_path_positions.contains(&position) {
            String::from(" . ")
        } else {
            String::from(EMPTY_CELL)
        }
    }
}


#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start: Position,
    end: Option<Position>,
}
impl StartEndPointsDisplay {
    pub fn new(start: Position, end: Option<Position>) -> StartEndPointsDisplay {
        StartEndPointsDisplay { start, end }
    }

    pub fn for_grid(grid: &Grid) -> StartEndPointsDisplay {
        StartEndPointsDisplay::new(grid.start(), grid.goal())
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, position: Position) -> String {
        if position == self.start {
            String::from(" S ")
        } else if Some(position) == self.end {
            String::from(" E ")
        } else {
            String::from(EMPTY_CELL)
        }
    }
}


/// Draw the grid inside a box, one 3 character body per cell.
///
/// Blocked cells are shaded, open cells show whatever `display` renders for them.
pub fn render_grid(grid: &Grid, display: Option<&dyn GridDisplay>) -> String {
    let columns = grid.columns().0;
    let rows = grid.rows().0;

    let mut output = String::from(WALL_RD);
    output.push_str(&WALL_LR_3.repeat(columns));
    output.push_str(WALL_LD);
    output.push('\n');

    for row in 0..rows {
        output.push_str(WALL_UD);
        for column in 0..columns {
            let position = Position::new(row, column);
            match grid.cell(position) {
                Some(CellState::Open) => {
                    if let Some(displayer) = display {
                        output.push_str(&displayer.render_cell_body(position));
                    } else {
                        output.push_str(EMPTY_CELL);
                    }
                }
                _ => output.push_str(BLOCKED_CELL),
            }
        }
        output.push_str(WALL_UD);
        output.push('\n');
    }

    output.push_str(WALL_RU);
    output.push_str(&WALL_LR_3.repeat(columns));
    output.push_str(WALL_LU);
    output.push('\n');
    output
}

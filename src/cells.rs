use smallvec::SmallVec;
use std::fmt;

/// The integer a cell holds in the text grid format.
pub type CellValue = u8;

/// At most the Right and Down successors of a position.
pub type PositionSmallVec = SmallVec<[Position; 2]>;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellState {
    Blocked,
    Open,
}

impl CellState {
    pub const BLOCKED_VALUE: CellValue = 0;
    pub const OPEN_VALUE: CellValue = 1;

    /// Returns None unless the value is exactly 0 or 1.
    pub fn from_value(value: CellValue) -> Option<CellState> {
        match value {
            CellState::BLOCKED_VALUE => Some(CellState::Blocked),
            CellState::OPEN_VALUE => Some(CellState::Open),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn value(self) -> CellValue {
        match self {
            CellState::Blocked => CellState::BLOCKED_VALUE,
            CellState::Open => CellState::OPEN_VALUE,
        }
    }

    #[inline(always)]
    pub fn is_open(self) -> bool {
        self == CellState::Open
    }
}

/// A (row, column) grid position. Rows grow downward, columns grow rightward.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Position {
        Position { row, column }
    }

    /// The top-left cell.
    pub fn origin() -> Position {
        Position::new(0, 0)
    }

    /// A new position one cell away in the direction of `mv`.
    ///
    /// The result may lie outside the grid, it is the grid's job to reject it.
    #[inline]
    pub fn step(self, mv: Move) -> Position {
        match mv {
            Move::Right => Position { column: self.column + 1, ..self },
            Move::Down => Position { row: self.row + 1, ..self },
        }
    }

    /// The move leading from `self` to an adjacent `next`, if there is one.
    pub fn move_to(self, next: Position) -> Option<Move> {
        Move::EXPLORATION_ORDER
            .iter()
            .cloned()
            .find(|&mv| self.step(mv) == next)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.row, self.column)
    }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub enum Move {
    Right,
    Down,
}

impl Move {
    /// Successors are always explored in this order, which fixes the order paths are discovered in.
    pub const EXPLORATION_ORDER: [Move; 2] = [Move::Right, Move::Down];
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Move::Right => write!(f, "Right"),
            Move::Down => write!(f, "Down"),
        }
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn cell_state_values() {
        assert_eq!(CellState::from_value(0), Some(CellState::Blocked));
        assert_eq!(CellState::from_value(1), Some(CellState::Open));
        assert_eq!(CellState::from_value(2), None);
        assert_eq!(CellState::from_value(255), None);
        assert_eq!(CellState::Open.value(), 1);
        assert_eq!(CellState::Blocked.value(), 0);
        assert!(CellState::Open.is_open());
        assert!(!CellState::Blocked.is_open());
    }

    #[test]
    fn steps_build_new_positions() {
        let p = Position::new(2, 3);
        assert_eq!(p.step(Move::Right), Position::new(2, 4));
        assert_eq!(p.step(Move::Down), Position::new(3, 3));
        // stepping leaves the source position alone
        assert_eq!(p, Position::new(2, 3));
    }

    #[test]
    fn move_between_positions() {
        let p = Position::new(1, 1);
        assert_eq!(p.move_to(Position::new(1, 2)), Some(Move::Right));
        assert_eq!(p.move_to(Position::new(2, 1)), Some(Move::Down));
        assert_eq!(p.move_to(Position::new(0, 1)), None);
        assert_eq!(p.move_to(Position::new(2, 2)), None);
        assert_eq!(p.move_to(p), None);
    }

    #[test]
    fn right_is_explored_before_down() {
        assert_eq!(Move::EXPLORATION_ORDER, [Move::Right, Move::Down]);
    }

    #[test]
    fn position_display() {
        assert_eq!(Position::new(2, 1).to_string(), "(2,1)");
        assert_eq!(Position::origin().to_string(), "(0,0)");
    }
}

//! Backtracking enumeration of every monotone path through a grid maze.
//!
//! A path starts at the top-left cell, ends at the bottom-right cell and only
//! ever moves Right or Down across open cells. The search extends a single shared
//! [`Path`] on entry to a cell and shrinks it again on exit, so memory stays linear
//! in the path length however many paths there are.
//!
//! Paths are discovered depth first with Right explored before Down. The same
//! order is produced by the recursive [`PathEnumerator`] and by the explicit stack
//! [`Paths`] iterator.

use std::fmt;
use std::iter::FusedIterator;

use itertools::Itertools;
use log::{debug, trace};

use crate::cells::{CellState, CellValue, Move, Position, PositionSmallVec};
use crate::grid::Grid;


/// The cells visited from the start up to the current search frame.
///
/// Alongside the cell values the route of positions is kept, so two routes with
/// the same values remain distinguishable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    values: Vec<CellValue>,
    route: Vec<Position>,
}

impl Path {
    pub fn new() -> Path {
        Path::default()
    }

    pub fn with_capacity(capacity: usize) -> Path {
        Path {
            values: Vec::with_capacity(capacity),
            route: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    fn push(&mut self, position: Position, value: CellValue) {
        self.values.push(value);
        self.route.push(position);
    }

    #[inline]
    fn pop(&mut self) -> Option<Position> {
        self.values.pop();
        self.route.pop()
    }

    #[inline]
    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    #[inline]
    pub fn route(&self) -> &[Position] {
        &self.route
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The current (deepest) position.
    pub fn head(&self) -> Option<Position> {
        self.route.last().cloned()
    }

    /// The moves taken between consecutive cells of the route.
    pub fn moves(&self) -> Vec<Move> {
        self.route
            .iter()
            .tuple_windows()
            .filter_map(|(&from, &to)| from.move_to(to))
            .collect()
    }

    /// The route as `(0,0) → (1,0) → (1,1)`.
    pub fn route_display(&self) -> String {
        self.route.iter().join(" → ")
    }
}

/// Formats the values like `[1, 1, 1]`.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]", self.values.iter().join(", "))
    }
}

/// Why the search turned back before entering a position.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Rejection {
    OutOfBounds,
    Blocked,
}

/// Receives the paths found by a [`PathEnumerator`].
///
/// Only `path_found` is required. The other hooks let a sink observe every step of
/// the search, they are called by the recursive enumerator only.
pub trait PathSink {
    fn path_found(&mut self, path: &Path);

    /// The search stepped onto `position`, which is now the head of `path`.
    fn entered(&mut self, _position: Position, _path: &Path) {}

    /// The search turned back from `position` without entering it.
    fn rejected(&mut self, _position: Position, _reason: Rejection) {}

    /// The search left `position`, `path` no longer contains it.
    fn backtracked(&mut self, _position: Position, _path: &Path) {}
}

impl<F: FnMut(&Path)> PathSink for F {
    fn path_found(&mut self, path: &Path) {
        self(path)
    }
}

/// Keeps a copy of every path found.
#[derive(Debug, Default)]
pub struct PathCollector {
    paths: Vec<Path>,
}

impl PathCollector {
    pub fn new() -> PathCollector {
        PathCollector::default()
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<Path> {
        self.paths
    }
}

impl PathSink for PathCollector {
    fn path_found(&mut self, path: &Path) {
        self.paths.push(path.clone());
    }
}

/// Recursive backtracking search over one grid.
///
/// The grid is read only context shared by every frame of the search.
#[derive(Debug, Copy, Clone)]
pub struct PathEnumerator<'g> {
    grid: &'g Grid,
}

impl<'g> PathEnumerator<'g> {
    pub fn new(grid: &'g Grid) -> PathEnumerator<'g> {
        PathEnumerator { grid }
    }

    #[inline]
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    /// Reports every path from the top-left cell to `sink` and returns how many there were.
    ///
    /// `path` is normally empty. Whatever it holds on entry it holds again on return.
    pub fn enumerate<S>(&self, path: &mut Path, sink: &mut S) -> usize
        where S: PathSink + ?Sized
    {
        self.enumerate_from(path, self.grid.start(), sink)
    }

    /// Explores every path onward from `position`, extending `path` which holds the cells
    /// visited so far.
    pub fn enumerate_from<S>(&self, path: &mut Path, position: Position, sink: &mut S) -> usize
        where S: PathSink + ?Sized
    {
        let depth = path.len();
        let mut found = 0;
        self.find_paths(path, position, sink, &mut found);
        debug_assert_eq!(path.len(), depth, "every visit must be matched by one backtrack");
        debug!("Found {} paths from {} on a {}x{} grid",
               found, position, self.grid.rows().0, self.grid.columns().0);
        found
    }

    fn find_paths<S>(&self, path: &mut Path, position: Position, sink: &mut S, found: &mut usize)
        where S: PathSink + ?Sized
    {
        let value = match self.grid.cell(position) {
            None => {
                sink.rejected(position, Rejection::OutOfBounds);
                return;
            }
            Some(CellState::Blocked) => {
                sink.rejected(position, Rejection::Blocked);
                return;
            }
            Some(state) => state.value(),
        };

        path.push(position, value);
        sink.entered(position, path);

        if self.grid.is_goal(position) {
            *found += 1;
            trace!("Path {}: {}", found, path.route_display());
            sink.path_found(path);
        } else {
            for &mv in Move::EXPLORATION_ORDER.iter() {
                self.find_paths(path, position.step(mv), sink, found);
            }
        }

        path.pop();
        sink.backtracked(position, path);
    }
}

/// Report every path through `grid` to `sink`, returning the number of paths.
pub fn find_paths<S>(grid: &Grid, sink: &mut S) -> usize
    where S: PathSink + ?Sized
{
    let mut path = Path::with_capacity(max_path_len(grid));
    PathEnumerator::new(grid).enumerate(&mut path, sink)
}

/// Every path through `grid`, in discovery order.
pub fn collect_paths(grid: &Grid) -> Vec<Path> {
    let mut collector = PathCollector::new();
    find_paths(grid, &mut collector);
    collector.into_paths()
}

pub fn count_paths(grid: &Grid) -> usize {
    find_paths(grid, &mut |_: &Path| {})
}

/// The length of every complete path: one cell per step plus the start.
pub fn max_path_len(grid: &Grid) -> usize {
    if grid.is_empty() {
        0
    } else {
        grid.rows().0 + grid.columns().0 - 1
    }
}

#[derive(Debug, Clone)]
struct Frame {
    successors: PositionSmallVec,
    next: usize,
}

/// The backtracking search driven by an explicit stack instead of recursion.
///
/// Yields the same paths in the same order as [`PathEnumerator`], one per call to `next`.
/// Each frame holds the in-grid successors of its cell and which one it tries next, so the
/// pushes and pops on the shared path happen in exactly the recursive order.
#[derive(Debug, Clone)]
pub struct Paths<'g> {
    grid: &'g Grid,
    path: Path,
    stack: Vec<Frame>,
    pending_start: Option<Position>,
}

impl<'g> Paths<'g> {
    pub fn new(grid: &'g Grid) -> Paths<'g> {
        let capacity = max_path_len(grid);
        Paths {
            grid,
            path: Path::with_capacity(capacity),
            stack: Vec::with_capacity(capacity),
            pending_start: Some(grid.start()),
        }
    }

    /// The path from the start to the frame at the top of the stack.
    pub fn partial_path(&self) -> &Path {
        &self.path
    }

    /// Push a frame for `position` if it is an open cell. Returns true if that frame is the goal.
    fn enter(&mut self, position: Position) -> bool {
        let value = match self.grid.cell(position) {
            Some(CellState::Open) => CellState::Open.value(),
            _ => return false,
        };
        self.path.push(position, value);

        let is_goal = self.grid.is_goal(position);
        // The goal frame has no successors to try.
        let successors = if is_goal {
            PositionSmallVec::new()
        } else {
            self.grid.neighbours(position)
        };
        self.stack.push(Frame { successors, next: 0 });
        is_goal
    }
}

impl<'g> Iterator for Paths<'g> {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        if let Some(start) = self.pending_start.take() {
            if self.enter(start) {
                return Some(self.path.clone());
            }
        }

        loop {
            let successor = {
                let frame = self.stack.last_mut()?;
                let successor = frame.successors.get(frame.next).cloned();
                if successor.is_some() {
                    frame.next += 1;
                }
                successor
            };

            match successor {
                Some(next) => {
                    if self.enter(next) {
                        return Some(self.path.clone());
                    }
                }
                None => {
                    self.stack.pop();
                    self.path.pop();
                }
            }
        }
    }
}

impl<'g> FusedIterator for Paths<'g> {}


#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, Arbitrary, Gen};

    use super::*;
    use crate::units::{ColumnsCount, RowsCount};
    use crate::utils;

    fn grid(values: &[&[CellValue]]) -> Grid {
        let rows = values.iter().map(|row| row.to_vec()).collect::<Vec<_>>();
        Grid::from_values(&rows).expect("valid grid")
    }

    fn routes(paths: &[Path]) -> Vec<Vec<Position>> {
        paths.iter().map(|p| p.route().to_vec()).collect()
    }

    fn pc(row: usize, column: usize) -> Position {
        Position::new(row, column)
    }

    #[test]
    fn worked_example_has_one_path() {
        let g = grid(&[&[1, 0, 0], &[1, 1, 0], &[0, 1, 1]]);
        let paths = collect_paths(&g);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].values(), &[1, 1, 1, 1, 1]);
        assert_eq!(paths[0].route(), &[pc(0, 0), pc(1, 0), pc(1, 1), pc(2, 1), pc(2, 2)]);
        assert_eq!(paths[0].moves(), vec![Move::Down, Move::Right, Move::Down, Move::Right]);
    }

    #[test]
    fn blocked_start_has_no_paths() {
        let g = grid(&[&[0]]);
        assert!(collect_paths(&g).is_empty());
        assert_eq!(Paths::new(&g).count(), 0);
    }

    #[test]
    fn single_open_cell_is_its_own_path() {
        let g = grid(&[&[1]]);
        let paths = collect_paths(&g);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].values(), &[1]);
        assert_eq!(paths[0].route(), &[pc(0, 0)]);
        assert!(paths[0].moves().is_empty());
    }

    #[test]
    fn blocked_detour_leaves_one_path() {
        let g = grid(&[&[1, 1], &[0, 1]]);
        let paths = collect_paths(&g);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].values(), &[1, 1, 1]);
        assert_eq!(paths[0].route(), &[pc(0, 0), pc(0, 1), pc(1, 1)]);
    }

    #[test]
    fn equal_values_on_distinct_routes_are_both_reported() {
        let g = grid(&[&[1, 1], &[1, 1]]);
        let paths = collect_paths(&g);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].values(), paths[1].values());
        assert_eq!(routes(&paths),
                   vec![vec![pc(0, 0), pc(0, 1), pc(1, 1)],
                        vec![pc(0, 0), pc(1, 0), pc(1, 1)]]);
    }

    #[test]
    fn blocked_goal_has_no_paths() {
        let g = grid(&[&[1, 1], &[1, 0]]);
        assert_eq!(count_paths(&g), 0);
    }

    #[test]
    fn empty_grids_have_no_paths() {
        let no_rows = Grid::new(RowsCount(0), ColumnsCount(4)).unwrap();
        let no_columns = Grid::new(RowsCount(4), ColumnsCount(0)).unwrap();
        assert_eq!(count_paths(&no_rows), 0);
        assert_eq!(count_paths(&no_columns), 0);
        assert_eq!(Paths::new(&no_rows).count(), 0);
    }

    #[test]
    fn open_grid_path_count_is_binomial() {
        // C(rows + columns - 2, rows - 1)
        assert_eq!(count_paths(&Grid::open(RowsCount(3), ColumnsCount(3)).unwrap()), 6);
        assert_eq!(count_paths(&Grid::open(RowsCount(4), ColumnsCount(5)).unwrap()), 35);
        assert_eq!(count_paths(&Grid::open(RowsCount(1), ColumnsCount(7)).unwrap()), 1);
    }

    #[test]
    fn path_is_empty_after_enumeration() {
        let g = Grid::open(RowsCount(3), ColumnsCount(4)).unwrap();
        let mut path = Path::new();
        let found = PathEnumerator::new(&g).enumerate(&mut path, &mut |_: &Path| {});
        assert_eq!(found, 10);
        assert!(path.is_empty());
    }

    #[test]
    fn enumerate_from_keeps_the_prefix() {
        let g = Grid::open(RowsCount(2), ColumnsCount(3)).unwrap();
        let enumerator = PathEnumerator::new(&g);

        let mut prefix = Path::new();
        prefix.push(pc(0, 0), 1);
        prefix.push(pc(0, 1), 1);

        let mut collector = PathCollector::new();
        let found = enumerator.enumerate_from(&mut prefix, pc(0, 2), &mut collector);
        assert_eq!(found, 1);
        assert_eq!(prefix.route(), &[pc(0, 0), pc(0, 1)]);
        assert_eq!(collector.paths()[0].route(), &[pc(0, 0), pc(0, 1), pc(0, 2), pc(1, 2)]);
    }

    #[test]
    fn enumerate_from_off_the_grid_finds_nothing() {
        let g = Grid::open(RowsCount(2), ColumnsCount(2)).unwrap();
        let mut path = Path::new();
        let found = PathEnumerator::new(&g).enumerate_from(&mut path, pc(2, 0), &mut |_: &Path| {});
        assert_eq!(found, 0);
        assert!(path.is_empty());
    }

    #[derive(Default)]
    struct StepRecorder {
        steps: Vec<String>,
    }

    impl PathSink for StepRecorder {
        fn path_found(&mut self, path: &Path) {
            self.steps.push(format!("found {}", path.route_display()));
        }
        fn entered(&mut self, position: Position, path: &Path) {
            assert_eq!(path.head(), Some(position));
            self.steps.push(format!("enter {}", position));
        }
        fn rejected(&mut self, position: Position, reason: Rejection) {
            self.steps.push(format!("reject {} {:?}", position, reason));
        }
        fn backtracked(&mut self, position: Position, path: &Path) {
            assert!(!path.route().contains(&position));
            self.steps.push(format!("leave {}", position));
        }
    }

    #[test]
    fn sink_observes_every_step() {
        let g = grid(&[&[1, 0], &[1, 1]]);
        let mut recorder = StepRecorder::default();
        find_paths(&g, &mut recorder);
        assert_eq!(recorder.steps,
                   vec!["enter (0,0)",
                        "reject (0,1) Blocked",
                        "enter (1,0)",
                        "enter (1,1)",
                        "found (0,0) → (1,0) → (1,1)",
                        "leave (1,1)",
                        "reject (2,0) OutOfBounds",
                        "leave (1,0)",
                        "leave (0,0)"]);
    }

    #[test]
    fn path_display() {
        let g = grid(&[&[1, 1], &[1, 1]]);
        let paths = collect_paths(&g);
        assert_eq!(paths[0].to_string(), "[1, 1, 1]");
        assert_eq!(paths[1].route_display(), "(0,0) → (1,0) → (1,1)");
        assert_eq!(Path::new().to_string(), "[]");
    }

    #[test]
    fn iterator_matches_recursion_on_open_grid() {
        let g = Grid::open(RowsCount(3), ColumnsCount(4)).unwrap();
        let mut paths = Paths::new(&g);
        let iterated = paths.by_ref().collect::<Vec<_>>();
        assert_eq!(iterated, collect_paths(&g));
        assert!(paths.partial_path().is_empty());
        assert!(paths.next().is_none());
    }

    #[test]
    fn iterator_follows_the_grid_edges() {
        // Only in-grid successors are stacked, along the last row and column there is one.
        let row = Grid::open(RowsCount(1), ColumnsCount(4)).unwrap();
        let column = Grid::open(RowsCount(4), ColumnsCount(1)).unwrap();
        for g in &[row, column] {
            let paths = Paths::new(g).collect::<Vec<_>>();
            assert_eq!(paths.len(), 1);
            assert_eq!(paths[0].values(), &[1, 1, 1, 1]);
        }

        let g = grid(&[&[1, 1, 0], &[1, 1, 1], &[0, 1, 1]]);
        let iterated = Paths::new(&g).map(|path| path.route_display()).collect::<Vec<_>>();
        assert_eq!(iterated,
                   vec!["(0,0) → (0,1) → (1,1) → (1,2) → (2,2)",
                        "(0,0) → (0,1) → (1,1) → (2,1) → (2,2)",
                        "(0,0) → (1,0) → (1,1) → (1,2) → (2,2)",
                        "(0,0) → (1,0) → (1,1) → (2,1) → (2,2)"]);
    }

    /// A small random grid for property tests.
    #[derive(Clone, Debug)]
    struct SmallGrid(Grid);

    impl Arbitrary for SmallGrid {
        fn arbitrary(g: &mut Gen) -> SmallGrid {
            let rows = usize::from(u8::arbitrary(g) % 5) + 1;
            let columns = usize::from(u8::arbitrary(g) % 5) + 1;
            let values = (0..rows)
                .map(|_| {
                    (0..columns)
                        // three in four cells open
                        .map(|_| if u8::arbitrary(g) % 4 == 0 { 0 } else { 1 })
                        .collect::<Vec<CellValue>>()
                })
                .collect::<Vec<_>>();
            SmallGrid(Grid::from_values(&values).expect("generated grid is well formed"))
        }
    }

    /// Every route of Right/Down moves from corner to corner that stays on open cells,
    /// with Right ordered before Down.
    fn brute_force_routes(grid: &Grid) -> Vec<Vec<Position>> {
        if grid.is_empty() {
            return vec![];
        }
        let downs = grid.rows().0 - 1;
        let steps = downs + grid.columns().0 - 1;

        let mut all = (0..(1u32 << steps))
            .filter(|mask| mask.count_ones() as usize == downs)
            .map(|mask| {
                // The first move is the highest bit so numeric order is Right-first order.
                let mut position = grid.start();
                let mut route = vec![position];
                for bit in (0..steps).rev() {
                    let mv = if mask & (1 << bit) != 0 { Move::Down } else { Move::Right };
                    position = position.step(mv);
                    route.push(position);
                }
                (mask, route)
            })
            .filter(|&(_, ref route)| route.iter().all(|&p| grid.is_open(p)))
            .collect::<Vec<_>>();
        all.sort_by_key(|&(mask, _)| mask);
        all.into_iter().map(|(_, route)| route).collect()
    }

    #[test]
    fn finds_exactly_the_open_monotone_routes_in_order() {
        fn p(small: SmallGrid) -> bool {
            let grid = small.0;
            routes(&collect_paths(&grid)) == brute_force_routes(&grid)
        }
        quickcheck(p as fn(SmallGrid) -> bool);
    }

    #[test]
    fn no_route_is_reported_twice() {
        fn p(small: SmallGrid) -> bool {
            let paths = collect_paths(&small.0);
            let mut seen = utils::fnv_hashset(paths.len());
            paths.iter().all(|path| seen.insert(path.route().to_vec()))
        }
        quickcheck(p as fn(SmallGrid) -> bool);
    }

    #[test]
    fn paths_are_full_length_and_open() {
        fn p(small: SmallGrid) -> bool {
            let grid = small.0;
            let expected_len = max_path_len(&grid);
            collect_paths(&grid).iter().all(|path| {
                path.len() == path.moves().len() + 1 &&
                path.len() == expected_len &&
                path.values().iter().all(|&v| v == CellState::OPEN_VALUE) &&
                path.route().iter().all(|&pos| grid.is_open(pos)) &&
                path.route().first() == Some(&grid.start()) &&
                path.route().last() == grid.goal().as_ref()
            })
        }
        quickcheck(p as fn(SmallGrid) -> bool);
    }

    #[test]
    fn shared_path_is_restored() {
        fn p(small: SmallGrid) -> bool {
            let mut path = Path::new();
            PathEnumerator::new(&small.0).enumerate(&mut path, &mut |_: &Path| {});
            let mut paths = Paths::new(&small.0);
            paths.by_ref().for_each(drop);
            path.is_empty() && paths.partial_path().is_empty()
        }
        quickcheck(p as fn(SmallGrid) -> bool);
    }

    #[test]
    fn repeated_and_iterative_runs_agree() {
        fn p(small: SmallGrid) -> bool {
            let first = collect_paths(&small.0);
            let second = collect_paths(&small.0);
            let iterated = Paths::new(&small.0).collect::<Vec<_>>();
            first == second && first == iterated
        }
        quickcheck(p as fn(SmallGrid) -> bool);
    }
}

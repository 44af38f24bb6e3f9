//! Sinks that write the search to a text stream.
//!
//! Write errors cannot stop the search, so each sink remembers the first one and
//! stops writing. `finish` hands that error back.

use std::io::{self, Write};

use crate::cells::Position;
use crate::grid::Grid;
use crate::grid_displays::{render_grid, PathDisplay};
use crate::grid_traits::GridDisplay;
use crate::pathing::{Path, PathSink, Rejection};


/// Writes each path found as its values, e.g. `[1, 1, 1]`.
pub struct PathPrinter<'g, W: Write> {
    out: W,
    show_routes: bool,
    render_over: Option<&'g Grid>,
    printed: usize,
    error: Option<io::Error>,
}

impl<'g, W: Write> PathPrinter<'g, W> {
    pub fn new(out: W) -> PathPrinter<'g, W> {
        PathPrinter {
            out,
            show_routes: false,
            render_over: None,
            printed: 0,
            error: None,
        }
    }

    /// Also write the positions of each route.
    pub fn show_routes(mut self, show: bool) -> Self {
        self.show_routes = show;
        self
    }

    /// Also draw each route over `grid`.
    pub fn render_over(mut self, grid: Option<&'g Grid>) -> Self {
        self.render_over = grid;
        self
    }

    /// Write a path, as if the search had found it.
    pub fn print(&mut self, path: &Path) {
        if self.error.is_some() {
            return;
        }
        match self.write_path(path) {
            Ok(()) => self.printed += 1,
            Err(e) => self.error = Some(e),
        }
    }

    /// Flushes the output, returning how many paths were written or the first write error.
    pub fn finish(mut self) -> io::Result<usize> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.printed)
    }

    fn write_path(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.out, "{}", path)?;
        if self.show_routes {
            writeln!(self.out, "    {}", path.route_display())?;
        }
        if let Some(grid) = self.render_over {
            let display = PathDisplay::new(path.route());
            write!(self.out, "{}", render_grid(grid, Some(&display as &dyn GridDisplay)))?;
        }
        Ok(())
    }
}

impl<'g, W: Write> PathSink for PathPrinter<'g, W> {
    fn path_found(&mut self, path: &Path) {
        self.print(path);
    }
}


/// Narrates every step of the search, indented by depth.
pub struct Walkthrough<W: Write> {
    out: W,
    step: usize,
    error: Option<io::Error>,
}

impl<W: Write> Walkthrough<W> {
    pub fn new(out: W) -> Walkthrough<W> {
        Walkthrough { out, step: 0, error: None }
    }

    pub fn finish(mut self) -> io::Result<usize> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.step)
    }

    fn line(&mut self, depth: usize, text: &str) {
        if self.error.is_some() {
            return;
        }
        let indent = "  ".repeat(depth);
        if let Err(e) = writeln!(self.out, "{}{}", indent, text) {
            self.error = Some(e);
        }
    }
}

impl<W: Write> PathSink for Walkthrough<W> {
    fn path_found(&mut self, path: &Path) {
        let text = format!("Destination reached → {}", path);
        self.line(path.len(), &text);
    }

    fn entered(&mut self, position: Position, path: &Path) {
        self.step += 1;
        let text = format!("Step {}: visit {} → Path = {}", self.step, position, path);
        self.line(path.len() - 1, &text);
    }

    fn rejected(&mut self, position: Position, reason: Rejection) {
        let why = match reason {
            Rejection::OutOfBounds => "out of bounds",
            Rejection::Blocked => "blocked",
        };
        // Indented at the depth the position would have been visited at.
        let text = format!("{} is {}", position, why);
        let depth = position.row + position.column;
        self.line(depth, &text);
    }

    fn backtracked(&mut self, position: Position, path: &Path) {
        let text = format!("Backtrack from {} → Path = {}", position, path);
        self.line(path.len(), &text);
    }
}

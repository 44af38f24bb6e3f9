//! **maze_paths** enumerates every monotone route through a grid maze by backtracking.
//!
//! Routes run from the top-left cell to the bottom-right cell, moving only Right or Down
//! across open cells. See [`pathing`] for the search itself.

// error_chain! expands deeply
#![recursion_limit = "1024"]

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_traits;
pub mod masks;
pub mod parsing;
pub mod pathing;
pub mod reporting;
pub mod units;
mod utils;

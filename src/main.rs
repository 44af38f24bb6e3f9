use docopt::Docopt;
use log::{info, warn};
use serde_derive::Deserialize;
use maze_paths::{
    generators,
    grid::Grid,
    grid_displays::{render_grid, StartEndPointsDisplay},
    grid_traits::GridDisplay,
    masks,
    parsing,
    pathing::{self, Paths},
    reporting::{PathPrinter, Walkthrough},
    units::{ColumnsCount, OpenRatio, RowsCount},
};
use std::{
    env,
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Maze Paths

Print every route from the top-left to the bottom-right cell of a grid maze,
moving only right or down through open cells.

The grid is read from stdin unless a file is given. Text grids hold the
dimensions `n m` on the first line, then n rows of m values: 1 open, 0 blocked.
Set MAZE_PATHS_LOG (e.g. MAZE_PATHS_LOG=debug) to enable logging.

Usage:
    maze_paths_driver -h | --help
    maze_paths_driver [--input=<path> | --mask-file=<path>] [options]
    maze_paths_driver random [--rows=<n>] [--columns=<m>] [--open-ratio=<p>] [--seed=<s>] [options]

Options:
    -h --help            Show this screen.
    --input=<path>       Read a text grid from a file instead of stdin.
    --mask-file=<path>   Read the grid from an image file, each pixel is a cell and dark pixels are blocked.
    --rows=<n>           Rows in a random grid [default: 5].
    --columns=<m>        Columns in a random grid [default: 5].
    --open-ratio=<p>     Chance of each random cell being open [default: 0.75].
    --seed=<s>           Seed the random grid generator for a reproducible grid.
    --iterative          Search with an explicit stack instead of recursion.
    --show-routes        Print the cell positions of each route under its values.
    --render             Draw each route over the grid.
    --walkthrough        Narrate every visit, rejection and backtrack of the search.
    --count-only         Only print the number of paths.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_random: bool,
    flag_input: String,
    flag_mask_file: String,
    flag_rows: usize,
    flag_columns: usize,
    flag_open_ratio: f64,
    flag_seed: Option<u64>,
    flag_iterative: bool,
    flag_show_routes: bool,
    flag_render: bool,
    flag_walkthrough: bool,
    flag_count_only: bool,
}

// The driver's own errors wrap the library's, adding command line and io failures.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze_paths::errors::Error, ::maze_paths::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    if env::var("MAZE_PATHS_LOG").is_ok() {
        let e = env_logger::Env::new()
            .filter("MAZE_PATHS_LOG")
            .write_style("MAZE_PATHS_LOG_STYLE");
        env_logger::init_from_env(e);
    }

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());
    info!("Driver arguments: {:?}", args);

    let grid = load_grid(&args)?;
    info!("Searching a {}x{} grid with {} open cells",
          grid.rows().0, grid.columns().0, grid.open_cells_count());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.cmd_random {
        write!(out, "{}", grid)?;
        writeln!(out)?;
    }

    if args.flag_count_only {
        let count = if args.flag_iterative {
            Paths::new(&grid).count()
        } else {
            pathing::count_paths(&grid)
        };
        writeln!(out, "{}", count)?;
        return Ok(());
    }

    if args.flag_walkthrough {
        if args.flag_iterative {
            warn!("--walkthrough narrates the recursive search, ignoring --iterative");
        }
        let display = StartEndPointsDisplay::for_grid(&grid);
        write!(out, "{}", render_grid(&grid, Some(&display as &dyn GridDisplay)))?;
        let mut walkthrough = Walkthrough::new(&mut out);
        pathing::find_paths(&grid, &mut walkthrough);
        let steps = walkthrough.finish().chain_err(|| "Failed to write the walkthrough")?;
        info!("Narrated {} visits", steps);
        return Ok(());
    }

    writeln!(out, "All Possible Paths:")?;
    let render_over = if args.flag_render { Some(&grid) } else { None };
    let mut printer = PathPrinter::new(&mut out)
        .show_routes(args.flag_show_routes)
        .render_over(render_over);

    if args.flag_iterative {
        for path in Paths::new(&grid) {
            printer.print(&path);
        }
    } else {
        pathing::find_paths(&grid, &mut printer);
    }

    let printed = printer.finish().chain_err(|| "Failed to write paths")?;
    info!("Printed {} paths", printed);

    Ok(())
}

fn load_grid(maze_args: &MazeArgs) -> Result<Grid> {

    if maze_args.cmd_random {
        let mut rng = generators::seeded_rng(maze_args.flag_seed);
        let grid = generators::random_grid(RowsCount(maze_args.flag_rows),
                                           ColumnsCount(maze_args.flag_columns),
                                           OpenRatio(maze_args.flag_open_ratio),
                                           &mut rng)
            .chain_err(|| format!("Cannot generate a random grid of {} rows and {} columns",
                                  maze_args.flag_rows, maze_args.flag_columns))?;
        return Ok(grid);
    }

    if !maze_args.flag_mask_file.is_empty() {
        return Ok(masks::load_grid_image(&maze_args.flag_mask_file)?);
    }

    let grid = if !maze_args.flag_input.is_empty() {
        let file = File::open(&maze_args.flag_input)
            .chain_err(|| format!("Failed to open grid file {}", maze_args.flag_input))?;
        parsing::read_grid(file)
            .chain_err(|| format!("Invalid grid in {}", maze_args.flag_input))?
    } else {
        parsing::read_grid(io::stdin().lock()).chain_err(|| "Invalid grid on stdin")?
    };
    Ok(grid)
}

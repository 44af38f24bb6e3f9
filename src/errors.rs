// Other modules in this crate `use crate::errors::*;` to get access to everything
// `error_chain!` creates: Error, ErrorKind, ResultExt and the Result alias.
use error_chain::*;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        ImageLoadError(::image::ImageError);
    }

    errors {
        GridTooLarge(rows: usize, columns: usize) {
            description("grid too large")
            display("a {}x{} grid has more cells than can be indexed", rows, columns)
        }
        MissingDimensions {
            description("missing grid dimensions")
            display("expected a first line holding the grid dimensions `n m`")
        }
        MalformedDimensions(line: usize, text: String) {
            description("malformed grid dimensions line")
            display("line {}: expected exactly two dimensions `n m`, found '{}'", line, text)
        }
        InvalidDimension(line: usize, token: String) {
            description("invalid grid dimension")
            display("line {}: grid dimension '{}' is not a positive integer", line, token)
        }
        InvalidCell(row: usize, column: usize, token: String) {
            description("invalid cell value")
            display("cell ({},{}): '{}' is neither 0 (blocked) nor 1 (open)", row, column, token)
        }
        RowLength(row: usize, expected: usize, found: usize) {
            description("grid row length mismatch")
            display("row {}: expected {} cells, found {}", row, expected, found)
        }
        MissingRows(expected: usize, found: usize) {
            description("too few grid rows")
            display("expected {} grid rows, found {}", expected, found)
        }
        TrailingRows(line: usize) {
            description("too many grid rows")
            display("line {}: unexpected input after the last grid row", line)
        }
    }
}

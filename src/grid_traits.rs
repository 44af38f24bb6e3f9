use crate::cells::Position;

pub trait GridDisplay {
    /// Render the contents of an open grid cell to a 3 character wide string.
    fn render_cell_body(&self, position: Position) -> String;
}

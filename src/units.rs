#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnsCount(pub usize);

/// Probability, 0 to 1, of a generated cell being open.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct OpenRatio(pub f64);

/// Coordinate of a cell in a [`crate::grid::Grid`], as `(x, y)`.
///
/// `x` is the column and `y` is the row; both are only meaningful for the
/// grid they were produced from.
pub type CellPos = (usize, usize);

/// Abstract palette entry for a [`crate::simulation::DrawCommand`].
///
/// The core never names concrete colors; the drawing shell maps each shade
/// to whatever its backend uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shade {
    Background,
    GridLine,
    Cell,
    Hud,
}

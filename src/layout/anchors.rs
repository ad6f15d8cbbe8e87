//! Row anchor calculation on tables.
//!
//! Rows are stacked top to bottom around the table origin. Offsets depend
//! only on the table's column count and the row's local position, never on
//! the schema-wide column index.

use super::types::{Point3, TablePlacement};

/// Vertical distance between adjacent rows.
pub const ROW_PITCH: f64 = 0.5;
/// Gap between the top edge of the table and the first row's center.
const ROW_TOP_INSET: f64 = 0.6;
/// Header and footer room added to the row stack.
const TABLE_PADDING: f64 = 0.8;

/// Vertical offset of row `index` in a table with `size` columns, relative
/// to the table origin.
pub fn row_offset(size: usize, index: usize) -> f64 {
    size as f64 * ROW_PITCH / 2.0 - index as f64 * ROW_PITCH - ROW_TOP_INSET
}

/// Total visible height of a table with `size` columns.
pub fn table_height(size: usize) -> f64 {
    size as f64 * ROW_PITCH + TABLE_PADDING
}

/// Which face of the table a connector attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Point on the left or right edge of the named row, or `None` if the
/// table has no such column.
pub fn row_anchor(
    placement: &TablePlacement,
    column: &str,
    side: Side,
    table_width: f64,
) -> Option<Point3> {
    let index = placement.table.column_position(column)?;
    let dy = row_offset(placement.table.columns.len(), index);
    let dx = match side {
        Side::Left => -table_width / 2.0,
        Side::Right => table_width / 2.0,
    };
    Some(placement.position.offset(dx, dy, 0.0))
}

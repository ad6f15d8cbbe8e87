//! Table ordering and circular placement.

use std::f64::consts::TAU;

use crate::ast::{Schema, Table};

use super::types::{Point3, TablePlacement};

/// Order tables for placement.
///
/// With exactly two tables, a referencing table that comes first is moved
/// behind the table it can point at, so the referenced table sits at angle
/// zero. Every other case keeps parse order.
pub fn order_tables(schema: &Schema) -> Vec<&Table> {
    let mut tables: Vec<&Table> = schema.tables.iter().collect();

    let referencing_first = matches!(
        tables.as_slice(),
        [first, second] if first.has_foreign_keys() && !second.has_foreign_keys()
    );
    if referencing_first {
        tables.swap(0, 1);
    }

    tables
}

/// Place tables evenly on a circle of `radius` in the z = 0 plane, the
/// first at angle zero, proceeding counter-clockwise.
pub fn place_on_circle(tables: &[&Table], radius: f64) -> Vec<TablePlacement> {
    let count = tables.len();

    tables
        .iter()
        .enumerate()
        .map(|(i, table)| {
            let angle = TAU * i as f64 / count as f64;
            TablePlacement {
                table: (*table).clone(),
                position: Point3::new(radius * angle.cos(), radius * angle.sin(), 0.0),
            }
        })
        .collect()
}

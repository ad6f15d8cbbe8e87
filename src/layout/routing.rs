//! Connector routing between foreign-key rows.

use tracing::debug;

use crate::ast::{ForeignKey, Table};

use super::anchors::{Side, row_anchor};
use super::curve::sample;
use super::types::{LinkCurve, LinkTag, Point3, TablePlacement};

/// Builds the S-shaped connector from a referencing row to the row it
/// references.
///
/// Connectors leave the right face of the source row and enter the left face
/// of the target row horizontally, then swing behind the table plane in
/// between, whatever the vertical distance between the rows.
#[derive(Debug, Clone)]
pub struct LinkGeometryBuilder {
    pub table_width: f64,
    /// Horizontal run straight out of each row face.
    pub lead: f64,
    /// Horizontal distance from each anchor to the curve's far control point.
    pub reach: f64,
    /// How far behind the table plane the curve bends.
    pub depth: f64,
    /// Polyline segment count.
    pub samples: usize,
    /// Endpoint marker offset from the target anchor: left and toward the viewer.
    pub marker_offset: (f64, f64),
}

impl Default for LinkGeometryBuilder {
    fn default() -> Self {
        Self {
            table_width: 5.0,
            lead: 0.3,
            reach: 2.0,
            depth: 0.3,
            samples: 50,
            marker_offset: (0.1, 0.1),
        }
    }
}

impl LinkGeometryBuilder {
    /// Connector for one foreign key declared on `owner`.
    ///
    /// Returns `None` when either end doesn't resolve to a placed row.
    pub fn build_link(
        &self,
        owner: &Table,
        fk: &ForeignKey,
        placements: &[TablePlacement],
    ) -> Option<LinkCurve> {
        let source = find_placement(placements, &owner.name)?;
        let start = row_anchor(source, &fk.column, Side::Right, self.table_width)?;

        let target = find_placement(placements, &fk.ref_table)?;
        let end = row_anchor(target, &fk.ref_column, Side::Left, self.table_width)?;

        let control_points = self.control_points(start, end);
        let (marker_dx, marker_dz) = self.marker_offset;

        Some(LinkCurve {
            tag: LinkTag::new(&owner.name, &fk.ref_table, &fk.column, &fk.ref_column),
            points: sample(&control_points, self.samples),
            control_points,
            marker: end.offset(-marker_dx, 0.0, marker_dz),
        })
    }

    /// Connectors for every resolvable foreign key, in placement order and
    /// then declaration order.
    pub fn build_links(&self, placements: &[TablePlacement]) -> Vec<LinkCurve> {
        let mut links = Vec::new();

        for placement in placements {
            for fk in &placement.table.foreign_keys {
                match self.build_link(&placement.table, fk, placements) {
                    Some(link) => links.push(link),
                    None => debug!(
                        table = %placement.table.name,
                        column = %fk.column,
                        ref_table = %fk.ref_table,
                        ref_column = %fk.ref_column,
                        "skipping unresolved foreign key"
                    ),
                }
            }
        }

        links
    }

    fn control_points(&self, start: Point3, end: Point3) -> [Point3; 6] {
        let behind = start.z - self.depth;
        [
            start,
            start.offset(self.lead, 0.0, 0.0),
            Point3::new(start.x + self.reach, start.y, behind),
            Point3::new(end.x - self.reach, end.y, behind),
            end.offset(-self.lead, 0.0, 0.0),
            end,
        ]
    }
}

fn find_placement<'a>(placements: &'a [TablePlacement], name: &str) -> Option<&'a TablePlacement> {
    placements.iter().find(|p| p.table.name == name)
}

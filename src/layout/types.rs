//! Data structures produced by layout computation.

use serde::{Deserialize, Serialize};

use super::anchors::table_height;
use crate::ast::Table;

/// A point in diagram space. The table plane is z = 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn offset(self, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    pub fn distance_squared(self, other: Self) -> f64 {
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        dx * dx + dy * dy + dz * dz
    }
}

/// A table positioned in the diagram. Owns a copy of its table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePlacement {
    pub table: Table,
    pub position: Point3,
}

impl TablePlacement {
    pub fn height(&self) -> f64 {
        table_height(self.table.columns.len())
    }
}

/// Identifies a connector by the rows it joins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkTag {
    pub from_table: String,
    pub to_table: String,
    pub from_column: String,
    pub to_column: String,
}

impl LinkTag {
    pub fn new(from_table: &str, to_table: &str, from_column: &str, to_column: &str) -> Self {
        Self {
            from_table: from_table.to_string(),
            to_table: to_table.to_string(),
            from_column: from_column.to_string(),
            to_column: to_column.to_string(),
        }
    }

    /// Same pair of rows, in either direction.
    pub fn joins(&self, other: &LinkTag) -> bool {
        self == other
            || (self.from_table == other.to_table
                && self.to_table == other.from_table
                && self.from_column == other.to_column
                && self.to_column == other.from_column)
    }
}

/// Connector geometry for one resolved foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkCurve {
    #[serde(flatten)]
    pub tag: LinkTag,
    pub control_points: [Point3; 6],
    /// Sampled polyline through the control points, start to end.
    pub points: Vec<Point3>,
    /// Where the endpoint marker sits, just off the target row.
    pub marker: Point3,
}

impl LinkCurve {
    pub fn start(&self) -> Point3 {
        self.control_points[0]
    }

    pub fn end(&self) -> Point3 {
        self.control_points[5]
    }
}

/// The complete layout result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub placements: Vec<TablePlacement>,
    pub links: Vec<LinkCurve>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_joins_either_direction() {
        let tag = LinkTag::new("orders", "users", "user_id", "id");

        assert!(tag.joins(&LinkTag::new("orders", "users", "user_id", "id")));
        assert!(tag.joins(&LinkTag::new("users", "orders", "id", "user_id")));
        assert!(!tag.joins(&LinkTag::new("users", "orders", "user_id", "id")));
        assert!(!tag.joins(&LinkTag::new("orders", "users", "buyer_id", "id")));
    }

    #[test]
    fn test_point_offset() {
        let p = Point3::new(1.0, 2.0, 3.0).offset(0.5, -1.0, 0.0);
        assert_eq!(p, Point3::new(1.5, 1.0, 3.0));
        assert_eq!(Point3::default().distance_squared(Point3::new(1.0, 2.0, 2.0)), 9.0);
    }
}

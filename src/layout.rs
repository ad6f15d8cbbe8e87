//! Spatial layout: table placement, row anchors and connector geometry.

pub mod anchors;
pub mod curve;
pub mod engine;
pub mod placement;
pub mod routing;
pub mod types;

pub use anchors::{row_offset, table_height};
pub use engine::LayoutEngine;
pub use routing::LinkGeometryBuilder;
pub use types::{Layout, LinkCurve, LinkTag, Point3, TablePlacement};

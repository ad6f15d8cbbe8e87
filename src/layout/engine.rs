//! Layout engine core implementation.

use tracing::debug;

use crate::ast::Schema;

use super::placement::{order_tables, place_on_circle};
use super::routing::LinkGeometryBuilder;
use super::types::{Layout, TablePlacement};

/// Layout engine configuration and computation.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    pub radius: f64,
    pub connectors: LinkGeometryBuilder,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            radius: 10.0,
            connectors: LinkGeometryBuilder::default(),
        }
    }
}

impl LayoutEngine {
    /// Position every table. Depends only on table count, names and
    /// whether each table declares foreign keys.
    pub fn place(&self, schema: &Schema) -> Vec<TablePlacement> {
        let ordered = order_tables(schema);
        place_on_circle(&ordered, self.radius)
    }

    /// Compute placements and connectors for the given schema.
    pub fn layout(&self, schema: &Schema) -> Layout {
        // Phase 1: Table placement
        let placements = self.place(schema);

        // Phase 2: Connector routing
        let links = self.connectors.build_links(&placements);

        debug!(
            tables = placements.len(),
            links = links.len(),
            foreign_keys = schema.foreign_key_count(),
            "layout complete"
        );

        Layout { placements, links }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::parse_ddl;

    #[test]
    fn test_layout_two_tables_puts_referenced_table_first() {
        let sql = r#"
            CREATE TABLE orders (id INT, user_id INT, FOREIGN KEY (user_id) REFERENCES users(id));
            CREATE TABLE users (id INT);
        "#;
        let layout = LayoutEngine::default().layout(&parse_ddl(sql));

        let names: Vec<&str> = layout.placements.iter().map(|p| p.table.name.as_str()).collect();
        assert_eq!(names, vec!["users", "orders"]);
        assert!((layout.placements[0].position.x - 10.0).abs() < 1e-9);
        assert!((layout.placements[1].position.x + 10.0).abs() < 1e-9);
        assert_eq!(layout.links.len(), 1);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let sql = r#"
            CREATE TABLE a (id INT, b_id INT, FOREIGN KEY (b_id) REFERENCES b(id));
            CREATE TABLE b (id INT, c_id INT, FOREIGN KEY (c_id) REFERENCES c(id));
            CREATE TABLE c (id INT, a_id INT, FOREIGN KEY (a_id) REFERENCES a(id));
        "#;
        let schema = parse_ddl(sql);
        let engine = LayoutEngine::default();

        let first = serde_json::to_string(&engine.layout(&schema)).unwrap();
        let second = serde_json::to_string(&engine.layout(&schema)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_radius() {
        let engine = LayoutEngine {
            radius: 4.0,
            ..LayoutEngine::default()
        };
        let placements = engine.place(&parse_ddl("CREATE TABLE a (id INT);"));
        assert_eq!(placements[0].position.x, 4.0);
        assert_eq!(placements[0].position.y, 0.0);
    }

    #[test]
    fn test_empty_schema() {
        let layout = LayoutEngine::default().layout(&Schema::default());
        assert!(layout.placements.is_empty());
        assert!(layout.links.is_empty());
    }
}

//! Interactive diagram session: one parsed schema plus its live highlight.

use wasm_bindgen::prelude::*;

use crate::highlight::{HighlightState, RowTag};
use crate::interaction::{HoverOutcome, HoverTracker, PickHit};
use crate::scene::{Scene, SceneConfig};
use crate::sql::parse_ddl;

/// Holds everything a viewer needs between pointer events. Submitting new
/// DDL means building a new session.
#[wasm_bindgen]
pub struct Session {
    scene: Scene,
    state: HighlightState,
    hover: HoverTracker,
}

impl Session {
    pub fn with_config(source: &str, config: SceneConfig) -> Self {
        let scene = Scene::build(parse_ddl(source), config);
        let state = scene.highlight_state();
        Self {
            scene,
            state,
            hover: HoverTracker::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn state(&self) -> &HighlightState {
        &self.state
    }

    /// Feed one batch of pick hits, nearest first.
    pub fn pointer_move(&mut self, hits: &[PickHit]) -> HoverOutcome {
        let propagator = self.scene.propagator();
        self.hover
            .on_pointer_move(hits, &propagator, &mut self.state)
    }
}

#[wasm_bindgen]
impl Session {
    #[wasm_bindgen(constructor)]
    pub fn new(source: &str) -> Self {
        Self::with_config(source, SceneConfig::default())
    }

    /// Hover a row, or clear when either part is missing. Returns whether
    /// the highlight changed.
    pub fn hover(&mut self, table: Option<String>, column: Option<String>) -> bool {
        let hits = match (table, column) {
            (Some(table), Some(column)) => vec![PickHit::row(0, &table, &column)],
            _ => Vec::new(),
        };
        self.pointer_move(&hits) != HoverOutcome::Unchanged
    }

    pub fn clear(&mut self) -> bool {
        let propagator = self.scene.propagator();
        self.hover.clear(&propagator, &mut self.state) != HoverOutcome::Unchanged
    }

    /// Highlighted rows as `table.column` strings.
    #[wasm_bindgen(js_name = "highlightedRows")]
    pub fn highlighted_rows(&self) -> Vec<String> {
        self.state
            .highlighted_rows()
            .iter()
            .map(|t| t.to_string())
            .collect()
    }

    /// Highlighted connectors as JSON tags.
    #[wasm_bindgen(js_name = "highlightedLinks")]
    pub fn highlighted_links(&self) -> Result<String, String> {
        serde_json::to_string(&self.state.highlighted_links()).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "rowColor")]
    pub fn row_color(&self, table: &str, column: &str) -> Option<u32> {
        self.state.row_color(&RowTag::new(table, column))
    }

    #[wasm_bindgen(js_name = "sceneJson")]
    pub fn scene_json(&self) -> Result<String, String> {
        self.scene.to_json().map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQL: &str = r#"
        CREATE TABLE users (id INT, name TEXT);
        CREATE TABLE orders (id INT, user_id INT, FOREIGN KEY (user_id) REFERENCES users(id));
        CREATE TABLE items (order_id INT, FOREIGN KEY (order_id) REFERENCES orders(id));
    "#;

    #[test]
    fn test_hover_and_clear() {
        let mut session = Session::new(SQL);

        assert!(session.hover(Some("orders".into()), Some("id".into())));
        assert_eq!(session.highlighted_rows(), vec!["items.order_id", "orders.id"]);

        assert!(!session.hover(Some("orders".into()), Some("id".into())));

        assert!(session.hover(None, None));
        assert!(session.highlighted_rows().is_empty());
        assert!(!session.clear());
    }

    #[test]
    fn test_highlighted_links_json() {
        let mut session = Session::new(SQL);
        session.hover(Some("users".into()), Some("id".into()));

        let links: serde_json::Value =
            serde_json::from_str(&session.highlighted_links().unwrap()).unwrap();
        assert_eq!(links[0]["from_table"], "orders");
        assert_eq!(links[0]["to_column"], "id");
        assert_eq!(
            session.row_color("orders", "user_id"),
            Some(crate::style::ROW_HIGHLIGHT)
        );
    }
}

//! A laid-out schema ready to hand to a renderer.

use serde::Serialize;

use crate::ast::Schema;
use crate::highlight::{HighlightPropagator, HighlightState, LinkIndex, RowIndex, RowTag};
use crate::layout::{Layout, LayoutEngine, LinkCurve, LinkTag, Point3, TablePlacement};
use crate::measure::{TableLabels, TextMetrics};
use crate::style;

/// Drawing backend for a scene. Implementations own their meshes; the core
/// only ever refers to rows by `(table, column)` and connectors by tag.
pub trait SceneRenderer {
    fn draw_table(&mut self, placement: &TablePlacement, labels: &TableLabels);
    fn draw_link(&mut self, link: &LinkCurve);
    fn set_row_color(&mut self, row: &RowTag, color: u32);
    fn set_link_style(&mut self, link: &LinkTag, color: u32, opacity: f32);
}

/// Tunables for building a scene.
#[derive(Default)]
pub struct SceneConfig {
    pub layout: LayoutEngine,
    pub metrics: TextMetrics,
}

/// Distance from a focused table to the camera, along +z.
const FOCUS_DISTANCE: f64 = 10.0;

/// Where a camera should sit and look to frame one table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FocusTarget {
    pub look_at: Point3,
    pub eye: Point3,
}

pub struct Scene {
    schema: Schema,
    layout: Layout,
    rows: RowIndex,
    links: LinkIndex,
    metrics: TextMetrics,
}

#[derive(Serialize)]
struct SceneView<'a> {
    palette: Palette,
    tables: Vec<TableView<'a>>,
    links: &'a [LinkCurve],
}

/// Fixed colors a renderer needs beyond per-row backgrounds.
#[derive(Serialize)]
struct Palette {
    table_frame: String,
    header_background: String,
    header_text: String,
    row_name_text: String,
    row_type_text: String,
    row_highlight: String,
    link: String,
    link_highlight: String,
    link_marker: String,
}

impl Palette {
    fn new() -> Self {
        Self {
            table_frame: style::hex(style::TABLE_FRAME),
            header_background: style::hex(style::HEADER_BACKGROUND),
            header_text: style::hex(style::HEADER_TEXT),
            row_name_text: style::hex(style::ROW_NAME_TEXT),
            row_type_text: style::hex(style::ROW_TYPE_TEXT),
            row_highlight: style::hex(style::ROW_HIGHLIGHT),
            link: style::hex(style::LINK),
            link_highlight: style::hex(style::LINK_HIGHLIGHT),
            link_marker: style::hex(style::LINK_MARKER),
        }
    }
}

#[derive(Serialize)]
struct TableView<'a> {
    #[serde(flatten)]
    placement: &'a TablePlacement,
    height: f64,
    row_colors: Vec<String>,
}

impl Scene {
    pub fn build(schema: Schema, config: SceneConfig) -> Self {
        let layout = config.layout.layout(&schema);
        let rows = RowIndex::from_placements(&layout.placements);
        let links = LinkIndex::from_links(&layout.links);

        Self {
            schema,
            layout,
            rows,
            links,
            metrics: config.metrics,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn placements(&self) -> &[TablePlacement] {
        &self.layout.placements
    }

    pub fn links(&self) -> &[LinkCurve] {
        &self.layout.links
    }

    pub fn row_index(&self) -> &RowIndex {
        &self.rows
    }

    pub fn link_index(&self) -> &LinkIndex {
        &self.links
    }

    /// Fresh highlight state with every row and connector at its base look.
    pub fn highlight_state(&self) -> HighlightState {
        HighlightState::new(&self.rows, &self.links)
    }

    pub fn propagator(&self) -> HighlightPropagator<'_> {
        HighlightPropagator::new(&self.schema, &self.links)
    }

    pub fn focus_target(&self, table: &str) -> Option<FocusTarget> {
        let placement = self.placements().iter().find(|p| p.table.name == table)?;
        let look_at = placement.position;
        Some(FocusTarget {
            look_at,
            eye: look_at.offset(0.0, 0.0, FOCUS_DISTANCE),
        })
    }

    /// Draw every table and connector, then apply the current highlight.
    pub fn render<R: SceneRenderer + ?Sized>(&self, renderer: &mut R, state: &HighlightState) {
        for placement in self.placements() {
            renderer.draw_table(placement, &self.metrics.table_labels(placement));
        }
        for link in self.links() {
            renderer.draw_link(link);
        }
        state.paint(renderer);
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let view = SceneView {
            palette: Palette::new(),
            tables: self
                .placements()
                .iter()
                .map(|placement| TableView {
                    placement,
                    height: placement.height(),
                    row_colors: (0..placement.table.columns.len())
                        .map(|j| style::hex(style::row_background(j)))
                        .collect(),
                })
                .collect(),
            links: self.links(),
        };
        serde_json::to_string_pretty(&view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::parse_ddl;

    #[derive(Default)]
    struct Recorder {
        tables: Vec<(String, usize)>,
        links: Vec<LinkTag>,
        row_colors: Vec<(RowTag, u32)>,
        link_styles: Vec<(LinkTag, u32)>,
    }

    impl SceneRenderer for Recorder {
        fn draw_table(&mut self, placement: &TablePlacement, labels: &TableLabels) {
            self.tables.push((placement.table.name.clone(), labels.rows.len()));
        }

        fn draw_link(&mut self, link: &LinkCurve) {
            self.links.push(link.tag.clone());
        }

        fn set_row_color(&mut self, row: &RowTag, color: u32) {
            self.row_colors.push((row.clone(), color));
        }

        fn set_link_style(&mut self, link: &LinkTag, color: u32, _opacity: f32) {
            self.link_styles.push((link.clone(), color));
        }
    }

    const SQL: &str = r#"
        CREATE TABLE orders (id INT, user_id INT, FOREIGN KEY (user_id) REFERENCES users(id));
        CREATE TABLE users (id INT, name TEXT);
    "#;

    #[test]
    fn test_render_draws_everything_and_paints_highlight() {
        let scene = Scene::build(parse_ddl(SQL), SceneConfig::default());
        let mut state = scene.highlight_state();
        scene
            .propagator()
            .highlight(&RowTag::new("users", "id"), &mut state);

        let mut recorder = Recorder::default();
        scene.render(&mut recorder, &state);

        assert_eq!(
            recorder.tables,
            vec![("users".to_string(), 2), ("orders".to_string(), 2)]
        );
        assert_eq!(recorder.links, vec![LinkTag::new("orders", "users", "user_id", "id")]);
        assert_eq!(recorder.link_styles[0].1, style::LINK_HIGHLIGHT);

        let highlighted: Vec<&RowTag> = recorder
            .row_colors
            .iter()
            .filter(|(_, c)| *c == style::ROW_HIGHLIGHT)
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            highlighted,
            vec![&RowTag::new("orders", "user_id"), &RowTag::new("users", "id")]
        );
    }

    #[test]
    fn test_schema_keeps_parse_order() {
        let scene = Scene::build(parse_ddl(SQL), SceneConfig::default());
        assert_eq!(scene.schema().tables[0].name, "orders");
        assert_eq!(scene.placements()[0].table.name, "users");
    }

    #[test]
    fn test_focus_target() {
        let scene = Scene::build(parse_ddl(SQL), SceneConfig::default());
        let focus = scene.focus_target("users").unwrap();

        assert_eq!(focus.look_at, scene.placements()[0].position);
        assert_eq!(focus.eye.z, 10.0);
        assert!(scene.focus_target("ghosts").is_none());
    }

    #[test]
    fn test_scene_json() {
        let scene = Scene::build(parse_ddl(SQL), SceneConfig::default());
        let json: serde_json::Value = serde_json::from_str(&scene.to_json().unwrap()).unwrap();

        assert_eq!(json["palette"]["link"], "#3498db");
        assert_eq!(json["tables"][0]["table"]["name"], "users");
        assert_eq!(json["tables"][0]["row_colors"][1], "#bdc3c7");
        assert_eq!(json["links"][0]["from_table"], "orders");
        assert_eq!(json["links"][0]["control_points"].as_array().unwrap().len(), 6);
        assert_eq!(json["links"][0]["points"].as_array().unwrap().len(), 51);
    }
}

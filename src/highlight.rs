//! Selection highlighting across directly related rows and connectors.
//!
//! Rows are keyed by `(table, column)` and connectors by their 4-tuple tag,
//! independent of whatever objects a renderer uses to draw them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::ast::Schema;
use crate::layout::{LinkCurve, LinkTag, TablePlacement};
use crate::scene::SceneRenderer;
use crate::style;

/// A row in the diagram, by table and column name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowTag {
    pub table: String,
    pub column: String,
}

impl RowTag {
    pub fn new(table: &str, column: &str) -> Self {
        Self {
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    /// Parse `table.column`.
    pub fn parse(s: &str) -> Option<Self> {
        let (table, column) = s.split_once('.')?;
        let (table, column) = (table.trim(), column.trim());
        if table.is_empty() || column.is_empty() {
            return None;
        }
        Some(Self::new(table, column))
    }
}

impl fmt::Display for RowTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// Every placed row with its base display color.
#[derive(Debug, Clone, Default)]
pub struct RowIndex {
    base: BTreeMap<RowTag, u32>,
}

impl RowIndex {
    /// Index the rows of every placement. When names repeat, the first
    /// placed row wins.
    pub fn from_placements(placements: &[TablePlacement]) -> Self {
        let mut base = BTreeMap::new();
        for placement in placements {
            let table = &placement.table;
            for (j, column) in table.columns.iter().enumerate() {
                base.entry(RowTag::new(&table.name, &column.name))
                    .or_insert_with(|| style::row_background(j));
            }
        }
        Self { base }
    }

    pub fn base_color(&self, tag: &RowTag) -> Option<u32> {
        self.base.get(tag).copied()
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }
}

/// Connector tags in build order. Position `i` is connector `i`.
#[derive(Debug, Clone, Default)]
pub struct LinkIndex {
    tags: Vec<LinkTag>,
}

impl LinkIndex {
    pub fn from_links(links: &[LinkCurve]) -> Self {
        Self {
            tags: links.iter().map(|l| l.tag.clone()).collect(),
        }
    }

    pub fn tags(&self) -> &[LinkTag] {
        &self.tags
    }

    /// Positions of connectors joining the same rows as `tag`, either way.
    pub fn matching<'a>(&'a self, tag: &'a LinkTag) -> impl Iterator<Item = usize> + 'a {
        self.tags
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.joins(tag))
            .map(|(i, _)| i)
    }
}

#[derive(Debug, Clone)]
struct RowState {
    color: u32,
    saved: Option<u32>,
    highlighted: bool,
}

#[derive(Debug, Clone)]
struct LinkState {
    tag: LinkTag,
    color: u32,
    opacity: f32,
    highlighted: bool,
}

/// Current display state of every row and connector.
///
/// Only [`HighlightPropagator`] changes it.
#[derive(Debug, Clone)]
pub struct HighlightState {
    rows: BTreeMap<RowTag, RowState>,
    links: Vec<LinkState>,
    anchor: Option<RowTag>,
}

impl HighlightState {
    pub fn new(rows: &RowIndex, links: &LinkIndex) -> Self {
        Self {
            rows: rows
                .base
                .iter()
                .map(|(tag, &color)| {
                    let state = RowState {
                        color,
                        saved: None,
                        highlighted: false,
                    };
                    (tag.clone(), state)
                })
                .collect(),
            links: links
                .tags
                .iter()
                .map(|tag| LinkState {
                    tag: tag.clone(),
                    color: style::LINK,
                    opacity: style::LINK_OPACITY,
                    highlighted: false,
                })
                .collect(),
            anchor: None,
        }
    }

    /// The row the current highlight was computed from.
    pub fn anchor(&self) -> Option<&RowTag> {
        self.anchor.as_ref()
    }

    pub fn row_color(&self, tag: &RowTag) -> Option<u32> {
        self.rows.get(tag).map(|r| r.color)
    }

    pub fn is_row_highlighted(&self, tag: &RowTag) -> bool {
        self.rows.get(tag).is_some_and(|r| r.highlighted)
    }

    pub fn link_style(&self, index: usize) -> Option<(u32, f32)> {
        self.links.get(index).map(|l| (l.color, l.opacity))
    }

    pub fn is_link_highlighted(&self, index: usize) -> bool {
        self.links.get(index).is_some_and(|l| l.highlighted)
    }

    pub fn highlighted_rows(&self) -> Vec<&RowTag> {
        self.rows
            .iter()
            .filter(|(_, r)| r.highlighted)
            .map(|(tag, _)| tag)
            .collect()
    }

    pub fn highlighted_links(&self) -> Vec<&LinkTag> {
        self.links
            .iter()
            .filter(|l| l.highlighted)
            .map(|l| &l.tag)
            .collect()
    }

    /// Push every row color and connector style to the renderer.
    pub fn paint<R: SceneRenderer + ?Sized>(&self, renderer: &mut R) {
        for (tag, row) in &self.rows {
            renderer.set_row_color(tag, row.color);
        }
        for link in &self.links {
            renderer.set_link_style(&link.tag, link.color, link.opacity);
        }
    }

    fn mark_row(&mut self, table: &str, column: &str) {
        let Some(row) = self.rows.get_mut(&RowTag::new(table, column)) else {
            return;
        };
        // A row reached twice in one pass keeps the color it had before the first mark.
        if !row.highlighted {
            row.saved = Some(row.color);
            row.highlighted = true;
        }
        row.color = style::ROW_HIGHLIGHT;
    }

    fn mark_links(&mut self, index: &LinkIndex, tag: &LinkTag) {
        for i in index.matching(tag) {
            if let Some(link) = self.links.get_mut(i) {
                link.color = style::LINK_HIGHLIGHT;
                link.opacity = style::LINK_OPACITY;
                link.highlighted = true;
            }
        }
    }

    fn clear(&mut self) {
        for link in self.links.iter_mut().filter(|l| l.highlighted) {
            link.color = style::LINK;
            link.opacity = style::LINK_OPACITY;
            link.highlighted = false;
        }
        for row in self.rows.values_mut().filter(|r| r.highlighted) {
            if let Some(color) = row.saved.take() {
                row.color = color;
            }
            row.highlighted = false;
        }
        self.anchor = None;
    }
}

/// Marks an anchor row and its direct foreign-key neighbors.
pub struct HighlightPropagator<'a> {
    schema: &'a Schema,
    links: &'a LinkIndex,
}

impl<'a> HighlightPropagator<'a> {
    pub fn new(schema: &'a Schema, links: &'a LinkIndex) -> Self {
        Self { schema, links }
    }

    /// Restore every highlighted row and connector to its base look.
    pub fn reset(&self, state: &mut HighlightState) {
        state.clear();
    }

    /// Replace the current highlight with the anchor's 1-hop neighborhood.
    ///
    /// Marks the anchor row, the rows its foreign keys reference, the rows
    /// whose foreign keys reference it, and the connectors between them.
    /// Nothing further out is touched.
    pub fn highlight(&self, anchor: &RowTag, state: &mut HighlightState) {
        self.reset(state);

        state.mark_row(&anchor.table, &anchor.column);

        // Outgoing: the anchor column's own foreign keys.
        for table in self.schema.tables.iter().filter(|t| t.name == anchor.table) {
            for fk in table.foreign_keys.iter().filter(|fk| fk.column == anchor.column) {
                let tag = LinkTag::new(&anchor.table, &fk.ref_table, &anchor.column, &fk.ref_column);
                state.mark_links(self.links, &tag);
                state.mark_row(&fk.ref_table, &fk.ref_column);
            }
        }

        // Incoming: foreign keys anywhere that point at the anchor.
        for table in &self.schema.tables {
            for fk in table
                .foreign_keys
                .iter()
                .filter(|fk| fk.ref_table == anchor.table && fk.ref_column == anchor.column)
            {
                let tag = LinkTag::new(&table.name, &anchor.table, &fk.column, &anchor.column);
                state.mark_links(self.links, &tag);
                state.mark_row(&table.name, &fk.column);
            }
        }

        state.anchor = Some(anchor.clone());
    }
}

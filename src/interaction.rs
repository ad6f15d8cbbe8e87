//! Pointer hover and selection handling on top of the highlight state.

use tracing::trace;

use crate::highlight::{HighlightPropagator, HighlightState, RowTag};

/// What a pick ray hit, as reported by the picking backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickTarget {
    /// A table row.
    Row(RowTag),
    /// Some other part of a table: frame, header, labels.
    Table(String),
    /// Anything untagged: connectors, markers, background.
    Other,
}

/// One hit from the picking backend. Hits arrive nearest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickHit {
    /// Backend object identity, opaque to the core.
    pub object: u64,
    pub target: PickTarget,
}

impl PickHit {
    pub fn row(object: u64, table: &str, column: &str) -> Self {
        Self {
            object,
            target: PickTarget::Row(RowTag::new(table, column)),
        }
    }

    pub fn table(&self) -> Option<&str> {
        match &self.target {
            PickTarget::Row(tag) => Some(&tag.table),
            PickTarget::Table(name) => Some(name),
            PickTarget::Other => None,
        }
    }
}

/// Result of feeding one pointer move to a [`HoverTracker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverOutcome {
    /// Same anchor as before, or still nothing hovered.
    Unchanged,
    Highlighted(RowTag),
    Cleared,
}

/// Turns a stream of pointer moves into highlight updates.
///
/// Repeated moves over the row that is already highlighted do nothing; any
/// other move runs a full reset and re-mark before returning.
#[derive(Debug, Default)]
pub struct HoverTracker {
    current: Option<RowTag>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&RowTag> {
        self.current.as_ref()
    }

    /// Act on the nearest row hit, or clear when no row was hit.
    pub fn on_pointer_move(
        &mut self,
        hits: &[PickHit],
        propagator: &HighlightPropagator<'_>,
        state: &mut HighlightState,
    ) -> HoverOutcome {
        let nearest_row = hits.iter().find_map(|hit| match &hit.target {
            PickTarget::Row(tag) => Some(tag),
            _ => None,
        });

        match nearest_row {
            Some(tag) if self.current.as_ref() == Some(tag) => HoverOutcome::Unchanged,
            Some(tag) => {
                trace!(row = %tag, "hover");
                propagator.highlight(tag, state);
                self.current = Some(tag.clone());
                HoverOutcome::Highlighted(tag.clone())
            }
            None => self.clear(propagator, state),
        }
    }

    /// Drop any highlight, e.g. when the pointer leaves the viewport.
    pub fn clear(
        &mut self,
        propagator: &HighlightPropagator<'_>,
        state: &mut HighlightState,
    ) -> HoverOutcome {
        if self.current.take().is_some() {
            trace!("hover cleared");
            propagator.reset(state);
            HoverOutcome::Cleared
        } else {
            HoverOutcome::Unchanged
        }
    }
}

/// Table under a click, from the nearest hit that belongs to a table.
pub fn resolve_selection(hits: &[PickHit]) -> Option<&str> {
    hits.iter().find_map(PickHit::table)
}

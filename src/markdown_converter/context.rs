//! Rendering context threaded through the tree walk

/// Per-branch rendering state.
///
/// Passed by value: a nested structure copies it with one field changed, so
/// a sibling subtree never observes state from a neighbour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderContext {
    pub list_depth: usize,
    pub in_preformatted: bool,
    pub in_table: bool,
}

impl RenderContext {
    #[must_use]
    pub fn nested_list(self) -> Self {
        Self {
            list_depth: self.list_depth + 1,
            ..self
        }
    }

    #[must_use]
    pub fn preformatted(self) -> Self {
        Self {
            in_preformatted: true,
            ..self
        }
    }

    /// Fresh context for a table cell
    #[must_use]
    pub fn table_cell() -> Self {
        Self {
            in_table: true,
            ..Self::default()
        }
    }
}

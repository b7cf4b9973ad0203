//! Scroll geometry: the scroll view, its row template, and the window range.

use crate::error::{ListingError, Result};

/// Rows materialized above the first row in view.
pub const EXTRA_ITEMS_BEFORE: usize = 10;
/// Rows materialized below the last row in view.
pub const EXTRA_ITEMS_AFTER: usize = 10;

/// Inclusive index range into the shown sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRange {
    pub first: usize,
    pub last: usize,
}

impl WindowRange {
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.first && index <= self.last
    }
}

/// Computes which rows to materialize for a scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCalculator {
    pub pad_before: usize,
    pub pad_after: usize,
}

impl Default for WindowCalculator {
    fn default() -> Self {
        Self {
            pad_before: EXTRA_ITEMS_BEFORE,
            pad_after: EXTRA_ITEMS_AFTER,
        }
    }
}

impl WindowCalculator {
    pub fn new(pad_before: usize, pad_after: usize) -> Self {
        Self {
            pad_before,
            pad_after,
        }
    }

    /// Window for the given geometry, or `None` when there is nothing to show.
    ///
    /// The result always satisfies `first <= last < item_count`.
    pub fn range(
        &self,
        scroll_top: u32,
        viewport_height: u32,
        item_height: u32,
        item_count: usize,
    ) -> Option<WindowRange> {
        if item_count == 0 {
            return None;
        }
        let item_height = item_height.max(1);
        let first = (scroll_top / item_height) as usize;
        let first = first.saturating_sub(self.pad_before);
        let in_view = viewport_height.div_ceil(item_height) as usize;
        let last = (first + in_view + 1 + self.pad_after).min(item_count - 1);
        Some(WindowRange {
            first: first.min(last),
            last,
        })
    }
}

/// A pre-rendered row whose shape every materialized row copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowTemplate {
    /// Rendered height, assumed identical for every row.
    pub height: u32,
    /// Indentation added per level below the top.
    pub indent_unit: usize,
}

impl RowTemplate {
    pub fn new(height: u32) -> Self {
        Self {
            height,
            indent_unit: 1,
        }
    }

    pub fn indent_unit(mut self, indent_unit: usize) -> Self {
        self.indent_unit = indent_unit;
        self
    }
}

/// Fixed-height scroll container.
///
/// Before a listing takes it over, it holds the caller's pre-rendered rows;
/// afterwards it only tracks the scroll offset and the spacer extent that
/// sizes the scrollable area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollView {
    rows: Vec<RowTemplate>,
    scroll_top: u32,
    viewport_height: u32,
    extent: u32,
}

impl ScrollView {
    pub fn new(viewport_height: u32) -> Self {
        Self {
            rows: Vec::new(),
            scroll_top: 0,
            viewport_height,
            extent: 0,
        }
    }

    /// Add a pre-rendered row.
    pub fn with_row(mut self, row: RowTemplate) -> Self {
        self.rows.push(row);
        self
    }

    /// Take the first pre-rendered row as the template and clear the view.
    pub fn take_template(&mut self) -> Result<RowTemplate> {
        let template = *self.rows.first().ok_or(ListingError::MissingTemplate)?;
        if template.height == 0 {
            return Err(ListingError::ZeroHeightTemplate);
        }
        self.rows.clear();
        Ok(template)
    }

    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// Height of the spacer that establishes the scrollable extent.
    pub fn extent(&self) -> u32 {
        self.extent
    }

    pub fn max_scroll_top(&self) -> u32 {
        self.extent.saturating_sub(self.viewport_height)
    }

    /// Resize the spacer, pulling the offset back if it now overshoots.
    pub fn set_extent(&mut self, extent: u32) {
        self.extent = extent;
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
    }

    pub fn set_viewport_height(&mut self, viewport_height: u32) {
        self.viewport_height = viewport_height;
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
    }

    /// Scroll to an absolute offset, clamped to the extent.
    pub fn scroll_to(&mut self, offset: u32) {
        self.scroll_top = offset.min(self.max_scroll_top());
    }

    /// Scroll by a signed delta, clamped to the extent.
    pub fn scroll_by(&mut self, delta: i64) {
        let target = (self.scroll_top as i64 + delta).clamp(0, u32::MAX as i64);
        self.scroll_to(target as u32);
    }
}

//! Windowed listing engine.
//!
//! A [`WindowedListing`] owns the sequence of shown item IDs, the set of
//! expanded items and the scroll geometry, and materializes only the rows
//! that fall inside the current window. Item lookups go through an
//! [`ItemSource`]; selection changes are reported to a [`SelectionListener`].
//!
//! All mutating operations take `&mut self` and run to completion, including
//! every awaited source lookup, before the next operation can start.

pub mod expansion;
pub mod item;
pub mod path;
pub mod scroll;
pub mod sequence;
pub mod window;

use std::collections::HashSet;

use crate::error::Result;

pub use expansion::ExpansionState;
pub use item::{
    ItemFactory, ItemIcon, ItemLabel, ItemRow, ItemSource, LabelStyle, SelectionListener,
};
pub use scroll::ScrollCoordinator;
pub use sequence::ShownItemSequence;
pub use window::{RowTemplate, ScrollView, WindowCalculator, WindowRange};

/// Windowed, hierarchical listing over item IDs.
pub struct WindowedListing<S, L> {
    source: S,
    listener: L,
    shown: ShownItemSequence,
    expansion: ExpansionState,
    selected: Option<String>,
    view: ScrollView,
    factory: ItemFactory,
    calculator: WindowCalculator,
    window: Option<WindowRange>,
    rows: Vec<ItemRow>,
}

impl<S: ItemSource, L: SelectionListener> WindowedListing<S, L> {
    /// Set up a listing with the default window padding.
    ///
    /// The first row of `view` becomes the template for every item and
    /// fixes the row height. Nested initial IDs have their parents shown and
    /// expanded. If `initial_selected` is among `initial_ids`, the view is
    /// scrolled to it before the first window is built.
    pub async fn create(
        initial_ids: Vec<String>,
        view: ScrollView,
        initial_selected: Option<String>,
        listener: L,
        source: S,
    ) -> Result<Self> {
        Self::create_with(
            WindowCalculator::default(),
            initial_ids,
            view,
            initial_selected,
            listener,
            source,
        )
        .await
    }

    /// Like [`WindowedListing::create`], with explicit window padding.
    pub async fn create_with(
        calculator: WindowCalculator,
        initial_ids: Vec<String>,
        mut view: ScrollView,
        initial_selected: Option<String>,
        listener: L,
        source: S,
    ) -> Result<Self> {
        let template = view.take_template()?;
        view.set_extent(extent_for(initial_ids.len(), template.height));

        if let Some(selected) = initial_selected.as_deref() {
            if let Some(idx) = initial_ids.iter().position(|id| id == selected) {
                view.scroll_to(extent_for(idx, template.height));
            }
        }

        let mut listing = Self {
            source,
            listener,
            shown: ShownItemSequence::new(),
            expansion: ExpansionState::new(),
            selected: initial_selected,
            view,
            factory: ItemFactory::new(template),
            calculator,
            window: None,
            rows: Vec::new(),
        };
        listing.update_items(move |_| initial_ids, true).await;
        Ok(listing)
    }

    /// Replace the shown sequence with `updater(current)`.
    ///
    /// With `reset_expanded`, every item is collapsed first. Duplicates are
    /// dropped and missing ancestors of nested items are shown and expanded
    /// before the window is rebuilt.
    pub async fn update_items<F>(&mut self, updater: F, reset_expanded: bool)
    where
        F: FnOnce(&[String]) -> Vec<String>,
    {
        if reset_expanded {
            self.expansion.clear();
        }

        let next = updater(self.shown.as_slice());
        self.shown.replace(next);
        let repaired = self.shown.repair_ancestors(&mut self.expansion);
        if repaired > 0 {
            log::debug!("inserted {repaired} missing ancestor item(s)");
        }

        self.refresh_window().await;
    }

    /// Expand `id`, splicing its children in underneath it.
    ///
    /// Does nothing unless the source reports `id` as expandable and `id` is
    /// still shown once its children arrive. A single child is expanded in
    /// turn; with several children, those still marked expanded from before
    /// are re-expanded. Each item is expanded at most once per call.
    pub async fn expand_item(&mut self, id: &str) {
        let mut visited = HashSet::new();
        // (item, expand even if not marked)
        let mut pending = vec![(id.to_string(), true)];

        while let Some((current, forced)) = pending.pop() {
            if !forced && !self.expansion.is_expanded(&current) {
                continue;
            }
            if !visited.insert(current.clone()) {
                continue;
            }
            let Some(children) = self.expand_one(&current).await else {
                continue;
            };
            if children.len() == 1 {
                pending.extend(children.into_iter().map(|child| (child, true)));
            } else {
                pending.extend(children.into_iter().rev().map(|child| (child, false)));
            }
        }
    }

    async fn expand_one(&mut self, id: &str) -> Option<Vec<String>> {
        if !self.source.is_expandable(id).await {
            return None;
        }
        let children = self.source.item_children(id).await;
        if !self.shown.contains(id) {
            log::debug!("skipping expand of {id}: no longer shown");
            return None;
        }

        self.expansion.mark(id);
        let inserted = children.clone();
        let parent = id.to_string();
        self.update_items(
            move |items| {
                let mut next = ShownItemSequence::from_ids(items.to_vec());
                next.insert_after(&parent, &inserted);
                next.into_ids()
            },
            false,
        )
        .await;
        Some(children)
    }

    /// Collapse `id`, hiding everything underneath it. No-op unless expanded.
    pub async fn collapse_item(&mut self, id: &str) {
        if !self.expansion.unmark(id) {
            return;
        }
        self.update_items(
            |items| {
                let mut next = ShownItemSequence::from_ids(items.to_vec());
                next.remove_descendants(id);
                next.into_ids()
            },
            false,
        )
        .await;
    }

    /// Collapse `id` if expanded, otherwise expand it.
    pub async fn toggle_item(&mut self, id: &str) {
        if self.expansion.is_expanded(id) {
            self.collapse_item(id).await;
        } else {
            self.expand_item(id).await;
        }
    }

    /// Select `id` and toggle its expansion, as a click on its row does.
    pub async fn click(&mut self, id: &str) {
        self.select(id).await;
        self.toggle_item(id).await;
    }

    /// Select `id` and notify the listener, without toggling it.
    pub async fn select(&mut self, id: &str) {
        self.selected = Some(id.to_string());
        for row in &mut self.rows {
            row.selected = row.id == id;
        }

        match self.rows.iter().find(|row| row.id == id) {
            Some(row) => self.listener.on_select_item(id, row),
            None => {
                let row = self
                    .factory
                    .make_item(&self.source, id, &self.expansion, Some(id))
                    .await;
                self.listener.on_select_item(id, &row);
            }
        }
    }

    /// Rebuild the window of rows for the current scroll position.
    ///
    /// The listener is notified again for the selected item if its row is
    /// part of the new window.
    pub async fn refresh_window(&mut self) {
        let height = self.factory.template().height;
        self.view.set_extent(extent_for(self.shown.len(), height));

        self.window = self.calculator.range(
            self.view.scroll_top(),
            self.view.viewport_height(),
            height,
            self.shown.len(),
        );

        let mut rows = Vec::with_capacity(self.window.map_or(0, |range| range.len()));
        if let Some(range) = self.window {
            for id in &self.shown.as_slice()[range.first..=range.last] {
                let row = self
                    .factory
                    .make_item(&self.source, id, &self.expansion, self.selected.as_deref())
                    .await;
                if row.selected {
                    self.listener.on_select_item(id, &row);
                }
                rows.push(row);
            }
        }
        self.rows = rows;
    }

    /// Scroll so that `id` is fully inside the viewport. Returns whether the
    /// offset changed; the window itself is not rebuilt.
    pub fn reveal(&mut self, id: &str) -> bool {
        let Some(idx) = self.shown.position(id) else {
            return false;
        };
        let height = self.factory.template().height;
        let top = extent_for(idx, height);
        let bottom = top.saturating_add(height);
        let before = self.view.scroll_top();
        let viewport = self.view.viewport_height();

        if top < before {
            self.view.scroll_to(top);
        } else if bottom > before.saturating_add(viewport) {
            self.view.scroll_to(bottom.saturating_sub(viewport));
        }
        self.view.scroll_top() != before
    }
}

impl<S, L> WindowedListing<S, L> {
    /// Rows of the current window, top to bottom.
    pub fn visible_elements(&self) -> &[ItemRow] {
        &self.rows
    }

    /// Every shown item ID, including those outside the window.
    pub fn item_ids(&self) -> &[String] {
        self.shown.as_slice()
    }

    pub fn window_range(&self) -> Option<WindowRange> {
        self.window
    }

    /// Offset of the first materialized row within the scrollable extent.
    pub fn window_offset(&self) -> u32 {
        self.window.map_or(0, |range| {
            extent_for(range.first, self.factory.template().height)
        })
    }

    /// Row under a point `y` units below the top of the viewport.
    pub fn row_at(&self, y: u32) -> Option<&ItemRow> {
        let height = self.factory.template().height;
        let index = (self.view.scroll_top().saturating_add(y) / height) as usize;
        let range = self.window?;
        if !range.contains(index) {
            return None;
        }
        self.rows.get(index - range.first)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expansion.is_expanded(id)
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn item_height(&self) -> u32 {
        self.factory.template().height
    }

    pub fn scroll_view(&self) -> &ScrollView {
        &self.view
    }

    /// Scroll to an absolute offset. Call [`WindowedListing::refresh_window`]
    /// (directly or through a [`ScrollCoordinator`]) to rebuild the rows.
    pub fn scroll_to(&mut self, offset: u32) {
        self.view.scroll_to(offset);
    }

    pub fn scroll_by(&mut self, delta: i64) {
        self.view.scroll_by(delta);
    }

    pub fn resize_viewport(&mut self, viewport_height: u32) {
        self.view.set_viewport_height(viewport_height);
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }
}

fn extent_for(count: usize, item_height: u32) -> u32 {
    u32::try_from(count)
        .unwrap_or(u32::MAX)
        .saturating_mul(item_height)
}

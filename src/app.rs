use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::catalog::{Catalog, InitialState};
use crate::config::AppConfig;
use crate::error::Result;
use crate::listing::path;
use crate::listing::{
    ItemRow, RowTemplate, ScrollCoordinator, ScrollView, SelectionListener, WindowedListing,
};
use crate::search::SearchState;
use crate::theme::{self, ThemeColors};

/// How long a status message stays on screen.
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Rows moved per mouse wheel notch.
pub const WHEEL_ROWS: i64 = 3;

/// Application mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    #[default]
    Normal,
    /// Typing into the search bar.
    Search,
}

/// Remembers what the listing last reported as selected.
///
/// Leaf items also become the preview target; expandable items only move
/// the selection.
#[derive(Debug, Default, Clone)]
pub struct SelectionTracker {
    pub selected: Option<String>,
    pub preview: Option<String>,
    /// Number of notifications received.
    pub notifications: usize,
}

impl SelectionListener for SelectionTracker {
    fn on_select_item(&mut self, id: &str, row: &ItemRow) {
        self.selected = Some(id.to_string());
        if !row.is_expandable() {
            self.preview = Some(id.to_string());
        }
        self.notifications += 1;
    }
}

/// Main application state.
pub struct App {
    pub listing: WindowedListing<Catalog, SelectionTracker>,
    pub search: SearchState,
    pub scroll: ScrollCoordinator,
    pub mode: AppMode,
    pub theme: ThemeColors,
    pub use_icons: bool,
    pub should_quit: bool,
    pub status_message: Option<(String, Instant)>,
    /// Inner area of the listing panel from the last render.
    pub list_area: Rect,
}

impl App {
    /// Build the listing over `catalog` starting from `initial`.
    ///
    /// `viewport_height` is the listing panel height in terminal lines.
    pub async fn new(
        catalog: Catalog,
        initial: InitialState,
        viewport_height: u16,
        config: &AppConfig,
    ) -> Result<Self> {
        let template = RowTemplate::new(config.item_height()).indent_unit(config.indent_width());
        let view = ScrollView::new(u32::from(viewport_height)).with_row(template);
        let listing = WindowedListing::create_with(
            config.window_calculator(),
            initial.items,
            view,
            initial.selected,
            SelectionTracker::default(),
            catalog,
        )
        .await?;

        Ok(Self {
            listing,
            search: SearchState::new(config.search_mode(), config.min_query_len()),
            scroll: ScrollCoordinator::new(config.scroll_debounce()),
            mode: AppMode::Normal,
            theme: theme::resolve_theme(&config.theme),
            use_icons: config.use_icons(),
            should_quit: false,
            status_message: None,
            list_area: Rect::default(),
        })
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message with current timestamp.
    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    /// Clear the status message once it has been shown long enough.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, created)) = &self.status_message {
            if created.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
            }
        }
    }

    /// Index of the selected item in the shown sequence.
    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.listing.selected_id()?;
        self.listing.item_ids().iter().position(|id| id == selected)
    }

    // ── Selection ───────────────────────────────────────────────────────────

    /// Select the shown item at `index`, scrolling it into view.
    async fn select_index(&mut self, index: usize) {
        let Some(id) = self.listing.item_ids().get(index).cloned() else {
            return;
        };
        if self.listing.reveal(&id) {
            self.scroll.cancel();
            self.listing.refresh_window().await;
        }
        self.listing.select(&id).await;
    }

    /// Move selection down by one item.
    pub async fn select_next(&mut self) {
        let len = self.listing.item_ids().len();
        if len == 0 {
            return;
        }
        let next = self.selected_index().map_or(0, |idx| (idx + 1).min(len - 1));
        self.select_index(next).await;
    }

    /// Move selection up by one item.
    pub async fn select_previous(&mut self) {
        let prev = self.selected_index().map_or(0, |idx| idx.saturating_sub(1));
        self.select_index(prev).await;
    }

    /// Jump to the first item.
    pub async fn select_first(&mut self) {
        self.select_index(0).await;
    }

    /// Jump to the last item.
    pub async fn select_last(&mut self) {
        let len = self.listing.item_ids().len();
        if len > 0 {
            self.select_index(len - 1).await;
        }
    }

    /// Click the selected row: re-select it and toggle its expansion.
    pub async fn activate_selected(&mut self) {
        if let Some(id) = self.listing.selected_id().map(str::to_string) {
            self.listing.click(&id).await;
        }
    }

    /// Expand the selected item (no-op on leaves).
    pub async fn expand_selected(&mut self) {
        if let Some(id) = self.listing.selected_id().map(str::to_string) {
            self.listing.expand_item(&id).await;
        }
    }

    /// Collapse the selected item, or jump to its parent if it is not expanded.
    pub async fn collapse_selected(&mut self) {
        let Some(id) = self.listing.selected_id().map(str::to_string) else {
            return;
        };
        if self.listing.is_expanded(&id) {
            self.listing.collapse_item(&id).await;
            return;
        }
        let parent = path::parent_of(&id)
            .and_then(|parent| self.listing.item_ids().iter().position(|id| id == parent));
        if let Some(idx) = parent {
            self.select_index(idx).await;
        }
    }

    // ── Scrolling ───────────────────────────────────────────────────────────

    /// Scroll by `rows` rows. The window is rebuilt once scrolling settles.
    pub fn scroll_rows(&mut self, rows: i64) {
        let height = i64::from(self.listing.item_height());
        self.listing.scroll_by(rows.saturating_mul(height));
        self.scroll.on_scroll(Instant::now());
    }

    fn page_rows(&self) -> i64 {
        let viewport = self.listing.scroll_view().viewport_height();
        i64::from((viewport / self.listing.item_height()).max(1))
    }

    pub fn page_down(&mut self) {
        self.scroll_rows(self.page_rows());
    }

    pub fn page_up(&mut self) {
        self.scroll_rows(-self.page_rows());
    }

    /// Click the row `y` lines below the top of the listing panel.
    pub async fn click_at_row(&mut self, y: u16) {
        let id = self
            .listing
            .row_at(u32::from(y))
            .map(|row| row.id.clone());
        if let Some(id) = id {
            self.listing.click(&id).await;
        }
    }

    /// Periodic housekeeping: rebuild the window once scrolling has been
    /// quiet for the debounce interval, and expire old status messages.
    pub async fn on_tick(&mut self, now: Instant) {
        if self.scroll.take_due(now) {
            self.listing.refresh_window().await;
        }
        self.clear_expired_status();
    }

    /// Match the listing viewport to the last rendered panel height.
    pub async fn sync_viewport(&mut self) {
        let height = u32::from(self.list_area.height);
        if height != self.listing.scroll_view().viewport_height() {
            self.listing.resize_viewport(height);
            self.listing.refresh_window().await;
        }
    }

    // ── Search ──────────────────────────────────────────────────────────────

    pub fn start_search(&mut self) {
        self.mode = AppMode::Search;
    }

    pub async fn search_input(&mut self, c: char) {
        self.search.insert_char(c);
        self.search.apply(&mut self.listing).await;
    }

    pub async fn search_backspace(&mut self) {
        self.search.delete_char();
        self.search.apply(&mut self.listing).await;
    }

    /// Leave search mode and restore the pre-search listing.
    pub async fn cancel_search(&mut self) {
        self.mode = AppMode::Normal;
        self.search.clear_query();
        self.search.apply(&mut self.listing).await;
    }

    /// Leave search mode, keeping the filtered listing.
    pub fn confirm_search(&mut self) {
        self.mode = AppMode::Normal;
        if let Some(count) = self.search.match_count {
            self.set_status_message(format!("{count} match(es) for \"{}\"", self.search.query));
        }
    }
}

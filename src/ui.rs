use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use crate::app::{App, AppMode};
use crate::components::listing::ListingWidget;
use crate::components::search::SearchBarWidget;
use crate::components::status_bar::StatusBarWidget;

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub listing: Rect,
    pub search: Option<Rect>,
    pub status: Rect,
}

/// Split `area` into the listing panel, an optional search bar, and the
/// status bar.
pub fn layout(area: Rect, show_search: bool) -> ScreenLayout {
    if show_search {
        let [listing, search, status] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        ScreenLayout {
            listing,
            search: Some(search),
            status,
        }
    } else {
        let [listing, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
        ScreenLayout {
            listing,
            search: None,
            status,
        }
    }
}

fn listing_block(app: &App) -> Block<'static> {
    let title = if app.search.is_filtering() {
        format!(" search: {} ", app.search.query)
    } else {
        " items ".to_string()
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_fg))
}

/// Rows available to the listing when the terminal is `height` rows tall.
pub fn listing_height(height: u16, show_search: bool) -> u16 {
    let panel = layout(Rect::new(0, 0, 1, height), show_search).listing;
    Block::default().borders(Borders::ALL).inner(panel).height
}

fn listing_info(app: &App) -> String {
    let shown = app.listing.item_ids().len();
    match app.listing.window_range() {
        Some(range) => format!("{shown} shown | rows {}-{}", range.first, range.last),
        None => format!("{shown} shown"),
    }
}

/// Render the application UI.
pub fn render(app: &mut App, frame: &mut Frame) {
    let show_search = app.mode == AppMode::Search || app.search.is_filtering();
    let regions = layout(frame.area(), show_search);

    let block = listing_block(app);
    app.list_area = block.inner(regions.listing);
    let listing = ListingWidget::new(&app.listing, &app.theme, app.use_icons).block(block);
    frame.render_widget(listing, regions.listing);

    if let Some(search_area) = regions.search {
        let editing = app.mode == AppMode::Search;
        frame.render_widget(
            SearchBarWidget::new(&app.search, &app.theme, editing),
            search_area,
        );
    }

    let info = listing_info(app);
    let tracker = app.listing.listener();
    let mut status = StatusBarWidget::new(app.listing.selected_id(), &info, &app.theme)
        .preview(tracker.preview.as_deref());
    if let Some((msg, _)) = &app.status_message {
        status = status.status_message(msg);
    }
    frame.render_widget(status, regions.status);
}

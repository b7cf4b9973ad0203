use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::{App, AppMode, WHEEL_ROWS};

/// Handle a key event.
pub async fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match app.mode {
        AppMode::Normal => handle_normal_mode(app, key).await,
        AppMode::Search => handle_search_mode(app, key).await,
    }
}

async fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next().await,
        KeyCode::Char('k') | KeyCode::Up => app.select_previous().await,
        KeyCode::Char('g') | KeyCode::Home => app.select_first().await,
        KeyCode::Char('G') | KeyCode::End => app.select_last().await,
        KeyCode::PageDown => app.page_down(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_selected().await,
        KeyCode::Char('l') | KeyCode::Right => app.expand_selected().await,
        KeyCode::Char('h') | KeyCode::Left => app.collapse_selected().await,
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Esc if app.search.is_filtering() => app.cancel_search().await,
        _ => {}
    }
}

async fn handle_search_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_search().await,
        KeyCode::Enter => app.confirm_search(),
        KeyCode::Backspace => app.search_backspace().await,
        KeyCode::Char(c) => app.search_input(c).await,
        _ => {}
    }
}

/// Handle a mouse event: the wheel scrolls, a left click clicks a row.
pub async fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.scroll_rows(WHEEL_ROWS),
        MouseEventKind::ScrollUp => app.scroll_rows(-WHEEL_ROWS),
        MouseEventKind::Down(MouseButton::Left) => {
            let area = app.list_area;
            if area.contains(Position::new(mouse.column, mouse.row)) {
                app.click_at_row(mouse.row - area.y).await;
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::AppConfig;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    async fn setup_app() -> App {
        let catalog = Catalog::from_lines("docs\ndocs/readme.md\nsrc\nsrc/main.rs\nNOTES\n");
        let initial = catalog.resolve_initial(None, None);
        App::new(catalog, initial, 10, &AppConfig::default())
            .await
            .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[tokio::test]
    async fn quit_keys() {
        let mut app = setup_app().await;
        handle_key_event(&mut app, key(KeyCode::Char('q'))).await;
        assert!(app.should_quit);

        let mut app = setup_app().await;
        app.start_search();
        let ctrl_c = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        handle_key_event(&mut app, ctrl_c).await;
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn navigation_and_expansion_keys() {
        let mut app = setup_app().await;
        handle_key_event(&mut app, key(KeyCode::Char('j'))).await;
        assert_eq!(app.listing.selected_id(), Some("docs"));
        handle_key_event(&mut app, key(KeyCode::Char('l'))).await;
        assert!(app.listing.is_expanded("docs"));
        handle_key_event(&mut app, key(KeyCode::Down)).await;
        assert_eq!(app.listing.selected_id(), Some("docs/readme.md"));
        handle_key_event(&mut app, key(KeyCode::Char('h'))).await;
        assert_eq!(app.listing.selected_id(), Some("docs"));
        handle_key_event(&mut app, key(KeyCode::Enter)).await;
        assert!(!app.listing.is_expanded("docs"));
        handle_key_event(&mut app, key(KeyCode::End)).await;
        assert_eq!(app.listing.selected_id(), Some("NOTES"));
    }

    #[tokio::test]
    async fn q_is_text_in_search_mode() {
        let mut app = setup_app().await;
        handle_key_event(&mut app, key(KeyCode::Char('/'))).await;
        assert_eq!(app.mode, AppMode::Search);
        handle_key_event(&mut app, key(KeyCode::Char('q'))).await;
        assert!(!app.should_quit);
        assert_eq!(app.search.query, "q");
        handle_key_event(&mut app, key(KeyCode::Esc)).await;
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.search.query.is_empty());
    }

    #[tokio::test]
    async fn esc_in_normal_mode_clears_kept_filter() {
        let mut app = setup_app().await;
        handle_key_event(&mut app, key(KeyCode::Char('/'))).await;
        for c in "main".chars() {
            handle_key_event(&mut app, key(KeyCode::Char(c))).await;
        }
        handle_key_event(&mut app, key(KeyCode::Enter)).await;
        assert_eq!(app.listing.item_ids().len(), 2);

        handle_key_event(&mut app, key(KeyCode::Esc)).await;
        assert!(!app.search.is_filtering());
        assert_eq!(app.listing.item_ids().len(), 3);
    }

    #[tokio::test]
    async fn wheel_schedules_refresh() {
        let mut app = setup_app().await;
        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut app, wheel).await;
        assert!(app.scroll.is_pending());
    }

    #[tokio::test]
    async fn left_click_maps_into_listing_area() {
        let mut app = setup_app().await;
        app.list_area = Rect::new(1, 1, 30, 10);

        // Outside the panel (on the border).
        handle_mouse_event(&mut app, click(0, 0)).await;
        assert_eq!(app.listing.selected_id(), None);

        handle_mouse_event(&mut app, click(5, 2)).await;
        assert_eq!(app.listing.selected_id(), Some("src"));
        assert!(app.listing.is_expanded("src"));
    }
}

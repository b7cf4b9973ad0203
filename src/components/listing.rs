use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::listing::{ItemIcon, ItemRow, LabelStyle, WindowedListing};
use crate::theme::ThemeColors;

/// Renders the materialized window of a listing.
///
/// Rows sit at their place in the full scrollable extent, so while a
/// debounced refresh is pending the panel may show blank lines where rows
/// have not been built yet.
pub struct ListingWidget<'a, S, L> {
    listing: &'a WindowedListing<S, L>,
    theme: &'a ThemeColors,
    use_icons: bool,
    block: Option<Block<'a>>,
}

impl<'a, S, L> ListingWidget<'a, S, L> {
    pub fn new(
        listing: &'a WindowedListing<S, L>,
        theme: &'a ThemeColors,
        use_icons: bool,
    ) -> Self {
        Self {
            listing,
            theme,
            use_icons,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Expansion indicator for a row.
    fn indicator(&self, row: &ItemRow) -> &'static str {
        if self.use_icons {
            match row.icon {
                ItemIcon::Expanded => "\u{f07c} ",
                ItemIcon::Collapsed => "\u{f07b} ",
                ItemIcon::Leaf => "\u{f15b} ",
            }
        } else {
            match row.icon {
                ItemIcon::Expanded => "[-] ",
                ItemIcon::Collapsed => "[+] ",
                ItemIcon::Leaf => "    ",
            }
        }
    }

    fn row_style(&self, row: &ItemRow) -> Style {
        if row.selected {
            return Style::default()
                .bg(self.theme.tree_selected_bg)
                .fg(self.theme.tree_selected_fg)
                .add_modifier(Modifier::BOLD);
        }
        match row.label.style {
            LabelStyle::Directory => Style::default()
                .fg(self.theme.tree_dir_fg)
                .add_modifier(Modifier::BOLD),
            LabelStyle::File => Style::default().fg(self.theme.tree_file_fg),
            LabelStyle::Plain => Style::default().fg(self.theme.tree_fg),
        }
    }
}

impl<S, L> Widget for ListingWidget<'_, S, L> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner_area.height == 0 || inner_area.width == 0 {
            return;
        }
        buf.set_style(inner_area, Style::default().bg(self.theme.tree_bg));

        let scroll_top = self.listing.scroll_view().scroll_top();
        let viewport = u32::from(inner_area.height);
        let mut top = self.listing.window_offset();

        for row in self.listing.visible_elements() {
            let row_top = top;
            top = top.saturating_add(row.height);
            if top <= scroll_top {
                continue;
            }
            // Rows partly above the viewport start at its first line.
            let y = row_top.saturating_sub(scroll_top);
            if y >= viewport {
                break;
            }

            let style = self.row_style(row);
            let content = format!(
                "{}{}{}",
                " ".repeat(row.indent),
                self.indicator(row),
                row.label.text
            );
            let line_area = Rect::new(inner_area.x, inner_area.y + y as u16, inner_area.width, 1);
            if row.selected {
                buf.set_style(line_area, style);
            }
            let line = Line::from(Span::styled(content, style));
            buf.set_line(line_area.x, line_area.y, &line, line_area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::listing::{ItemRow, RowTemplate, ScrollView};
    use crate::theme;

    fn line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    async fn listing(
        viewport: u32,
        ids: Vec<String>,
    ) -> WindowedListing<Catalog, impl FnMut(&str, &ItemRow)> {
        let initial = vec![ids[0].clone()];
        WindowedListing::create(
            initial,
            ScrollView::new(viewport).with_row(RowTemplate::new(1).indent_unit(2)),
            None,
            |_id: &str, _row: &ItemRow| {},
            Catalog::new(ids),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn renders_indent_and_indicators() {
        let ids = ["src", "src/main.rs", "src/lib.rs"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut listing = listing(5, ids).await;
        listing.expand_item("src").await;
        listing.select("src/lib.rs").await;

        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        ListingWidget::new(&listing, &tc, false).render(area, &mut buf);

        assert!(line(&buf, 0).starts_with("[-] src"));
        assert!(line(&buf, 1).starts_with("      main.rs"));
        assert!(line(&buf, 2).starts_with("      lib.rs"));
        assert_eq!(buf.cell((0, 2)).unwrap().bg, tc.tree_selected_bg);
        assert_eq!(buf.cell((4, 0)).unwrap().fg, tc.tree_dir_fg);
        assert!(line(&buf, 3).trim().is_empty());
    }

    #[tokio::test]
    async fn rows_are_offset_by_scroll_position() {
        let mut ids = vec!["dir".to_string()];
        ids.extend((0..50).map(|i| format!("dir/f{i:02}")));
        let mut listing = listing(4, ids).await;
        listing.expand_item("dir").await;
        listing.scroll_to(20);

        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 20, 4);

        // Before the window is rebuilt the rows are still where they were.
        let mut buf = Buffer::empty(area);
        ListingWidget::new(&listing, &tc, false).render(area, &mut buf);
        assert!(line(&buf, 0).trim().is_empty());

        listing.refresh_window().await;
        let mut buf = Buffer::empty(area);
        ListingWidget::new(&listing, &tc, false).render(area, &mut buf);
        // Row 20 of the sequence is dir/f19.
        assert!(line(&buf, 0).contains("f19"));
        assert!(line(&buf, 3).contains("f22"));
    }

    #[tokio::test]
    async fn zero_area_does_not_panic() {
        let listing = listing(4, vec!["a".to_string()]).await;
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        ListingWidget::new(&listing, &tc, true).render(area, &mut buf);
    }
}

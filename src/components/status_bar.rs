use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

/// Status bar widget: selected item, preview target, and listing counters,
/// or a transient status message.
pub struct StatusBarWidget<'a> {
    selected: Option<&'a str>,
    preview: Option<&'a str>,
    listing_info: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(selected: Option<&'a str>, listing_info: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            selected,
            preview: None,
            listing_info,
            theme,
            status_message: None,
        }
    }

    pub fn preview(mut self, preview: Option<&'a str>) -> Self {
        self.preview = preview;
        self
    }

    pub fn status_message(mut self, msg: &'a str) -> Self {
        self.status_message = Some(msg);
        self
    }
}

/// Keep the tail of `s` so that it fits in `budget` columns.
fn truncate_left(s: &str, budget: usize) -> String {
    let len = s.chars().count();
    if len <= budget {
        return s.to_string();
    }
    if budget <= 3 {
        return s.chars().take(budget).collect();
    }
    let tail: String = s.chars().skip(len - (budget - 3)).collect();
    format!("...{tail}")
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;
        let base = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.status_fg);
        buf.set_style(Rect::new(area.x, area.y, area.width, 1), base);

        if let Some(msg) = self.status_message {
            let style = base.fg(self.theme.warning_fg);
            let line = Line::from(Span::styled(truncate_left(msg, width), style));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        let key_hints = " /:search  q:quit ";
        let info = format!(" {} ", self.listing_info);
        let preview = self
            .preview
            .map(|p| format!(" preview: {p} "))
            .unwrap_or_default();

        let right_len = info.chars().count() + key_hints.chars().count();
        let budget = width.saturating_sub(right_len);
        let selected_budget = budget.saturating_sub(preview.chars().count());
        let selected = truncate_left(self.selected.unwrap_or("(no selection)"), selected_budget);
        let preview = truncate_left(&preview, budget.saturating_sub(selected.chars().count()));

        let gap = budget
            .saturating_sub(selected.chars().count())
            .saturating_sub(preview.chars().count());

        let spans = vec![
            Span::styled(selected, base.add_modifier(Modifier::BOLD)),
            Span::styled(preview, base.fg(self.theme.accent_fg)),
            Span::styled(" ".repeat(gap), base),
            Span::styled(info, base),
            Span::styled(key_hints, base.fg(self.theme.dim_fg).add_modifier(Modifier::DIM)),
        ];
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

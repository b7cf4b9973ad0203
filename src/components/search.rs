use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::search::SearchState;
use crate::theme::ThemeColors;

/// One-line search bar shown under the listing.
pub struct SearchBarWidget<'a> {
    state: &'a SearchState,
    theme: &'a ThemeColors,
    /// Whether keystrokes currently go to the query.
    editing: bool,
}

impl<'a> SearchBarWidget<'a> {
    pub fn new(state: &'a SearchState, theme: &'a ThemeColors, editing: bool) -> Self {
        Self {
            state,
            theme,
            editing,
        }
    }

    fn summary(&self) -> String {
        let typed = self.state.query.chars().count();
        match self.state.match_count {
            _ if typed < self.state.min_query_len => {
                format!("type {} more", self.state.min_query_len - typed)
            }
            Some(1) => "1 match".to_string(),
            Some(n) => format!("{n} matches"),
            None => String::new(),
        }
    }
}

impl Widget for SearchBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let query = &self.state.query;
        let cursor_pos = self.state.cursor_position.min(query.len());

        let prompt_style = Style::default()
            .fg(self.theme.search_fg)
            .add_modifier(Modifier::BOLD);
        let input_style = Style::default().fg(self.theme.tree_fg);
        let cursor_style = Style::default()
            .bg(self.theme.tree_fg)
            .fg(self.theme.status_bg)
            .add_modifier(Modifier::BOLD);
        let dim_style = Style::default().fg(self.theme.dim_fg);

        let mut spans = vec![Span::styled("/", prompt_style)];
        if self.editing {
            let (before, rest) = query.split_at(cursor_pos);
            let mut rest_chars = rest.chars();
            let cursor_char = rest_chars.next().map_or(" ".to_string(), String::from);
            spans.push(Span::styled(before, input_style));
            spans.push(Span::styled(cursor_char, cursor_style));
            spans.push(Span::styled(rest_chars.as_str(), input_style));
        } else {
            spans.push(Span::styled(query.as_str(), input_style));
        }

        let right = format!(" {} | {} ", self.summary(), self.state.mode.label());
        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let pad = (area.width as usize).saturating_sub(used + right.chars().count());
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(right, dim_style));

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

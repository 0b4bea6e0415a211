use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

/// One-line bar: server URL on the left, view/loading state toward the
/// right, key hints at the edge. A transient status message takes over
/// the whole line while present.
pub struct StatusBarWidget<'a> {
    server_url: &'a str,
    view_label: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
    loading: bool,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(server_url: &'a str, view_label: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            server_url,
            view_label,
            theme,
            status_message: None,
            is_error: false,
            loading: false,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;

        if let Some(msg) = self.status_message {
            let style = if self.is_error {
                Style::default()
                    .bg(self.theme.error_fg)
                    .fg(self.theme.status_fg)
            } else {
                Style::default().fg(self.theme.info_fg)
            };

            let display: String = if msg.chars().count() >= width {
                msg.chars().take(width).collect()
            } else {
                format!("{:<width$}", msg, width = width)
            };

            let line = Line::from(Span::styled(display, style));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        let key_hints = " Tab:view  Enter:open  a:folder  d:del  r:refresh  q:quit ";
        let hints_len = key_hints.len();

        let state_label = if self.loading {
            format!("{} ⟳", self.view_label)
        } else {
            self.view_label.to_string()
        };

        let remaining = width.saturating_sub(hints_len);
        let url_budget = remaining
            .saturating_sub(state_label.len())
            .saturating_sub(1);

        // Char-based suffix take: a URL with multibyte characters must not
        // be sliced mid-character.
        let url_chars = self.server_url.chars().count();
        let url_display: String = if url_chars > url_budget {
            if url_budget > 3 {
                let tail: String = self
                    .server_url
                    .chars()
                    .skip(url_chars - (url_budget - 3))
                    .collect();
                format!("...{}", tail)
            } else {
                self.server_url.chars().take(url_budget).collect()
            }
        } else {
            self.server_url.to_string()
        };

        let gap = remaining
            .saturating_sub(url_display.chars().count())
            .saturating_sub(state_label.chars().count());

        let url_style = Style::default().fg(self.theme.url_fg);
        let state_style = Style::default().fg(self.theme.info_fg);
        let hints_style = Style::default()
            .fg(self.theme.dim_fg)
            .add_modifier(Modifier::DIM);

        let mut spans = vec![
            Span::styled(url_display, url_style),
            Span::raw(" ".repeat(gap)),
            Span::styled(state_label, state_style),
        ];

        let used: usize = spans.iter().map(|s| s.content.len()).sum();
        let pad = width.saturating_sub(used).saturating_sub(hints_len);
        if pad > 0 {
            spans.push(Span::raw(" ".repeat(pad)));
        }
        spans.push(Span::styled(key_hints, hints_style));

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::api::node::Node;
use crate::theme::ThemeColors;

/// Miller-columns widget: one bordered panel per resolved path depth.
///
/// The entry named on the drill-down route is highlighted in every column;
/// the focused cell carries the stronger selection style.
pub struct ColumnsWidget<'a> {
    columns: &'a [Vec<Node>],
    current_path: &'a [String],
    focus: (usize, usize),
    theme: &'a ThemeColors,
    use_icons: bool,
}

impl<'a> ColumnsWidget<'a> {
    pub fn new(
        columns: &'a [Vec<Node>],
        current_path: &'a [String],
        focus: (usize, usize),
        theme: &'a ThemeColors,
        use_icons: bool,
    ) -> Self {
        Self {
            columns,
            current_path,
            focus,
            theme,
            use_icons,
        }
    }

    fn indicator(&self, node: &Node) -> &'static str {
        if self.use_icons {
            if node.is_folder {
                "󰝰 "
            } else {
                "󰈦 "
            }
        } else if node.is_folder {
            "[D] "
        } else {
            "[F] "
        }
    }

    /// Display name: invoices read better without the extension noise.
    fn display_name(name: &str) -> &str {
        name.strip_suffix(".pdf").unwrap_or(name)
    }
}

impl<'a> Widget for ColumnsWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if self.columns.is_empty() {
            let line = Line::from(Span::styled(
                "Loading…",
                Style::default().fg(self.theme.dim_fg),
            ));
            buf.set_line(area.x + 1, area.y + 1, &line, area.width.saturating_sub(1));
            return;
        }

        let constraints: Vec<Constraint> = self
            .columns
            .iter()
            .map(|_| Constraint::Ratio(1, self.columns.len() as u32))
            .collect();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (level, (items, chunk)) in self.columns.iter().zip(chunks.iter()).enumerate() {
            let is_focused_column = level == self.focus.0;
            let title = self
                .current_path
                .get(level.saturating_sub(1))
                .filter(|_| level > 0)
                .map(|s| format!(" {} ", s))
                .unwrap_or_else(|| " / ".to_string());

            let border_fg = if is_focused_column {
                self.theme.border_focused_fg
            } else {
                self.theme.border_fg
            };
            let block = Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_fg));
            let inner = block.inner(*chunk);
            block.render(*chunk, buf);

            if inner.width == 0 || inner.height == 0 {
                continue;
            }

            if items.is_empty() {
                let line = Line::from(Span::styled(
                    "(empty)",
                    Style::default().fg(self.theme.dim_fg),
                ));
                buf.set_line(inner.x, inner.y, &line, inner.width);
                continue;
            }

            for (row, node) in items.iter().take(inner.height as usize).enumerate() {
                let on_route = self.current_path.get(level) == Some(&node.name);
                let is_focused_cell = is_focused_column && row == self.focus.1;

                let style = if is_focused_cell {
                    Style::default()
                        .bg(self.theme.selected_bg)
                        .fg(self.theme.selected_fg)
                        .add_modifier(Modifier::BOLD)
                } else if on_route {
                    Style::default()
                        .fg(self.theme.selected_bg)
                        .add_modifier(Modifier::BOLD)
                } else if node.is_folder {
                    Style::default().fg(self.theme.folder_fg)
                } else {
                    Style::default().fg(self.theme.file_fg)
                };

                let line = Line::from(Span::styled(
                    format!(
                        "{}{}",
                        self.indicator(node),
                        Self::display_name(&node.name)
                    ),
                    style,
                ));
                buf.set_line(inner.x, inner.y + row as u16, &line, inner.width);
            }
        }
    }
}

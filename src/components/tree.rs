use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::browse::tree::TreeRow;
use crate::theme::ThemeColors;

/// Tree widget that renders the flattened invoice tree with box-drawing
/// characters.
pub struct TreeWidget<'a> {
    rows: &'a [TreeRow],
    selected: usize,
    scroll: usize,
    theme: &'a ThemeColors,
    use_icons: bool,
    block: Option<Block<'a>>,
}

impl<'a> TreeWidget<'a> {
    pub fn new(
        rows: &'a [TreeRow],
        selected: usize,
        scroll: usize,
        theme: &'a ThemeColors,
        use_icons: bool,
    ) -> Self {
        Self {
            rows,
            selected,
            scroll,
            theme,
            use_icons,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }

    /// Build the indentation prefix from box-drawing characters.
    ///
    /// Ancestor levels draw a continuation bar unless that ancestor was the
    /// last of its siblings.
    fn build_prefix(row: &TreeRow, rows: &[TreeRow], row_index: usize) -> String {
        if row.depth == 0 {
            return String::new();
        }

        let mut parts: Vec<&str> = Vec::new();
        for d in 0..row.depth.saturating_sub(1) {
            // Walk backwards to the ancestor at depth d that contains this row.
            let mut ancestor_is_last = false;
            for j in (0..row_index).rev() {
                if rows[j].depth == d {
                    ancestor_is_last = rows[j].is_last_sibling;
                    break;
                }
                if rows[j].depth < d {
                    break;
                }
            }
            parts.push(if ancestor_is_last { "   " } else { "│  " });
        }
        parts.push(if row.is_last_sibling { "└──" } else { "├──" });
        parts.join("")
    }

    fn indicator(&self, row: &TreeRow) -> &'static str {
        if self.use_icons {
            if row.is_folder {
                if row.is_expanded {
                    "− 󰝰 "
                } else {
                    "+  "
                }
            } else {
                " 󰈦 "
            }
        } else if row.is_folder {
            if row.is_expanded {
                "[-] "
            } else {
                "[+] "
            }
        } else {
            "    "
        }
    }
}

impl<'a> Widget for TreeWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        let visible_height = inner.height as usize;
        if visible_height == 0 || inner.width == 0 {
            return;
        }

        if self.rows.is_empty() {
            let line = Line::from(Span::styled(
                "(empty)",
                Style::default().fg(self.theme.dim_fg),
            ));
            buf.set_line(inner.x, inner.y, &line, inner.width);
            return;
        }

        let visible = self
            .rows
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(visible_height);

        for (i, (idx, row)) in visible.enumerate() {
            let y = inner.y + i as u16;
            let prefix = Self::build_prefix(row, self.rows, idx);
            let indicator = self.indicator(row);

            let style = if idx == self.selected {
                Style::default()
                    .bg(self.theme.selected_bg)
                    .fg(self.theme.selected_fg)
                    .add_modifier(Modifier::BOLD)
            } else if row.is_folder {
                Style::default()
                    .fg(self.theme.folder_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.file_fg)
            };

            let line = Line::from(Span::styled(
                format!("{}{}{}", prefix, indicator, row.name),
                style,
            ));
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}

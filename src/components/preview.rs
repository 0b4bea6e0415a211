use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Widget, Wrap},
};

use crate::theme::ThemeColors;

/// Right-hand preview pane. Terminals cannot embed a PDF, so this shows
/// the invoice identity and the URL a browser can open.
pub struct PreviewWidget<'a> {
    /// Storage path of the selected file, if any.
    path: Option<&'a str>,
    /// Fully encoded view URL for the selected file.
    view_url: Option<String>,
    theme: &'a ThemeColors,
}

impl<'a> PreviewWidget<'a> {
    pub fn new(path: Option<&'a str>, view_url: Option<String>, theme: &'a ThemeColors) -> Self {
        Self {
            path,
            view_url,
            theme,
        }
    }
}

impl<'a> Widget for PreviewWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Preview ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_fg))
            .padding(Padding::new(1, 1, 0, 0));

        let lines = match self.path {
            None => vec![
                Line::default(),
                Line::from(Span::styled(
                    "No invoice selected",
                    Style::default().fg(self.theme.dim_fg),
                )),
                Line::default(),
                Line::from(Span::styled(
                    "Select a PDF to see its details.",
                    Style::default().fg(self.theme.dim_fg),
                )),
            ],
            Some(path) => {
                let name = path.rsplit('/').next().unwrap_or(path);
                let mut lines = vec![
                    Line::default(),
                    Line::from(Span::styled(
                        name.to_string(),
                        Style::default()
                            .fg(self.theme.file_fg)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::default(),
                    Line::from(vec![
                        Span::styled("Path: ", Style::default().fg(self.theme.dim_fg)),
                        Span::raw(path.to_string()),
                    ]),
                    Line::default(),
                ];
                if let Some(url) = self.view_url {
                    lines.push(Line::from(Span::styled(
                        "Open in a browser:",
                        Style::default().fg(self.theme.dim_fg),
                    )));
                    lines.push(Line::from(Span::styled(
                        url,
                        Style::default()
                            .fg(self.theme.url_fg)
                            .add_modifier(Modifier::UNDERLINED),
                    )));
                }
                lines
            }
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

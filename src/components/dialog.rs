use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use crate::app::{AppMode, DialogKind, DialogState};
use crate::theme::ThemeColors;

/// Centered modal overlay for the create-folder prompt, the delete
/// confirmation, and the blocking error box.
pub struct DialogWidget<'a> {
    mode: &'a AppMode,
    dialog_state: &'a DialogState,
    theme: &'a ThemeColors,
}

impl<'a> DialogWidget<'a> {
    pub fn new(mode: &'a AppMode, dialog_state: &'a DialogState, theme: &'a ThemeColors) -> Self {
        Self {
            mode,
            dialog_state,
            theme,
        }
    }

    fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        let w = width.min(area.width);
        let h = height.min(area.height);
        Rect::new(x, y, w, h)
    }
}

impl<'a> Widget for DialogWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let kind = match &self.mode {
            AppMode::Dialog(kind) => kind,
            _ => return,
        };

        match kind {
            DialogKind::CreateFolder { parent } => {
                render_input_dialog(parent, self.dialog_state, self.theme, area, buf);
            }
            DialogKind::DeleteConfirm { target } => {
                render_confirm_dialog(target, self.theme, area, buf);
            }
            DialogKind::Error { message } => {
                render_error_dialog(message, self.theme, area, buf);
            }
        }
    }
}

fn render_input_dialog(
    parent: &str,
    state: &DialogState,
    theme: &ThemeColors,
    area: Rect,
    buf: &mut Buffer,
) {
    let dialog_width = 50.min(area.width.saturating_sub(4));
    let dialog_height = 6;
    let rect = DialogWidget::centered_rect(dialog_width, dialog_height, area);

    Clear.render(rect, buf);

    let title = if parent.is_empty() {
        " New Folder in / ".to_string()
    } else {
        format!(" New Folder in {} ", parent)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dialog_border_fg))
        .padding(Padding::horizontal(1));

    let inner = block.inner(rect);
    block.render(rect, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    // Input line with a block cursor at the end. Truncation counts chars,
    // not bytes, so multibyte input can never split mid-character.
    let max_width = (inner.width as usize).saturating_sub(1);
    let input = state.input.as_str();
    let char_count = input.chars().count();
    let display: String = if char_count > max_width {
        input.chars().skip(char_count - max_width).collect()
    } else {
        input.to_string()
    };

    let input_style = Style::default().fg(theme.status_fg);
    let cursor_style = Style::default()
        .bg(theme.status_fg)
        .fg(theme.status_bg)
        .add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled(display, input_style),
        Span::styled(" ", cursor_style),
    ]);
    buf.set_line(inner.x, inner.y + 1, &line, inner.width);

    let hint = "[Enter] Create  [Esc] Cancel";
    let hint_line = Line::from(Span::styled(
        hint,
        Style::default()
            .fg(theme.dim_fg)
            .add_modifier(Modifier::DIM),
    ));
    if inner.height > 1 {
        buf.set_line(inner.x, inner.y + inner.height - 1, &hint_line, inner.width);
    }
}

fn render_confirm_dialog(target: &str, theme: &ThemeColors, area: Rect, buf: &mut Buffer) {
    let dialog_width = (target.len() as u16 + 10)
        .max(40)
        .min(area.width.saturating_sub(4));
    let dialog_height = 6;
    let rect = DialogWidget::centered_rect(dialog_width, dialog_height, area);

    Clear.render(rect, buf);

    let block = Block::default()
        .title(" Delete Confirmation ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error_fg))
        .padding(Padding::horizontal(1));

    let inner = block.inner(rect);
    block.render(rect, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let header = Line::from(Span::styled(
        "Delete this entry?",
        Style::default()
            .fg(theme.warning_fg)
            .add_modifier(Modifier::BOLD),
    ));
    buf.set_line(inner.x, inner.y, &header, inner.width);

    let target_line = Line::from(Span::styled(
        format!("  • {}", target),
        Style::default().fg(theme.status_fg),
    ));
    if inner.height > 2 {
        buf.set_line(inner.x, inner.y + 2, &target_line, inner.width);
    }

    let hint = "[y/Enter] Yes  [n/Esc] Cancel";
    let hint_line = Line::from(Span::styled(
        hint,
        Style::default()
            .fg(theme.dim_fg)
            .add_modifier(Modifier::DIM),
    ));
    buf.set_line(inner.x, inner.y + inner.height - 1, &hint_line, inner.width);
}

fn render_error_dialog(message: &str, theme: &ThemeColors, area: Rect, buf: &mut Buffer) {
    let dialog_width = (message.len() as u16 + 6)
        .max(30)
        .min(area.width.saturating_sub(4));
    let dialog_height = 5;
    let rect = DialogWidget::centered_rect(dialog_width, dialog_height, area);

    Clear.render(rect, buf);

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error_fg))
        .padding(Padding::horizontal(1));

    let inner = block.inner(rect);
    block.render(rect, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let msg_line = Line::from(Span::styled(message, Style::default().fg(theme.error_fg)));
    buf.set_line(inner.x, inner.y + inner.height / 2, &msg_line, inner.width);

    let hint = "[Enter/Esc] Dismiss";
    let hint_line = Line::from(Span::styled(
        hint,
        Style::default()
            .fg(theme.dim_fg)
            .add_modifier(Modifier::DIM),
    ));
    if inner.height > 1 {
        buf.set_line(inner.x, inner.y + inner.height - 1, &hint_line, inner.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::dark_theme;

    fn buffer_to_string(buf: &Buffer, area: Rect) -> String {
        let mut s = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                s.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            s.push('\n');
        }
        s
    }

    #[test]
    fn normal_mode_renders_nothing() {
        let theme = dark_theme();
        let mode = AppMode::Normal;
        let state = DialogState::default();
        let widget = DialogWidget::new(&mode, &state, &theme);
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        assert!(buffer_to_string(&buf, area).trim().is_empty());
    }

    #[test]
    fn create_folder_shows_parent_and_input() {
        let theme = dark_theme();
        let mode = AppMode::Dialog(DialogKind::CreateFolder {
            parent: "2024".to_string(),
        });
        let state = DialogState {
            input: "q3-reports".to_string(),
        };
        let widget = DialogWidget::new(&mode, &state, &theme);
        let area = Rect::new(0, 0, 70, 14);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        let content = buffer_to_string(&buf, area);
        assert!(content.contains("New Folder in 2024"));
        assert!(content.contains("q3-reports"));
        assert!(content.contains("[Enter] Create"));
    }

    #[test]
    fn long_multibyte_input_truncates_on_char_boundaries() {
        let theme = dark_theme();
        let mode = AppMode::Dialog(DialogKind::CreateFolder {
            parent: String::new(),
        });
        let state = DialogState {
            input: "é".repeat(30),
        };
        let widget = DialogWidget::new(&mode, &state, &theme);
        // Narrow enough that the input overflows the inner width.
        let area = Rect::new(0, 0, 24, 10);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        assert!(buffer_to_string(&buf, area).contains('é'));
    }

    #[test]
    fn delete_confirm_names_target() {
        let theme = dark_theme();
        let mode = AppMode::Dialog(DialogKind::DeleteConfirm {
            target: "2024/invoice.pdf".to_string(),
        });
        let state = DialogState::default();
        let widget = DialogWidget::new(&mode, &state, &theme);
        let area = Rect::new(0, 0, 70, 14);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        let content = buffer_to_string(&buf, area);
        assert!(content.contains("Delete this entry?"));
        assert!(content.contains("2024/invoice.pdf"));
    }

    #[test]
    fn error_dialog_shows_message() {
        let theme = dark_theme();
        let mode = AppMode::Dialog(DialogKind::Error {
            message: "HTTP 500 from server".to_string(),
        });
        let state = DialogState::default();
        let widget = DialogWidget::new(&mode, &state, &theme);
        let area = Rect::new(0, 0, 70, 14);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        let content = buffer_to_string(&buf, area);
        assert!(content.contains(" Error "));
        assert!(content.contains("HTTP 500 from server"));
    }
}

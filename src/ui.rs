use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use crate::app::{App, AppMode, ViewMode};
use crate::components::columns::ColumnsWidget;
use crate::components::dialog::DialogWidget;
use crate::components::preview::PreviewWidget;
use crate::components::status_bar::StatusBarWidget;
use crate::components::tree::TreeWidget;

/// Render the application UI: navigation pane on the left, preview on the
/// right, status bar at the bottom, dialog overlay on top when one is open.
pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = vertical[0];
    let status_area = vertical[1];

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_area);
    let nav_area = horizontal[0];
    let preview_area = horizontal[1];

    match app.view {
        ViewMode::Tree => {
            // Keep the cursor inside the bordered viewport.
            let visible_height = nav_area.height.saturating_sub(2) as usize;
            app.update_tree_scroll(visible_height);

            let rows = app.tree.visible_rows();
            let block = Block::default()
                .title(" Invoices ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border_focused_fg));
            let widget = TreeWidget::new(
                &rows,
                app.tree_cursor,
                app.tree_scroll,
                &app.theme,
                app.use_icons,
            )
            .block(block);
            frame.render_widget(widget, nav_area);
        }
        ViewMode::Columns => {
            let widget = ColumnsWidget::new(
                app.columns.columns(),
                app.columns.current_path(),
                app.col_cursor,
                &app.theme,
                app.use_icons,
            );
            frame.render_widget(widget, nav_area);
        }
    }

    let previewed = app.previewed_path();
    let view_url = previewed.as_deref().map(|p| app.client.preview_url(p));
    let preview = PreviewWidget::new(previewed.as_deref(), view_url, &app.theme);
    frame.render_widget(preview, preview_area);

    let view_label = match app.view {
        ViewMode::Tree => "Tree",
        ViewMode::Columns => "Columns",
    };
    let mut status = StatusBarWidget::new(app.client.base_url(), view_label, &app.theme)
        .loading(app.loading);
    if let Some((msg, _)) = &app.status_message {
        status = status.status_message(msg, msg.starts_with('⚠'));
    }
    frame.render_widget(status, status_area);

    if matches!(app.mode, AppMode::Dialog(_)) {
        let dialog = DialogWidget::new(&app.mode, &app.dialog_state, &app.theme);
        frame.render_widget(dialog, area);
    }
}

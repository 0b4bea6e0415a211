use std::time::Instant;

use tracing::{info, warn};

use crate::api::client::StorageClient;
use crate::api::node::Node;
use crate::browse::columns::{ColumnNavigator, ColumnRequest};
use crate::browse::tree::{TreeNavigator, TreeRow};
use crate::event::MutationKind;
use crate::theme::ThemeColors;

/// Which navigation variant is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Tree,
    Columns,
}

/// The kind of dialog being displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    CreateFolder { parent: String },
    DeleteConfirm { target: String },
    Error { message: String },
}

/// Application mode.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum AppMode {
    #[default]
    Normal,
    Dialog(DialogKind),
}

/// Text input state for the create-folder dialog.
#[derive(Debug, Default)]
pub struct DialogState {
    pub input: String,
}

/// Main application state: the HTTP client, both navigation variants, and
/// the cursors/dialogs of the presentation surface.
pub struct App {
    pub client: StorageClient,
    pub view: ViewMode,
    pub tree: TreeNavigator,
    pub columns: ColumnNavigator,
    /// Cursor over the flattened tree rows (recursive variant).
    pub tree_cursor: usize,
    pub tree_scroll: usize,
    /// Focused (column, row) in the column variant.
    pub col_cursor: (usize, usize),
    pub should_quit: bool,
    pub mode: AppMode,
    pub dialog_state: DialogState,
    pub status_message: Option<(String, Instant)>,
    /// A full-tree fetch is in flight.
    pub loading: bool,
    pub use_icons: bool,
    pub confirm_delete: bool,
    pub theme: ThemeColors,
}

impl App {
    pub fn new(
        client: StorageClient,
        root_segment: &str,
        view: ViewMode,
        use_icons: bool,
        confirm_delete: bool,
        theme: ThemeColors,
    ) -> Self {
        Self {
            client,
            view,
            tree: TreeNavigator::new(),
            columns: ColumnNavigator::new(root_segment),
            tree_cursor: 0,
            tree_scroll: 0,
            col_cursor: (0, 0),
            should_quit: false,
            mode: AppMode::Normal,
            dialog_state: DialogState::default(),
            status_message: None,
            loading: false,
            use_icons,
            confirm_delete,
            theme,
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Open a dialog of the given kind.
    pub fn open_dialog(&mut self, kind: DialogKind) {
        self.dialog_state = DialogState::default();
        self.mode = AppMode::Dialog(kind);
    }

    /// Close the current dialog and return to normal mode.
    pub fn close_dialog(&mut self) {
        self.mode = AppMode::Normal;
        self.dialog_state = DialogState::default();
    }

    pub fn dialog_input_char(&mut self, c: char) {
        self.dialog_state.input.push(c);
    }

    pub fn dialog_backspace(&mut self) {
        self.dialog_state.input.pop();
    }

    /// Set a status message with current timestamp.
    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    /// Clear the status message if it has been displayed for more than 3 seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, ref created)) = self.status_message {
            if created.elapsed().as_secs() > 3 {
                self.status_message = None;
            }
        }
    }

    // Tree variant cursor.

    pub fn tree_select_next(&mut self) {
        let len = self.tree.visible_rows().len();
        if len > 0 && self.tree_cursor < len - 1 {
            self.tree_cursor += 1;
        }
    }

    pub fn tree_select_previous(&mut self) {
        if self.tree_cursor > 0 {
            self.tree_cursor -= 1;
        }
    }

    pub fn tree_select_first(&mut self) {
        self.tree_cursor = 0;
    }

    pub fn tree_select_last(&mut self) {
        let len = self.tree.visible_rows().len();
        if len > 0 {
            self.tree_cursor = len - 1;
        }
    }

    /// Update the scroll offset to keep the tree cursor visible.
    pub fn update_tree_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.tree_cursor < self.tree_scroll {
            self.tree_scroll = self.tree_cursor;
        } else if self.tree_cursor >= self.tree_scroll + visible_height {
            self.tree_scroll = self.tree_cursor - visible_height + 1;
        }
    }

    /// The tree row under the cursor, if any.
    pub fn selected_tree_row(&self) -> Option<TreeRow> {
        self.tree.visible_rows().into_iter().nth(self.tree_cursor)
    }

    /// Enter on the tree cursor: folders toggle, files select for preview.
    pub fn tree_activate(&mut self) {
        if let Some(row) = self.selected_tree_row() {
            self.tree.activate(&row);
            self.clamp_tree_cursor();
        }
    }

    fn clamp_tree_cursor(&mut self) {
        let len = self.tree.visible_rows().len();
        if len == 0 {
            self.tree_cursor = 0;
        } else if self.tree_cursor >= len {
            self.tree_cursor = len - 1;
        }
    }

    // Column variant cursor.

    pub fn col_move_up(&mut self) {
        if self.col_cursor.1 > 0 {
            self.col_cursor.1 -= 1;
        }
    }

    pub fn col_move_down(&mut self) {
        let (level, row) = self.col_cursor;
        if let Some(column) = self.columns.columns().get(level) {
            if !column.is_empty() && row < column.len() - 1 {
                self.col_cursor.1 += 1;
            }
        }
    }

    pub fn col_move_left(&mut self) {
        if self.col_cursor.0 > 0 {
            self.col_cursor.0 -= 1;
            self.clamp_col_row();
        }
    }

    pub fn col_move_right(&mut self) {
        if self.col_cursor.0 + 1 < self.columns.columns().len() {
            self.col_cursor.0 += 1;
            self.clamp_col_row();
        }
    }

    fn clamp_col_row(&mut self) {
        let (level, row) = self.col_cursor;
        let len = self
            .columns
            .columns()
            .get(level)
            .map(|c| c.len())
            .unwrap_or(0);
        if len == 0 {
            self.col_cursor.1 = 0;
        } else if row >= len {
            self.col_cursor.1 = len - 1;
        }
    }

    /// Enter on the focused column entry. Returns the fetch to spawn when a
    /// folder was clicked.
    pub fn column_activate(&mut self) -> Option<ColumnRequest> {
        let (level, row) = self.col_cursor;
        let item = self.columns.columns().get(level)?.get(row)?.clone();
        self.columns.click(level, &item)
    }

    // Completion events from spawned tasks.

    /// Apply a finished full-tree fetch. Failed reads keep the previous
    /// snapshot so the tree stays usable on stale data.
    pub fn handle_tree_loaded(&mut self, result: Result<Vec<Node>, String>) {
        self.loading = false;
        match result {
            Ok(nodes) => {
                self.tree.set_snapshot(nodes);
                self.clamp_tree_cursor();
            }
            Err(msg) => {
                warn!(error = %msg, "full-tree fetch failed");
                self.set_status_message(format!("⚠ Refresh failed: {}", msg));
            }
        }
    }

    /// Apply a finished sibling-list fetch; stale generations are dropped by
    /// the navigator, failures render as an empty panel.
    pub fn handle_column_loaded(
        &mut self,
        request: ColumnRequest,
        result: Result<Vec<Node>, String>,
    ) {
        let (items, failure) = match result {
            Ok(items) => (items, None),
            Err(msg) => (Vec::new(), Some(msg)),
        };
        // A superseded response is discarded whole; its failure is not
        // worth surfacing either.
        if !self.columns.apply(&request, items) {
            return;
        }
        self.col_cursor = (request.level, 0);
        if let Some(msg) = failure {
            warn!(error = %msg, path = %request.segments.join("/"), "column fetch failed");
            self.set_status_message(format!("⚠ Listing failed: {}", msg));
        }
    }

    /// Apply a finished mutation. Returns `true` when the caller should
    /// resynchronize with a full tree refetch.
    ///
    /// Failures surface as a blocking error dialog and leave all local
    /// state untouched — no partial apply.
    pub fn handle_mutation_complete(
        &mut self,
        kind: &MutationKind,
        result: Result<(), String>,
    ) -> bool {
        match result {
            Ok(()) => {
                match kind {
                    MutationKind::Delete { path } => {
                        info!(path = %path, "entry deleted");
                        self.tree.selection.clear_if_within(path);
                        self.set_status_message(format!("Deleted {}", path));
                    }
                    MutationKind::CreateFolder { parent, name } => {
                        info!(parent = %parent, name = %name, "folder created");
                        self.set_status_message(format!("Created folder {}", name));
                    }
                }
                true
            }
            Err(msg) => {
                warn!(error = %msg, "mutation failed");
                self.open_dialog(DialogKind::Error { message: msg });
                false
            }
        }
    }

    /// Path of the file the preview pane shows, for the active variant.
    pub fn previewed_path(&self) -> Option<String> {
        match self.view {
            ViewMode::Tree => self.tree.selection.current().map(str::to_string),
            ViewMode::Columns => self.columns.selected_path(),
        }
    }

    /// Directory context for a new folder: the folder under the cursor, a
    /// file's parent, or the storage root.
    pub fn create_parent(&self) -> String {
        match self.selected_tree_row() {
            Some(row) if row.is_folder => row.path,
            Some(row) => match row.path.rsplit_once('/') {
                Some((parent, _)) => parent.to_string(),
                None => String::new(),
            },
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn snapshot() -> Vec<Node> {
        vec![
            Node::folder(
                "2024",
                "2024",
                vec![Node::file("invoice.pdf", "2024/invoice.pdf")],
            ),
            Node::folder("2023", "2023", vec![]),
        ]
    }

    fn setup_app() -> App {
        let client =
            StorageClient::new("http://localhost:8080", Duration::from_secs(5)).unwrap();
        let mut app = App::new(
            client,
            "pdf-storage",
            ViewMode::Tree,
            false,
            true,
            crate::theme::dark_theme(),
        );
        app.handle_tree_loaded(Ok(snapshot()));
        app
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = setup_app();
        assert!(!app.should_quit);
        app.quit();
        assert!(app.should_quit);
    }

    #[test]
    fn tree_cursor_moves_and_clamps() {
        let mut app = setup_app();
        assert_eq!(app.tree_cursor, 0);
        app.tree_select_next();
        assert_eq!(app.tree_cursor, 1);
        app.tree_select_next();
        assert_eq!(app.tree_cursor, 1); // two visible rows, clamped
        app.tree_select_previous();
        assert_eq!(app.tree_cursor, 0);
        app.tree_select_previous();
        assert_eq!(app.tree_cursor, 0);
    }

    #[test]
    fn tree_select_first_and_last() {
        let mut app = setup_app();
        app.tree_select_last();
        assert_eq!(app.tree_cursor, app.tree.visible_rows().len() - 1);
        app.tree_select_first();
        assert_eq!(app.tree_cursor, 0);
    }

    #[test]
    fn tree_activate_expands_folder_then_selects_file() {
        let mut app = setup_app();
        app.tree_activate(); // expand "2024"
        assert!(app.tree.expansion.is_expanded("2024"));
        assert_eq!(app.tree.visible_rows().len(), 3);

        app.tree_select_next(); // onto invoice.pdf
        app.tree_activate();
        assert_eq!(app.tree.selection.current(), Some("2024/invoice.pdf"));
        assert_eq!(app.previewed_path().as_deref(), Some("2024/invoice.pdf"));
    }

    #[test]
    fn collapse_clamps_cursor_into_remaining_rows() {
        let mut app = setup_app();
        app.tree_activate(); // expand
        app.tree_select_last();
        app.tree_select_first();
        app.tree_activate(); // collapse again
        assert_eq!(app.tree.visible_rows().len(), 2);
        assert!(app.tree_cursor < 2);
    }

    #[test]
    fn failed_tree_load_keeps_previous_snapshot() {
        let mut app = setup_app();
        app.handle_tree_loaded(Err("HTTP 500".into()));
        assert_eq!(app.tree.visible_rows().len(), 2);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn update_tree_scroll_follows_cursor() {
        let mut app = setup_app();
        app.tree_activate();
        app.tree_cursor = 2;
        app.update_tree_scroll(2);
        assert_eq!(app.tree_scroll, 1);
        app.tree_cursor = 0;
        app.update_tree_scroll(2);
        assert_eq!(app.tree_scroll, 0);
    }

    #[test]
    fn mutation_success_requests_resync_and_clears_selection() {
        let mut app = setup_app();
        app.tree.selection.select("2024/invoice.pdf");
        let kind = MutationKind::Delete {
            path: "2024".into(),
        };
        assert!(app.handle_mutation_complete(&kind, Ok(())));
        assert!(app.tree.selection.current().is_none());
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn mutation_failure_opens_error_dialog_and_keeps_state() {
        let mut app = setup_app();
        app.tree.selection.select("2024/invoice.pdf");
        let kind = MutationKind::Delete {
            path: "2024/invoice.pdf".into(),
        };
        assert!(!app.handle_mutation_complete(&kind, Err("HTTP 500".into())));
        assert_eq!(app.tree.selection.current(), Some("2024/invoice.pdf"));
        assert!(matches!(
            app.mode,
            AppMode::Dialog(DialogKind::Error { .. })
        ));
    }

    #[test]
    fn create_parent_uses_folder_or_file_parent() {
        let mut app = setup_app();
        assert_eq!(app.create_parent(), "2024");
        app.tree_activate(); // expand 2024
        app.tree_select_next(); // invoice.pdf
        assert_eq!(app.create_parent(), "2024");
        app.tree.set_snapshot(Vec::new());
        app.tree_cursor = 0;
        assert_eq!(app.create_parent(), "");
    }

    #[test]
    fn column_cursor_clamps_to_loaded_columns() {
        let mut app = setup_app();
        app.view = ViewMode::Columns;
        let req = app.columns.begin();
        app.handle_column_loaded(
            req,
            Ok(vec![
                Node {
                    name: "A".into(),
                    path: "A".into(),
                    is_folder: true,
                    children: None,
                },
                Node::file("b.pdf", "b.pdf"),
            ]),
        );
        assert_eq!(app.col_cursor, (0, 0));
        app.col_move_down();
        assert_eq!(app.col_cursor, (0, 1));
        app.col_move_down();
        assert_eq!(app.col_cursor, (0, 1));
        app.col_move_right(); // no second column yet
        assert_eq!(app.col_cursor.0, 0);
    }

    #[test]
    fn column_activate_advances_focus_when_response_lands() {
        let mut app = setup_app();
        app.view = ViewMode::Columns;
        let req = app.columns.begin();
        app.handle_column_loaded(
            req,
            Ok(vec![Node {
                name: "A".into(),
                path: "A".into(),
                is_folder: true,
                children: None,
            }]),
        );
        let req = app.column_activate().expect("folder click issues a fetch");
        app.handle_column_loaded(req, Ok(vec![Node::file("x.pdf", "A/x.pdf")]));
        assert_eq!(app.col_cursor, (1, 0));
        assert!(app.column_activate().is_none()); // file click, no fetch
        assert_eq!(app.previewed_path().as_deref(), Some("A/x.pdf"));
    }

    #[test]
    fn stale_failed_column_load_stays_silent() {
        let mut app = setup_app();
        app.view = ViewMode::Columns;
        let slow = app.columns.begin();
        let fresh = app.columns.begin(); // refresh supersedes the first fetch
        app.handle_column_loaded(fresh, Ok(vec![Node::file("a.pdf", "a.pdf")]));
        app.handle_column_loaded(slow, Err("timed out".into()));
        assert!(app.status_message.is_none());
        assert_eq!(app.columns.columns().len(), 1);
        assert_eq!(app.columns.columns()[0].len(), 1);
    }

    #[test]
    fn failed_column_load_renders_empty_panel() {
        let mut app = setup_app();
        app.view = ViewMode::Columns;
        let req = app.columns.begin();
        app.handle_column_loaded(req, Err("timed out".into()));
        assert_eq!(app.columns.columns().len(), 1);
        assert!(app.columns.columns()[0].is_empty());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn dialog_input_edits() {
        let mut app = setup_app();
        app.open_dialog(DialogKind::CreateFolder {
            parent: "2024".into(),
        });
        app.dialog_input_char('q');
        app.dialog_input_char('1');
        assert_eq!(app.dialog_state.input, "q1");
        app.dialog_backspace();
        assert_eq!(app.dialog_state.input, "q");
        app.close_dialog();
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.dialog_state.input.is_empty());
    }

    #[test]
    fn clear_expired_status_removes_old() {
        let mut app = setup_app();
        app.status_message = Some((
            "old".to_string(),
            Instant::now() - Duration::from_secs(5),
        ));
        app.clear_expired_status();
        assert!(app.status_message.is_none());
    }
}

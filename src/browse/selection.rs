/// The path of the file whose content the preview pane renders.
///
/// `select` performs no validation against the current snapshot; the
/// preview surface treats a stale path as "not found".
#[derive(Debug, Default)]
pub struct SelectionState {
    path: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active path unconditionally.
    pub fn select(&mut self, path: impl Into<String>) {
        self.path = Some(path.into());
    }

    pub fn current(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn clear(&mut self) {
        self.path = None;
    }

    /// Clear the selection when it equals `deleted` or is nested under it.
    pub fn clear_if_within(&mut self, deleted: &str) {
        let within = self
            .path
            .as_deref()
            .and_then(|p| p.strip_prefix(deleted))
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));
        if within {
            self.path = None;
        }
    }
}

use crate::api::node::Node;

/// Descriptor for an in-flight sibling-list fetch.
///
/// Carries the generation stamp taken when the fetch was issued; the
/// navigator applies the response only while no newer interaction has
/// superseded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRequest {
    /// Column index the response will occupy.
    pub level: usize,
    /// Path segments to resolve, starting at the storage root.
    pub segments: Vec<String>,
    pub generation: u64,
}

/// The lazy column ("Miller columns") variant.
///
/// `columns[i]` holds the sibling list at depth `i`, each populated by an
/// independent fetch issued when the user advances to that depth.
/// `current_path` is the drill-down route as segment names (not full
/// paths), rooted at a fixed storage-root segment.
///
/// Fetches are never cancelled; instead every interaction bumps a
/// monotonically increasing generation, and a response whose request
/// generation is older than the navigator's is discarded. A slow deep-level
/// response can therefore never overwrite columns the user has already
/// branched away from.
#[derive(Debug)]
pub struct ColumnNavigator {
    root: String,
    current_path: Vec<String>,
    columns: Vec<Vec<Node>>,
    generation: u64,
}

impl ColumnNavigator {
    pub fn new(root_segment: impl Into<String>) -> Self {
        let root = root_segment.into();
        Self {
            current_path: vec![root.clone()],
            root,
            columns: Vec::new(),
            generation: 0,
        }
    }

    pub fn current_path(&self) -> &[String] {
        &self.current_path
    }

    pub fn columns(&self) -> &[Vec<Node>] {
        &self.columns
    }

    /// Reset to the storage root and return the fetch for column 0.
    ///
    /// Used on mount and on manual refresh.
    pub fn begin(&mut self) -> ColumnRequest {
        self.generation += 1;
        self.current_path = vec![self.root.clone()];
        self.columns.clear();
        ColumnRequest {
            level: 0,
            segments: self.current_path.clone(),
            generation: self.generation,
        }
    }

    /// Handle a click on `item` in column `level`.
    ///
    /// The drill-down route is truncated to `level` and extended with the
    /// clicked name, and columns deeper than `level + 1` are dropped — stale
    /// panels from a previous branch must not stay visible. A folder click
    /// returns the fetch for the next depth; a file click only reshapes
    /// local state (the file becomes the previewed selection).
    pub fn click(&mut self, level: usize, item: &Node) -> Option<ColumnRequest> {
        if level >= self.columns.len() {
            return None;
        }
        self.current_path.truncate(level);
        self.current_path.push(item.name.clone());
        self.columns.truncate(level + 1);
        // Any click supersedes whatever fetch is still in flight.
        self.generation += 1;
        if item.is_folder {
            Some(ColumnRequest {
                level: level + 1,
                segments: self.current_path.clone(),
                generation: self.generation,
            })
        } else {
            None
        }
    }

    /// Apply a resolved sibling list; returns `false` when the response is
    /// stale and was discarded.
    ///
    /// A failed fetch is applied as an empty list by the caller, which
    /// renders as an empty panel without blocking shallower navigation.
    pub fn apply(&mut self, request: &ColumnRequest, items: Vec<Node>) -> bool {
        if request.generation != self.generation {
            return false;
        }
        self.columns.truncate(request.level);
        self.columns.push(items);
        true
    }

    /// Walk `current_path` against the columns index-by-index.
    ///
    /// Any depth without a matching sibling name ends the walk with no
    /// selection; the final match counts only when it is a file.
    pub fn selected_file(&self) -> Option<&Node> {
        let mut selected: Option<&Node> = None;
        for (i, segment) in self.current_path.iter().enumerate() {
            let column = self.columns.get(i)?;
            selected = column.iter().find(|n| &n.name == segment);
            selected?;
        }
        selected.filter(|n| !n.is_folder)
    }

    /// Slash-joined path of the previewed file, if any.
    pub fn selected_path(&self) -> Option<String> {
        self.selected_file().map(|_| self.current_path.join("/"))
    }
}

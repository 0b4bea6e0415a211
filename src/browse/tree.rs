use crate::api::node::{self, Node};

use super::expansion::ExpansionStore;
use super::selection::SelectionState;

/// One visible row of the flattened tree, in render order.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub name: String,
    pub path: String,
    pub is_folder: bool,
    pub depth: usize,
    pub is_expanded: bool,
    pub is_last_sibling: bool,
}

/// The recursive expand/collapse variant.
///
/// Owns the full tree snapshot fetched in one `listfoldertree` call,
/// composed with an [`ExpansionStore`] and a [`SelectionState`]. The
/// snapshot is the only read path — expanding a folder never fetches,
/// because the whole hierarchy is already materialized. Consistency after a
/// mutation is re-established by replacing the snapshot wholesale
/// (see [`TreeNavigator::set_snapshot`]), never by incremental patching.
#[derive(Debug, Default)]
pub struct TreeNavigator {
    snapshot: Vec<Node>,
    pub expansion: ExpansionStore,
    pub selection: SelectionState,
}

impl TreeNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &[Node] {
        &self.snapshot
    }

    /// Resync: replace the snapshot with a fresh fetch result.
    ///
    /// Expansion entries survive (orphans for removed nodes are harmless);
    /// the selection survives only while it still resolves to a file in the
    /// new snapshot.
    pub fn set_snapshot(&mut self, nodes: Vec<Node>) {
        self.snapshot = nodes;
        let still_a_file = self
            .selection
            .current()
            .and_then(|path| node::find(&self.snapshot, path))
            .map(|n| !n.is_folder)
            .unwrap_or(false);
        if !still_a_file {
            self.selection.clear();
        }
    }

    /// Flip the expansion flag for a folder; no-op on files.
    pub fn toggle(&mut self, node: &Node) {
        if node.is_folder {
            self.expansion.toggle(&node.path);
        }
    }

    /// Select a file for preview; no-op on folders.
    pub fn select(&mut self, node: &Node) {
        if !node.is_folder {
            self.selection.select(node.path.clone());
        }
    }

    /// Activate a visible row: folders toggle, files become the selection.
    pub fn activate(&mut self, row: &TreeRow) {
        if row.is_folder {
            self.expansion.toggle(&row.path);
        } else {
            self.selection.select(row.path.clone());
        }
    }

    /// Flatten the snapshot depth-first into visible rows.
    ///
    /// Sibling order is the server's array order; children appear only when
    /// their folder is expanded and materialized. Calling this repeatedly on
    /// the same state yields the same rows.
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        Self::flatten(&self.snapshot, 0, &self.expansion, &mut rows);
        rows
    }

    fn flatten(nodes: &[Node], depth: usize, expansion: &ExpansionStore, out: &mut Vec<TreeRow>) {
        for (i, node) in nodes.iter().enumerate() {
            let is_expanded = node.is_folder && expansion.is_expanded(&node.path);
            out.push(TreeRow {
                name: node.name.clone(),
                path: node.path.clone(),
                is_folder: node.is_folder,
                depth,
                is_expanded,
                is_last_sibling: i + 1 == nodes.len(),
            });
            if is_expanded {
                if let Some(children) = &node.children {
                    Self::flatten(children, depth + 1, expansion, out);
                }
            }
        }
    }
}

use serde::Deserialize;

/// One entry in the remote storage hierarchy.
///
/// Deserialized from the backend's JSON shape
/// `{ name, path, isFolder, children? }`. `path` is the fully-qualified
/// address from the storage root and is the unique identifier within one
/// snapshot; `name` alone is not unique across sibling groups.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    pub name: String,
    pub path: String,
    #[serde(rename = "isFolder")]
    pub is_folder: bool,
    /// `None` means the subtree has not been materialized; `Some(vec![])`
    /// means loaded and empty. Files never carry children.
    #[serde(default)]
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// Construct a file node.
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_folder: false,
            children: None,
        }
    }

    /// Construct a folder node with a materialized child list.
    pub fn folder(name: impl Into<String>, path: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_folder: true,
            children: Some(children),
        }
    }
}

/// Find a node by path anywhere in a snapshot.
pub fn find<'a>(nodes: &'a [Node], path: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.path == path {
            return Some(node);
        }
        if let Some(children) = &node.children {
            if let Some(found) = find(children, path) {
                return Some(found);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_shape() {
        let json = r#"{
            "name": "2024",
            "path": "2024",
            "isFolder": true,
            "children": [
                { "name": "invoice.pdf", "path": "2024/invoice.pdf", "isFolder": false }
            ]
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.name, "2024");
        assert!(node.is_folder);
        let children = node.children.as_ref().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].path, "2024/invoice.pdf");
        assert!(!children[0].is_folder);
        assert!(children[0].children.is_none());
    }

    #[test]
    fn absent_children_differ_from_empty() {
        let absent: Node =
            serde_json::from_str(r#"{ "name": "a", "path": "a", "isFolder": true }"#).unwrap();
        let empty: Node =
            serde_json::from_str(r#"{ "name": "a", "path": "a", "isFolder": true, "children": [] }"#)
                .unwrap();
        assert!(absent.children.is_none());
        assert_eq!(empty.children.as_deref(), Some(&[][..]));
    }

    #[test]
    fn deserializes_root_array() {
        let json = r#"[
            { "name": "2023", "path": "2023", "isFolder": true, "children": [] },
            { "name": "2024", "path": "2024", "isFolder": true, "children": [] }
        ]"#;
        let nodes: Vec<Node> = serde_json::from_str(json).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name, "2023");
    }

    #[test]
    fn find_locates_nested_node() {
        let snapshot = vec![Node::folder(
            "2024",
            "2024",
            vec![Node::file("invoice.pdf", "2024/invoice.pdf")],
        )];
        let found = find(&snapshot, "2024/invoice.pdf").unwrap();
        assert_eq!(found.name, "invoice.pdf");
        assert!(find(&snapshot, "2024/missing.pdf").is_none());
    }

    #[test]
    fn find_distinguishes_same_name_across_branches() {
        // Two siblings both containing "draft.pdf" — path disambiguates.
        let snapshot = vec![
            Node::folder("a", "a", vec![Node::file("draft.pdf", "a/draft.pdf")]),
            Node::folder("b", "b", vec![Node::file("draft.pdf", "b/draft.pdf")]),
        ];
        assert_eq!(find(&snapshot, "b/draft.pdf").unwrap().path, "b/draft.pdf");
    }
}

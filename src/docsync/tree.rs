//! Folder hierarchy built from a flat entry list.
//!
//! The server hands entries back as a flat list where each one names its
//! parent. [`EntryTree`] rebuilds the hierarchy for display and for recursive
//! operations. Entries that cannot be reached from the root (missing parent,
//! or a parent chain that loops) are kept aside as `detached` instead of being
//! silently dropped.

use crate::model::{Document, ROOT_PARENT};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

#[derive(Debug)]
pub struct Node<'a> {
    pub document: &'a Document,
    pub children: Vec<Node<'a>>,
}

#[derive(Debug)]
pub struct EntryTree<'a> {
    roots: Vec<Node<'a>>,
    detached: Vec<&'a Document>,
    by_id: HashMap<&'a str, &'a Document>,
}

/// Collections first, then by name (case-insensitive), then by ID.
pub fn display_order(a: &Document, b: &Document) -> Ordering {
    b.is_collection()
        .cmp(&a.is_collection())
        .then_with(|| {
            a.visible_name
                .to_lowercase()
                .cmp(&b.visible_name.to_lowercase())
        })
        .then_with(|| a.id.cmp(&b.id))
}

impl<'a> EntryTree<'a> {
    pub fn build(documents: &'a [Document]) -> Self {
        let mut by_parent: HashMap<&str, Vec<&Document>> = HashMap::new();
        let mut by_id = HashMap::new();
        for doc in documents {
            by_parent.entry(doc.parent.as_str()).or_default().push(doc);
            by_id.insert(doc.id.as_str(), doc);
        }
        for siblings in by_parent.values_mut() {
            siblings.sort_by(|a, b| display_order(a, b));
        }

        let mut visited = HashSet::new();
        let roots = attach(ROOT_PARENT, &by_parent, &mut visited);

        let mut detached: Vec<&Document> = documents
            .iter()
            .filter(|doc| !visited.contains(doc.id.as_str()))
            .collect();
        detached.sort_by(|a, b| display_order(a, b));

        for doc in &detached {
            tracing::warn!(id = %doc.id, parent = %doc.parent, "entry is not reachable from root");
        }

        Self {
            roots,
            detached,
            by_id,
        }
    }

    pub fn roots(&self) -> &[Node<'a>] {
        &self.roots
    }

    pub fn detached(&self) -> &[&'a Document] {
        &self.detached
    }

    pub fn get(&self, id: &str) -> Option<&'a Document> {
        self.by_id.get(id).copied()
    }

    /// Depth-first listing of every reachable entry with its depth (roots at 0).
    pub fn walk(&self) -> Vec<(usize, &'a Document)> {
        let mut out = Vec::new();
        walk_into(&self.roots, 0, &mut out);
        out
    }

    /// Every entry below `id`, parents before their children.
    pub fn descendants(&self, id: &str) -> Vec<&'a Document> {
        let mut out = Vec::new();
        if let Some(node) = find(&self.roots, id) {
            walk_into(&node.children, 0, &mut out);
        }
        out.into_iter().map(|(_, doc)| doc).collect()
    }

    /// Visible names from the root down to `id`, inclusive.
    ///
    /// Returns `None` for unknown IDs and for entries whose parent chain
    /// does not end at the root.
    pub fn path_of(&self, id: &str) -> Option<Vec<String>> {
        let mut names = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.get(id)?;

        loop {
            if !seen.insert(current.id.as_str()) {
                return None;
            }
            names.push(current.visible_name.clone());
            if current.is_root() {
                break;
            }
            current = self.get(&current.parent)?;
        }

        names.reverse();
        Some(names)
    }
}

fn attach<'a>(
    parent: &str,
    by_parent: &HashMap<&str, Vec<&'a Document>>,
    visited: &mut HashSet<&'a str>,
) -> Vec<Node<'a>> {
    let Some(children) = by_parent.get(parent) else {
        return Vec::new();
    };

    let mut nodes = Vec::with_capacity(children.len());
    for &doc in children {
        if !visited.insert(doc.id.as_str()) {
            continue;
        }
        let grandchildren = attach(&doc.id, by_parent, visited);
        nodes.push(Node {
            document: doc,
            children: grandchildren,
        });
    }
    nodes
}

fn walk_into<'a>(nodes: &[Node<'a>], depth: usize, out: &mut Vec<(usize, &'a Document)>) {
    for node in nodes {
        out.push((depth, node.document));
        walk_into(&node.children, depth + 1, out);
    }
}

fn find<'n, 'a>(nodes: &'n [Node<'a>], id: &str) -> Option<&'n Node<'a>> {
    for node in nodes {
        if node.document.id == id {
            return Some(node);
        }
        if let Some(found) = find(&node.children, id) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntryType, MetadataDocument};

    fn entry(id: &str, parent: &str, name: &str, entry_type: EntryType) -> Document {
        MetadataDocument {
            id: id.to_string(),
            parent: parent.to_string(),
            visible_name: name.to_string(),
            entry_type,
            version: 1,
            modified_client: String::new(),
        }
        .to_document()
    }

    fn library() -> Vec<Document> {
        vec![
            entry("n", "", "Notebooks", EntryType::Collection),
            entry("p", "", "PDFs", EntryType::Collection),
            entry("r", "n", "research", EntryType::Document),
            entry("m", "n", "Meeting Minutes", EntryType::Document),
            entry("a", "n", "Archive", EntryType::Collection),
            entry("old", "a", "2019", EntryType::Document),
            entry("t", "p", "Technical Manual.pdf", EntryType::Document),
            entry("loose", "", "Todo", EntryType::Document),
        ]
    }

    #[test]
    fn orders_collections_before_documents() {
        let docs = library();
        let tree = EntryTree::build(&docs);

        let roots: Vec<_> = tree.roots().iter().map(|n| n.document.id.as_str()).collect();
        assert_eq!(roots, vec!["n", "p", "loose"]);

        let children: Vec<_> = tree.roots()[0]
            .children
            .iter()
            .map(|n| n.document.id.as_str())
            .collect();
        assert_eq!(children, vec!["a", "m", "r"]);
    }

    #[test]
    fn walk_is_depth_first() {
        let docs = library();
        let tree = EntryTree::build(&docs);
        let walked: Vec<_> = tree
            .walk()
            .into_iter()
            .map(|(depth, d)| (depth, d.id.as_str()))
            .collect();
        assert_eq!(
            walked,
            vec![
                (0, "n"),
                (1, "a"),
                (2, "old"),
                (1, "m"),
                (1, "r"),
                (0, "p"),
                (1, "t"),
                (0, "loose"),
            ]
        );
    }

    #[test]
    fn descendants_include_nested_entries() {
        let docs = library();
        let tree = EntryTree::build(&docs);
        let ids: Vec<_> = tree
            .descendants("n")
            .into_iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "old", "m", "r"]);
        assert!(tree.descendants("loose").is_empty());
        assert!(tree.descendants("missing").is_empty());
    }

    #[test]
    fn path_follows_parents() {
        let docs = library();
        let tree = EntryTree::build(&docs);
        assert_eq!(
            tree.path_of("old"),
            Some(vec![
                "Notebooks".to_string(),
                "Archive".to_string(),
                "2019".to_string()
            ])
        );
        assert_eq!(tree.path_of("nope"), None);
    }

    #[test]
    fn orphans_and_cycles_are_detached() {
        let mut docs = library();
        docs.push(entry("orphan", "gone", "Lost", EntryType::Document));
        docs.push(entry("c1", "c2", "Loop A", EntryType::Collection));
        docs.push(entry("c2", "c1", "Loop B", EntryType::Collection));

        let tree = EntryTree::build(&docs);
        let detached: Vec<_> = tree.detached().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(detached, vec!["c1", "c2", "orphan"]);
        assert_eq!(tree.walk().len(), 8);
        assert_eq!(tree.path_of("c1"), None);
        assert_eq!(tree.path_of("orphan"), None);
    }
}

//! Inventory data model: nodes, their kinds and the keyed child mapping

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, Result};

/// Kind of an inventory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
    #[serde(rename = "zip")]
    Archive,
}

impl NodeKind {
    /// Tag used in JSON and in rendered summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Folder => "folder",
            NodeKind::Archive => "zip",
        }
    }

    /// Sort rank among siblings: containers first, then files.
    pub fn rank(self) -> u8 {
        match self {
            NodeKind::Folder | NodeKind::Archive => 0,
            NodeKind::File => 1,
        }
    }

    pub fn key_prefix(self) -> &'static str {
        match self {
            NodeKind::File => "fol",
            NodeKind::Folder => "dir",
            NodeKind::Archive => "zip",
        }
    }

    pub fn is_container(self) -> bool {
        self.rank() == 0
    }
}

/// Build the key a node is stored under in its parent's mapping.
///
/// Render order breaks ties on this key, not on the display name, so a folder
/// always sorts ahead of an archive of the same rank (`dir_` < `zip_`).
pub fn structural_key(kind: NodeKind, name: &str) -> String {
    format!("{}_{}", kind.key_prefix(), name)
}

/// Size, timestamp and location shared by every node kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub modif_date: String,
}

/// One entry of the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    File {
        name: String,
        path: String,
        size: u64,
        modif_date: String,
    },
    Folder {
        name: String,
        path: String,
        size: u64,
        modif_date: String,
        #[serde(default)]
        children: Tree,
    },
    #[serde(rename = "zip")]
    Archive {
        name: String,
        path: String,
        size: u64,
        modif_date: String,
        #[serde(default)]
        children: Tree,
    },
}

impl Node {
    pub fn file(info: EntryInfo) -> Self {
        Node::File {
            name: info.name,
            path: info.path,
            size: info.size,
            modif_date: info.modif_date,
        }
    }

    pub fn folder(info: EntryInfo, children: Tree) -> Self {
        Node::Folder {
            name: info.name,
            path: info.path,
            size: info.size,
            modif_date: info.modif_date,
            children,
        }
    }

    pub fn archive(info: EntryInfo, children: Tree) -> Self {
        Node::Archive {
            name: info.name,
            path: info.path,
            size: info.size,
            modif_date: info.modif_date,
            children,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::File { .. } => NodeKind::File,
            Node::Folder { .. } => NodeKind::Folder,
            Node::Archive { .. } => NodeKind::Archive,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::File { name, .. } | Node::Folder { name, .. } | Node::Archive { name, .. } => {
                name
            }
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Node::File { path, .. } | Node::Folder { path, .. } | Node::Archive { path, .. } => {
                path
            }
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            Node::File { size, .. } | Node::Folder { size, .. } | Node::Archive { size, .. } => {
                *size
            }
        }
    }

    /// Stored `YYYY-MM-DD HH:MM:SS` timestamp.
    pub fn modified(&self) -> &str {
        match self {
            Node::File { modif_date, .. }
            | Node::Folder { modif_date, .. }
            | Node::Archive { modif_date, .. } => modif_date,
        }
    }

    pub fn key(&self) -> String {
        structural_key(self.kind(), self.name())
    }

    /// Children of a folder or archive; `None` for files.
    pub fn children(&self) -> Option<&Tree> {
        match self {
            Node::File { .. } => None,
            Node::Folder { children, .. } | Node::Archive { children, .. } => Some(children),
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Tree> {
        match self {
            Node::File { .. } => None,
            Node::Folder { children, .. } | Node::Archive { children, .. } => Some(children),
        }
    }

    /// Overwrite size and timestamp, keeping name and children.
    pub(crate) fn set_stats(&mut self, new_size: u64, new_date: String) {
        match self {
            Node::File {
                size, modif_date, ..
            }
            | Node::Folder {
                size, modif_date, ..
            }
            | Node::Archive {
                size, modif_date, ..
            } => {
                *size = new_size;
                *modif_date = new_date;
            }
        }
    }
}

/// Entry counts of a tree, recursive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeCounts {
    pub folders: usize,
    pub archives: usize,
    pub files: usize,
}

/// Child mapping of a container, keyed by structural key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree(BTreeMap<String, Node>);

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under its structural key. Fails if the key is taken.
    pub fn insert(&mut self, node: Node) -> Result<&mut Node> {
        match self.0.entry(node.key()) {
            Entry::Occupied(_) => Err(InventoryError::DuplicateEntry(node.path().to_string())),
            Entry::Vacant(slot) => Ok(slot.insert(node)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.0.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Node)> {
        self.0.iter()
    }

    /// Entries in display order: folders and archives before files, then by
    /// structural key.
    pub fn sorted_entries(&self) -> Vec<(&String, &Node)> {
        let mut items: Vec<_> = self.0.iter().collect();
        items.sort_by(|a, b| (a.1.kind().rank(), a.0).cmp(&(b.1.kind().rank(), b.0)));
        items
    }

    /// Children of the folder described by `info`, creating it when absent.
    pub(crate) fn folder_or_insert(&mut self, info: EntryInfo) -> Option<&mut Tree> {
        let key = structural_key(NodeKind::Folder, &info.name);
        self.0
            .entry(key)
            .or_insert_with(|| Node::folder(info, Tree::new()))
            .children_mut()
    }

    /// Follow `segments` through already created folders.
    pub fn descend(&mut self, segments: &[String]) -> Result<&mut Tree> {
        let mut current = self;
        for (i, segment) in segments.iter().enumerate() {
            let key = structural_key(NodeKind::Folder, segment);
            current = match current.0.get_mut(&key).and_then(Node::children_mut) {
                Some(children) => children,
                None => return Err(InventoryError::MissingParent(segments[..=i].join("/"))),
            };
        }
        Ok(current)
    }

    pub fn counts(&self) -> TreeCounts {
        let mut counts = TreeCounts::default();
        self.accumulate(&mut counts);
        counts
    }

    fn accumulate(&self, counts: &mut TreeCounts) {
        for node in self.0.values() {
            match node.kind() {
                NodeKind::File => counts.files += 1,
                NodeKind::Folder => counts.folders += 1,
                NodeKind::Archive => counts.archives += 1,
            }
            if let Some(children) = node.children() {
                children.accumulate(counts);
            }
        }
    }
}

/// Result of scanning one root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    pub root: PathBuf,
    pub tree: Tree,
}

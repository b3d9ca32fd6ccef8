//! ZIP traversal: expands archive members into the same tree shape as folders

use std::io::{Cursor, Read, Seek};

use tracing::{debug, warn};
use zip::ZipArchive;

use crate::error::{InventoryError, Result};

use super::config::ScanConfig;
use super::node::{EntryInfo, Node, NodeKind, Tree, structural_key};
use super::timestamp;

/// Nested archives below this many levels are not expanded.
pub const MAX_ARCHIVE_DEPTH: usize = 64;

/// Whether a file name has a `.zip` extension (ASCII case-insensitive).
pub fn is_zip_name(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case("zip"))
}

/// Read every member of a ZIP archive into a tree.
///
/// `label` names the archive in errors and logs. Members that are themselves
/// `.zip` files are buffered in memory and expanded recursively, up to
/// [`MAX_ARCHIVE_DEPTH`] levels.
pub fn read_archive<R: Read + Seek>(reader: R, label: &str, config: &ScanConfig) -> Result<Tree> {
    read_archive_at(reader, label, config, 0)
}

fn read_archive_at<R: Read + Seek>(
    reader: R,
    label: &str,
    config: &ScanConfig,
    depth: usize,
) -> Result<Tree> {
    let mut archive = ZipArchive::new(reader).map_err(|e| InventoryError::archive(label, e))?;
    let mut tree = Tree::new();

    for index in 0..archive.len() {
        let mut member = match archive.by_index(index) {
            Ok(member) => member,
            Err(e) if config.skip_unreadable => {
                warn!(archive = %label, index, error = %e, "skipping unreadable member");
                continue;
            }
            Err(e) => return Err(InventoryError::archive(label, e)),
        };

        let member_name = member.name().to_string();
        let segments = split_member_name(&member_name);
        let Some((leaf, parents)) = segments.split_last() else {
            continue;
        };

        let modif_date = timestamp::from_zip(member.last_modified());
        let parent = ensure_folders(&mut tree, parents, &modif_date)?;
        let info = EntryInfo {
            name: leaf.clone(),
            path: segments.join("/"),
            size: member.size(),
            modif_date,
        };

        let node = if member.is_dir() {
            let key = structural_key(NodeKind::Folder, leaf);
            if let Some(existing) = parent.get_mut(&key) {
                // Folder was synthesized for an earlier member.
                existing.set_stats(info.size, info.modif_date);
                continue;
            }
            Node::folder(info, Tree::new())
        } else if is_zip_name(leaf) {
            let nested_label = format!("{}/{}", label, info.path);
            let expanded = if depth >= MAX_ARCHIVE_DEPTH {
                Err(InventoryError::ArchiveTooDeep {
                    path: nested_label.clone(),
                    limit: MAX_ARCHIVE_DEPTH,
                })
            } else {
                let mut buffer = Vec::new();
                member
                    .read_to_end(&mut buffer)
                    .map_err(InventoryError::from)
                    .and_then(|_| {
                        read_archive_at(Cursor::new(buffer), &nested_label, config, depth + 1)
                    })
            };
            match expanded {
                Ok(children) => {
                    debug!(
                        archive = %nested_label,
                        entries = children.len(),
                        "expanded nested archive"
                    );
                    Node::archive(info, children)
                }
                Err(e) if config.skip_unreadable => {
                    warn!(
                        archive = %nested_label,
                        error = %e,
                        "recording unreadable nested archive as file"
                    );
                    Node::file(info)
                }
                Err(e) => return Err(e),
            }
        } else {
            Node::file(info)
        };

        match parent.insert(node) {
            Ok(_) => {}
            Err(e) if config.skip_unreadable => {
                warn!(archive = %label, error = %e, "keeping first of duplicate members");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(tree)
}

/// Split a member name into path segments, dropping empty and `.` parts.
fn split_member_name(name: &str) -> Vec<String> {
    name.split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .map(str::to_string)
        .collect()
}

/// Descend through `segments`, creating folders that the archive never listed.
fn ensure_folders<'a>(
    tree: &'a mut Tree,
    segments: &[String],
    modif_date: &str,
) -> Result<&'a mut Tree> {
    let mut current = tree;
    for (i, segment) in segments.iter().enumerate() {
        let path = segments[..=i].join("/");
        let info = EntryInfo {
            name: segment.clone(),
            path: path.clone(),
            size: 0,
            modif_date: modif_date.to_string(),
        };
        current = current
            .folder_or_insert(info)
            .ok_or(InventoryError::MissingParent(path))?;
    }
    Ok(current)
}

//! DirectoryScanner - walks a root directory and builds the full inventory in memory

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ignore::{DirEntry, WalkBuilder};
use tracing::{debug, info, warn};

use crate::error::{InventoryError, Result};

use super::archive::{is_zip_name, read_archive};
use super::config::ScanConfig;
use super::node::{EntryInfo, Inventory, Node, Tree};
use super::timestamp;

/// Scanner that records every file, folder and ZIP archive under a root.
///
/// Nothing is filtered: hidden files and `.gitignore`d paths are part of the
/// inventory. Symlinks are not followed and appear as files.
pub struct DirectoryScanner {
    config: ScanConfig,
}

impl DirectoryScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn scan(&self, root: &Path) -> Result<Inventory> {
        if !root.is_dir() {
            return Err(InventoryError::InvalidRoot(root.to_path_buf()));
        }
        info!(root = %root.display(), "scanning directory");

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .build();

        let mut tree = Tree::new();
        for result in walker {
            let outcome = result
                .map_err(InventoryError::from)
                .and_then(|entry| self.add_entry(&mut tree, root, &entry));
            match outcome {
                Ok(()) => {}
                Err(e) if self.config.skip_unreadable => {
                    warn!(error = %e, "skipping unreadable entry");
                }
                Err(e) => return Err(e),
            }
        }

        let counts = tree.counts();
        info!(
            folders = counts.folders,
            archives = counts.archives,
            files = counts.files,
            "scan complete"
        );
        Ok(Inventory {
            root: root.to_path_buf(),
            tree,
        })
    }

    fn add_entry(&self, tree: &mut Tree, root: &Path, entry: &DirEntry) -> Result<()> {
        // The root itself is the tree, not a node in it.
        if entry.depth() == 0 {
            return Ok(());
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| InventoryError::MissingParent(entry.path().display().to_string()))?;
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let Some((leaf, parents)) = segments.split_last() else {
            return Ok(());
        };

        let parent = tree.descend(parents)?;
        let metadata = entry.metadata()?;
        let info = EntryInfo {
            name: leaf.clone(),
            path: segments.join("/"),
            size: metadata.len(),
            modif_date: timestamp::from_system_time(metadata.modified()?),
        };

        let node = if metadata.is_dir() {
            Node::folder(info, Tree::new())
        } else if metadata.is_file() && is_zip_name(leaf) {
            match self.expand_archive(entry.path(), &info.path) {
                Ok(children) => Node::archive(info, children),
                Err(e) if self.config.skip_unreadable => {
                    warn!(archive = %info.path, error = %e, "recording unreadable archive as file");
                    Node::file(info)
                }
                Err(e) => return Err(e),
            }
        } else {
            Node::file(info)
        };

        parent.insert(node)?;
        Ok(())
    }

    fn expand_archive(&self, path: &Path, label: &str) -> Result<Tree> {
        let file = File::open(path)?;
        let children = read_archive(BufReader::new(file), label, &self.config)?;
        debug!(archive = %label, entries = children.len(), "expanded archive");
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestDir, ZipEntry, zip_bytes};
    use crate::tree::NodeKind;

    fn scan(dir: &TestDir) -> Inventory {
        DirectoryScanner::new(ScanConfig::default())
            .scan(dir.path())
            .expect("scan should succeed")
    }

    #[test]
    fn test_missing_root() {
        let dir = TestDir::new();
        let missing = dir.path().join("nope");
        let err = DirectoryScanner::new(ScanConfig::default())
            .scan(&missing)
            .unwrap_err();
        assert!(matches!(err, InventoryError::InvalidRoot(p) if p == missing));
    }

    #[test]
    fn test_root_must_be_directory() {
        let dir = TestDir::new();
        let file = dir.add_file("plain.txt", "x");
        let err = DirectoryScanner::new(ScanConfig::default())
            .scan(&file)
            .unwrap_err();
        assert!(matches!(err, InventoryError::InvalidRoot(_)));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TestDir::new();
        let inventory = scan(&dir);
        assert!(inventory.tree.is_empty());
        assert_eq!(inventory.root, dir.path());
    }

    #[test]
    fn test_files_only_gives_one_level() {
        let dir = TestDir::new();
        dir.add_file("a.txt", "a");
        dir.add_file("b.rs", "bb");
        dir.add_file(".hidden", "ccc");

        let inventory = scan(&dir);
        assert_eq!(inventory.tree.len(), 3);
        for (_, node) in inventory.tree.iter() {
            assert_eq!(node.kind(), NodeKind::File);
            assert!(node.children().is_none());
        }
        assert_eq!(inventory.tree.get("fol_b.rs").unwrap().size(), 2);
    }

    #[test]
    fn test_nested_folders() {
        let dir = TestDir::new();
        dir.add_file("src/tree/node.rs", "x");
        dir.add_dir("empty");

        let inventory = scan(&dir);
        let src = inventory.tree.get("dir_src").unwrap();
        assert_eq!(src.kind(), NodeKind::Folder);
        let tree_dir = src.children().unwrap().get("dir_tree").unwrap();
        let node = tree_dir.children().unwrap().get("fol_node.rs").unwrap();
        assert_eq!(node.path(), "src/tree/node.rs");

        let empty = inventory.tree.get("dir_empty").unwrap();
        assert!(empty.children().unwrap().is_empty());
    }

    #[test]
    fn test_zip_expanded_in_place() {
        let dir = TestDir::new();
        let inner = zip_bytes(&[ZipEntry::file("inner.txt", b"inner")]);
        dir.add_zip(
            "data/Bundle.ZIP",
            &[
                ZipEntry::file("readme.txt", b"hi"),
                ZipEntry::file("nested.zip", &inner),
            ],
        );

        let inventory = scan(&dir);
        let data = inventory.tree.get("dir_data").unwrap();
        let bundle = data.children().unwrap().get("zip_Bundle.ZIP").unwrap();
        assert_eq!(bundle.kind(), NodeKind::Archive);
        assert_eq!(bundle.path(), "data/Bundle.ZIP");

        let children = bundle.children().unwrap();
        assert_eq!(children.get("fol_readme.txt").unwrap().modified(), "2023-05-17 10:30:00");
        let nested = children.get("zip_nested.zip").unwrap();
        assert_eq!(nested.kind(), NodeKind::Archive);
        assert!(nested.children().unwrap().get("fol_inner.txt").is_some());
    }

    #[test]
    fn test_corrupt_zip_fails_strict() {
        let dir = TestDir::new();
        dir.add_file("broken.zip", "definitely not a zip");
        let result = DirectoryScanner::new(ScanConfig::default()).scan(dir.path());
        assert!(matches!(result, Err(InventoryError::Archive { .. })));
    }

    #[test]
    fn test_corrupt_zip_recorded_as_file_when_lenient() {
        let dir = TestDir::new();
        dir.add_file("broken.zip", "definitely not a zip");
        dir.add_file("ok.txt", "ok");
        let inventory = DirectoryScanner::new(ScanConfig {
            skip_unreadable: true,
        })
        .scan(dir.path())
        .unwrap();
        assert_eq!(
            inventory.tree.get("fol_broken.zip").unwrap().kind(),
            NodeKind::File
        );
        assert!(inventory.tree.get("fol_ok.txt").is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_strict_and_lenient() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let dir = TestDir::new();
        dir.add_file("locked/secret.txt", "s");
        dir.add_file("ok.txt", "ok");
        let locked = dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not stop root.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let strict = DirectoryScanner::new(ScanConfig::default()).scan(dir.path());
        let lenient = DirectoryScanner::new(ScanConfig {
            skip_unreadable: true,
        })
        .scan(dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(
            matches!(strict, Err(InventoryError::Walk(_) | InventoryError::Io(_))),
            "expected walk failure, got {strict:?}"
        );

        let inventory = lenient.unwrap();
        assert!(inventory.tree.get("fol_ok.txt").is_some());
        let locked = inventory.tree.get("dir_locked").unwrap();
        assert!(locked.children().unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_files() {
        use std::os::unix::fs::symlink;

        let dir = TestDir::new();
        dir.add_file("real/file.txt", "x");
        symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let inventory = scan(&dir);
        let link = inventory.tree.get("fol_link").unwrap();
        assert_eq!(link.kind(), NodeKind::File);
        assert!(inventory.tree.get("dir_real").is_some());
    }
}

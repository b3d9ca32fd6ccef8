//! Test utilities for creating temporary directory fixtures and ZIP archives.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// A member to place in a generated ZIP archive.
pub struct ZipEntry<'a> {
    pub name: &'a str,
    /// `None` for a directory member.
    pub content: Option<&'a [u8]>,
}

impl<'a> ZipEntry<'a> {
    pub fn file(name: &'a str, content: &'a [u8]) -> Self {
        Self {
            name,
            content: Some(content),
        }
    }

    pub fn dir(name: &'a str) -> Self {
        Self {
            name,
            content: None,
        }
    }
}

/// Build an in-memory ZIP archive. Every member is stamped 2023-05-17 10:30:00.
pub fn zip_bytes(entries: &[ZipEntry<'_>]) -> Vec<u8> {
    let stamp = zip::DateTime::from_date_and_time(2023, 5, 17, 10, 30, 0)
        .expect("Failed to build zip timestamp");
    let options = SimpleFileOptions::default().last_modified_time(stamp);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for entry in entries {
        match entry.content {
            Some(content) => {
                writer
                    .start_file(entry.name, options)
                    .expect("Failed to start zip member");
                writer
                    .write_all(content)
                    .expect("Failed to write zip member");
            }
            None => writer
                .add_directory(entry.name, options)
                .expect("Failed to add zip directory"),
        }
    }
    writer
        .finish()
        .expect("Failed to finish zip archive")
        .into_inner()
}

/// A temporary directory for testing.
///
/// The directory is automatically cleaned up when dropped.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        self.add_bytes(path, content.as_bytes())
    }

    pub fn add_bytes(&self, path: &str, content: &[u8]) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Add a ZIP archive built from `entries`.
    pub fn add_zip(&self, path: &str, entries: &[ZipEntry<'_>]) -> PathBuf {
        self.add_bytes(path, &zip_bytes(entries))
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

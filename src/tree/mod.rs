//! Directory inventory building
//!
//! This module turns a root directory into an in-memory `Tree`:
//!
//! - `DirectoryScanner`: walks the filesystem below a root
//! - `read_archive`: expands ZIP archives (nested ones included) into the same shape
//! - `Node` / `Tree`: the typed hierarchy both produce

mod archive;
mod builder;
mod config;
mod node;
pub mod timestamp;

// Re-export public types
pub use archive::{MAX_ARCHIVE_DEPTH, is_zip_name, read_archive};
pub use builder::DirectoryScanner;
pub use config::ScanConfig;
pub use node::{EntryInfo, Inventory, Node, NodeKind, Tree, TreeCounts, structural_key};

//! dirinventory - inventory a directory tree, ZIP archives included, as JSON or DOCX

pub mod error;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{InventoryError, Result};
pub use output::{
    DocumentConfig, DocxWriter, JsonWriter, RenderConfig, ReportFormat, ReportWriter,
    render_lines, save_report,
};
pub use tree::{DirectoryScanner, Inventory, Node, NodeKind, ScanConfig, Tree, TreeCounts};

//! Report rendering and writing
//!
//! - `render` - depth-first, sorted flattening of a tree into indented lines
//! - `json` - the tree mapping as pretty JSON
//! - `docx` - rendered lines as paragraphs of a Word document
//! - `format` - writer selection by report file extension

mod config;
mod docx;
mod format;
mod json;
mod render;

// Re-export public types and functions
pub use config::{DocumentConfig, RenderConfig};
pub use docx::DocxWriter;
pub use format::{ReportFormat, ReportWriter, save_report};
pub use json::JsonWriter;
pub use render::{Lines, format_line, render_lines};

//! Output configuration types

const DEFAULT_INDENT: &str = "      ";
const DEFAULT_HEADING: &str = "Directory structure";

/// Configuration for rendered lines.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Marker repeated once per depth level.
    pub indent: String,
    /// Prefix each name with an icon for its kind.
    pub show_icons: bool,
    /// Emit a first line naming the scanned root.
    pub show_root: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            show_icons: false,
            show_root: false,
        }
    }
}

/// Configuration for document reports.
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    pub heading: String,
    pub render: RenderConfig,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            heading: DEFAULT_HEADING.to_string(),
            render: RenderConfig::default(),
        }
    }
}

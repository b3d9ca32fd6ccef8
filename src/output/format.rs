//! Report format selection by file extension

use std::fmt;
use std::path::Path;

use crate::error::{InventoryError, Result};
use crate::tree::Inventory;

use super::config::DocumentConfig;
use super::docx::DocxWriter;
use super::json::JsonWriter;

/// Common save contract of every report writer.
pub trait ReportWriter {
    fn save(&self, inventory: &Inventory, target: &Path) -> Result<()>;
}

/// Report formats recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Docx,
    /// Accepted as a target, but no writer exists.
    Pdf,
}

const REGISTRY: &[(&str, ReportFormat)] = &[
    ("json", ReportFormat::Json),
    ("docx", ReportFormat::Docx),
    ("pdf", ReportFormat::Pdf),
];

impl ReportFormat {
    /// Look up a format by extension, with or without the leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let normalized = ext.trim_start_matches('.').to_ascii_lowercase();
        REGISTRY
            .iter()
            .find(|(name, _)| *name == normalized)
            .map(|(_, format)| *format)
    }

    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Docx => "docx",
            ReportFormat::Pdf => "pdf",
        }
    }

    /// Validate a report target and pick its format.
    ///
    /// Rejects directories, paths without an extension, unknown extensions and
    /// targets whose parent directory does not exist. Nothing is created.
    pub fn from_path(path: &Path) -> Result<Self> {
        if path.is_dir() {
            return Err(InventoryError::invalid_report(path, "is a directory"));
        }
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .ok_or_else(|| InventoryError::invalid_report(path, "missing file extension"))?;
        let format = Self::from_extension(&ext).ok_or_else(|| {
            InventoryError::invalid_report(path, format!("unsupported extension '.{ext}'"))
        })?;
        let parent_missing = path
            .parent()
            .is_some_and(|p| !p.as_os_str().is_empty() && !p.is_dir());
        if parent_missing {
            return Err(InventoryError::invalid_report(
                path,
                "parent directory does not exist",
            ));
        }
        Ok(format)
    }

    /// Writer for this format.
    pub fn writer(self, document: DocumentConfig) -> Result<Box<dyn ReportWriter>> {
        match self {
            ReportFormat::Json => Ok(Box::new(JsonWriter)),
            ReportFormat::Docx => Ok(Box::new(DocxWriter::new(document))),
            ReportFormat::Pdf => Err(InventoryError::UnsupportedFormat(
                self.extension().to_string(),
            )),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

/// Validate `target`, then write `inventory` to it in the format its extension
/// selects. No file is created when validation fails.
pub fn save_report(
    inventory: &Inventory,
    target: &Path,
    document: DocumentConfig,
) -> Result<ReportFormat> {
    let format = ReportFormat::from_path(target)?;
    format.writer(document)?.save(inventory, target)?;
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestDir;
    use crate::tree::Tree;

    fn empty_inventory(dir: &TestDir) -> Inventory {
        Inventory {
            root: dir.path().to_path_buf(),
            tree: Tree::new(),
        }
    }

    #[test]
    fn test_from_extension_normalizes() {
        assert_eq!(ReportFormat::from_extension("json"), Some(ReportFormat::Json));
        assert_eq!(ReportFormat::from_extension(".DOCX"), Some(ReportFormat::Docx));
        assert_eq!(ReportFormat::from_extension("Pdf"), Some(ReportFormat::Pdf));
        assert_eq!(ReportFormat::from_extension("txt"), None);
        assert_eq!(ReportFormat::from_extension(""), None);
    }

    #[test]
    fn test_from_path_rejects_directory() {
        let dir = TestDir::new();
        let target = dir.add_dir("report.json");
        let err = ReportFormat::from_path(&target).unwrap_err();
        assert!(err.to_string().contains("is a directory"), "{err}");
    }

    #[test]
    fn test_from_path_rejects_missing_extension() {
        let dir = TestDir::new();
        let err = ReportFormat::from_path(&dir.path().join("report")).unwrap_err();
        assert!(matches!(err, InventoryError::InvalidReport { .. }));
    }

    #[test]
    fn test_from_path_rejects_missing_parent() {
        let dir = TestDir::new();
        let err = ReportFormat::from_path(&dir.path().join("nope/report.json")).unwrap_err();
        assert!(err.to_string().contains("parent directory"), "{err}");
    }

    #[test]
    fn test_from_path_accepts_relative_file_name() {
        assert_eq!(
            ReportFormat::from_path(Path::new("report.Json")).unwrap(),
            ReportFormat::Json
        );
    }

    #[test]
    fn test_txt_fails_and_writes_nothing() {
        let dir = TestDir::new();
        let target = dir.path().join("report.txt");
        let err = save_report(&empty_inventory(&dir), &target, DocumentConfig::default())
            .unwrap_err();
        assert!(matches!(err, InventoryError::InvalidReport { .. }));
        assert!(!target.exists());
    }

    #[test]
    fn test_pdf_is_recognized_but_not_written() {
        let dir = TestDir::new();
        let target = dir.path().join("report.pdf");
        assert_eq!(ReportFormat::from_path(&target).unwrap(), ReportFormat::Pdf);

        let err = save_report(&empty_inventory(&dir), &target, DocumentConfig::default())
            .unwrap_err();
        assert!(matches!(err, InventoryError::UnsupportedFormat(ref f) if f == "pdf"));
        assert!(!target.exists());
    }

    #[test]
    fn test_save_json_and_docx() {
        let dir = TestDir::new();
        let inventory = empty_inventory(&dir);

        let json = dir.path().join("out.json");
        assert_eq!(
            save_report(&inventory, &json, DocumentConfig::default()).unwrap(),
            ReportFormat::Json
        );
        assert_eq!(std::fs::read_to_string(&json).unwrap(), "{}\n");

        let docx = dir.path().join("out.DOCX");
        assert_eq!(
            save_report(&inventory, &docx, DocumentConfig::default()).unwrap(),
            ReportFormat::Docx
        );
        let bytes = std::fs::read(&docx).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}

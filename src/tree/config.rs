//! Configuration types for the scanner

const SKIP_UNREADABLE_VAR: &str = "DIRINVENTORY_SKIP_UNREADABLE";

/// Configuration for scanning behavior.
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Log and skip entries that cannot be read instead of aborting the scan.
    /// Unreadable archives are then recorded as plain files.
    pub skip_unreadable: bool,
}

impl ScanConfig {
    /// Read overrides from the environment.
    pub fn from_env() -> Self {
        let skip_unreadable = std::env::var(SKIP_UNREADABLE_VAR)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Self { skip_unreadable }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

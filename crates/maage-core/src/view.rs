//! Plain-data helpers for the presentation layer

use std::fmt;
use std::path::Path;

/// Whether a referenced file is present on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FileStatus {
    Present,
    Missing,
}

impl FileStatus {
    /// Check a path. Directories count as missing.
    pub fn of<P: AsRef<Path>>(path: P) -> Self {
        if path.as_ref().is_file() {
            FileStatus::Present
        } else {
            FileStatus::Missing
        }
    }

    pub fn exists(self) -> bool {
        self == FileStatus::Present
    }

    /// Status glyph shown next to a path
    pub fn symbol(self) -> &'static str {
        match self {
            FileStatus::Present => "✅",
            FileStatus::Missing => "❌",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Render a path either in full or as its final component
pub fn display_path(path: &str, full: bool) -> String {
    if full {
        return path.to_string();
    }

    // Cheat sheets written on Windows carry backslash separators.
    path.rsplit(['/', '\\'])
        .next()
        .unwrap_or(path)
        .to_string()
}

/// Pick the sheet a field view should select.
///
/// The saved sheet wins if the workbook still has it, otherwise the first
/// sheet of the workbook, otherwise nothing.
pub fn resolve_sheet<'a>(saved: &'a str, available: &'a [String]) -> &'a str {
    if available.iter().any(|name| name == saved) {
        saved
    } else {
        available.first().map(String::as_str).unwrap_or("")
    }
}

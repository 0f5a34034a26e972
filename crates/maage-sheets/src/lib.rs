//! # maage-sheets
//!
//! Lists the sheets of the workbooks a cheat sheet points at, so each field
//! can offer the sheets that actually exist.
//!
//! - `.xlsx` / `.xlsm` workbooks: sheet names from `xl/workbook.xml`, in tab order
//! - `.csv` files: a single sheet named `Sheet1`

pub mod error;
pub mod reader;

use std::path::Path;

pub use error::{SheetsError, SheetsResult};
pub use reader::SheetNameReader;

/// Sheet names of the workbook at `path`, or an empty list if the file
/// cannot be opened or parsed.
pub fn sheet_names<P: AsRef<Path>>(path: P) -> Vec<String> {
    let path = path.as_ref();
    match SheetNameReader::read_file(path) {
        Ok(names) => names,
        Err(e) => {
            log::warn!("Could not list sheets of {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

//! The cheat-sheet configuration format
//!
//! A cheat sheet is a flat text file made of blank-line separated sections:
//!
//! ```text
//! TabName,Air
//! Filepath,C:/data/air.xlsx
//! Sorties,Flights,2,A:F
//! Losses,Damage
//!
//! TabName,Sea
//! Filepath,C:/data/sea.xlsx
//! Contacts,Sheet1
//! ```
//!
//! This module contains:
//! - [`Section`] and [`Field`] - The parsed data model
//! - [`parse`] / [`serialize`] - Whole-store conversion
//! - [`section_field_lines`] / [`replace_section_fields`] - Single-section access
//! - [`increment_move_counters`] - `Move N` bump applied after a run
//! - [`CheatSheetFile`] - The same operations against a file on disk

pub(crate) mod file;
mod moves;
mod parser;
mod writer;

pub use file::{CheatSheetFile, DEFAULT_CHEAT_SHEET};
pub use moves::increment_move_counters;
pub use parser::{parse, section_field_lines};
pub use writer::{replace_section_fields, serialize};

use crate::codec::{display_row_to_offset, DEFAULT_COLUMNS};

/// Literal prefix that opens a section
pub const TAB_NAME_PREFIX: &str = "TabName";

/// Literal prefix of the line following a section header
pub const FILEPATH_PREFIX: &str = "Filepath";

/// Starting row used when a field does not name one
pub const DEFAULT_START_ROW: usize = 1;

/// One data-source row within a [`Section`]
///
/// `start_row` and `columns` keep the raw text from the file (empty when the
/// line used the short two-column form) so that a load/save cycle writes the
/// same form back. Use [`Field::effective_start_row`] and
/// [`Field::effective_columns`] for the values with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub display_name: String,
    pub sheet_name: String,
    pub start_row: String,
    pub columns: String,
}

impl Field {
    /// Create a field in the short `display,sheet` form
    pub fn new<D: Into<String>, S: Into<String>>(display_name: D, sheet_name: S) -> Self {
        Self {
            display_name: display_name.into(),
            sheet_name: sheet_name.into(),
            start_row: String::new(),
            columns: String::new(),
        }
    }

    /// Set the starting row and column range
    pub fn with_layout<R: Into<String>, C: Into<String>>(mut self, start_row: R, columns: C) -> Self {
        self.start_row = start_row.into();
        self.columns = columns.into();
        self
    }

    /// Parse a field line (`display,sheet[,startRow,columns]`).
    ///
    /// Every component is trimmed. Missing trailing components are empty and
    /// anything past the fourth is ignored. Returns `None` for lines with
    /// fewer than two components.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut parts = line.split(',').map(str::trim);
        let display_name = parts.next()?;
        let sheet_name = parts.next()?;
        let start_row = parts.next().unwrap_or_default();
        let columns = parts.next().unwrap_or_default();

        Some(Self {
            display_name: display_name.to_string(),
            sheet_name: sheet_name.to_string(),
            start_row: start_row.to_string(),
            columns: columns.to_string(),
        })
    }

    /// Whether the field carries a start row or column range
    pub fn has_layout(&self) -> bool {
        !self.start_row.is_empty() || !self.columns.is_empty()
    }

    /// Starting row in display convention, defaulting to 1 if absent or invalid
    pub fn effective_start_row(&self) -> usize {
        match display_row_to_offset(&self.start_row) {
            0 => DEFAULT_START_ROW,
            offset => offset + 1,
        }
    }

    /// Column range, defaulting to `A:Z` if absent
    pub fn effective_columns(&self) -> &str {
        if self.columns.is_empty() {
            DEFAULT_COLUMNS
        } else {
            &self.columns
        }
    }
}

/// A named configuration block tying a file path to an ordered list of fields
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    pub name: String,
    pub filepath: String,
    pub fields: Vec<Field>,
}

impl Section {
    /// Create an empty section
    pub fn new<N: Into<String>, P: Into<String>>(name: N, filepath: P) -> Self {
        Self {
            name: name.into(),
            filepath: filepath.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }

    /// Find a field by display name
    pub fn field_mut(&mut self, display_name: &str) -> Option<&mut Field> {
        self.fields
            .iter_mut()
            .find(|f| f.display_name == display_name)
    }
}

/// Find a section by case-insensitive name
pub fn find_section<'a>(sections: &'a [Section], name: &str) -> Option<&'a Section> {
    sections.iter().find(|s| s.is_named(name))
}

/// Find a section by case-insensitive name, mutably
pub fn find_section_mut<'a>(sections: &'a mut [Section], name: &str) -> Option<&'a mut Section> {
    sections.iter_mut().find(|s| s.is_named(name))
}

pub(crate) fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

//! Cheat-sheet writer

use std::fmt::Write as _;

use super::parser::{find_section_header, section_end};
use super::{Field, Section, FILEPATH_PREFIX, TAB_NAME_PREFIX};
use crate::error::{Error, Result};

/// Serialize a full store.
///
/// Each section is written as its `TabName` / `Filepath` header pair, one line
/// per field and a blank separator line. A field's start row and columns are
/// only written when at least one of them is set, so stores that never used
/// them keep the short two-column form.
pub fn serialize(sections: &[Section]) -> String {
    let mut out = String::new();

    for section in sections {
        let _ = writeln!(out, "{},{}", TAB_NAME_PREFIX, section.name);
        let _ = writeln!(out, "{},{}", FILEPATH_PREFIX, section.filepath);

        for field in &section.fields {
            if field.has_layout() {
                let _ = writeln!(
                    out,
                    "{},{},{},{}",
                    field.display_name, field.sheet_name, field.start_row, field.columns
                );
            } else {
                let _ = writeln!(out, "{},{}", field.display_name, field.sheet_name);
            }
        }

        out.push('\n');
    }

    out
}

/// Replace the field lines of one section and return the full new text.
///
/// The section is matched case-insensitively. Its span runs from the header
/// through the line before the next blank line (or end of input). The two
/// header lines are kept verbatim; each field becomes a `displayName,sheetName`
/// line and a blank line closes the new section. Everything outside the span,
/// including the old blank separator, is left byte-for-byte unchanged.
pub fn replace_section_fields(source: &str, section_name: &str, fields: &[Field]) -> Result<String> {
    let lines: Vec<&str> = source.split_inclusive('\n').collect();

    let start = find_section_header(&lines, section_name)
        .ok_or_else(|| Error::SectionNotFound(section_name.to_string()))?;
    let end = section_end(&lines, start);
    let header_end = (start + 2).min(end);

    let mut out = String::with_capacity(source.len());
    for line in &lines[..start] {
        out.push_str(line);
    }
    for line in &lines[start..header_end] {
        out.push_str(line);
        if !line.ends_with('\n') {
            out.push('\n');
        }
    }
    for field in fields {
        let _ = writeln!(out, "{},{}", field.display_name, field.sheet_name);
    }
    out.push('\n');
    for line in &lines[end..] {
        out.push_str(line);
    }

    Ok(out)
}

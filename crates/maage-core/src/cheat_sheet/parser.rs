//! Cheat-sheet reader

use super::{names_match, Field, Section, FILEPATH_PREFIX, TAB_NAME_PREFIX};
use crate::error::{Error, Result};

/// Parse a full cheat sheet into its sections.
///
/// A line starting with `TabName` opens a section named by the text after
/// its first comma. The next line must be the `Filepath,` line. Field lines
/// follow until a blank line or the end of input. Lines outside a section are
/// skipped.
///
/// Malformed structure (a header without a name, a missing or broken
/// `Filepath` line) fails the whole parse; no partial result is returned.
///
/// # Examples
/// ```
/// use maage_core::cheat_sheet::parse;
///
/// let sections = parse("TabName,Air\nFilepath,air.xlsx\nSorties,Flights\n").unwrap();
/// assert_eq!(sections[0].name, "Air");
/// assert_eq!(sections[0].fields[0].sheet_name, "Flights");
///
/// assert!(parse("TabName,Air\n").is_err());
/// ```
pub fn parse(source: &str) -> Result<Vec<Section>> {
    let lines: Vec<&str> = source.lines().map(str::trim).collect();
    let mut sections = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if !line.starts_with(TAB_NAME_PREFIX) {
            i += 1;
            continue;
        }

        let name = value_after_comma(line)
            .ok_or_else(|| Error::parse(i + 1, line, "section header has no ',' before its name"))?;

        let filepath = match lines.get(i + 1) {
            Some(next) => next
                .strip_prefix(FILEPATH_PREFIX)
                .and_then(|rest| rest.strip_prefix(','))
                .map(str::trim)
                .ok_or_else(|| {
                    Error::parse(
                        i + 2,
                        next,
                        format!("expected '{},' after section '{}'", FILEPATH_PREFIX, name),
                    )
                })?,
            None => {
                return Err(Error::parse(
                    i + 2,
                    "",
                    format!(
                        "section '{}' ends before its '{}' line",
                        name, FILEPATH_PREFIX
                    ),
                ))
            }
        };

        let mut section = Section::new(name, filepath);
        i += 2;

        while i < lines.len() && !lines[i].is_empty() {
            if let Some(field) = Field::parse_line(lines[i]) {
                section.fields.push(field);
            }
            i += 1;
        }

        sections.push(section);
    }

    Ok(sections)
}

/// Raw field lines of one section, for refreshing a single view without a
/// full [`parse`].
///
/// The section is matched case-insensitively. Lines are trimmed and returned
/// from after the two header lines up to the next blank line. A missing
/// section yields an empty list.
pub fn section_field_lines(source: &str, section_name: &str) -> Vec<String> {
    let lines: Vec<&str> = source.lines().map(str::trim).collect();

    let Some(start) = find_section_header(&lines, section_name) else {
        return Vec::new();
    };
    let end = section_end(&lines, start);
    let first = (start + 2).min(end);

    lines[first..end].iter().map(|l| l.to_string()).collect()
}

/// Index of the `TabName,<name>` line for `name`, ignoring case
pub(crate) fn find_section_header<S: AsRef<str>>(lines: &[S], name: &str) -> Option<usize> {
    lines
        .iter()
        .position(|line| is_section_header(line.as_ref(), name))
}

/// Index of the first blank line after `start`, or `lines.len()`
pub(crate) fn section_end<S: AsRef<str>>(lines: &[S], start: usize) -> usize {
    lines
        .iter()
        .skip(start + 1)
        .position(|line| line.as_ref().trim().is_empty())
        .map(|offset| start + 1 + offset)
        .unwrap_or(lines.len())
}

fn is_section_header(line: &str, name: &str) -> bool {
    match line.trim().split_once(',') {
        Some((prefix, value)) => {
            prefix.eq_ignore_ascii_case(TAB_NAME_PREFIX) && names_match(value.trim(), name)
        }
        None => false,
    }
}

fn value_after_comma(line: &str) -> Option<&str> {
    line.split_once(',').map(|(_, value)| value.trim())
}

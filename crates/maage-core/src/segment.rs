//! Column slices of comma-separated text files
//!
//! Reads a block of a comma-separated text file starting at a given row and
//! keeps only the requested columns. Lines too short for the requested
//! columns are padded with placeholder columns named `NewCol1`, `NewCol2`, ...
//! and the padded text is written back so later reads see the same shape.

use std::fs;
use std::path::Path;

use crate::cheat_sheet::file::write_atomic;
use crate::codec::column_range_to_indices;
use crate::error::{Error, Result};

/// Selected columns plus the rewritten source when padding was needed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// One entry per line from the start row on, holding the selected columns
    pub rows: Vec<Vec<String>>,
    /// Full padded text, present only if some line had to be extended
    pub padded_source: Option<String>,
}

/// Select `columns` from every non-blank line of `source` starting at the
/// 0-based `start_row`.
///
/// Blank lines are dropped before counting rows. Components are trimmed.
pub fn load_segment(source: &str, start_row: usize, columns: &str) -> Result<Segment> {
    let indices = column_range_to_indices(columns)?;
    // column_range_to_indices never returns an empty list
    let widest = indices.iter().copied().max().unwrap_or(0);

    let mut lines: Vec<String> = source
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    let mut modified = false;

    for line in lines.iter_mut().skip(start_row) {
        let mut parts: Vec<String> = line.split(',').map(|p| p.trim().to_string()).collect();

        if parts.len() <= widest {
            let needed = widest + 1 - parts.len();
            parts.extend((1..=needed).map(|n| format!("NewCol{}", n)));
            *line = parts.join(",");
            modified = true;
        }

        rows.push(indices.iter().map(|&idx| parts[idx].clone()).collect());
    }

    let padded_source = modified.then(|| {
        let mut text = lines.join("\n");
        text.push('\n');
        text
    });

    Ok(Segment {
        rows,
        padded_source,
    })
}

/// [`load_segment`] against a file, writing the padded text back atomically
/// when any line was extended.
pub fn load_segment_file<P: AsRef<Path>>(
    path: P,
    start_row: usize,
    columns: &str,
) -> Result<Vec<Vec<String>>> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let segment = load_segment(&source, start_row, columns)?;

    if let Some(padded) = &segment.padded_source {
        write_atomic(path, padded)?;
        log::debug!("Padded short lines in {}", path.display());
    }

    Ok(segment.rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_segment_selects_columns() {
        let source = "h1,h2,h3\n\na, b ,c\nd,e,f\n";
        let segment = load_segment(source, 1, "B:C").unwrap();

        assert_eq!(
            segment.rows,
            vec![
                vec!["b".to_string(), "c".to_string()],
                vec!["e".to_string(), "f".to_string()],
            ]
        );
        assert_eq!(segment.padded_source, None);
    }

    #[test]
    fn test_load_segment_pads_short_lines() {
        let source = "a,b\nc\n";
        let segment = load_segment(source, 0, "A:D").unwrap();

        assert_eq!(
            segment.rows[0],
            vec!["a", "b", "NewCol1", "NewCol2"]
        );
        assert_eq!(
            segment.rows[1],
            vec!["c", "NewCol1", "NewCol2", "NewCol3"]
        );
        assert_eq!(
            segment.padded_source.as_deref(),
            Some("a,b,NewCol1,NewCol2\nc,NewCol1,NewCol2,NewCol3\n")
        );
    }

    #[test]
    fn test_load_segment_start_past_end() {
        let segment = load_segment("a,b\n", 5, "A").unwrap();
        assert!(segment.rows.is_empty());
        assert!(segment.padded_source.is_none());
    }

    #[test]
    fn test_load_segment_bad_range() {
        assert!(matches!(
            load_segment("a,b\n", 0, "B:A"),
            Err(Error::InvalidRange(_))
        ));
    }
}

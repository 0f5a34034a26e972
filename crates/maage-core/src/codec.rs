//! Column-letter and row-number conversions
//!
//! Cheat-sheet fields describe where to read data in spreadsheet terms: a
//! 1-based starting row and a column range such as `"A:Z"`. The readers
//! downstream want 0-based offsets and index lists, so everything crossing
//! that boundary goes through this module.

use crate::error::{Error, Result};

/// Column range used when a field does not name one
pub const DEFAULT_COLUMNS: &str = "A:Z";

/// Number of columns a worksheet can hold (A through XFD)
pub const MAX_COLUMNS: usize = 16384;

/// Convert column letters to a zero-based index (A = 0, Z = 25, AA = 26, etc.)
///
/// Letters are read case-insensitively as a base-26 numeral where A = 1.
/// Columns past `XFD` are rejected.
///
/// # Examples
/// ```
/// use maage_core::codec::column_letter_to_index;
///
/// assert_eq!(column_letter_to_index("A").unwrap(), 0);
/// assert_eq!(column_letter_to_index("az").unwrap(), 51);
/// assert!(column_letter_to_index("A1").is_err());
/// ```
pub fn column_letter_to_index(letters: &str) -> Result<usize> {
    if letters.is_empty() {
        return Err(Error::InvalidColumn("empty column letters".into()));
    }

    let mut col: usize = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidColumn(format!(
                "invalid column letter '{}' in '{}'",
                c, letters
            )));
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        col = col
            .checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .filter(|&v| v <= MAX_COLUMNS)
            .ok_or_else(|| {
                Error::InvalidColumn(format!(
                    "column '{}' is beyond the last column {}",
                    letters,
                    index_to_column_letters(MAX_COLUMNS - 1)
                ))
            })?;
    }

    Ok(col - 1)
}

/// Convert a zero-based column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
pub fn index_to_column_letters(index: usize) -> String {
    let mut result = Vec::new();
    let mut n = index as u128 + 1; // 1-based for calculation

    while n > 0 {
        n -= 1;
        result.push((n % 26) as u8 + b'A');
        n /= 26;
    }

    result.reverse();
    String::from_utf8(result).unwrap_or_default()
}

/// Convert a column range (`"A:C"`) or single column (`"D"`) to the
/// inclusive, ascending list of zero-based indices it covers.
///
/// # Examples
/// ```
/// use maage_core::codec::column_range_to_indices;
///
/// assert_eq!(column_range_to_indices("A:C").unwrap(), vec![0, 1, 2]);
/// assert_eq!(column_range_to_indices("D").unwrap(), vec![3]);
/// assert!(column_range_to_indices("C:A").is_err());
/// ```
pub fn column_range_to_indices(range: &str) -> Result<Vec<usize>> {
    let parts: Vec<&str> = range.split(':').collect();

    match parts.as_slice() {
        [single] => Ok(vec![column_letter_to_index(single)?]),
        [start, end] => {
            let start_idx = column_letter_to_index(start)?;
            let end_idx = column_letter_to_index(end)?;

            if end_idx < start_idx {
                return Err(Error::InvalidRange(format!(
                    "'{}' ends before it starts",
                    range
                )));
            }

            Ok((start_idx..=end_idx).collect())
        }
        _ => Err(Error::InvalidRange(format!(
            "'{}' has more than one ':' separator",
            range
        ))),
    }
}

/// Convert a 1-based display row to a 0-based offset.
///
/// Anything that is not a positive integer (empty, non-numeric, zero)
/// falls back to offset 0.
pub fn display_row_to_offset(row_text: &str) -> usize {
    let row_text = row_text.trim();
    if row_text.is_empty() || !row_text.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }

    row_text
        .parse::<usize>()
        .ok()
        .and_then(|row| row.checked_sub(1))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letter_to_index() {
        assert_eq!(column_letter_to_index("A").unwrap(), 0);
        assert_eq!(column_letter_to_index("Z").unwrap(), 25);
        assert_eq!(column_letter_to_index("AA").unwrap(), 26);
        assert_eq!(column_letter_to_index("AZ").unwrap(), 51);
        assert_eq!(column_letter_to_index("BA").unwrap(), 52);
        assert_eq!(column_letter_to_index("ZZ").unwrap(), 701);
        assert_eq!(column_letter_to_index("XFD").unwrap(), 16383);

        // Case insensitive
        assert_eq!(column_letter_to_index("a").unwrap(), 0);
        assert_eq!(column_letter_to_index("bA").unwrap(), 52);
    }

    #[test]
    fn test_column_letter_to_index_errors() {
        assert!(matches!(
            column_letter_to_index(""),
            Err(Error::InvalidColumn(_))
        ));
        assert!(matches!(
            column_letter_to_index("A1"),
            Err(Error::InvalidColumn(_))
        ));
        assert!(matches!(
            column_letter_to_index(" A"),
            Err(Error::InvalidColumn(_))
        ));
        assert!(matches!(
            column_letter_to_index("É"),
            Err(Error::InvalidColumn(_))
        ));
        // One past XFD
        assert!(matches!(
            column_letter_to_index("XFE"),
            Err(Error::InvalidColumn(_))
        ));
        // Far beyond usize
        assert!(matches!(
            column_letter_to_index(&"Z".repeat(40)),
            Err(Error::InvalidColumn(_))
        ));
    }

    #[test]
    fn test_index_to_column_letters() {
        assert_eq!(index_to_column_letters(0), "A");
        assert_eq!(index_to_column_letters(25), "Z");
        assert_eq!(index_to_column_letters(26), "AA");
        assert_eq!(index_to_column_letters(52), "BA");
        assert_eq!(index_to_column_letters(702), "AAA");

        for idx in [0, 1, 25, 26, 51, 52, 701, 702, 16383] {
            let letters = index_to_column_letters(idx);
            assert_eq!(column_letter_to_index(&letters).unwrap(), idx);
        }
    }

    #[test]
    fn test_column_range_to_indices() {
        assert_eq!(column_range_to_indices("A:C").unwrap(), vec![0, 1, 2]);
        assert_eq!(column_range_to_indices("b:b").unwrap(), vec![1]);
        assert_eq!(column_range_to_indices("Y:AB").unwrap(), vec![24, 25, 26, 27]);
        assert_eq!(column_range_to_indices("E").unwrap(), vec![4]);
        assert_eq!(
            column_range_to_indices(DEFAULT_COLUMNS).unwrap(),
            (0..26).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_column_range_errors() {
        assert!(matches!(
            column_range_to_indices("C:A"),
            Err(Error::InvalidRange(_))
        ));
        assert!(matches!(
            column_range_to_indices("A:B:C"),
            Err(Error::InvalidRange(_))
        ));
        assert!(matches!(
            column_range_to_indices("A:"),
            Err(Error::InvalidColumn(_))
        ));
        assert!(matches!(
            column_range_to_indices(""),
            Err(Error::InvalidColumn(_))
        ));
    }

    #[test]
    fn test_column_range_bounded_by_last_column() {
        assert_eq!(column_range_to_indices("A:XFD").unwrap().len(), MAX_COLUMNS);
        assert!(matches!(
            column_range_to_indices("A:ZZZZZZZ"),
            Err(Error::InvalidColumn(_))
        ));
        assert!(matches!(
            column_range_to_indices("A:ZZZZZZZZZZZZZ"),
            Err(Error::InvalidColumn(_))
        ));
    }

    #[test]
    fn test_display_row_to_offset() {
        assert_eq!(display_row_to_offset("5"), 4);
        assert_eq!(display_row_to_offset("1"), 0);
        assert_eq!(display_row_to_offset(" 12 "), 11);
        assert_eq!(display_row_to_offset(""), 0);
        assert_eq!(display_row_to_offset("abc"), 0);
        assert_eq!(display_row_to_offset("0"), 0);
        assert_eq!(display_row_to_offset("-3"), 0);
        assert_eq!(display_row_to_offset("2.5"), 0);
    }
}

//! `Move N` counter bump

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static MOVE_COUNTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Move ([0-9]+)").expect("move counter pattern is valid"));

/// Replace every `Move <digits>` with `Move <digits + 1>`.
///
/// The increment is done on the decimal text, so there is no upper bound.
/// Leading zeros are not preserved (`Move 007` becomes `Move 8`). All other
/// text is returned unchanged.
///
/// # Examples
/// ```
/// use maage_core::cheat_sheet::increment_move_counters;
///
/// assert_eq!(
///     increment_move_counters("Move 3 happened, then Move 10"),
///     "Move 4 happened, then Move 11"
/// );
/// ```
pub fn increment_move_counters(source: &str) -> String {
    MOVE_COUNTER
        .replace_all(source, |caps: &Captures| {
            format!("Move {}", increment_decimal(&caps[1]))
        })
        .into_owned()
}

/// Add one to a string of ASCII digits
fn increment_decimal(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    let mut bytes: Vec<u8> = trimmed.bytes().collect();

    let mut carry = true;
    for b in bytes.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            carry = false;
            break;
        }
    }
    if carry {
        bytes.insert(0, b'1');
    }

    String::from_utf8(bytes).unwrap_or_default()
}

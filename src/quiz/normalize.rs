//! Answer normalization.
//!
//! Maps free-text input to a canonical form so that answers differing only
//! in diacritics, case or punctuation compare equal.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize an answer for comparison.
///
/// Steps:
/// 1. NFD-decompose so base letters and combining marks separate
/// 2. Drop combining marks
/// 3. Lowercase
/// 4. Fold letters without a decomposition (`ł`, `ø`, `ß`, ...) to ASCII
/// 5. Keep only `a-z`, `0-9` and whitespace
///
/// Whitespace runs collapse to a single space and the result is trimmed.
pub fn normalize(input: &str) -> String {
    let folded: String = input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .chars()
        .flat_map(fold_letter)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Letters that NFD leaves intact but which have an obvious ASCII base.
fn fold_letter(c: char) -> Vec<char> {
    match c {
        'ł' => vec!['l'],
        'ø' => vec!['o'],
        'đ' | 'ð' => vec!['d'],
        'ħ' => vec!['h'],
        'ı' => vec!['i'],
        'ß' => vec!['s', 's'],
        'æ' => vec!['a', 'e'],
        'œ' => vec!['o', 'e'],
        'þ' => vec!['t', 'h'],
        _ => vec![c],
    }
}

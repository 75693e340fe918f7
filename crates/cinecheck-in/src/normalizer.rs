//! Text normalization for claim extraction.
//!
//! Two flavours:
//! - [`normalize_chars`] is offset-preserving (one char in, one char out) and
//!   runs before segmentation so positions still point into the input
//! - [`clean_clause`] produces the canonical claim text

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Multiple whitespace pattern
    static ref MULTI_SPACE: Regex = Regex::new(r"\s+").unwrap();

    /// Bullets and list numbering at the start of a line
    static ref LIST_MARKER: Regex = Regex::new(r"^\s*(?:[-*•‣◦▪]|\d{1,3}[.)]|[a-z]\))\s+").unwrap();

    /// Trailing sentence punctuation and stray quotes
    static ref TRAILING_PUNCT: Regex = Regex::new(r#"[\s.!;:,'’]+$"#).unwrap();

    /// Leading stray quotes
    static ref LEADING_PUNCT: Regex = Regex::new(r"^[\s'‘]+").unwrap();
}

/// Replace typographic characters with ASCII equivalents, char for char.
pub fn normalize_chars(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{02BC}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{00A0}' | '\t' => ' ',
            c => c,
        })
        .collect()
}

/// Strip a bullet or list number. Returns the remaining text and the number
/// of bytes removed from the front.
pub fn strip_list_marker(line: &str) -> (&str, usize) {
    match LIST_MARKER.find(line) {
        Some(m) => (&line[m.end()..], m.end()),
        None => (line, 0),
    }
}

/// Canonical claim text: collapsed whitespace, no double quotes, no
/// trailing punctuation.
pub fn clean_clause(text: &str) -> String {
    let unquoted = text.replace(['"', '“', '”'], "");
    let collapsed = MULTI_SPACE.replace_all(unquoted.trim(), " ");
    let trimmed = TRAILING_PUNCT.replace(&collapsed, "");
    LEADING_PUNCT.replace(&trimmed, "").to_string()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Lowercase and fold common Latin diacritics ("Iñárritu" → "inarritu").
pub fn fold(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            'ý' | 'ÿ' => 'y',
            c => c,
        })
        .collect()
}

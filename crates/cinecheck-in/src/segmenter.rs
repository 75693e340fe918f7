//! Sentence segmentation.
//!
//! Input is split per line first (list markers stripped), then each line is
//! split at `.`, `!` or `?` followed by whitespace. Abbreviations, initials
//! and decimal numbers do not end a sentence.

use crate::normalizer::strip_list_marker;
use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    static ref ABBREVIATIONS: HashSet<&'static str> = [
        "mr", "mrs", "ms", "dr", "st", "jr", "sr", "vs", "prof", "mt", "etc",
        "inc", "ltd", "co", "no", "vol", "approx", "gen", "sgt", "capt", "lt",
    ]
    .into_iter()
    .collect();
}

/// A sentence-like unit of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Trimmed sentence text, terminator included
    pub text: String,
    /// Character offset of `text` in the input
    pub start: usize,
}

pub fn segment(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut line_start = 0;

    for line in text.split('\n') {
        let (body, stripped) = strip_list_marker(line);
        split_sentences(text, line_start + stripped, body, &mut segments);
        line_start += line.len() + 1;
    }

    segments
}

fn split_sentences(full: &str, base: usize, body: &str, out: &mut Vec<Segment>) {
    let mut start = 0;
    let mut chars = body.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        // swallow runs like "?!" or "..." and closing quotes
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if matches!(next, '.' | '!' | '?' | '"' | '\'' | ')') {
                end = j + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        let at_boundary = match chars.peek() {
            None => true,
            Some(&(_, next)) => next.is_whitespace(),
        };
        if !at_boundary || (c == '.' && is_abbreviation(&body[start..i])) {
            continue;
        }
        push_segment(full, base, body, start, end, out);
        start = end;
    }
    push_segment(full, base, body, start, body.len(), out);
}

fn push_segment(full: &str, base: usize, body: &str, start: usize, end: usize, out: &mut Vec<Segment>) {
    let raw = &body[start..end];
    let text = raw.trim();
    if text.is_empty() {
        return;
    }
    let lead = raw.len() - raw.trim_start().len();
    let byte_offset = base + start + lead;
    out.push(Segment {
        text: text.to_string(),
        start: full[..byte_offset].chars().count(),
    });
}

/// The word right before a period is an abbreviation or an initial.
fn is_abbreviation(before: &str) -> bool {
    let word = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(['(', '"', '\'']);
    if word.is_empty() {
        return false;
    }
    let mut letters = word.chars();
    let single_initial = matches!((letters.next(), letters.next()), (Some(c), None) if c.is_uppercase());
    single_initial || word.contains('.') || ABBREVIATIONS.contains(word.to_lowercase().as_str())
}

//! Fuzzy text similarity for names, titles and genres.
//!
//! Scores are in [0, 1]:
//! - token sort ratio: normalized Levenshtein over sorted, folded tokens
//! - token subset: 1.0 when every token of the shorter side appears in the
//!   longer one ("Nolan" vs "Christopher Nolan")

use crate::normalizer::fold;
use lazy_static::lazy_static;
use regex::Regex;
use strsim::normalized_levenshtein;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\p{L}\p{N}]+").unwrap();
}

const ARTICLES: [&str; 3] = ["the", "a", "an"];

pub fn tokens(text: &str) -> Vec<String> {
    NON_WORD
        .split(&fold(text))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    sorted_ratio(tokens(a), tokens(b))
}

fn sorted_ratio(mut a: Vec<String>, mut b: Vec<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    a.sort();
    b.sort();
    normalized_levenshtein(&a.join(" "), &b.join(" "))
}

pub fn token_subset_ratio(a: &str, b: &str) -> f64 {
    let (ta, tb) = (tokens(a), tokens(b));
    let (short, long) = if ta.len() <= tb.len() { (ta, tb) } else { (tb, ta) };
    if short.is_empty() {
        return 0.0;
    }
    let hits = short.iter().filter(|t| long.contains(t)).count();
    if hits == short.len() {
        1.0
    } else {
        hits as f64 / long.len() as f64
    }
}

/// Similarity used for person names and genres.
pub fn similarity(a: &str, b: &str) -> f64 {
    token_sort_ratio(a, b).max(token_subset_ratio(a, b))
}

/// Similarity used for movie titles. Leading articles are ignored and no
/// subset credit is given ("Avatar" must not match "Avatar: The Way of Water").
pub fn title_similarity(a: &str, b: &str) -> f64 {
    sorted_ratio(title_tokens(a), title_tokens(b))
}

fn title_tokens(title: &str) -> Vec<String> {
    let mut toks = tokens(title);
    if toks.len() > 1 && ARTICLES.contains(&toks[0].as_str()) {
        toks.remove(0);
    }
    toks
}

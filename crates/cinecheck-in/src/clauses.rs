//! Compound predicate splitting and anaphora resolution.
//!
//! "Braveheart was released in 1995 and won three Oscars" becomes
//! "Braveheart was released in 1995" + "Braveheart won three Oscars". A split
//! happens only where the text after `and` / `,` starts a new predicate, so
//! name lists ("DiCaprio and Kate Winslet") stay together.

use crate::shape::ClaimShape;
use lazy_static::lazy_static;
use regex::Regex;

const PREDICATE_VERBS: &str = "was|were|is|are|has|had|won|wins|starred|stars|made|grossed|earned|received|released|directed|features|featured|runs|ran|lasts|lasted|came|premiered|debuted|took|brought|became|raked|garnered|went";

lazy_static! {
    static ref SEPARATOR: Regex = Regex::new(r"(?i),\s*and\s+(?:also\s+)?|\s+and\s+(?:also\s+)?|;\s*|,\s*").unwrap();

    static ref PREDICATE_START: Regex = Regex::new(&format!(
        r"(?i)^(?:(?:it|he|she|they|the\s+film|the\s+movie)\s+)?(?:also\s+)?(?:{})\b",
        PREDICATE_VERBS
    )).unwrap();

    static ref PRONOUN_START: Regex = Regex::new(r"(?i)^(?:it|he|she|they|the\s+film|the\s+movie)\s").unwrap();

    static ref FIRST_PREDICATE: Regex = Regex::new(&format!(r"(?i)\s(?:{})\b", PREDICATE_VERBS)).unwrap();

    static ref MOVIE_PRONOUN: Regex = Regex::new(
        r"(?i)^(?:it|the\s+(?:film|movie|picture)|this\s+(?:film|movie|picture))\b"
    ).unwrap();
    static ref PERSON_PRONOUN: Regex = Regex::new(r"(?i)^(?:he|she|they)\b").unwrap();
    static ref OBJECT_IT: Regex = Regex::new(r"(?i)\b(?:in|directed|made|produced|wrote)\s+(?P<it>it)$").unwrap();
}

/// Longest subject carried over to a split clause, in words.
const MAX_SUBJECT_WORDS: usize = 8;

/// One clause of a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// Clause text, with the shared subject prepended when it was split off
    pub text: String,
    /// Byte offset of the clause in the sentence
    pub offset: usize,
}

pub fn split_compound(sentence: &str) -> Vec<Clause> {
    let mut cuts: Vec<(usize, usize)> = Vec::new();
    for m in SEPARATOR.find_iter(sentence) {
        if PREDICATE_START.is_match(&sentence[m.end()..]) {
            cuts.push((m.start(), m.end()));
        }
    }
    if cuts.is_empty() {
        return vec![Clause {
            text: sentence.to_string(),
            offset: 0,
        }];
    }

    let first = &sentence[..cuts[0].0];
    let subject = subject_of(first);
    let mut clauses = vec![Clause {
        text: first.to_string(),
        offset: 0,
    }];

    for (i, &(_, start)) in cuts.iter().enumerate() {
        let end = cuts.get(i + 1).map(|c| c.0).unwrap_or(sentence.len());
        let rest = &sentence[start..end];
        let text = match subject {
            Some(s) if !PRONOUN_START.is_match(rest) => format!("{} {}", s, rest),
            _ => rest.to_string(),
        };
        clauses.push(Clause { text, offset: start });
    }
    clauses
}

/// Text before the first predicate verb of a clause.
fn subject_of(clause: &str) -> Option<&str> {
    let m = FIRST_PREDICATE.find(clause)?;
    let subject = clause[..m.start()].trim();
    let words = subject.split_whitespace().count();
    (words > 0 && words <= MAX_SUBJECT_WORDS).then_some(subject)
}

/// Most recent explicit subjects, used to resolve pronouns.
#[derive(Debug, Clone, Default)]
pub struct Referents {
    last_movie: Option<String>,
    last_person: Option<String>,
}

impl Referents {
    /// Replace a leading pronoun (and a trailing object "it") with the most
    /// recent matching subject. Unresolvable pronouns are left in place.
    pub fn resolve(&self, clause: &str) -> String {
        let mut out = clause.trim().to_string();
        let movie_pronoun = MOVIE_PRONOUN.find(&out).map(|m| m.range());
        let person_pronoun = PERSON_PRONOUN.find(&out).map(|m| m.range());
        match (movie_pronoun, person_pronoun, &self.last_movie, &self.last_person) {
            (Some(range), _, Some(movie), _) => out.replace_range(range, movie),
            (None, Some(range), _, Some(person)) => out.replace_range(range, person),
            _ => {}
        }
        if let Some(movie) = &self.last_movie {
            let end = out.trim_end_matches(['.', '!']).len();
            let object = OBJECT_IT
                .captures(&out[..end])
                .and_then(|c| c.name("it"))
                .map(|m| m.range());
            if let Some(range) = object {
                out.replace_range(range, movie);
            }
        }
        out
    }

    /// Remember the explicit subjects of a retained claim.
    pub fn observe(&mut self, shape: &ClaimShape) {
        if let Some(movie) = shape.movie() {
            self.last_movie = Some(movie.to_string());
        }
        if let Some(person) = shape.person() {
            self.last_person = Some(person.to_string());
        }
    }
}

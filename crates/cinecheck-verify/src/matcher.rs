//! Agreement scoring between a claimed value and an evidence fact.
//!
//! Every score is in [0, 1]; 1.0 means the evidence states exactly what the
//! claim says.

use cinecheck_core::{Fact, MatchThresholds, VerifierError};
use cinecheck_in::fuzzy::{similarity, tokens};
use cinecheck_in::ClaimValue;
use lazy_static::lazy_static;
use std::collections::HashSet;
use std::str::FromStr;

lazy_static! {
    static ref STOPWORDS: HashSet<&'static str> = [
        "the", "a", "an", "and", "or", "of", "in", "on", "at", "to", "for", "by", "with",
        "was", "were", "is", "are", "it", "its", "this", "that", "film", "movie", "has", "had",
        "from", "as", "also",
    ]
    .into_iter()
    .collect();
}

/// Agreement of one evidence fact with the claimed value.
pub fn agreement(
    value: &ClaimValue,
    fact: &Fact,
    source_ref: &str,
    thresholds: &MatchThresholds,
) -> Result<f64, VerifierError> {
    if fact.values.is_empty() {
        return Err(malformed(source_ref, format!("no {} values", fact.attribute)));
    }
    let score = match value {
        // every claimed name must appear somewhere in the evidence
        ClaimValue::Names(names) => names
            .iter()
            .map(|name| best_similarity(name, &fact.values))
            .fold(1.0, f64::min),
        ClaimValue::Text(text) => best_similarity(text, &fact.values),
        ClaimValue::Year(year) => {
            let actual: i32 = parse_value(fact, source_ref)?;
            exact(*year == actual)
        }
        ClaimValue::Count { n, at_least } => {
            let actual: u32 = parse_value(fact, source_ref)?;
            exact(if *at_least { actual >= *n } else { actual == *n })
        }
        ClaimValue::Money(amount) => {
            let actual: f64 = parse_value(fact, source_ref)?;
            numeric_agreement(*amount, actual, thresholds)
        }
        ClaimValue::Minutes(minutes) => {
            let actual: f64 = parse_value(fact, source_ref)?;
            numeric_agreement(*minutes as f64, actual, thresholds)
        }
    };
    Ok(score)
}

fn best_similarity(claimed: &str, values: &[String]) -> f64 {
    values
        .iter()
        .map(|v| similarity(claimed, v))
        .fold(0.0, f64::max)
}

fn exact(matches: bool) -> f64 {
    if matches {
        1.0
    } else {
        0.0
    }
}

fn parse_value<T: FromStr>(fact: &Fact, source_ref: &str) -> Result<T, VerifierError> {
    let raw = fact.values[0].trim().replace(',', "");
    raw.parse()
        .map_err(|_| malformed(source_ref, format!("unreadable {} value {:?}", fact.attribute, fact.values[0])))
}

fn malformed(source_ref: &str, reason: String) -> VerifierError {
    VerifierError::MalformedEvidence {
        source_ref: source_ref.to_string(),
        reason,
    }
}

/// Numeric agreement: at or above the acceptance threshold inside the
/// relative tolerance, falling linearly to zero at twice the tolerance.
pub fn numeric_agreement(claimed: f64, actual: f64, thresholds: &MatchThresholds) -> f64 {
    let rel = relative_difference(claimed, actual);
    if rel == 0.0 {
        return 1.0;
    }
    let tolerance = thresholds.numeric_tolerance;
    if tolerance <= 0.0 {
        return 0.0;
    }
    let acceptance = thresholds.acceptance_threshold;
    if rel <= tolerance {
        1.0 - (rel / tolerance) * (1.0 - acceptance)
    } else {
        (acceptance * (2.0 - rel / tolerance)).max(0.0)
    }
}

fn relative_difference(claimed: f64, actual: f64) -> f64 {
    if actual == 0.0 {
        return if claimed == 0.0 { 0.0 } else { 1.0 };
    }
    ((claimed - actual) / actual).abs()
}

/// Share of the claim's content words found in the excerpt.
pub fn token_overlap(claim: &str, excerpt: &str) -> f64 {
    let content: Vec<String> = tokens(claim)
        .into_iter()
        .filter(|t| t.chars().count() > 1 && !STOPWORDS.contains(t.as_str()))
        .collect();
    if content.is_empty() {
        return 0.0;
    }
    let excerpt_tokens: HashSet<String> = tokens(excerpt).into_iter().collect();
    let hits = content.iter().filter(|t| excerpt_tokens.contains(*t)).count();
    hits as f64 / content.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinecheck_core::Attribute;

    fn fact(attribute: Attribute, values: &[&str]) -> Fact {
        Fact {
            attribute,
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn score(value: ClaimValue, fact: &Fact) -> f64 {
        agreement(&value, fact, "test:1", &MatchThresholds::default()).unwrap()
    }

    #[test]
    fn test_cast_requires_every_name() {
        let cast = fact(Attribute::Cast, &["Leonardo DiCaprio", "Kate Winslet", "Billy Zane"]);
        assert_eq!(score(ClaimValue::Names(vec!["Kate Winslet".into()]), &cast), 1.0);
        let mixed = score(
            ClaimValue::Names(vec!["Kate Winslet".into(), "Brad Pitt".into()]),
            &cast,
        );
        assert!(mixed < 0.5);
    }

    #[test]
    fn test_year_and_count() {
        let year = fact(Attribute::ReleaseYear, &["1995"]);
        assert_eq!(score(ClaimValue::Year(1995), &year), 1.0);
        assert_eq!(score(ClaimValue::Year(1996), &year), 0.0);

        let oscars = fact(Attribute::OscarWins, &["5"]);
        assert_eq!(score(ClaimValue::Count { n: 3, at_least: false }, &oscars), 0.0);
        assert_eq!(score(ClaimValue::Count { n: 1, at_least: true }, &oscars), 1.0);
    }

    #[test]
    fn test_numeric_tolerance() {
        let t = MatchThresholds::default();
        assert_eq!(numeric_agreement(100.0, 100.0, &t), 1.0);
        assert!(numeric_agreement(95.0, 100.0, &t) >= t.acceptance_threshold);
        assert!(numeric_agreement(108.0, 100.0, &t) >= t.acceptance_threshold);
        assert!(numeric_agreement(111.0, 100.0, &t) < t.acceptance_threshold);
        assert_eq!(numeric_agreement(300.0, 100.0, &t), 0.0);
    }

    #[test]
    fn test_numeric_falloff_past_tolerance() {
        let t = MatchThresholds::default();
        // halfway between the tolerance and twice the tolerance
        let halfway = numeric_agreement(115.0, 100.0, &t);
        assert!((halfway - t.acceptance_threshold * 0.5).abs() < 1e-9);
        assert_eq!(numeric_agreement(125.0, 100.0, &t), 0.0);

        let strict = MatchThresholds {
            numeric_tolerance: 0.0,
            ..MatchThresholds::default()
        };
        assert_eq!(numeric_agreement(101.0, 100.0, &strict), 0.0);
        assert_eq!(numeric_agreement(100.0, 100.0, &strict), 1.0);
    }

    #[test]
    fn test_money_with_separators() {
        let gross = fact(Attribute::BoxOffice, &["2,264,743,305"]);
        assert!(score(ClaimValue::Money(2.2e9), &gross) >= 0.85);
    }

    #[test]
    fn test_malformed_values() {
        let bad = fact(Attribute::ReleaseYear, &["nineteen-ninety"]);
        let err = agreement(&ClaimValue::Year(1990), &bad, "catalog:x", &MatchThresholds::default())
            .unwrap_err();
        assert!(matches!(err, VerifierError::MalformedEvidence { ref source_ref, .. } if source_ref == "catalog:x"));

        let empty = fact(Attribute::Director, &[]);
        assert!(agreement(&ClaimValue::Names(vec!["X Y".into()]), &empty, "s", &MatchThresholds::default()).is_err());
    }

    #[test]
    fn test_token_overlap() {
        let overlap = token_overlap(
            "Titanic was filmed in Baja California",
            "Principal photography took place in Baja California, Mexico. Titanic was filmed on a huge tank.",
        );
        assert_eq!(overlap, 1.0);
        assert_eq!(token_overlap("the of and", "anything"), 0.0);
    }
}

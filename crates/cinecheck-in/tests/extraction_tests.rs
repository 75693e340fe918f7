//! Integration tests for claim extraction on realistic generated prose.

use cinecheck_core::{Attribute, ClaimExtractor, ExtractionError};
use cinecheck_in::{parse_claim, ClaimValue, HeuristicExtractor};

fn texts(input: &str) -> Vec<String> {
    HeuristicExtractor::new()
        .extract(input)
        .unwrap()
        .into_iter()
        .map(|c| c.text)
        .collect()
}

// =============================================================================
// Compound sentences
// =============================================================================

#[test]
fn test_braveheart_two_claims() {
    let claims = HeuristicExtractor::new()
        .extract("Braveheart was released in 1995 and won three Oscars.")
        .unwrap();

    assert_eq!(claims.len(), 2);
    assert_eq!(claims[0].text, "Braveheart was released in 1995");
    assert_eq!(claims[1].text, "Braveheart won three Oscars");
    assert_eq!(claims[0].position, 0);
    assert_eq!(claims[1].position, 36);

    assert_eq!(parse_claim(&claims[0].text).value(), Some(&ClaimValue::Year(1995)));
    assert_eq!(
        parse_claim(&claims[1].text).value(),
        Some(&ClaimValue::Count { n: 3, at_least: false })
    );
}

#[test]
fn test_predicate_list_shares_subject() {
    assert_eq!(
        texts("Titanic was directed by James Cameron, starred Leonardo DiCaprio and Kate Winslet, and made over 2 billion dollars."),
        vec![
            "Titanic was directed by James Cameron",
            "Titanic starred Leonardo DiCaprio and Kate Winslet",
            "Titanic made over 2 billion dollars",
        ]
    );
}

// =============================================================================
// Assistant-style answers
// =============================================================================

#[test]
fn test_chat_answer_with_list() {
    let answer = "Sure! Here are some facts about Inception:\n\
        1. Inception was directed by Christopher Nolan.\n\
        2. It was released in 2010.\n\
        3. The film grossed $839 million worldwide.\n\
        I think it is one of the best movies ever made. Let me know if you want more!";

    let claims = texts(answer);
    assert_eq!(
        claims,
        vec![
            "Inception was directed by Christopher Nolan",
            "Inception was released in 2010",
            "Inception grossed $839 million worldwide",
        ]
    );
}

#[test]
fn test_person_pronoun_resolution() {
    let claims = texts("Christopher Nolan directed Inception. He also directed Interstellar.");
    assert_eq!(claims[1], "Christopher Nolan also directed Interstellar");

    let shape = parse_claim(&claims[1]);
    assert_eq!(shape.attribute(), Some(Attribute::Director));
    assert_eq!(shape.movie(), Some("Interstellar"));
}

#[test]
fn test_unresolvable_pronoun_is_kept() {
    assert_eq!(texts("It won five Academy Awards."), vec!["It won five Academy Awards"]);
}

// =============================================================================
// Positions
// =============================================================================

#[test]
fn test_positions_point_into_original_text() {
    let input = "“Avatar” was released in 2009. Alejandro Iñárritu directed The Revenant.";
    let claims = HeuristicExtractor::new().extract(input).unwrap();
    assert_eq!(claims.len(), 2);
    for claim in &claims {
        let tail: String = input.chars().skip(claim.position).collect();
        let first_word = claim.text.split_whitespace().next().unwrap();
        assert!(
            tail.trim_start_matches(['“', '"']).starts_with(first_word),
            "claim {:?} does not start at {}",
            claim.text,
            claim.position
        );
    }
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn test_only_opinions_is_an_error() {
    let err = HeuristicExtractor::new()
        .extract("What a masterpiece! Maybe it won an Oscar? I loved it.")
        .unwrap_err();
    assert_eq!(err, ExtractionError::NoFactualStatements);
}

#[test]
fn test_extraction_is_deterministic() {
    let input = "Toy Story is an animated film. It was released in 1995 and runs 81 minutes.";
    let a = HeuristicExtractor::new().extract(input).unwrap();
    let b = HeuristicExtractor::new().extract(input).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 3);
}

// =============================================================================
// Oscar claims
// =============================================================================

#[test]
fn test_nominations_do_not_become_wins() {
    let claims = texts("Titanic received 14 Oscar nominations.");
    assert_eq!(claims, vec!["Titanic received 14 Oscar nominations"]);
    let shape = parse_claim(&claims[0]);
    assert_ne!(shape.attribute(), Some(Attribute::OscarWins));
    assert!(shape.is_freeform());
}

#[test]
fn test_person_award_keeps_the_person() {
    let claims = texts("Kate Winslet won an Oscar for Titanic. Tom Hardy won an Oscar for The Revenant.");
    assert_eq!(claims.len(), 2);

    let winslet = parse_claim(&claims[0]);
    assert_eq!(winslet.attribute(), Some(Attribute::OscarWinners));
    assert_eq!(winslet.movie(), Some("Titanic"));
    assert_eq!(winslet.value(), Some(&ClaimValue::Names(vec!["Kate Winslet".into()])));

    let hardy = parse_claim(&claims[1]);
    assert_eq!(hardy.movie(), Some("The Revenant"));
    assert_eq!(hardy.person(), Some("Tom Hardy"));
}

#[test]
fn test_huge_numbers_do_not_panic() {
    for input in ["Titanic won over 4294967295 Oscars.", "Titanic runs 99999999 hours."] {
        let claims = texts(input);
        assert_eq!(claims.len(), 1);
        assert!(parse_claim(&claims[0]).is_freeform());
    }
}

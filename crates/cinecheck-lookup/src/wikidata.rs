//! Wikidata SPARQL lookup for person-award claims.
//!
//! Only "<person> won an Oscar for <film>" claims are answered. The query
//! lists every Academy Award statement (`P166` with an award that is an
//! instance of `Q19020`) on the human labelled with the claimed name, with
//! the work (`P1686`) and point in time (`P585`) qualifiers.

use crate::catalog::TITLE_MATCH_THRESHOLD;
use crate::http::{self, RetryPolicy};
use async_trait::async_trait;
use cinecheck_core::{Attribute, Claim, Evidence, KnowledgeLookup, LookupError};
use cinecheck_in::fuzzy::title_similarity;
use cinecheck_in::parse_claim;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "https://query.wikidata.org/sparql";

#[derive(Debug, Clone)]
pub struct WikidataConfig {
    pub endpoint: String,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for WikidataConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(15),
            retry: RetryPolicy::default(),
        }
    }
}

impl WikidataConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

// =============================================================================
// Query and results
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SparqlResponse {
    pub results: SparqlResults,
}

#[derive(Debug, Default, Deserialize)]
pub struct SparqlResults {
    #[serde(default)]
    pub bindings: Vec<HashMap<String, SparqlTerm>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SparqlTerm {
    pub value: String,
}

/// One Academy Award statement on a person.
#[derive(Debug, Clone, PartialEq)]
pub struct AwardRow {
    /// Entity id of the person, e.g. "Q38111"
    pub person: String,
    pub award: String,
    pub work: Option<String>,
    pub year: Option<i32>,
}

impl AwardRow {
    fn describe(&self) -> String {
        let mut line = self.award.clone();
        if let Some(work) = &self.work {
            line.push_str(&format!(" for {}", work));
        }
        if let Some(year) = self.year {
            line.push_str(&format!(" ({})", year));
        }
        line
    }
}

/// SPARQL string literal body for a label.
fn escape_literal(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control())
        .flat_map(|c| match c {
            '\\' => vec!['\\', '\\'],
            '"' => vec!['\\', '"'],
            c => vec![c],
        })
        .collect()
}

/// Academy Award statements of the human whose English label is `person`.
pub fn award_query(person: &str) -> String {
    format!(
        r#"SELECT ?person ?awardLabel ?workLabel ?time WHERE {{
  ?person rdfs:label "{}"@en ;
          wdt:P31 wd:Q5 ;
          p:P166 ?statement .
  ?statement ps:P166 ?award .
  ?award wdt:P31 wd:Q19020 .
  OPTIONAL {{ ?statement pq:P1686 ?work . }}
  OPTIONAL {{ ?statement pq:P585 ?time . }}
  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "en" . }}
}}
LIMIT 100"#,
        escape_literal(person)
    )
}

fn term<'a>(binding: &'a HashMap<String, SparqlTerm>, name: &str) -> Option<&'a str> {
    binding.get(name).map(|t| t.value.as_str()).filter(|v| !v.is_empty())
}

/// Rows with a person and an award label; anything else is skipped.
pub fn award_rows(response: SparqlResponse) -> Vec<AwardRow> {
    response
        .results
        .bindings
        .iter()
        .filter_map(|b| {
            let person = term(b, "person")?.rsplit('/').next()?.to_string();
            Some(AwardRow {
                person,
                award: term(b, "awardLabel")?.to_string(),
                work: term(b, "workLabel").map(str::to_string),
                year: term(b, "time").and_then(|t| t.get(..4)).and_then(|y| y.parse().ok()),
            })
        })
        .collect()
}

/// Evidence from a person's award rows for a claimed film. A matching row
/// yields a winner fact; otherwise the person's awards are cited without
/// one, which does not decide the claim.
pub fn award_evidence(rows: &[AwardRow], person: &str, film: &str, claim: &Claim) -> Vec<Evidence> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let source_ref = format!("wikidata:{}", first.person);
    let for_film: Vec<&AwardRow> = rows
        .iter()
        .filter(|r| {
            r.work
                .as_deref()
                .is_some_and(|w| title_similarity(film, w) >= TITLE_MATCH_THRESHOLD)
        })
        .collect();

    if for_film.is_empty() {
        let awards: Vec<String> = rows.iter().map(AwardRow::describe).collect();
        let excerpt = format!("{} Academy Awards: {}", person, awards.join("; "));
        return vec![Evidence::new(claim.id, source_ref, excerpt)];
    }
    for_film
        .into_iter()
        .map(|row| {
            Evidence::new(claim.id, source_ref.clone(), format!("{}: {}", person, row.describe()))
                .with_fact(Attribute::OscarWinners, vec![person.to_string()])
        })
        .collect()
}

// =============================================================================
// Client
// =============================================================================

pub struct WikidataLookup {
    client: Client,
    config: WikidataConfig,
}

impl WikidataLookup {
    pub fn new(config: WikidataConfig) -> Result<Self, LookupError> {
        // the endpoint rejects requests without a descriptive agent
        let client = Client::builder()
            .user_agent(concat!(
                "cinecheck/",
                env!("CARGO_PKG_VERSION"),
                " (movie claim verification)"
            ))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| LookupError::Unavailable(format!("Wikidata client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &WikidataConfig {
        &self.config
    }

    pub async fn awards(&self, person: &str) -> Result<Vec<AwardRow>, LookupError> {
        let query = award_query(person);
        let response: SparqlResponse = http::get_json("Wikidata", "award query", &self.config.retry, || {
            self.client
                .get(&self.config.endpoint)
                .header(reqwest::header::ACCEPT, "application/sparql-results+json")
                .query(&[("query", query.as_str()), ("format", "json")])
        })
        .await?;
        Ok(award_rows(response))
    }
}

#[async_trait]
impl KnowledgeLookup for WikidataLookup {
    async fn lookup(&self, claim: &Claim) -> Result<Vec<Evidence>, LookupError> {
        let shape = parse_claim(&claim.text);
        let (Some(Attribute::OscarWinners), Some(film), Some(person)) =
            (shape.attribute(), shape.movie(), shape.person())
        else {
            return Err(LookupError::NotFound("Wikidata answers person award claims only".into()));
        };

        let rows = self.awards(person).await?;
        if rows.is_empty() {
            return Err(LookupError::NotFound(format!(
                "no Academy Award recorded for {} on Wikidata",
                person
            )));
        }
        debug!(claim_id = claim.id, person, awards = rows.len(), "Wikidata awards");
        Ok(award_evidence(&rows, person, film, claim))
    }
}

//! OMDb lookup by exact title (`?t=`).
//!
//! OMDb answers 200 with `"Response": "False"` for unknown titles. Its
//! `Awards` line ("Won 5 Oscars. 34 wins & 33 nominations total") is the
//! only award data it has: a win count, never the winners. `BoxOffice` is
//! the US domestic gross and is left out, since box-office claims are
//! checked against worldwide figures.

use crate::catalog::TITLE_MATCH_THRESHOLD;
use crate::http::{self, RetryPolicy};
use crate::record::{evidence_for, MovieRecord};
use async_trait::async_trait;
use cinecheck_core::{Claim, Evidence, KnowledgeLookup, LookupError};
use cinecheck_in::fuzzy::title_similarity;
use cinecheck_in::{parse_claim, ClaimShape};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

lazy_static! {
    static ref OSCARS_WON: Regex = Regex::new(r"(?i)\bwon\s+(?P<n>\d+)\s+oscars?\b").unwrap();
    static ref LEADING_NUMBER: Regex = Regex::new(r"^\s*(?P<n>\d+)").unwrap();
}

#[derive(Clone)]
pub struct OmdbConfig {
    pub base_url: String,
    pub api_key: String,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
}

impl OmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            request_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl std::fmt::Debug for OmdbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmdbConfig")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

/// `?t=` payload. Every field is a string; missing data is `"N/A"`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbMovie {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub actors: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub awards: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
}

fn known(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|v| !v.is_empty() && *v != "N/A")
}

fn list(field: Option<&str>) -> Vec<String> {
    known(field)
        .map(|v| v.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

/// "Won 11 Oscars. ..." → 11; an awards line without Oscar wins → 0.
pub fn oscar_wins(awards: &str) -> u32 {
    OSCARS_WON
        .captures(awards)
        .and_then(|c| c["n"].parse().ok())
        .unwrap_or(0)
}

/// Map an OMDb payload onto a record. `None` for a `"False"` response or a
/// payload without title or year.
pub fn record_from_omdb(movie: OmdbMovie) -> Option<MovieRecord> {
    if !movie.response.eq_ignore_ascii_case("true") {
        return None;
    }
    let title = known(movie.title.as_deref())?.to_string();
    // series report "2008–2013"
    let year = known(movie.year.as_deref())?.get(..4)?.parse().ok()?;
    let runtime_minutes = known(movie.runtime.as_deref())
        .and_then(|r| LEADING_NUMBER.captures(r))
        .and_then(|c| c["n"].parse().ok());
    Some(MovieRecord {
        title,
        year,
        directors: list(movie.director.as_deref()),
        cast: list(movie.actors.as_deref()),
        oscar_wins: known(movie.awards.as_deref()).map(oscar_wins),
        oscar_winners: Vec::new(),
        box_office_usd: None,
        runtime_minutes,
        genres: list(movie.genre.as_deref()),
        overview: known(movie.plot.as_deref()).unwrap_or_default().to_string(),
    })
}

pub struct OmdbLookup {
    client: Client,
    config: OmdbConfig,
}

impl OmdbLookup {
    pub fn new(config: OmdbConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .user_agent(concat!("cinecheck/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| LookupError::Unavailable(format!("OMDb client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OmdbConfig {
        &self.config
    }

    /// Record for the closest title OMDb knows, with its IMDb id.
    pub async fn title(&self, title: &str) -> Result<(MovieRecord, Option<String>), LookupError> {
        let movie: OmdbMovie = http::get_json("OMDb", "title search", &self.config.retry, || {
            self.client.get(&self.config.base_url).query(&[
                ("t", title),
                ("type", "movie"),
                ("apikey", self.config.api_key.as_str()),
            ])
        })
        .await?;

        let imdb_id = known(movie.imdb_id.as_deref()).map(str::to_string);
        let reason = movie.error.clone();
        let record = record_from_omdb(movie).ok_or_else(|| {
            LookupError::NotFound(format!(
                "no OMDb match for \"{}\": {}",
                title,
                reason.as_deref().unwrap_or("incomplete record")
            ))
        })?;
        if title_similarity(title, &record.title) < TITLE_MATCH_THRESHOLD {
            return Err(LookupError::NotFound(format!(
                "OMDb returned \"{}\" for \"{}\"",
                record.title, title
            )));
        }
        Ok((record, imdb_id))
    }
}

#[async_trait]
impl KnowledgeLookup for OmdbLookup {
    async fn lookup(&self, claim: &Claim) -> Result<Vec<Evidence>, LookupError> {
        let shape = parse_claim(&claim.text);
        let ClaimShape::Movie { movie, .. } = &shape else {
            return Err(LookupError::NotFound("OMDb cannot search free statements".into()));
        };

        let (record, imdb_id) = self.title(movie).await?;
        let source_ref = format!("omdb:{}", imdb_id.unwrap_or_else(|| record.slug()));
        debug!(claim_id = claim.id, source = %source_ref, title = %record.title, "OMDb hit");
        Ok(evidence_for(&record, &shape, claim.id, &source_ref))
    }
}

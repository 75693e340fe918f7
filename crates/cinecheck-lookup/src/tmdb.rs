//! TMDb v3 lookup.
//!
//! `search/movie` picks the best fuzzy title, then
//! `movie/{id}?append_to_response=credits` fills a [`MovieRecord`]. TMDb has
//! no Academy Award data, so Oscar claims get no evidence from this source.

use crate::catalog::TITLE_MATCH_THRESHOLD;
use crate::http::{self, RetryPolicy};
use crate::record::{evidence_for, MovieRecord};
use async_trait::async_trait;
use cinecheck_core::{Claim, Evidence, KnowledgeLookup, LookupError};
use cinecheck_in::fuzzy::title_similarity;
use cinecheck_in::{parse_claim, ClaimShape};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Cast members kept per record; TMDb returns the full billing.
const CAST_LIMIT: usize = 15;

#[derive(Clone)]
pub struct TmdbConfig {
    pub base_url: String,
    pub bearer_token: String,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
}

impl TmdbConfig {
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            bearer_token: bearer_token.into(),
            request_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl std::fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub revenue: Option<u64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub credits: Option<Credits>,
}

#[derive(Debug, Deserialize)]
pub struct Genre {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Deserialize)]
pub struct CastMember {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CrewMember {
    pub name: String,
    #[serde(default)]
    pub job: String,
}

/// Best search hit whose title clears the match threshold.
pub fn best_hit<'a>(title: &str, hits: &'a [SearchHit]) -> Option<&'a SearchHit> {
    let mut best: Option<(f64, &SearchHit)> = None;
    for hit in hits {
        let score = title_similarity(title, &hit.title);
        if score >= TITLE_MATCH_THRESHOLD && best.map_or(true, |(s, _)| score > s) {
            best = Some((score, hit));
        }
    }
    best.map(|(_, hit)| hit)
}

/// Map a details payload onto a record. `None` without a usable release date.
pub fn record_from_details(details: MovieDetails) -> Option<MovieRecord> {
    let year = details
        .release_date
        .as_deref()
        .and_then(|d| d.get(..4))
        .and_then(|y| y.parse().ok())?;
    let credits = details.credits.unwrap_or_default();
    Some(MovieRecord {
        title: details.title,
        year,
        directors: credits
            .crew
            .into_iter()
            .filter(|c| c.job == "Director")
            .map(|c| c.name)
            .collect(),
        cast: credits.cast.into_iter().take(CAST_LIMIT).map(|c| c.name).collect(),
        oscar_wins: None,
        oscar_winners: Vec::new(),
        // TMDb reports 0 for unknown revenue and runtime
        box_office_usd: details.revenue.filter(|r| *r > 0),
        runtime_minutes: details.runtime.filter(|r| *r > 0),
        genres: details.genres.into_iter().map(|g| g.name).collect(),
        overview: details.overview.unwrap_or_default(),
    })
}

// =============================================================================
// Client
// =============================================================================

pub struct TmdbLookup {
    client: Client,
    config: TmdbConfig,
}

impl TmdbLookup {
    pub fn new(config: TmdbConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .user_agent(concat!("cinecheck/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| LookupError::Unavailable(format!("TMDb client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TmdbConfig {
        &self.config
    }

    pub async fn search(&self, title: &str) -> Result<SearchHit, LookupError> {
        let response: SearchResponse = self
            .get("/search/movie", &[("query", title), ("include_adult", "false")])
            .await?;
        best_hit(title, &response.results)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(format!("no TMDb match for \"{}\"", title)))
    }

    pub async fn details(&self, id: u64) -> Result<MovieRecord, LookupError> {
        let details: MovieDetails = self
            .get(&format!("/movie/{}", id), &[("append_to_response", "credits")])
            .await?;
        record_from_details(details)
            .ok_or_else(|| LookupError::NotFound(format!("TMDb movie {} has no release date", id)))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        http::get_json("TMDb", path, &self.config.retry, || {
            self.client
                .get(&url)
                .bearer_auth(&self.config.bearer_token)
                .query(query)
        })
        .await
    }
}

#[async_trait]
impl KnowledgeLookup for TmdbLookup {
    async fn lookup(&self, claim: &Claim) -> Result<Vec<Evidence>, LookupError> {
        let shape = parse_claim(&claim.text);
        let ClaimShape::Movie { movie, .. } = &shape else {
            return Err(LookupError::NotFound("TMDb cannot search free statements".into()));
        };

        let hit = self.search(movie).await?;
        let record = self.details(hit.id).await?;
        let source_ref = format!("tmdb:movie/{}", hit.id);
        debug!(claim_id = claim.id, source = %source_ref, title = %record.title, "TMDb hit");
        Ok(evidence_for(&record, &shape, claim.id, &source_ref))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn details() -> MovieDetails {
        serde_json::from_value(json!({
            "id": 197,
            "title": "Braveheart",
            "release_date": "1995-05-24",
            "runtime": 178,
            "revenue": 0,
            "genres": [{"id": 28, "name": "Action"}, {"id": 18, "name": "Drama"}],
            "overview": "Enraged at the slaughter of Murron...",
            "credits": {
                "cast": [{"name": "Mel Gibson"}, {"name": "Sophie Marceau"}],
                "crew": [
                    {"name": "Mel Gibson", "job": "Director"},
                    {"name": "Randall Wallace", "job": "Screenplay"}
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_record_from_details() {
        let record = record_from_details(details()).unwrap();
        assert_eq!(record.year, 1995);
        assert_eq!(record.directors, vec!["Mel Gibson"]);
        assert_eq!(record.cast.len(), 2);
        assert_eq!(record.runtime_minutes, Some(178));
        assert_eq!(record.box_office_usd, None);
        assert_eq!(record.oscar_wins, None);
        assert_eq!(record.genres, vec!["Action", "Drama"]);
    }

    #[test]
    fn test_missing_release_date() {
        let mut d = details();
        d.release_date = Some(String::new());
        assert!(record_from_details(d).is_none());
    }

    #[test]
    fn test_best_hit() {
        let hits = vec![
            SearchHit { id: 1, title: "Avatar: The Way of Water".into(), release_date: None },
            SearchHit { id: 19995, title: "Avatar".into(), release_date: Some("2009-12-15".into()) },
        ];
        assert_eq!(best_hit("avatar", &hits).unwrap().id, 19995);
        assert!(best_hit("Titanic", &hits).is_none());
    }
}

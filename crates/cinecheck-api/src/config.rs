//! Service configuration read from the environment (`.env` supported).
use anyhow::{bail, Context, Result};
use cinecheck_core::VerificationConfig;
use cinecheck_lookup::{OmdbConfig, TmdbConfig, WikidataConfig};
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use crate::generation::GeminiConfig;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8787";
pub const DEFAULT_CATALOG: &str = "catalog/movies.yaml";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub addr: String,
    pub verification: VerificationConfig,
    pub catalog_path: PathBuf,
    /// TMDb lookups are enabled only with a bearer token
    pub tmdb: Option<TmdbConfig>,
    /// OMDb lookups are enabled only with an API key
    pub omdb: Option<OmdbConfig>,
    /// On unless `CINECHECK_WIKIDATA` is false; the endpoint needs no key
    pub wikidata: Option<WikidataConfig>,
    /// `POST /generate` answers 503 without a key
    pub gemini: Option<GeminiConfig>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; empty values count as unset.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut verification = match var("CINECHECK_CONFIG") {
            Some(path) => VerificationConfig::load(&path)
                .with_context(|| format!("Failed to load verification config from {path}"))?,
            None => VerificationConfig::default(),
        };
        if let Some(limit) = parse(&var, "CINECHECK_CONCURRENCY")? {
            verification.concurrency_limit = limit;
        }
        if let Some(timeout_ms) = parse(&var, "CINECHECK_CLAIM_TIMEOUT_MS")? {
            verification.claim_timeout_ms = timeout_ms;
        }
        verification.validate()?;

        let tmdb = var("TMDB_BEARER_TOKEN").map(|token| {
            let config = TmdbConfig::new(token);
            match var("TMDB_BASE_URL") {
                Some(base_url) => config.with_base_url(base_url),
                None => config,
            }
        });
        if let Some(tmdb) = &tmdb {
            require_http("TMDB_BASE_URL", &tmdb.base_url)?;
        }

        let omdb = var("OMDB_API_KEY").map(|api_key| {
            let config = OmdbConfig::new(api_key);
            match var("OMDB_BASE_URL") {
                Some(base_url) => config.with_base_url(base_url),
                None => config,
            }
        });
        if let Some(omdb) = &omdb {
            require_http("OMDB_BASE_URL", &omdb.base_url)?;
        }

        let wikidata = if parse_flag(&var, "CINECHECK_WIKIDATA")?.unwrap_or(true) {
            let config = match var("WIKIDATA_ENDPOINT") {
                Some(endpoint) => WikidataConfig::default().with_endpoint(endpoint),
                None => WikidataConfig::default(),
            };
            require_http("WIKIDATA_ENDPOINT", &config.endpoint)?;
            Some(config)
        } else {
            None
        };

        let gemini = var("GEMINI_API_KEY").map(|api_key| {
            let config = GeminiConfig::new(api_key);
            match var("GEMINI_MODEL") {
                Some(model) => config.with_model(model),
                None => config,
            }
        });

        Ok(Self {
            addr: var("CINECHECK_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            verification,
            catalog_path: var("CINECHECK_CATALOG")
                .unwrap_or_else(|| DEFAULT_CATALOG.to_string())
                .into(),
            tmdb,
            omdb,
            wikidata,
            gemini,
        })
    }
}

fn require_http(key: &str, url: &str) -> Result<()> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        bail!("{key} must start with http:// or https://");
    }
    Ok(())
}

fn parse_flag(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<bool>> {
    match var(key).map(|v| v.to_lowercase()).as_deref() {
        Some("1" | "true" | "yes" | "on") => Ok(Some(true)),
        Some("0" | "false" | "no" | "off") => Ok(Some(false)),
        Some(other) => bail!("{key} must be true or false, got {other:?}"),
        None => Ok(None),
    }
}

fn parse<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match var(key) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{key} must be a number, got {raw:?}: {e}")),
        None => Ok(None),
    }
}

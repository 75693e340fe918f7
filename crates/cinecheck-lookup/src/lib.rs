//! Cinecheck-LOOKUP: reference knowledge for movie claims
//!
//! Every backend implements [`cinecheck_core::KnowledgeLookup`]:
//! - [`CatalogLookup`]: curated YAML catalog, fully offline
//! - [`TmdbLookup`]: The Movie Database HTTP API
//! - [`OmdbLookup`]: OMDb title lookups, the only live source of Oscar counts
//! - [`WikidataLookup`]: SPARQL award statements for "X won an Oscar for Y"
//! - [`FallbackLookup`]: several sources queried in order

pub mod catalog;
pub mod error;
pub mod fallback;
pub mod http;
pub mod omdb;
pub mod record;
pub mod tmdb;
pub mod wikidata;

pub use catalog::CatalogLookup;
pub use error::CatalogError;
pub use fallback::FallbackLookup;
pub use http::RetryPolicy;
pub use omdb::{OmdbConfig, OmdbLookup};
pub use record::{evidence_for, MovieRecord};
pub use tmdb::{TmdbConfig, TmdbLookup};
pub use wikidata::{WikidataConfig, WikidataLookup};

//! Cinecheck Core: data model, pipeline contracts, orchestrator and report
//!
//! Free text goes in, a report with one verdict per atomic claim comes out.
//! Extraction, knowledge lookup and verification are pluggable through the
//! traits in [`traits`]; [`VerificationOrchestrator`] wires them together.

pub mod config;
pub mod context;
pub mod data_model;
pub mod error;
pub mod report;
pub mod runner;
pub mod traits;

pub use config::{MatchThresholds, VerificationConfig};
pub use context::RequestContext;
pub use data_model::{
    Attribute, Claim, ClaimId, ConfidenceGrade, Evidence, Fact, Report, StatusCounts, Verdict,
    VerdictStatus,
};
pub use error::{ConfigError, ExtractionError, LookupError, PipelineError, VerifierError};
pub use report::{overall_confidence, ReportAggregator};
pub use runner::{Phase, VerificationOrchestrator};
pub use traits::{ClaimExtractor, ClaimVerifier, KnowledgeLookup};

/// Version of the verification engine
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

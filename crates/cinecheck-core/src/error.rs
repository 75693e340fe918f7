//! Unified Error Model
use thiserror::Error;

/// Raised by a claim extractor when the input cannot yield claims.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("EXTRACT/EMPTY: input text is empty")]
    EmptyInput,

    #[error("EXTRACT/NO_CLAIMS: no factual statements found")]
    NoFactualStatements,

    #[error("EXTRACT/UNAVAILABLE: {0}")]
    Unavailable(String),
}

/// Raised by a knowledge lookup for one claim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("LOOKUP/NOT_FOUND: {0}")]
    NotFound(String),

    #[error("LOOKUP/TIMEOUT: {0}")]
    Timeout(String),

    #[error("LOOKUP/UNAVAILABLE: {0}")]
    Unavailable(String),
}

/// Raised by a claim verifier while comparing a claim to evidence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifierError {
    #[error("VERIFY/MALFORMED: {source_ref}: {reason}")]
    MalformedEvidence { source_ref: String, reason: String },

    #[error("VERIFY/MATCHER: {0}")]
    Matcher(String),
}

/// Request-level failure of the orchestrator. Per-claim failures never
/// surface here; they become Error verdicts instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("PIPELINE/CANCELLED: request cancelled")]
    Cancelled,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("CONFIG/IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("CONFIG/PARSE: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("CONFIG/INVALID: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert!(ExtractionError::EmptyInput.to_string().starts_with("EXTRACT/EMPTY"));
        assert!(LookupError::Timeout("tmdb".into()).to_string().starts_with("LOOKUP/TIMEOUT"));
        let e: PipelineError = ExtractionError::NoFactualStatements.into();
        assert!(e.to_string().starts_with("EXTRACT/NO_CLAIMS"));
    }
}

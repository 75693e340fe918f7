//! Pipeline seams: extraction, lookup and verification contracts
use crate::data_model::{Claim, Evidence, Verdict};
use crate::error::{ExtractionError, LookupError, VerifierError};
use async_trait::async_trait;

/// Splits free text into ordered atomic claims.
///
/// Implementations must be pure: the same text always yields the same claims
/// with ids `0..n` in order of appearance.
pub trait ClaimExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Result<Vec<Claim>, ExtractionError>;
}

/// Retrieves reference evidence for a single claim.
///
/// Only reads from the knowledge source. An empty vector means the source
/// answered but knows nothing relevant.
#[async_trait]
pub trait KnowledgeLookup: Send + Sync {
    async fn lookup(&self, claim: &Claim) -> Result<Vec<Evidence>, LookupError>;
}

/// Judges one claim against its evidence.
#[async_trait]
pub trait ClaimVerifier: Send + Sync {
    /// Fallible comparison of a claim against evidence.
    async fn check(&self, claim: &Claim, evidence: &[Evidence]) -> Result<Verdict, VerifierError>;

    /// Always yields a verdict for the claim; internal failures become an
    /// Error verdict with the failure as explanation.
    async fn verify(&self, claim: &Claim, evidence: &[Evidence]) -> Verdict {
        match self.check(claim, evidence).await {
            Ok(verdict) => verdict,
            Err(e) => Verdict::error(claim, e.to_string()),
        }
    }
}

//! Ordered chain of lookups whose evidence is concatenated.

use async_trait::async_trait;
use cinecheck_core::{Claim, Evidence, KnowledgeLookup, LookupError};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct FallbackLookup {
    sources: Vec<Arc<dyn KnowledgeLookup>>,
}

impl FallbackLookup {
    pub fn new(sources: Vec<Arc<dyn KnowledgeLookup>>) -> Self {
        Self { sources }
    }

    pub fn push(&mut self, source: Arc<dyn KnowledgeLookup>) {
        self.sources.push(source);
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[async_trait]
impl KnowledgeLookup for FallbackLookup {
    /// Evidence from every source in order. `NotFound` only when all sources
    /// say so; when nothing answered, the first real failure is reported.
    async fn lookup(&self, claim: &Claim) -> Result<Vec<Evidence>, LookupError> {
        let mut evidence = Vec::new();
        let mut answered = false;
        let mut first_failure: Option<LookupError> = None;
        let mut first_not_found: Option<LookupError> = None;

        for (index, source) in self.sources.iter().enumerate() {
            match source.lookup(claim).await {
                Ok(found) => {
                    debug!(claim_id = claim.id, source = index, evidence = found.len(), "source answered");
                    answered = true;
                    evidence.extend(found);
                }
                Err(err @ LookupError::NotFound(_)) => {
                    first_not_found.get_or_insert(err);
                }
                Err(err) => {
                    warn!(claim_id = claim.id, source = index, error = %err, "source failed");
                    first_failure.get_or_insert(err);
                }
            }
        }

        if answered {
            return Ok(evidence);
        }
        Err(first_failure
            .or(first_not_found)
            .unwrap_or_else(|| LookupError::NotFound("no knowledge sources configured".into())))
    }
}

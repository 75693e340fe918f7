//! Verification Orchestrator: extract → concurrent lookup/verify → aggregate
//!
//! Claims are checked concurrently under a per-request concurrency limit and a
//! per-claim timeout. One claim failing never affects the others, and the
//! report keeps verdicts in claim order regardless of completion order.

use crate::config::VerificationConfig;
use crate::context::RequestContext;
use crate::data_model::{Claim, Report, Verdict};
use crate::error::{LookupError, PipelineError};
use crate::report::ReportAggregator;
use crate::traits::{ClaimExtractor, ClaimVerifier, KnowledgeLookup};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Lifecycle phase of one verification request, used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Extracting,
    Dispatching,
    Collecting,
    Aggregating,
    Done,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Phase::Extracting => "extracting",
            Phase::Dispatching => "dispatching",
            Phase::Collecting => "collecting",
            Phase::Aggregating => "aggregating",
            Phase::Done => "done",
            Phase::Failed => "failed",
        };
        f.write_str(s)
    }
}

pub struct VerificationOrchestrator {
    extractor: Arc<dyn ClaimExtractor>,
    lookup: Arc<dyn KnowledgeLookup>,
    verifier: Arc<dyn ClaimVerifier>,
    aggregator: ReportAggregator,
    config: VerificationConfig,
}

impl VerificationOrchestrator {
    pub fn new(
        extractor: Arc<dyn ClaimExtractor>,
        lookup: Arc<dyn KnowledgeLookup>,
        verifier: Arc<dyn ClaimVerifier>,
        config: VerificationConfig,
    ) -> Self {
        Self {
            extractor,
            lookup,
            verifier,
            aggregator: ReportAggregator::new(),
            config,
        }
    }

    pub fn with_aggregator(mut self, aggregator: ReportAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// Verify every claim of `text` under a fresh request context.
    pub async fn run_verification(&self, text: &str) -> Result<Report, PipelineError> {
        self.run_in(text, &RequestContext::new()).await
    }

    /// Verify every claim of `text`. Cancelling `ctx` aborts in-flight claim
    /// tasks and yields `PipelineError::Cancelled`; no partial report.
    pub async fn run_in(&self, text: &str, ctx: &RequestContext) -> Result<Report, PipelineError> {
        let started = Instant::now();
        let request_id = ctx.request_id;

        if ctx.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        debug!(%request_id, phase = %Phase::Extracting, chars = text.chars().count());
        let claims = match self.extractor.extract(text) {
            Ok(claims) => claims,
            Err(e) => {
                warn!(%request_id, phase = %Phase::Failed, error = %e, "extraction failed");
                return Err(e.into());
            }
        };

        info!(
            %request_id,
            phase = %Phase::Dispatching,
            claims = claims.len(),
            concurrency = self.config.concurrency_limit,
            "checking claims"
        );
        let verdicts = self.dispatch(&claims, ctx).await?;

        debug!(%request_id, phase = %Phase::Aggregating);
        let report = self.aggregator.aggregate(request_id, verdicts);

        info!(
            %request_id,
            phase = %Phase::Done,
            supported = report.counts.supported,
            contradicted = report.counts.contradicted,
            unverifiable = report.counts.unverifiable,
            errors = report.counts.error,
            confidence = report.overall_confidence,
            latency_ms = started.elapsed().as_millis() as u64,
            "verification finished"
        );
        Ok(report)
    }

    async fn dispatch(
        &self,
        claims: &[Claim],
        ctx: &RequestContext,
    ) -> Result<Vec<Verdict>, PipelineError> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency_limit.max(1)));
        let timeout = self.config.claim_timeout();
        let mut tasks = JoinSet::new();

        for (slot, claim) in claims.iter().cloned().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let lookup = Arc::clone(&self.lookup);
            let verifier = Arc::clone(&self.verifier);
            tasks.spawn(async move {
                // the timeout budget starts once the claim holds a permit
                let verdict = match semaphore.acquire_owned().await {
                    Ok(_permit) => check_claim(&claim, lookup, verifier, timeout).await,
                    Err(_) => Verdict::error(&claim, "concurrency limiter closed"),
                };
                (slot, verdict)
            });
        }

        debug!(request_id = %ctx.request_id, phase = %Phase::Collecting, tasks = tasks.len());
        let mut slots: Vec<Option<Verdict>> = vec![None; claims.len()];
        loop {
            tokio::select! {
                biased;
                _ = ctx.cancel.cancelled() => {
                    tasks.abort_all();
                    warn!(request_id = %ctx.request_id, phase = %Phase::Failed, "request cancelled");
                    return Err(PipelineError::Cancelled);
                }
                joined = tasks.join_next() => match joined {
                    Some(Ok((slot, verdict))) => slots[slot] = Some(verdict),
                    Some(Err(e)) => {
                        warn!(request_id = %ctx.request_id, error = %e, "claim task failed");
                    }
                    None => break,
                },
            }
        }

        // a panicked task leaves its slot empty
        Ok(slots
            .into_iter()
            .zip(claims)
            .map(|(verdict, claim)| {
                verdict.unwrap_or_else(|| Verdict::error(claim, "verification task failed"))
            })
            .collect())
    }
}

async fn check_claim(
    claim: &Claim,
    lookup: Arc<dyn KnowledgeLookup>,
    verifier: Arc<dyn ClaimVerifier>,
    timeout: Duration,
) -> Verdict {
    let started = Instant::now();
    let work = async {
        match lookup.lookup(claim).await {
            Ok(evidence) => verifier.verify(claim, &evidence).await,
            Err(LookupError::NotFound(what)) => {
                Verdict::unverifiable(claim, format!("no reference data: {}", what))
            }
            Err(e) => Verdict::error(claim, e.to_string()),
        }
    };

    let mut verdict = match tokio::time::timeout(timeout, work).await {
        Ok(verdict) => verdict,
        Err(_) => Verdict::error(
            claim,
            format!("verification timed out after {} ms", timeout.as_millis()),
        ),
    };
    // verdicts always describe the claim they were produced for
    verdict.claim_id = claim.id;
    verdict.claim.clone_from(&claim.text);

    debug!(
        claim_id = claim.id,
        status = %verdict.status,
        confidence = verdict.confidence,
        latency_ms = started.elapsed().as_millis() as u64,
        "claim checked"
    );
    verdict
}

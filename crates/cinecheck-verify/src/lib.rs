//! Cinecheck-VERIFY: resolve a claim plus its evidence into a verdict
//!
//! Attribute claims are scored against evidence facts of the same attribute;
//! the best agreement decides between Supported, Contradicted and an
//! inconclusive Unverifiable. Freeform claims can only be confirmed by
//! excerpt overlap, never contradicted.
//!
//! Person-award claims need the person in a source's winner list. A list
//! that omits the person is not proof against the claim; only a source
//! stating the film won nothing contradicts it.

pub mod matcher;

use async_trait::async_trait;
use cinecheck_core::{
    Attribute, Claim, ClaimVerifier, Evidence, MatchThresholds, Verdict, VerifierError,
};
use cinecheck_in::{parse_claim, ClaimShape, ClaimValue};
use matcher::{agreement, token_overlap};
use tracing::debug;

/// Deterministic verifier driven by [`MatchThresholds`].
#[derive(Debug, Clone, Default)]
pub struct EvidenceVerifier {
    thresholds: MatchThresholds,
}

impl EvidenceVerifier {
    pub fn new(thresholds: MatchThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &MatchThresholds {
        &self.thresholds
    }

    /// Synchronous core of [`ClaimVerifier::check`].
    pub fn judge(&self, claim: &Claim, evidence: &[Evidence]) -> Result<Verdict, VerifierError> {
        if evidence.is_empty() {
            return Ok(Verdict::unverifiable(claim, "no evidence found for this claim"));
        }
        match parse_claim(&claim.text) {
            ClaimShape::Movie {
                movie,
                attribute,
                value,
                ..
            } if attribute == Attribute::OscarWinners => self.judge_award(claim, &movie, &value, evidence),
            ClaimShape::Movie {
                movie,
                attribute,
                value,
                ..
            } => self.judge_attribute(claim, &movie, attribute, &value, evidence),
            ClaimShape::Freeform => Ok(self.judge_freeform(claim, evidence)),
        }
    }

    fn judge_attribute(
        &self,
        claim: &Claim,
        movie: &str,
        attribute: Attribute,
        value: &ClaimValue,
        evidence: &[Evidence],
    ) -> Result<Verdict, VerifierError> {
        let mut best: Option<(f64, &Evidence)> = None;
        for item in evidence {
            let Some(fact) = item.fact.as_ref().filter(|f| f.attribute == attribute) else {
                continue;
            };
            let score = agreement(value, fact, &item.source_ref, &self.thresholds)?;
            debug!(claim_id = claim.id, source = %item.source_ref, score, "evidence scored");
            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, item));
            }
        }

        let Some((score, item)) = best else {
            return Ok(Verdict::unverifiable(
                claim,
                format!("evidence does not address the {} of {}", attribute, movie),
            ));
        };

        if score >= self.thresholds.acceptance_threshold {
            return Ok(Verdict::supported(
                claim,
                score,
                format!("supported by {}: {}", item.source_ref, item.excerpt),
            ));
        }
        let contradiction = 1.0 - score;
        if contradiction >= self.thresholds.contradiction_threshold {
            return Ok(Verdict::contradicted(
                claim,
                contradiction,
                format!("contradicted by {}: {}", item.source_ref, item.excerpt),
            ));
        }
        Ok(Verdict::unverifiable(
            claim,
            format!(
                "inconclusive: closest {} evidence from {} scored {:.2}",
                attribute, item.source_ref, score
            ),
        ))
    }

    fn judge_award(
        &self,
        claim: &Claim,
        movie: &str,
        value: &ClaimValue,
        evidence: &[Evidence],
    ) -> Result<Verdict, VerifierError> {
        let mut best: Option<(f64, &Evidence)> = None;
        let mut no_wins: Option<&Evidence> = None;
        for item in evidence {
            let Some(fact) = item.fact.as_ref().filter(|f| f.attribute == Attribute::OscarWinners) else {
                continue;
            };
            // an empty winner list means the source records no wins at all
            if fact.values.is_empty() {
                no_wins.get_or_insert(item);
                continue;
            }
            let score = agreement(value, fact, &item.source_ref, &self.thresholds)?;
            debug!(claim_id = claim.id, source = %item.source_ref, score, "award evidence scored");
            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, item));
            }
        }

        if let Some((score, item)) = best.filter(|(s, _)| *s >= self.thresholds.acceptance_threshold) {
            return Ok(Verdict::supported(
                claim,
                score,
                format!("supported by {}: {}", item.source_ref, item.excerpt),
            ));
        }
        if let Some(item) = no_wins {
            return Ok(Verdict::contradicted(
                claim,
                1.0,
                format!("contradicted by {}: {}", item.source_ref, item.excerpt),
            ));
        }
        let person = match value {
            ClaimValue::Names(names) => names.join(", "),
            _ => "this person".to_string(),
        };
        let reason = match best {
            Some((_, item)) => format!(
                "inconclusive: {} does not list {} among the Oscar winners of {}",
                item.source_ref, person, movie
            ),
            None => format!("no evidence of an Academy Award for {} for {}", person, movie),
        };
        Ok(Verdict::unverifiable(claim, reason))
    }

    fn judge_freeform(&self, claim: &Claim, evidence: &[Evidence]) -> Verdict {
        let best = evidence
            .iter()
            .map(|e| (token_overlap(&claim.text, &e.excerpt), e))
            .max_by(|a, b| a.0.total_cmp(&b.0));

        match best {
            Some((score, item)) if score >= self.thresholds.acceptance_threshold => Verdict::supported(
                claim,
                score,
                format!("supported by {}: {}", item.source_ref, item.excerpt),
            ),
            _ => Verdict::unverifiable(claim, "evidence does not confirm this statement"),
        }
    }
}

#[async_trait]
impl ClaimVerifier for EvidenceVerifier {
    async fn check(&self, claim: &Claim, evidence: &[Evidence]) -> Result<Verdict, VerifierError> {
        self.judge(claim, evidence)
    }
}

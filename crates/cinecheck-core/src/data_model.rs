//! Data Model: Claim, Evidence, Verdict, Report
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Sequence index of a claim inside one verification request.
pub type ClaimId = usize;

/// An atomic, independently checkable factual statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: ClaimId,
    /// Canonical claim text (subject resolved, no trailing punctuation)
    pub text: String,
    /// Character offset of the clause in the source text
    pub position: usize,
}

impl Claim {
    pub fn new(id: ClaimId, text: impl Into<String>, position: usize) -> Self {
        Self {
            id,
            text: text.into(),
            position,
        }
    }
}

/// Movie attribute a claim can be about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Director,
    Cast,
    ReleaseYear,
    OscarWins,
    /// People credited with an Academy Award for the film
    OscarWinners,
    BoxOffice,
    Runtime,
    Genre,
}

impl Attribute {
    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Director => "director",
            Attribute::Cast => "cast",
            Attribute::ReleaseYear => "release year",
            Attribute::OscarWins => "Oscar wins",
            Attribute::OscarWinners => "Oscar winners",
            Attribute::BoxOffice => "box office",
            Attribute::Runtime => "runtime",
            Attribute::Genre => "genre",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Structured value attached to a piece of evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub attribute: Attribute,
    pub values: Vec<String>,
}

/// Reference material retrieved for one claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub claim_id: ClaimId,
    /// Opaque source identifier (ex: "catalog:titanic-1997", "tmdb:movie/597")
    pub source_ref: String,
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fact: Option<Fact>,
    pub retrieved_at: DateTime<Utc>,
}

impl Evidence {
    pub fn new(claim_id: ClaimId, source_ref: impl Into<String>, excerpt: impl Into<String>) -> Self {
        Self {
            claim_id,
            source_ref: source_ref.into(),
            excerpt: excerpt.into(),
            fact: None,
            retrieved_at: Utc::now(),
        }
    }

    pub fn with_fact(mut self, attribute: Attribute, values: Vec<String>) -> Self {
        self.fact = Some(Fact { attribute, values });
        self
    }
}

/// Outcome category of checking one claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerdictStatus {
    Supported,
    Contradicted,
    Unverifiable,
    Error,
}

impl VerdictStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictStatus::Supported => "Supported",
            VerdictStatus::Contradicted => "Contradicted",
            VerdictStatus::Unverifiable => "Unverifiable",
            VerdictStatus::Error => "Error",
        }
    }
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The checked outcome for exactly one claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub claim_id: ClaimId,
    /// Text of the claim this verdict belongs to
    pub claim: String,
    pub status: VerdictStatus,
    /// Always within [0, 1]
    pub confidence: f64,
    pub explanation: String,
}

impl Verdict {
    pub fn new(
        claim: &Claim,
        status: VerdictStatus,
        confidence: f64,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            claim_id: claim.id,
            claim: claim.text.clone(),
            status,
            confidence: clamp_unit(confidence),
            explanation: explanation.into(),
        }
    }

    pub fn supported(claim: &Claim, confidence: f64, explanation: impl Into<String>) -> Self {
        Self::new(claim, VerdictStatus::Supported, confidence, explanation)
    }

    pub fn contradicted(claim: &Claim, confidence: f64, explanation: impl Into<String>) -> Self {
        Self::new(claim, VerdictStatus::Contradicted, confidence, explanation)
    }

    /// Unverifiable verdicts always carry zero confidence.
    pub fn unverifiable(claim: &Claim, explanation: impl Into<String>) -> Self {
        Self::new(claim, VerdictStatus::Unverifiable, 0.0, explanation)
    }

    /// Error verdicts always carry zero confidence.
    pub fn error(claim: &Claim, explanation: impl Into<String>) -> Self {
        Self::new(claim, VerdictStatus::Error, 0.0, explanation)
    }

    /// Supported and Contradicted verdicts count towards overall confidence.
    pub fn is_decisive(&self) -> bool {
        matches!(
            self.status,
            VerdictStatus::Supported | VerdictStatus::Contradicted
        )
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Number of verdicts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub supported: usize,
    pub contradicted: usize,
    pub unverifiable: usize,
    pub error: usize,
}

impl StatusCounts {
    pub fn from_verdicts(verdicts: &[Verdict]) -> Self {
        let mut counts = Self::default();
        for v in verdicts {
            match v.status {
                VerdictStatus::Supported => counts.supported += 1,
                VerdictStatus::Contradicted => counts.contradicted += 1,
                VerdictStatus::Unverifiable => counts.unverifiable += 1,
                VerdictStatus::Error => counts.error += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.supported + self.contradicted + self.unverifiable + self.error
    }
}

/// Coarse bucket for the overall confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceGrade {
    High,
    Medium,
    Low,
    None,
}

impl ConfidenceGrade {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.8 {
            ConfidenceGrade::High
        } else if confidence >= 0.5 {
            ConfidenceGrade::Medium
        } else if confidence > 0.0 {
            ConfidenceGrade::Low
        } else {
            ConfidenceGrade::None
        }
    }
}

/// Aggregate result of verifying every claim of one input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub request_id: Uuid,
    /// Same order as the extracted claims
    pub verdicts: Vec<Verdict>,
    pub summary: String,
    pub overall_confidence: f64,
    pub grade: ConfidenceGrade,
    pub counts: StatusCounts,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_is_clamped() {
        let claim = Claim::new(0, "Titanic was released in 1997", 0);
        assert_eq!(Verdict::supported(&claim, 1.4, "ok").confidence, 1.0);
        assert_eq!(Verdict::contradicted(&claim, -0.2, "no").confidence, 0.0);
        assert_eq!(Verdict::supported(&claim, f64::NAN, "nan").confidence, 0.0);
    }

    #[test]
    fn test_unverifiable_and_error_have_zero_confidence() {
        let claim = Claim::new(3, "It won an Oscar", 10);
        let v = Verdict::unverifiable(&claim, "no evidence");
        assert_eq!(v.confidence, 0.0);
        assert_eq!(v.claim_id, 3);
        assert!(!v.is_decisive());
        assert_eq!(Verdict::error(&claim, "boom").confidence, 0.0);
    }

    #[test]
    fn test_verdict_wire_shape() {
        let claim = Claim::new(1, "Inception was directed by Christopher Nolan", 12);
        let v = Verdict::supported(&claim, 0.95, "listed as director");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["claimId"], 1);
        assert_eq!(json["status"], "Supported");
        assert_eq!(json["claim"], "Inception was directed by Christopher Nolan");
    }

    #[test]
    fn test_status_counts() {
        let claim = Claim::new(0, "x y z", 0);
        let verdicts = vec![
            Verdict::supported(&claim, 0.9, ""),
            Verdict::supported(&claim, 0.9, ""),
            Verdict::unverifiable(&claim, ""),
            Verdict::error(&claim, ""),
        ];
        let counts = StatusCounts::from_verdicts(&verdicts);
        assert_eq!(counts.supported, 2);
        assert_eq!(counts.contradicted, 0);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_grades() {
        assert_eq!(ConfidenceGrade::from_confidence(0.92), ConfidenceGrade::High);
        assert_eq!(ConfidenceGrade::from_confidence(0.6), ConfidenceGrade::Medium);
        assert_eq!(ConfidenceGrade::from_confidence(0.1), ConfidenceGrade::Low);
        assert_eq!(ConfidenceGrade::from_confidence(0.0), ConfidenceGrade::None);
    }
}

//! Report Aggregation: verdicts → overall confidence + rendered summary
//!
//! Aggregation is pure. The same verdicts always produce the same summary,
//! counts and overall confidence.

use crate::data_model::{ConfidenceGrade, Report, StatusCounts, Verdict, VerdictStatus};
use chrono::Utc;
use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
};
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

const SUMMARY_TEMPLATE: &str = "{{#if total}}{{total}} claim(s) checked: \
{{supported}} supported, {{contradicted}} contradicted, {{unverifiable}} unverifiable, \
{{error}} failed. Overall confidence {{percent confidence}} ({{grade}}).\
{{#each contradicted_claims}} Contradicted: \"{{claim}}\" ({{explanation}}).{{/each}}\
{{else}}No claims were checked.{{/if}}";

pub struct ReportAggregator {
    handlebars: Handlebars<'static>,
}

impl ReportAggregator {
    pub fn new() -> Self {
        Self::with_template(SUMMARY_TEMPLATE)
    }

    /// Use a custom summary template. Falls back to a plain counts line when
    /// the template fails to render.
    pub fn with_template(template: &str) -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("percent", Box::new(PercentHelper));
        if let Err(e) = handlebars.register_template_string("summary", template) {
            warn!(error = %e, "summary template rejected");
        }
        Self { handlebars }
    }

    pub fn aggregate(&self, request_id: Uuid, verdicts: Vec<Verdict>) -> Report {
        let counts = StatusCounts::from_verdicts(&verdicts);
        let overall_confidence = overall_confidence(&verdicts);
        let grade = ConfidenceGrade::from_confidence(overall_confidence);
        let summary = self.summarize(&verdicts, &counts, overall_confidence, grade);

        Report {
            request_id,
            verdicts,
            summary,
            overall_confidence,
            grade,
            counts,
            generated_at: Utc::now(),
        }
    }

    fn summarize(
        &self,
        verdicts: &[Verdict],
        counts: &StatusCounts,
        confidence: f64,
        grade: ConfidenceGrade,
    ) -> String {
        let contradicted_claims: Vec<_> = verdicts
            .iter()
            .filter(|v| v.status == VerdictStatus::Contradicted)
            .map(|v| json!({ "claim": v.claim, "explanation": v.explanation }))
            .collect();

        let data = json!({
            "total": counts.total(),
            "supported": counts.supported,
            "contradicted": counts.contradicted,
            "unverifiable": counts.unverifiable,
            "error": counts.error,
            "confidence": confidence,
            "grade": format!("{:?}", grade),
            "contradicted_claims": contradicted_claims,
        });

        match self.handlebars.render("summary", &data) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "summary render failed, using plain summary");
                format!(
                    "{} claim(s) checked: {} supported, {} contradicted, {} unverifiable, {} failed.",
                    counts.total(),
                    counts.supported,
                    counts.contradicted,
                    counts.unverifiable,
                    counts.error
                )
            }
        }
    }
}

impl Default for ReportAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Mean confidence of Supported and Contradicted verdicts, 0.0 when there
/// are none.
pub fn overall_confidence(verdicts: &[Verdict]) -> f64 {
    let decisive: Vec<f64> = verdicts
        .iter()
        .filter(|v| v.is_decisive())
        .map(|v| v.confidence)
        .collect();
    if decisive.is_empty() {
        return 0.0;
    }
    decisive.iter().sum::<f64>() / decisive.len() as f64
}

/// Format a number as a percentage (0.85 -> "85%")
struct PercentHelper;

impl HelperDef for PercentHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let value = h.param(0).and_then(|v| v.value().as_f64()).unwrap_or(0.0);
        out.write(&format!("{}%", (value * 100.0).round() as i64))?;
        Ok(())
    }
}

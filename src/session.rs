// =============================================================================
// Session Record — one journal row per logged checklist session
// =============================================================================
//
// Assembles the verdict, reasons, and user-supplied metadata into the flat
// record persisted by the journal. Field order matches the journal's column
// order; the CSV header is derived from the serde field names.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::anchors::AnchorInfo;
use crate::checklist::Evaluation;
use crate::types::{EntryDecision, FlowPhase};

/// Risk size bounds in R. Out-of-range input is clamped, never rejected.
pub const MIN_RISK_R: f64 = 0.0;
pub const MAX_RISK_R: f64 = 10.0;

/// Separator used to flatten the reason log into a single journal field.
const REASON_SEPARATOR: &str = " | ";

/// One logged checklist session. Created on explicit user action, persisted
/// immediately, then discarded — it has no further lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Wall-clock creation time, `%Y-%m-%d %H:%M:%S`.
    pub timestamp: String,
    /// Trade date as entered on the form, `%Y-%m-%d`.
    pub date: String,
    pub asset: String,
    pub macro_anchor: String,
    pub val_anchor: String,
    pub flow_phase: FlowPhase,
    pub final_decision: EntryDecision,
    /// Reason log joined with `" | "`.
    pub reasons: String,
    #[serde(rename = "risk_R")]
    pub risk_r: f64,
    pub notes: String,
}

impl SessionRecord {
    /// Build a journal row from a finished evaluation and form metadata.
    ///
    /// `risk_r` is clamped to `[MIN_RISK_R, MAX_RISK_R]`; everything else is
    /// taken as-is (the form layer guarantees field presence).
    pub fn build(
        asset: impl Into<String>,
        anchors: AnchorInfo,
        flow_phase: FlowPhase,
        evaluation: &Evaluation,
        date: NaiveDate,
        risk_r: f64,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            date: date.format("%Y-%m-%d").to_string(),
            asset: asset.into(),
            macro_anchor: anchors.macro_anchor.to_string(),
            val_anchor: anchors.val_anchor.to_string(),
            flow_phase,
            final_decision: evaluation.decision,
            reasons: evaluation.reasons.join(REASON_SEPARATOR),
            risk_r: risk_r.clamp(MIN_RISK_R, MAX_RISK_R),
            notes: notes.into(),
        }
    }
}

// =============================================================================
// Checklist Module — decision-tree evaluation
// =============================================================================
//
// Three independent branch procedures (Pro Flow, Counter Flow, Ranging
// Market), each consuming the complete ordered answer set for its flow phase
// and producing a terminal verdict plus an ordered reason log.
//
// Shared edge-case policy: **first invalidation wins**. As soon as any gate
// fails the verdict locks to Trade Not Valid and no later gate may overwrite
// it, but unconditional reason-producing steps still append to the log after
// the lock (e.g. the Counter Flow "next HQ zone" note).
//
// Everything here is pure, total, deterministic computation over enumerated
// inputs — no I/O, no failure modes.

pub mod counter_flow;
pub mod pro_flow;
pub mod ranging;

pub use counter_flow::CounterFlowAnswers;
pub use pro_flow::ProFlowAnswers;
pub use ranging::RangingAnswers;

use serde::{Deserialize, Serialize};

use crate::types::{EntryDecision, FlowPhase};

// =============================================================================
// Answer set
// =============================================================================

/// Complete answer set for one checklist session, tagged by flow phase.
///
/// The wire format nests the branch answers under the flow phase tag, so a
/// request can only ever carry the answers its branch actually asks:
///
/// ```json
/// { "flow_phase": "Pro Flow", "answers": { "trending_internally": "Yes", ... } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "flow_phase", content = "answers")]
pub enum ChecklistAnswers {
    #[serde(rename = "Pro Flow")]
    ProFlow(ProFlowAnswers),
    #[serde(rename = "Counter Flow")]
    CounterFlow(CounterFlowAnswers),
    #[serde(rename = "Ranging Market")]
    RangingMarket(RangingAnswers),
}

impl ChecklistAnswers {
    pub fn flow_phase(&self) -> FlowPhase {
        match self {
            Self::ProFlow(_) => FlowPhase::ProFlow,
            Self::CounterFlow(_) => FlowPhase::CounterFlow,
            Self::RangingMarket(_) => FlowPhase::RangingMarket,
        }
    }
}

// =============================================================================
// Evaluation result
// =============================================================================

/// Outcome of running one branch: the settled verdict and the ordered,
/// append-only reason log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub decision: EntryDecision,
    pub reasons: Vec<String>,
}

/// Run the branch matching the answer set's flow phase.
pub fn evaluate(answers: &ChecklistAnswers) -> Evaluation {
    match answers {
        ChecklistAnswers::ProFlow(a) => pro_flow::evaluate(a),
        ChecklistAnswers::CounterFlow(a) => counter_flow::evaluate(a),
        ChecklistAnswers::RangingMarket(a) => ranging::evaluate(a),
    }
}

// =============================================================================
// Branch accumulator
// =============================================================================

/// Mutable state threaded through a branch's ordered gates.
///
/// The verdict slot starts empty and is write-once for invalidations: the
/// first failed gate locks it to Trade Not Valid and later `invalidate` calls
/// become no-ops. `note` appends regardless of the lock.
pub(crate) struct BranchRun {
    decision: Option<EntryDecision>,
    reasons: Vec<String>,
}

impl BranchRun {
    pub(crate) fn new() -> Self {
        Self {
            decision: None,
            reasons: Vec::new(),
        }
    }

    /// Whether no verdict has been locked in yet.
    pub(crate) fn is_open(&self) -> bool {
        self.decision.is_none()
    }

    /// Fail the session. First invalidation wins: a no-op once any verdict
    /// is set, including the reason.
    pub(crate) fn invalidate(&mut self, reason: &str) {
        if self.decision.is_none() {
            self.decision = Some(EntryDecision::NotValid);
            self.reasons.push(reason.to_string());
        }
    }

    /// Append a reason without touching the verdict. Runs regardless of any
    /// earlier lock.
    pub(crate) fn note(&mut self, reason: &str) {
        self.reasons.push(reason.to_string());
    }

    /// Settle the final entry style. Only meaningful while the run is open.
    pub(crate) fn settle(&mut self, decision: EntryDecision) {
        if self.decision.is_none() {
            self.decision = Some(decision);
        }
    }

    /// The verdict as it stands right now.
    pub(crate) fn decision(&self) -> Option<EntryDecision> {
        self.decision
    }

    pub(crate) fn finish(self) -> Evaluation {
        Evaluation {
            // Every branch settles before finishing; the fallback only guards
            // against a future branch that forgets to.
            decision: self.decision.unwrap_or(EntryDecision::NotValid),
            reasons: self.reasons,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Answer, ZoneFormation};

    #[test]
    fn branch_run_first_invalidation_wins() {
        let mut run = BranchRun::new();
        run.invalidate("first failure");
        run.invalidate("second failure");
        run.settle(EntryDecision::Proximal);
        let eval = run.finish();
        assert_eq!(eval.decision, EntryDecision::NotValid);
        assert_eq!(eval.reasons, vec!["first failure"]);
    }

    #[test]
    fn branch_run_notes_append_after_lock() {
        let mut run = BranchRun::new();
        run.invalidate("gate failed");
        run.note("informational note");
        let eval = run.finish();
        assert_eq!(eval.decision, EntryDecision::NotValid);
        assert_eq!(eval.reasons, vec!["gate failed", "informational note"]);
    }

    #[test]
    fn dispatch_runs_matching_branch() {
        let answers = ChecklistAnswers::ProFlow(ProFlowAnswers {
            trending_internally: Answer::Yes,
            zone_has_intention: Answer::Yes,
            formation: ZoneFormation::CleanNoWick,
            traps_nearby: Answer::No,
        });
        assert_eq!(answers.flow_phase(), FlowPhase::ProFlow);
        let eval = evaluate(&answers);
        assert_eq!(eval.decision, EntryDecision::Proximal);
    }

    #[test]
    fn answers_deserialize_from_tagged_json() {
        let json = r#"{
            "flow_phase": "Pro Flow",
            "answers": {
                "trending_internally": "Yes",
                "zone_has_intention": "Yes",
                "formation": "clean_no_wick",
                "traps_nearby": "No"
            }
        }"#;
        let answers: ChecklistAnswers = serde_json::from_str(json).unwrap();
        assert_eq!(answers.flow_phase(), FlowPhase::ProFlow);
        assert_eq!(evaluate(&answers).decision, EntryDecision::Proximal);
    }

    #[test]
    fn answers_reject_mismatched_branch_payload() {
        // Ranging Market payload under a Pro Flow tag must not parse.
        let json = r#"{
            "flow_phase": "Pro Flow",
            "answers": {
                "contained_range": "Yes",
                "valuation_signal_active": "Yes",
                "zone_at_extremity": "Yes",
                "inducement_present": "Yes",
                "traps_around_zone": "No",
                "formation": "clean_no_wick",
                "caused_intent_in_range": "Yes"
            }
        }"#;
        assert!(serde_json::from_str::<ChecklistAnswers>(json).is_err());
    }
}

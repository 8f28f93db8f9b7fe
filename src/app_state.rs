// =============================================================================
// Central Application State — Horizon Decision Engine
// =============================================================================
//
// The single source of truth for the running engine. The REST surface holds
// an `Arc<AppState>`; every meaningful mutation bumps the version counter so
// the dashboard can detect fresh data with a single cheap poll.
//
// Thread safety:
//   - Atomic counter for lock-free version tracking.
//   - parking_lot::RwLock for the mutable collections.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use serde::Serialize;

use crate::checklist::Evaluation;
use crate::journal::{DecisionJournal, JournalStats};
use crate::runtime_config::RuntimeConfig;
use crate::types::{EntryDecision, FlowPhase};

/// Maximum number of recent errors to retain.
const MAX_RECENT_ERRORS: usize = 50;
/// Maximum number of recent evaluations to retain.
const MAX_RECENT_EVALUATIONS: usize = 100;

// =============================================================================
// Audit records
// =============================================================================

/// A recorded error event for the dashboard error log.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorRecord {
    pub message: String,
    /// ISO 8601 timestamp.
    pub at: String,
}

/// One finished evaluation in the audit ring.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRecord {
    /// Unique identifier for this evaluation (UUID v4).
    pub id: String,
    pub asset: String,
    pub flow_phase: FlowPhase,
    pub final_decision: EntryDecision,
    pub reasons: Vec<String>,
    /// ISO 8601 timestamp.
    pub created_at: String,
}

// =============================================================================
// AppState
// =============================================================================

/// Central application state shared across handlers via `Arc<AppState>`.
pub struct AppState {
    /// Monotonically increasing version counter, bumped on every meaningful
    /// state mutation.
    pub state_version: AtomicU64,

    pub runtime_config: Arc<RwLock<RuntimeConfig>>,

    /// The persisted decision journal.
    pub journal: DecisionJournal,

    /// Ring buffer of recent evaluations (newest last).
    pub recent_evaluations: RwLock<Vec<EvaluationRecord>>,

    /// Ring buffer of recent errors (newest last).
    pub recent_errors: RwLock<Vec<ErrorRecord>>,

    /// Instant when the engine was started. Used for uptime calculations.
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Construct a new `AppState` from the given runtime configuration. The
    /// returned value is typically wrapped in `Arc` immediately.
    pub fn new(config: RuntimeConfig) -> Self {
        let journal = DecisionJournal::new(config.journal_path.clone());

        Self {
            state_version: AtomicU64::new(1),
            runtime_config: Arc::new(RwLock::new(config)),
            journal,
            recent_evaluations: RwLock::new(Vec::new()),
            recent_errors: RwLock::new(Vec::new()),
            start_time: std::time::Instant::now(),
        }
    }

    // ── Version Management ──────────────────────────────────────────────

    pub fn increment_version(&self) -> u64 {
        self.state_version.fetch_add(1, Ordering::SeqCst)
    }

    pub fn current_state_version(&self) -> u64 {
        self.state_version.load(Ordering::SeqCst)
    }

    // ── Error Logging ───────────────────────────────────────────────────

    /// Record an error message. The ring buffer is capped at
    /// [`MAX_RECENT_ERRORS`]; oldest entries are evicted first.
    pub fn push_error(&self, msg: String) {
        let record = ErrorRecord {
            message: msg,
            at: Utc::now().to_rfc3339(),
        };

        let mut errors = self.recent_errors.write();
        errors.push(record);
        while errors.len() > MAX_RECENT_ERRORS {
            errors.remove(0);
        }

        self.increment_version();
    }

    // ── Evaluation Audit ────────────────────────────────────────────────

    /// Record a finished evaluation in the audit ring and return the stored
    /// record (the caller echoes its id back to the client).
    pub fn push_evaluation(
        &self,
        asset: &str,
        flow_phase: FlowPhase,
        evaluation: &Evaluation,
    ) -> EvaluationRecord {
        let record = EvaluationRecord {
            id: uuid::Uuid::new_v4().to_string(),
            asset: asset.to_string(),
            flow_phase,
            final_decision: evaluation.decision,
            reasons: evaluation.reasons.clone(),
            created_at: Utc::now().to_rfc3339(),
        };

        let mut evaluations = self.recent_evaluations.write();
        evaluations.push(record.clone());
        while evaluations.len() > MAX_RECENT_EVALUATIONS {
            evaluations.remove(0);
        }
        drop(evaluations);

        self.increment_version();
        record
    }

    // ── Snapshot Builder ────────────────────────────────────────────────

    /// Build a complete, serialisable snapshot of the engine state for the
    /// dashboard's `GET /api/v1/state` endpoint.
    pub fn build_snapshot(&self) -> StateSnapshot {
        let config = self.runtime_config.read();

        // Journal stats are best-effort: an unreadable journal degrades to
        // no stats rather than failing the snapshot.
        let journal_stats = self.journal.stats().ok();

        StateSnapshot {
            state_version: self.current_state_version(),
            server_time: Utc::now().timestamp_millis(),
            uptime_secs: self.start_time.elapsed().as_secs(),
            runtime_config: RuntimeConfigSummary {
                journal_path: config.journal_path.display().to_string(),
                default_risk_r: config.default_risk_r,
            },
            recent_evaluations: self.recent_evaluations.read().clone(),
            recent_errors: self.recent_errors.read().clone(),
            journal_stats,
        }
    }
}

// =============================================================================
// Serialisable snapshot types
// =============================================================================

/// Full engine state snapshot sent to the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub state_version: u64,
    pub server_time: i64,
    pub uptime_secs: u64,
    pub runtime_config: RuntimeConfigSummary,
    pub recent_evaluations: Vec<EvaluationRecord>,
    pub recent_errors: Vec<ErrorRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal_stats: Option<JournalStats>,
}

/// Summary of runtime config for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeConfigSummary {
    pub journal_path: String,
    pub default_risk_r: f64,
}

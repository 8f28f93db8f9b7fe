// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/`. The health endpoint is public; every
// other endpoint requires a valid Bearer token checked via the `AuthBearer`
// extractor.
//
// CORS is configured permissively for development; tighten `allowed_origins`
// in production.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::anchors;
use crate::api::auth::AuthBearer;
use crate::app_state::AppState;
use crate::checklist::{self, ChecklistAnswers};
use crate::session::SessionRecord;
use crate::types::{EntryDecision, FlowPhase};

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ── Public ──────────────────────────────────────────────────
        .route("/api/v1/health", get(health))
        // ── Authenticated ───────────────────────────────────────────
        .route("/api/v1/assets", get(list_assets))
        .route("/api/v1/assets/:name", get(asset_anchors))
        .route("/api/v1/evaluate", post(evaluate))
        .route("/api/v1/journal", post(log_session))
        .route("/api/v1/journal", get(read_journal))
        .route("/api/v1/journal/stats", get(journal_stats))
        .route("/api/v1/evaluations", get(recent_evaluations))
        .route("/api/v1/state", get(full_state))
        // ── Middleware & State ──────────────────────────────────────
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Health (public)
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    state_version: u64,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let resp = HealthResponse {
        status: "ok",
        state_version: state.current_state_version(),
        server_time: Utc::now().timestamp_millis(),
    };
    Json(resp)
}

// =============================================================================
// Assets (authenticated)
// =============================================================================

#[derive(Serialize)]
struct AssetEntry {
    name: &'static str,
    macro_anchor: &'static str,
    val_anchor: &'static str,
}

async fn list_assets(_auth: AuthBearer) -> impl IntoResponse {
    let assets: Vec<AssetEntry> = anchors::asset_names()
        .into_iter()
        .map(|name| {
            let info = anchors::lookup(name);
            AssetEntry {
                name,
                macro_anchor: info.macro_anchor,
                val_anchor: info.val_anchor,
            }
        })
        .collect();
    Json(assets)
}

/// Anchors for a single asset. Total: unknown assets get the placeholder
/// anchors, not a 404, matching the registry contract.
async fn asset_anchors(_auth: AuthBearer, Path(name): Path<String>) -> impl IntoResponse {
    let info = anchors::lookup(&name);
    Json(serde_json::json!({
        "name": name,
        "macro_anchor": info.macro_anchor,
        "val_anchor": info.val_anchor,
    }))
}

// =============================================================================
// Evaluate (authenticated)
// =============================================================================

/// A complete checklist submission: the asset plus the flow-phase-tagged
/// answer set.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateRequest {
    pub asset: String,
    #[serde(flatten)]
    pub answers: ChecklistAnswers,
}

#[derive(Serialize)]
struct EvaluateResponse {
    id: String,
    asset: String,
    macro_anchor: &'static str,
    val_anchor: &'static str,
    flow_phase: FlowPhase,
    final_decision: EntryDecision,
    reasons: Vec<String>,
}

async fn evaluate(
    _auth: AuthBearer,
    State(state): State<Arc<AppState>>,
    Json(request): Json<EvaluateRequest>,
) -> impl IntoResponse {
    let flow_phase = request.answers.flow_phase();
    let evaluation = checklist::evaluate(&request.answers);
    let info = anchors::lookup(&request.asset);

    let record = state.push_evaluation(&request.asset, flow_phase, &evaluation);

    info!(
        asset = %request.asset,
        flow_phase = %flow_phase,
        decision = %evaluation.decision,
        "checklist evaluated"
    );

    Json(EvaluateResponse {
        id: record.id,
        asset: request.asset,
        macro_anchor: info.macro_anchor,
        val_anchor: info.val_anchor,
        flow_phase,
        final_decision: evaluation.decision,
        reasons: evaluation.reasons,
    })
}

// =============================================================================
// Journal (authenticated)
// =============================================================================

/// An evaluate submission plus the metadata that goes into the journal row.
#[derive(Debug, Clone, Deserialize)]
pub struct LogSessionRequest {
    pub asset: String,
    #[serde(flatten)]
    pub answers: ChecklistAnswers,
    /// Trade date; defaults to today.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Risk size in R; defaults to the configured value, clamped to [0, 10].
    #[serde(default)]
    pub risk_r: Option<f64>,
    #[serde(default)]
    pub notes: String,
}

async fn log_session(
    _auth: AuthBearer,
    State(state): State<Arc<AppState>>,
    Json(request): Json<LogSessionRequest>,
) -> impl IntoResponse {
    let flow_phase = request.answers.flow_phase();
    let evaluation = checklist::evaluate(&request.answers);
    let info = anchors::lookup(&request.asset);

    let date = request.date.unwrap_or_else(|| Utc::now().date_naive());
    let risk_r = request
        .risk_r
        .unwrap_or_else(|| state.runtime_config.read().default_risk_r);

    let record = SessionRecord::build(
        &request.asset,
        info,
        flow_phase,
        &evaluation,
        date,
        risk_r,
        request.notes,
    );

    match state.journal.append(&record) {
        Ok(()) => {
            state.push_evaluation(&request.asset, flow_phase, &evaluation);
            Json(serde_json::json!({
                "logged": true,
                "path": state.journal.path().display().to_string(),
                "record": record,
            }))
            .into_response()
        }
        Err(e) => {
            // Session state is unaffected; the user may retry explicitly.
            warn!(error = %e, "failed to log session to journal");
            state.push_error(format!("Failed to log session: {e:#}"));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": format!("{e:#}") })),
            )
                .into_response()
        }
    }
}

async fn read_journal(
    _auth: AuthBearer,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match state.journal.read_all() {
        Ok(records) => Json(records).into_response(),
        Err(e) => {
            state.push_error(format!("Failed to read journal: {e:#}"));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": format!("{e:#}") })),
            )
                .into_response()
        }
    }
}

async fn journal_stats(
    _auth: AuthBearer,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match state.journal.stats() {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => {
            state.push_error(format!("Failed to compute journal stats: {e:#}"));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": format!("{e:#}") })),
            )
                .into_response()
        }
    }
}

// =============================================================================
// Evaluations & state (authenticated)
// =============================================================================

async fn recent_evaluations(
    _auth: AuthBearer,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let evaluations = state.recent_evaluations.read().clone();
    Json(evaluations)
}

async fn full_state(
    _auth: AuthBearer,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let snapshot = state.build_snapshot();
    Json(snapshot)
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_request_parses_flattened_answer_set() {
        let json = r#"{
            "asset": "Gold",
            "flow_phase": "Counter Flow",
            "answers": {
                "at_weekly_structure": "Yes",
                "htf_draw_nearby": "No",
                "weekly_sweep_against": "Yes",
                "benchmark_active": "Yes",
                "formation": "clean_with_wick",
                "clear_intent": "Yes"
            }
        }"#;
        let request: EvaluateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.asset, "Gold");
        assert_eq!(request.answers.flow_phase(), FlowPhase::CounterFlow);

        let evaluation = checklist::evaluate(&request.answers);
        assert_eq!(evaluation.decision, EntryDecision::Liquidity);
    }

    #[test]
    fn log_request_defaults_date_risk_and_notes() {
        let json = r#"{
            "asset": "Bitcoin",
            "flow_phase": "Pro Flow",
            "answers": {
                "trending_internally": "Yes",
                "zone_has_intention": "Yes",
                "formation": "clean_no_wick",
                "traps_nearby": "No"
            }
        }"#;
        let request: LogSessionRequest = serde_json::from_str(json).unwrap();
        assert!(request.date.is_none());
        assert!(request.risk_r.is_none());
        assert!(request.notes.is_empty());
    }

    #[test]
    fn log_request_accepts_full_metadata() {
        let json = r#"{
            "asset": "Bitcoin",
            "flow_phase": "Pro Flow",
            "answers": {
                "trending_internally": "Yes",
                "zone_has_intention": "Yes",
                "formation": "clean_no_wick",
                "traps_nearby": "No"
            },
            "date": "2025-03-14",
            "risk_r": 0.75,
            "notes": "partial size"
        }"#;
        let request: LogSessionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.date.unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
        );
        assert!((request.risk_r.unwrap() - 0.75).abs() < f64::EPSILON);
        assert_eq!(request.notes, "partial size");
    }
}

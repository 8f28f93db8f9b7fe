// =============================================================================
// Decision Journal — flat CSV persistence for logged sessions
// =============================================================================
//
// Append-or-create semantics on a flat table keyed by nothing: every logged
// session is a new row, no dedup, no upsert. An append reads the full
// existing table, adds one row, and writes the whole table back, so the
// header is never duplicated and insertion order is preserved.
//
// The write-back goes through a tmp sibling file and a rename, so a failed
// write leaves the prior journal content unchanged. Failures are surfaced to
// the caller and never retried.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::session::SessionRecord;

/// Handle to the journal file. Cheap to clone; owns no open file descriptor
/// between operations.
#[derive(Debug, Clone)]
pub struct DecisionJournal {
    path: PathBuf,
}

/// Aggregate journal view for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct JournalStats {
    pub total_sessions: usize,
    pub valid_sessions: usize,
    /// Fraction of sessions whose verdict permitted a trade.
    pub valid_rate: f64,
    /// Mean risk size across all sessions, in R.
    pub avg_risk_r: f64,
}

impl DecisionJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full journal. An absent file is an empty journal, not an
    /// error.
    pub fn read_all(&self) -> Result<Vec<SessionRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("failed to open journal at {}", self.path.display()))?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: SessionRecord = row
                .with_context(|| format!("malformed journal row in {}", self.path.display()))?;
            records.push(record);
        }
        Ok(records)
    }

    /// Append one session to the journal, creating the file if absent.
    pub fn append(&self, record: &SessionRecord) -> Result<()> {
        let mut records = self.read_all()?;
        records.push(record.clone());

        // Write the whole table to a tmp sibling, then rename over the
        // original.
        let tmp_path = self.path.with_extension("csv.tmp");

        let mut writer = csv::Writer::from_path(&tmp_path)
            .with_context(|| format!("failed to create tmp journal at {}", tmp_path.display()))?;
        for row in &records {
            writer
                .serialize(row)
                .with_context(|| format!("failed to serialise journal row for {}", row.asset))?;
        }
        writer
            .flush()
            .with_context(|| format!("failed to flush tmp journal at {}", tmp_path.display()))?;
        drop(writer);

        std::fs::rename(&tmp_path, &self.path).with_context(|| {
            format!("failed to rename tmp journal to {}", self.path.display())
        })?;

        info!(
            path = %self.path.display(),
            asset = %record.asset,
            decision = %record.final_decision,
            rows = records.len(),
            "session logged to journal"
        );
        Ok(())
    }

    /// Aggregate statistics over the full journal.
    pub fn stats(&self) -> Result<JournalStats> {
        let records = self.read_all()?;
        let total_sessions = records.len();
        let valid_sessions = records
            .iter()
            .filter(|r| r.final_decision.is_valid())
            .count();
        let valid_rate = if total_sessions > 0 {
            valid_sessions as f64 / total_sessions as f64
        } else {
            0.0
        };
        let avg_risk_r = if total_sessions > 0 {
            records.iter().map(|r| r.risk_r).sum::<f64>() / total_sessions as f64
        } else {
            0.0
        };

        Ok(JournalStats {
            total_sessions,
            valid_sessions,
            valid_rate,
            avg_risk_r,
        })
    }
}

// =============================================================================
// Runtime Configuration — engine settings with atomic save
// =============================================================================
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash. All fields carry `#[serde(default)]` so that adding new fields
// never breaks loading an older config file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_journal_path() -> PathBuf {
    PathBuf::from("HorizonDecisionLogs.csv")
}

fn default_risk_r() -> f64 {
    1.0
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level runtime configuration for the Horizon engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Where the decision journal CSV lives.
    #[serde(default = "default_journal_path")]
    pub journal_path: PathBuf,

    /// Risk size (R) pre-filled when a journal request omits one.
    #[serde(default = "default_risk_r")]
    pub default_risk_r: f64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            journal_path: default_journal_path(),
            default_risk_r: default_risk_r(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            journal_path = %config.journal_path.display(),
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise runtime config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "runtime config saved (atomic)");
        Ok(())
    }
}

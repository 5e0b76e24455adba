//! Run summary stage.
//!
//! Records wall-clock duration plus toolbox and host identification for
//! post-hoc audit. The summary has no effect on the pipeline outcome; it is
//! logged and additionally written as a JSON artifact into the results root
//! so batch tooling can aggregate runs.

use crate::centerline::CenterlineOutcome;
use crate::contrast::ContrastRole;
use crate::{PipelineConfig, PipelineError, PipelineResult};
use chrono::{DateTime, Utc};
use cordpipe_types::SubjectId;
use std::fs;
use std::path::PathBuf;

/// Audit record of one per-subject run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunSummary {
    /// The subject this run processed.
    pub subject: SubjectId,
    /// UTC timestamp at which the run started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the whole run, seconds.
    pub duration_secs: f64,
    /// Version string reported by the external toolbox.
    pub toolbox_version: String,
    /// Host platform identification.
    pub platform: String,
    /// What the centerline stage did.
    pub centerline: CenterlineOutcome,
    /// Auxiliary contrasts registered onto the reference, in order.
    pub contrasts_registered: Vec<ContrastRole>,
}

impl RunSummary {
    /// Emits the summary to the log stream.
    pub fn log(&self) {
        tracing::info!(
            subject = %self.subject,
            duration_secs = self.duration_secs,
            toolbox_version = %self.toolbox_version,
            platform = %self.platform,
            centerline = ?self.centerline,
            contrasts_registered = self.contrasts_registered.len(),
            "run complete"
        );
    }

    /// Writes the summary as pretty-printed JSON into the results root,
    /// returning the path written.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::SummarySerialization`] or
    /// [`PipelineError::SummaryWrite`] on failure.
    pub fn write_json(&self, config: &PipelineConfig) -> PipelineResult<PathBuf> {
        let path = config
            .results_dir()
            .join(format!("{}_run_summary.json", self.subject.flat()));
        let json =
            serde_json::to_string_pretty(self).map_err(PipelineError::SummarySerialization)?;
        fs::write(&path, json).map_err(PipelineError::SummaryWrite)?;
        Ok(path)
    }
}

/// Host OS and architecture identification for the summary.
pub fn platform_string() -> String {
    format!("{} {}", std::env::consts::OS, std::env::consts::ARCH)
}

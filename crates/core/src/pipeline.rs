//! Per-subject pipeline runner.
//!
//! One invocation processes one subject, synchronously: staging, the
//! centerline stage, co-registration (only when the centerline stage
//! produced the re-derived reference), and the run summary. Cross-subject
//! parallelism belongs to the external batch harness; within a run every
//! step blocks until the previous one finished.

use crate::centerline::{self, CenterlineOutcome};
use crate::register;
use crate::staging;
use crate::summary::{platform_string, RunSummary};
use crate::toolbox::Toolbox;
use crate::{PipelineConfig, PipelineResult};
use chrono::Utc;
use cordpipe_types::SubjectId;
use std::time::Instant;

/// Orchestrates the pipeline stages for single subjects.
///
/// Holds only borrowed collaborators: configuration resolved at startup and
/// the external toolbox behind its capability trait, so tests can substitute
/// a fake implementation.
pub struct PipelineRunner<'a> {
    config: &'a PipelineConfig,
    toolbox: &'a dyn Toolbox,
}

impl<'a> PipelineRunner<'a> {
    /// Creates a runner over the given configuration and toolbox.
    pub fn new(config: &'a PipelineConfig, toolbox: &'a dyn Toolbox) -> Self {
        Self { config, toolbox }
    }

    /// Runs the full pipeline for one subject.
    ///
    /// A missing manual segmentation is not a failure: the subject is
    /// recorded in the error-tracking log, co-registration is skipped (its
    /// registration target was never produced), and the run completes
    /// normally. Every other failure aborts immediately.
    ///
    /// # Errors
    ///
    /// Propagates the first staging, I/O, or external-tool error.
    pub fn run(&self, subject: &SubjectId) -> PipelineResult<RunSummary> {
        let started_at = Utc::now();
        let clock = Instant::now();
        tracing::info!(subject = %subject, "starting pipeline run");

        staging::stage_dataset_metadata(self.config)?;
        staging::stage_subject_images(self.config, subject)?;

        let outcome = centerline::run(self.config, subject, self.toolbox)?;

        let contrasts_registered = match outcome {
            CenterlineOutcome::Processed => register::run(self.config, subject, self.toolbox)?,
            CenterlineOutcome::MissingSegmentation => {
                tracing::warn!(
                    subject = %subject,
                    "reference image was not re-derived, skipping co-registration"
                );
                Vec::new()
            }
        };

        let summary = RunSummary {
            subject: subject.clone(),
            started_at,
            duration_secs: clock.elapsed().as_secs_f64(),
            toolbox_version: self.toolbox.version()?,
            platform: platform_string(),
            centerline: outcome,
            contrasts_registered,
        };
        summary.log();
        summary.write_json(self.config)?;

        Ok(summary)
    }
}

//! Shared error-tracking log.
//!
//! One append-only text file in the log root records every subject whose
//! manual segmentation was absent, one line per occurrence. The file is
//! shared across concurrently running subjects, so each record is written
//! with a single `write_all` on a file opened in append mode; the kernel's
//! append semantics keep whole lines intact under interleaving. There is no
//! deduplication: re-running a subject appends again.

use crate::paths::segmentation;
use crate::{PipelineConfig, PipelineError, PipelineResult};
use cordpipe_types::SubjectId;
use std::fs::OpenOptions;
use std::io::Write;

/// Appends a missing-segmentation record for `subject`.
///
/// The line format is parsed by downstream tooling and must stay stable:
/// `<subject>/anat/<flat>_T2w_seg-manual.nii.gz does not exist`.
///
/// # Errors
///
/// Returns [`PipelineError::ErrorLogAppend`] if the log cannot be opened or
/// written.
pub fn record_missing_segmentation(
    config: &PipelineConfig,
    subject: &SubjectId,
) -> PipelineResult<()> {
    let line = format!(
        "{} does not exist\n",
        segmentation::expected_manual_rel_path(subject)
    );

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.error_log_path())
        .map_err(PipelineError::ErrorLogAppend)?;
    file.write_all(line.as_bytes())
        .map_err(PipelineError::ErrorLogAppend)
}

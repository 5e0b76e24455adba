//! Multi-contrast co-registration stage.
//!
//! Iterates the fixed table of auxiliary contrast roles and, for each one
//! present in the subject's working directory, registers it onto the
//! re-derived reference image and renders the two QC overlays. Absent
//! contrasts are skipped silently — unlike the mandatory segmentation, their
//! absence is routine and leaves no record in the error-tracking log.
//!
//! This stage requires the reference image in its final reoriented,
//! resampled form; the runner only calls it when the centerline stage
//! reported [`Processed`](crate::centerline::CenterlineOutcome::Processed).

use crate::contrast::ContrastRole;
use crate::paths::{reference, segmentation};
use crate::staging::rename_file;
use crate::toolbox::{QcProcess, Toolbox};
use crate::{PipelineConfig, PipelineResult};
use cordpipe_types::SubjectId;

/// Runs co-registration for every auxiliary contrast present on disk.
///
/// Returns the roles that were registered, in processing order.
///
/// # Errors
///
/// Propagates external-tool failures and the rename around the multi-echo
/// combination; both abort the subject's run.
pub fn run(
    config: &PipelineConfig,
    subject: &SubjectId,
    toolbox: &dyn Toolbox,
) -> PipelineResult<Vec<ContrastRole>> {
    let anat = config.subject_anat_dir(subject);
    let fixed = anat.join(reference::final_filename(subject));
    let centerline = anat.join(segmentation::centerline_filename(subject));

    let mut registered = Vec::new();

    for role in ContrastRole::ALL {
        let contrast = anat.join(role.filename(subject));
        if !contrast.is_file() {
            tracing::debug!(subject = %subject, ?role, "contrast absent, skipping");
            continue;
        }

        // Multi-echo T2star arrives 4-D; collapse the echo axis first so the
        // combined volume carries the canonical contrast name downstream.
        if role.may_be_multi_echo() && toolbox.dim_count(&contrast)? == 4 {
            let multi_echo = anat.join(role.raw_filename(subject));
            rename_file(&contrast, &multi_echo)?;
            toolbox.rms_combine(&multi_echo, &contrast)?;
        }

        let out = anat.join(role.registered_filename(subject));
        toolbox.register_identity(&contrast, &fixed, &out)?;

        toolbox.qc_report(QcProcess::CenterlineExtraction, &out, &centerline, config.qc_dir())?;
        toolbox.qc_report(QcProcess::VertebralLabelling, &out, &centerline, config.qc_dir())?;

        tracing::info!(subject = %subject, ?role, "contrast registered onto reference");
        registered.push(role);
    }

    Ok(registered)
}

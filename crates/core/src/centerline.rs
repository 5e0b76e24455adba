//! Segmentation-to-centerline stage.
//!
//! Locates the manually corrected segmentation for a subject, fits a
//! centerline to it, persists the centerline into the processing derivatives
//! tree, and re-derives the reference image so that image, segmentation and
//! centerline share one voxel grid.
//!
//! A missing segmentation is the one expected, recoverable condition in the
//! whole pipeline: it is recorded in the shared error-tracking log and
//! reported as [`CenterlineOutcome::MissingSegmentation`], not as an error.

use crate::constants::{REFERENCE_ORIENTATION, REFERENCE_RESAMPLE_MM};
use crate::paths::{reference, segmentation};
use crate::staging::{copy_file, rename_file};
use crate::toolbox::Toolbox;
use crate::{error_log, PipelineConfig, PipelineError, PipelineResult};
use cordpipe_types::SubjectId;
use std::fs;

/// What the centerline stage did for a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterlineOutcome {
    /// Segmentation found; centerline produced and reference re-derived.
    Processed,
    /// No manual segmentation on disk; recorded in the error-tracking log
    /// and skipped. Later stages that need the re-derived reference must not
    /// run.
    MissingSegmentation,
}

/// Runs the centerline stage for one subject.
///
/// There is deliberately no existence check on prior outputs: re-running a
/// subject re-copies the segmentation and recomputes everything, overwriting
/// earlier artifacts.
///
/// # Errors
///
/// Propagates staging I/O failures and external-tool failures; both abort
/// the subject's run.
pub fn run(
    config: &PipelineConfig,
    subject: &SubjectId,
    toolbox: &dyn Toolbox,
) -> PipelineResult<CenterlineOutcome> {
    let manual_src = config
        .source_labels_dir(subject)
        .join(segmentation::manual_filename(subject));

    if !manual_src.is_file() {
        tracing::warn!(
            subject = %subject,
            "manual segmentation not found at {}, skipping",
            manual_src.display()
        );
        error_log::record_missing_segmentation(config, subject)?;
        return Ok(CenterlineOutcome::MissingSegmentation);
    }

    let anat = config.subject_anat_dir(subject);

    // Working copy with the -manual marker stripped.
    let seg = anat.join(segmentation::working_filename(subject));
    copy_file(&manual_src, &seg)?;

    let centerline = anat.join(segmentation::centerline_filename(subject));
    toolbox.extract_centerline(&seg, &centerline, config.qc_dir())?;

    let derived_dir = config.derived_labels_dir(subject);
    fs::create_dir_all(&derived_dir).map_err(|source| PipelineError::DirCreation {
        path: derived_dir.clone(),
        source,
    })?;
    copy_file(
        &centerline,
        &derived_dir.join(segmentation::centerline_filename(subject)),
    )?;

    // Re-derive the reference image on the segmentation's grid: raw renamed
    // aside, reoriented, resampled, and the result takes the canonical name.
    let final_ref = anat.join(reference::final_filename(subject));
    let raw = anat.join(reference::raw_filename(subject));
    rename_file(&final_ref, &raw)?;

    let reoriented = anat.join(reference::raw_reoriented_filename(subject));
    toolbox.set_orientation(&raw, REFERENCE_ORIENTATION, &reoriented)?;

    let resampled = anat.join(reference::raw_resampled_filename(subject));
    toolbox.resample(&reoriented, REFERENCE_RESAMPLE_MM, &resampled)?;

    rename_file(&resampled, &final_ref)?;

    tracing::info!(subject = %subject, "centerline extracted and reference re-derived");
    Ok(CenterlineOutcome::Processed)
}

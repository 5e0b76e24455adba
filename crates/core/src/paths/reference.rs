//! Names of the reference T2-weighted image and its intermediates.
//!
//! The reference image keeps its canonical name across the run: the raw
//! acquisition is renamed aside, reoriented and resampled, and the result is
//! renamed back. The intermediate names follow the external toolbox's output
//! conventions (`_RPI` from reorientation, `_r` from resampling) and are left
//! on disk.

use crate::constants::{NIFTI_GZ_EXT, REFERENCE_ORIENTATION, T2W_RAW_SUFFIX, T2W_SUFFIX};
use cordpipe_types::SubjectId;

/// Canonical filename of the reference image (`<flat>_T2w.nii.gz`).
///
/// Before stage two this is the raw acquisition; afterwards it is the
/// reoriented, resampled version sharing its grid with the centerline.
pub fn final_filename(subject: &SubjectId) -> String {
    format!("{}{}{}", subject.flat(), T2W_SUFFIX, NIFTI_GZ_EXT)
}

/// Filename under which the raw acquisition is preserved
/// (`<flat>_T2w_raw.nii.gz`).
pub fn raw_filename(subject: &SubjectId) -> String {
    format!("{}{}{}", subject.flat(), T2W_RAW_SUFFIX, NIFTI_GZ_EXT)
}

/// Intermediate reoriented filename (`<flat>_T2w_raw_RPI.nii.gz`).
pub fn raw_reoriented_filename(subject: &SubjectId) -> String {
    format!(
        "{}{}_{}{}",
        subject.flat(),
        T2W_RAW_SUFFIX,
        REFERENCE_ORIENTATION,
        NIFTI_GZ_EXT
    )
}

/// Intermediate resampled filename (`<flat>_T2w_raw_RPI_r.nii.gz`).
pub fn raw_resampled_filename(subject: &SubjectId) -> String {
    format!(
        "{}{}_{}_r{}",
        subject.flat(),
        T2W_RAW_SUFFIX,
        REFERENCE_ORIENTATION,
        NIFTI_GZ_EXT
    )
}

//! Names of the manual segmentation and its derived centerline.

use crate::constants::{
    ANAT_DIR_NAME, CENTERLINE_SUFFIX, NIFTI_GZ_EXT, SEG_MANUAL_SUFFIX, SEG_SUFFIX,
};
use cordpipe_types::SubjectId;

/// Filename of the manually corrected segmentation in the source
/// derivatives tree (`<flat>_T2w_seg-manual.nii.gz`).
pub fn manual_filename(subject: &SubjectId) -> String {
    format!("{}{}{}", subject.flat(), SEG_MANUAL_SUFFIX, NIFTI_GZ_EXT)
}

/// Working-directory filename of the segmentation, with the `-manual`
/// marker stripped (`<flat>_T2w_seg.nii.gz`).
pub fn working_filename(subject: &SubjectId) -> String {
    format!("{}{}{}", subject.flat(), SEG_SUFFIX, NIFTI_GZ_EXT)
}

/// Filename of the derived centerline (`<flat>_T2w_seg_centerline.nii.gz`).
pub fn centerline_filename(subject: &SubjectId) -> String {
    format!("{}{}{}", subject.flat(), CENTERLINE_SUFFIX, NIFTI_GZ_EXT)
}

/// The expected segmentation location relative to the subject, as quoted in
/// the error-tracking log (`<subject>/anat/<flat>_T2w_seg-manual.nii.gz`).
pub fn expected_manual_rel_path(subject: &SubjectId) -> String {
    format!(
        "{}/{}/{}",
        subject.as_str(),
        ANAT_DIR_NAME,
        manual_filename(subject)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_the_convention() {
        let subject = SubjectId::new("sub-01").unwrap();
        assert_eq!(manual_filename(&subject), "sub-01_T2w_seg-manual.nii.gz");
        assert_eq!(working_filename(&subject), "sub-01_T2w_seg.nii.gz");
        assert_eq!(
            centerline_filename(&subject),
            "sub-01_T2w_seg_centerline.nii.gz"
        );
    }

    #[test]
    fn session_subjects_use_the_flat_token() {
        let subject = SubjectId::new("sub-01/ses-M0").unwrap();
        assert_eq!(
            manual_filename(&subject),
            "sub-01_ses-M0_T2w_seg-manual.nii.gz"
        );
        assert_eq!(
            expected_manual_rel_path(&subject),
            "sub-01/ses-M0/anat/sub-01_ses-M0_T2w_seg-manual.nii.gz"
        );
    }
}

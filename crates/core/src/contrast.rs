//! Auxiliary contrast roles and their filenames.
//!
//! Co-registration iterates a fixed table of contrast roles rather than a
//! chain of inline conditionals: each role resolves to one expected filename
//! in the subject's working directory, and absent files are skipped
//! uniformly.

use crate::constants::{NIFTI_GZ_EXT, T2W_SUFFIX};
use cordpipe_types::SubjectId;

/// An auxiliary MRI contrast co-registered onto the reference image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContrastRole {
    /// Short-tau inversion recovery.
    Stir,
    /// Phase-sensitive (proton-density) inversion recovery.
    Psir,
    /// T2-star; may arrive as a 4-D multi-echo acquisition.
    T2star,
    /// Magnetization-transfer-saturation, MT pulse on.
    MtsOn,
    /// Magnetization-transfer-saturation, MT pulse off.
    MtsOff,
    /// Magnetization-transfer-saturation, T1-weighted sub-image.
    MtsT1w,
    /// Magnetization-transfer-saturation, proton-density sub-image.
    MtsPd,
}

impl ContrastRole {
    /// Every role, in processing order.
    pub const ALL: [ContrastRole; 7] = [
        ContrastRole::Stir,
        ContrastRole::Psir,
        ContrastRole::T2star,
        ContrastRole::MtsOn,
        ContrastRole::MtsOff,
        ContrastRole::MtsT1w,
        ContrastRole::MtsPd,
    ];

    /// Filename suffix identifying this contrast after the subject token.
    pub fn suffix(&self) -> &'static str {
        match self {
            ContrastRole::Stir => "_STIR",
            ContrastRole::Psir => "_PSIR",
            ContrastRole::T2star => "_T2star",
            ContrastRole::MtsOn => "_acq-MTon_MTS",
            ContrastRole::MtsOff => "_acq-MToff_MTS",
            ContrastRole::MtsT1w => "_acq-T1w_MTS",
            ContrastRole::MtsPd => "_acq-PD_MTS",
        }
    }

    /// Filename stem of this contrast for a subject (`<flat><suffix>`).
    pub fn stem(&self, subject: &SubjectId) -> String {
        format!("{}{}", subject.flat(), self.suffix())
    }

    /// Expected filename in the subject's working directory.
    pub fn filename(&self, subject: &SubjectId) -> String {
        format!("{}{}", self.stem(subject), NIFTI_GZ_EXT)
    }

    /// Filename the multi-echo acquisition is renamed to before echo
    /// combination (`<stem>_raw.nii.gz`). Only the T2star role uses this.
    pub fn raw_filename(&self, subject: &SubjectId) -> String {
        format!("{}_raw{}", self.stem(subject), NIFTI_GZ_EXT)
    }

    /// Filename of the volume registered onto the reference
    /// (`<stem>2<flat>_T2w.nii.gz`).
    pub fn registered_filename(&self, subject: &SubjectId) -> String {
        format!(
            "{}2{}{}{}",
            self.stem(subject),
            subject.flat(),
            T2W_SUFFIX,
            NIFTI_GZ_EXT
        )
    }

    /// True for the one role that may carry a 4th (echo) dimension.
    pub fn may_be_multi_echo(&self) -> bool {
        matches!(self, ContrastRole::T2star)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_follow_the_convention() {
        let subject = SubjectId::new("sub-01").unwrap();
        assert_eq!(ContrastRole::Stir.filename(&subject), "sub-01_STIR.nii.gz");
        assert_eq!(
            ContrastRole::MtsOn.filename(&subject),
            "sub-01_acq-MTon_MTS.nii.gz"
        );
        assert_eq!(
            ContrastRole::T2star.raw_filename(&subject),
            "sub-01_T2star_raw.nii.gz"
        );
    }

    #[test]
    fn registered_name_encodes_source_and_target() {
        let subject = SubjectId::new("sub-01/ses-M0").unwrap();
        assert_eq!(
            ContrastRole::Psir.registered_filename(&subject),
            "sub-01_ses-M0_PSIR2sub-01_ses-M0_T2w.nii.gz"
        );
    }

    #[test]
    fn serialized_role_names_are_snake_case() {
        // The run summary must present one casing convention throughout.
        assert_eq!(
            serde_json::to_string(&ContrastRole::Stir).unwrap(),
            "\"stir\""
        );
        assert_eq!(
            serde_json::to_string(&ContrastRole::MtsT1w).unwrap(),
            "\"mts_t1w\""
        );
    }

    #[test]
    fn only_t2star_is_multi_echo() {
        for role in ContrastRole::ALL {
            assert_eq!(role.may_be_multi_echo(), role == ContrastRole::T2star);
        }
    }
}

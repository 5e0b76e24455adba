//! Constants used throughout the cordpipe core crate.
//!
//! Every fixed filename, suffix, and external-tool parameter that is part of
//! the observable contract lives here, so the naming convention is defined in
//! exactly one place.

/// Compressed NIfTI extension shared by every image artifact.
pub const NIFTI_GZ_EXT: &str = ".nii.gz";

/// Suffix of the reference T2-weighted image (`<flat>_T2w.nii.gz`).
pub const T2W_SUFFIX: &str = "_T2w";

/// Suffix of the preserved raw reference acquisition.
pub const T2W_RAW_SUFFIX: &str = "_T2w_raw";

/// Suffix of the manually corrected segmentation in the source derivatives.
pub const SEG_MANUAL_SUFFIX: &str = "_T2w_seg-manual";

/// Suffix of the working-directory segmentation (the `-manual` marker is
/// stripped on staging).
pub const SEG_SUFFIX: &str = "_T2w_seg";

/// Suffix of the derived centerline artifact.
pub const CENTERLINE_SUFFIX: &str = "_T2w_seg_centerline";

/// Relative path of the labels derivatives tree under a dataset root.
pub const LABELS_DERIVATIVES_DIR: &str = "derivatives/labels";

/// Modality sub-directory holding anatomical acquisitions.
pub const ANAT_DIR_NAME: &str = "anat";

/// Dataset metadata files staged once into the processing root.
pub const DATASET_METADATA_FILES: [&str; 3] = [
    "participants.tsv",
    "participants.json",
    "dataset_description.json",
];

/// Filename of the shared error-tracking log in the log root.
pub const ERROR_LOG_FILENAME: &str = "_error_check_input_files.log";

/// Canonical anatomical axis ordering for the reference image.
pub const REFERENCE_ORIENTATION: &str = "RPI";

/// Isotropic resampling target for the reference image, millimetres.
pub const REFERENCE_RESAMPLE_MM: &str = "0.8x0.8x0.8";

/// Curve model used when fitting the centerline to a segmentation.
pub const CENTERLINE_ALGO: &str = "bspline";

/// Smoothing factor applied to the fitted centerline.
pub const CENTERLINE_SMOOTH: u32 = 30;

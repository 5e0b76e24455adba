//! Pipeline runtime configuration.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into the runner. The intent is to avoid reading
//! process-wide environment variables during pipeline execution; the CLI
//! resolves the batch harness's variables and core only ever sees validated
//! paths.

use crate::constants::{ANAT_DIR_NAME, ERROR_LOG_FILENAME, LABELS_DERIVATIVES_DIR};
use crate::{PipelineError, PipelineResult};
use cordpipe_types::SubjectId;
use std::path::{Path, PathBuf};

/// Directory roots resolved at startup.
///
/// All five roots are supplied by the invoking batch harness and must
/// pre-exist; this type validates that once, at construction, so every later
/// stage can assume the roots are usable directories.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    data_dir: PathBuf,
    processing_dir: PathBuf,
    results_dir: PathBuf,
    log_dir: PathBuf,
    qc_dir: PathBuf,
}

impl PipelineConfig {
    /// Create a new `PipelineConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] if any of the five roots is
    /// not an existing directory.
    pub fn new(
        data_dir: PathBuf,
        processing_dir: PathBuf,
        results_dir: PathBuf,
        log_dir: PathBuf,
        qc_dir: PathBuf,
    ) -> PipelineResult<Self> {
        for (name, dir) in [
            ("data", &data_dir),
            ("processing", &processing_dir),
            ("results", &results_dir),
            ("log", &log_dir),
            ("qc", &qc_dir),
        ] {
            if !dir.is_dir() {
                return Err(PipelineError::InvalidConfig(format!(
                    "{} root is not a directory: {}",
                    name,
                    dir.display()
                )));
            }
        }

        Ok(Self {
            data_dir,
            processing_dir,
            results_dir,
            log_dir,
            qc_dir,
        })
    }

    /// Source dataset root (read-only).
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Root under which staged images and derived artifacts are written.
    pub fn processing_dir(&self) -> &Path {
        &self.processing_dir
    }

    /// Root for per-run result artifacts (the run summary lands here).
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Root holding the shared error-tracking log.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Root the external toolbox writes QC reports into.
    pub fn qc_dir(&self) -> &Path {
        &self.qc_dir
    }

    /// The subject's anatomical directory in the source dataset.
    pub fn source_anat_dir(&self, subject: &SubjectId) -> PathBuf {
        self.data_dir.join(subject.rel_path()).join(ANAT_DIR_NAME)
    }

    /// The subject's anatomical working directory under the processing root.
    pub fn subject_anat_dir(&self, subject: &SubjectId) -> PathBuf {
        self.processing_dir
            .join(subject.rel_path())
            .join(ANAT_DIR_NAME)
    }

    /// The subject's labels directory in the source derivatives tree, where
    /// the manually corrected segmentation is expected.
    pub fn source_labels_dir(&self, subject: &SubjectId) -> PathBuf {
        self.data_dir
            .join(LABELS_DERIVATIVES_DIR)
            .join(subject.rel_path())
            .join(ANAT_DIR_NAME)
    }

    /// The subject's labels directory in the processing derivatives tree,
    /// where the derived centerline is persisted.
    pub fn derived_labels_dir(&self, subject: &SubjectId) -> PathBuf {
        self.processing_dir
            .join(LABELS_DERIVATIVES_DIR)
            .join(subject.rel_path())
            .join(ANAT_DIR_NAME)
    }

    /// Path of the shared error-tracking log file.
    pub fn error_log_path(&self) -> PathBuf {
        self.log_dir.join(ERROR_LOG_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_roots(temp: &TempDir) -> [PathBuf; 5] {
        let roots = ["data", "processing", "results", "log", "qc"]
            .map(|name| temp.path().join(name));
        for root in &roots {
            std::fs::create_dir_all(root).expect("failed to create root");
        }
        roots
    }

    #[test]
    fn accepts_existing_roots() {
        let temp = TempDir::new().unwrap();
        let [data, processing, results, log, qc] = make_roots(&temp);
        let config = PipelineConfig::new(data, processing, results, log, qc);
        assert!(config.is_ok());
    }

    #[test]
    fn rejects_missing_root() {
        let temp = TempDir::new().unwrap();
        let [data, processing, results, log, _] = make_roots(&temp);
        let config = PipelineConfig::new(
            data,
            processing,
            results,
            log,
            temp.path().join("absent-qc"),
        );
        assert!(matches!(config, Err(PipelineError::InvalidConfig(_))));
    }

    #[test]
    fn derives_subject_directories() {
        let temp = TempDir::new().unwrap();
        let [data, processing, results, log, qc] = make_roots(&temp);
        let config =
            PipelineConfig::new(data.clone(), processing.clone(), results, log, qc).unwrap();
        let subject = SubjectId::new("sub-01/ses-M0").unwrap();

        assert_eq!(
            config.source_anat_dir(&subject),
            data.join("sub-01/ses-M0/anat")
        );
        assert_eq!(
            config.source_labels_dir(&subject),
            data.join("derivatives/labels/sub-01/ses-M0/anat")
        );
        assert_eq!(
            config.derived_labels_dir(&subject),
            processing.join("derivatives/labels/sub-01/ses-M0/anat")
        );
        assert!(config
            .error_log_path()
            .ends_with("log/_error_check_input_files.log"));
    }
}

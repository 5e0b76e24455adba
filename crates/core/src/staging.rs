//! Environment and staging stage.
//!
//! Populates the processing root before any image processing runs: the three
//! dataset metadata files (copied once, skipped when already present) and the
//! subject's anatomical image tree. Source files are copied, never moved;
//! any missing source is fatal for the run.

use crate::constants::DATASET_METADATA_FILES;
use crate::{PipelineConfig, PipelineError, PipelineResult};
use cordpipe_types::SubjectId;
use std::fs;
use std::path::Path;

/// Copies the dataset metadata files into the processing root.
///
/// Each file is skipped if the destination already exists, so concurrent
/// subject runs and re-runs leave the metadata untouched.
///
/// # Errors
///
/// Returns [`PipelineError::MissingInput`] if a metadata file is absent from
/// the data root, or [`PipelineError::FileCopy`] if the copy fails.
pub fn stage_dataset_metadata(config: &PipelineConfig) -> PipelineResult<()> {
    for name in DATASET_METADATA_FILES {
        let src = config.data_dir().join(name);
        let dst = config.processing_dir().join(name);

        if dst.exists() {
            tracing::debug!("metadata file already staged: {}", dst.display());
            continue;
        }
        if !src.is_file() {
            return Err(PipelineError::MissingInput { path: src });
        }
        fs::copy(&src, &dst).map_err(|source| PipelineError::FileCopy { src, dst, source })?;
    }
    Ok(())
}

/// Copies the subject's anatomical image tree into the working directory.
///
/// # Errors
///
/// Returns [`PipelineError::MissingInput`] if the subject has no `anat/`
/// directory under the data root, and I/O errors from the recursive copy as
/// [`PipelineError::DirCreation`] / [`PipelineError::FileCopy`].
pub fn stage_subject_images(config: &PipelineConfig, subject: &SubjectId) -> PipelineResult<()> {
    let src = config.source_anat_dir(subject);
    let dst = config.subject_anat_dir(subject);

    if !src.is_dir() {
        return Err(PipelineError::MissingInput { path: src });
    }

    tracing::info!("staging {} into {}", src.display(), dst.display());
    copy_dir_recursive(&src, &dst)
}

/// Copies a single file, mapping failures onto the pipeline error taxonomy.
pub(crate) fn copy_file(src: &Path, dst: &Path) -> PipelineResult<()> {
    fs::copy(src, dst)
        .map(|_| ())
        .map_err(|source| PipelineError::FileCopy {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
            source,
        })
}

/// Renames a single file, mapping failures onto the pipeline error taxonomy.
pub(crate) fn rename_file(src: &Path, dst: &Path) -> PipelineResult<()> {
    fs::rename(src, dst).map_err(|source| PipelineError::FileRename {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    })
}

/// Recursively copies a directory and its contents to a destination.
///
/// Creates the destination directory if it doesn't exist and copies all
/// files and subdirectories from the source. Existing destination files are
/// overwritten (re-runs restage from source).
fn copy_dir_recursive(src: &Path, dst: &Path) -> PipelineResult<()> {
    if !dst.exists() {
        fs::create_dir_all(dst).map_err(|source| PipelineError::DirCreation {
            path: dst.to_path_buf(),
            source,
        })?;
    }

    let entries = fs::read_dir(src).map_err(|source| PipelineError::FileCopy {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| PipelineError::FileCopy {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
            source,
        })?;
        let ty = entry.file_type().map_err(|source| PipelineError::FileCopy {
            src: entry.path(),
            dst: dst.to_path_buf(),
            source,
        })?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if ty.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path).map_err(|source| PipelineError::FileCopy {
                src: src_path,
                dst: dst_path,
                source,
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn make_config(temp: &TempDir) -> PipelineConfig {
        let roots: [PathBuf; 5] = ["data", "processing", "results", "log", "qc"]
            .map(|name| temp.path().join(name));
        for root in &roots {
            fs::create_dir_all(root).expect("failed to create root");
        }
        let [data, processing, results, log, qc] = roots;
        PipelineConfig::new(data, processing, results, log, qc).expect("config")
    }

    fn write_metadata(config: &PipelineConfig) {
        for name in DATASET_METADATA_FILES {
            fs::write(config.data_dir().join(name), name).unwrap();
        }
    }

    #[test]
    fn stages_metadata_once() {
        let temp = TempDir::new().unwrap();
        let config = make_config(&temp);
        write_metadata(&config);

        stage_dataset_metadata(&config).unwrap();
        for name in DATASET_METADATA_FILES {
            assert!(config.processing_dir().join(name).is_file());
        }

        // A staged copy is not overwritten on re-run.
        let marker = config.processing_dir().join("participants.tsv");
        fs::write(&marker, "locally edited").unwrap();
        stage_dataset_metadata(&config).unwrap();
        assert_eq!(fs::read_to_string(&marker).unwrap(), "locally edited");
    }

    #[test]
    fn missing_metadata_is_fatal() {
        let temp = TempDir::new().unwrap();
        let config = make_config(&temp);
        fs::write(config.data_dir().join("participants.tsv"), "").unwrap();

        let result = stage_dataset_metadata(&config);
        assert!(matches!(result, Err(PipelineError::MissingInput { .. })));
    }

    #[test]
    fn stages_subject_anat_tree() {
        let temp = TempDir::new().unwrap();
        let config = make_config(&temp);
        let subject = SubjectId::new("sub-01/ses-M0").unwrap();

        let src_anat = config.source_anat_dir(&subject);
        fs::create_dir_all(&src_anat).unwrap();
        fs::write(src_anat.join("sub-01_ses-M0_T2w.nii.gz"), b"t2w").unwrap();
        fs::write(src_anat.join("sub-01_ses-M0_T2w.json"), b"{}").unwrap();

        stage_subject_images(&config, &subject).unwrap();

        let dst_anat = config.subject_anat_dir(&subject);
        assert!(dst_anat.join("sub-01_ses-M0_T2w.nii.gz").is_file());
        assert!(dst_anat.join("sub-01_ses-M0_T2w.json").is_file());
    }

    #[test]
    fn missing_subject_tree_is_fatal() {
        let temp = TempDir::new().unwrap();
        let config = make_config(&temp);
        let subject = SubjectId::new("sub-99").unwrap();

        let result = stage_subject_images(&config, &subject);
        assert!(matches!(result, Err(PipelineError::MissingInput { .. })));
    }
}

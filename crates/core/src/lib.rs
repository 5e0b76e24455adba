//! # cordpipe core
//!
//! Per-subject orchestration for a spinal-cord MRI preprocessing pipeline.
//!
//! This crate contains the control flow only: directory staging, deterministic
//! artifact naming, the conditional stage sequence, the shared error-tracking
//! log, and the run summary. Every image-processing operation — centerline
//! fitting, reorientation, resampling, registration, QC rendering — is
//! delegated to the external Spinal Cord Toolbox behind the
//! [`Toolbox`](toolbox::Toolbox) trait.
//!
//! **No environment concerns**: configuration resolution from the batch
//! harness's variables and logging initialisation belong in the CLI crate.

pub mod centerline;
pub mod config;
pub mod constants;
pub mod contrast;
pub mod error;
pub mod error_log;
pub mod paths;
pub mod pipeline;
pub mod register;
pub mod staging;
pub mod summary;
pub mod toolbox;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::PipelineRunner;
pub use toolbox::{SctToolbox, Toolbox};

// Re-exported so CLI and tests need only one import for subject handling.
pub use cordpipe_types::{SubjectId, SubjectIdError};

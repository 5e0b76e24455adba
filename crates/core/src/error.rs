use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors raised while running the per-subject pipeline.
///
/// The taxonomy mirrors the run's failure policy: every variant here is
/// fatal for the subject and propagates up to the process exit. The one
/// expected, recoverable condition — a missing manual segmentation — is not
/// an error at all; it is reported through
/// [`CenterlineOutcome`](crate::centerline::CenterlineOutcome).
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("invalid subject identifier: {0}")]
    InvalidSubject(#[from] cordpipe_types::SubjectIdError),
    #[error(
        "required input is missing: {path}",
        path = path.display()
    )]
    MissingInput { path: PathBuf },
    #[error(
        "failed to create directory {path}: {source}",
        path = path.display()
    )]
    DirCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "failed to copy {src} to {dst}: {source}",
        src = src.display(),
        dst = dst.display()
    )]
    FileCopy {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "failed to rename {src} to {dst}: {source}",
        src = src.display(),
        dst = dst.display()
    )]
    FileRename {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to spawn {tool}: {source}")]
    ToolSpawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool} exited with {status}")]
    ToolFailed {
        tool: &'static str,
        status: ExitStatus,
    },
    #[error("unexpected output from {tool}: {message}")]
    ToolOutput {
        tool: &'static str,
        message: String,
    },
    #[error("failed to append to error-tracking log: {0}")]
    ErrorLogAppend(std::io::Error),
    #[error("failed to write run summary: {0}")]
    SummaryWrite(std::io::Error),
    #[error("failed to serialise run summary: {0}")]
    SummarySerialization(serde_json::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

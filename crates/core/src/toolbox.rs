//! Capability interface over the external Spinal Cord Toolbox.
//!
//! Every numerically interesting operation — centerline fitting,
//! reorientation, resampling, registration, QC rendering — is delegated to
//! the toolbox's command-line programs. The [`Toolbox`] trait is the single
//! seam between orchestration and those programs, so the pipeline can be
//! exercised in tests against a fake implementation that never spawns a
//! process.
//!
//! [`SctToolbox`] is the real implementation: blocking invocations with
//! stdout/stderr inherited, so a failing tool surfaces its own diagnostics on
//! the process's standard streams and the run aborts with the exit status.

use crate::constants::{CENTERLINE_ALGO, CENTERLINE_SMOOTH};
use crate::{PipelineError, PipelineResult};
use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

const SCT_VERSION: &str = "sct_version";
const SCT_GET_CENTERLINE: &str = "sct_get_centerline";
const SCT_IMAGE: &str = "sct_image";
const SCT_RESAMPLE: &str = "sct_resample";
const SCT_MATHS: &str = "sct_maths";
const SCT_REGISTER_MULTIMODAL: &str = "sct_register_multimodal";
const SCT_QC: &str = "sct_qc";

/// Presentation variant of the co-registration QC overlay.
///
/// Both render the same registered-contrast/centerline overlay; they differ
/// only in how the QC report frames them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QcProcess {
    /// Framed as a centerline-extraction check.
    CenterlineExtraction,
    /// Framed as a vertebral-labelling check.
    VertebralLabelling,
}

impl QcProcess {
    /// The toolbox process name the report is filed under.
    pub fn process_name(&self) -> &'static str {
        match self {
            QcProcess::CenterlineExtraction => "sct_get_centerline",
            QcProcess::VertebralLabelling => "sct_label_vertebrae",
        }
    }
}

/// External image-processing operations consumed by the pipeline.
///
/// Implementations must block until the operation completes and must create
/// the requested output file on success. All fixed parameters that are part
/// of the observable contract (orientation code, resampling target,
/// centerline model and smoothing, registration mode) are supplied by the
/// caller or pinned in [`crate::constants`].
pub trait Toolbox {
    /// Toolbox version string, for the run summary.
    fn version(&self) -> PipelineResult<String>;

    /// Fit a centerline to an existing segmentation (b-spline model,
    /// fixed smoothing), writing `out` and a QC report under `qc_dir`.
    fn extract_centerline(&self, seg: &Path, out: &Path, qc_dir: &Path) -> PipelineResult<()>;

    /// Reorient `image` to the given axis code, writing `out`.
    fn set_orientation(
        &self,
        image: &Path,
        orientation: &str,
        out: &Path,
    ) -> PipelineResult<()>;

    /// Resample `image` to the given spacing (e.g. `0.8x0.8x0.8`), writing
    /// `out`.
    fn resample(&self, image: &Path, spacing_mm: &str, out: &Path) -> PipelineResult<()>;

    /// Number of dimensions of `image`, read from its header.
    fn dim_count(&self, image: &Path) -> PipelineResult<usize>;

    /// Collapse the 4th (echo) axis of `image` by root-mean-square
    /// combination, writing `out`.
    fn rms_combine(&self, image: &Path, out: &Path) -> PipelineResult<()>;

    /// Register `moving` onto `fixed` with an identity transform and
    /// nearest-neighbour interpolation, writing `out`.
    fn register_identity(&self, moving: &Path, fixed: &Path, out: &Path) -> PipelineResult<()>;

    /// Render a QC overlay of `image` against `centerline` under `qc_dir`,
    /// framed per `process`.
    fn qc_report(
        &self,
        process: QcProcess,
        image: &Path,
        centerline: &Path,
        qc_dir: &Path,
    ) -> PipelineResult<()>;
}

/// The Spinal Cord Toolbox, invoked via its command-line programs.
///
/// The programs are resolved through `PATH`, matching how the batch harness
/// provisions the toolbox environment.
#[derive(Debug, Default, Clone)]
pub struct SctToolbox;

impl SctToolbox {
    /// Creates a new command-line toolbox handle.
    pub fn new() -> Self {
        Self
    }

    fn run<I, S>(&self, tool: &'static str, args: I) -> PipelineResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(tool);
        command.args(args);
        tracing::debug!("invoking {:?}", command);

        let status = command
            .status()
            .map_err(|source| PipelineError::ToolSpawn { tool, source })?;
        if !status.success() {
            return Err(PipelineError::ToolFailed { tool, status });
        }
        Ok(())
    }

    fn capture<I, S>(&self, tool: &'static str, args: I) -> PipelineResult<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(tool);
        command.args(args);
        tracing::debug!("invoking {:?}", command);

        let output = command
            .output()
            .map_err(|source| PipelineError::ToolSpawn { tool, source })?;
        if !output.status.success() {
            return Err(PipelineError::ToolFailed {
                tool,
                status: output.status,
            });
        }
        String::from_utf8(output.stdout).map_err(|e| PipelineError::ToolOutput {
            tool,
            message: format!("stdout is not UTF-8: {e}"),
        })
    }
}

impl Toolbox for SctToolbox {
    fn version(&self) -> PipelineResult<String> {
        let stdout = self.capture(SCT_VERSION, std::iter::empty::<&OsStr>())?;
        Ok(stdout.trim().to_owned())
    }

    fn extract_centerline(&self, seg: &Path, out: &Path, qc_dir: &Path) -> PipelineResult<()> {
        let smooth = CENTERLINE_SMOOTH.to_string();
        let args: [&OsStr; 12] = [
            "-i".as_ref(),
            seg.as_ref(),
            "-method".as_ref(),
            "fitseg".as_ref(),
            "-centerline-algo".as_ref(),
            CENTERLINE_ALGO.as_ref(),
            "-centerline-smooth".as_ref(),
            smooth.as_ref(),
            "-o".as_ref(),
            out.as_ref(),
            "-qc".as_ref(),
            qc_dir.as_ref(),
        ];
        self.run(SCT_GET_CENTERLINE, args)
    }

    fn set_orientation(
        &self,
        image: &Path,
        orientation: &str,
        out: &Path,
    ) -> PipelineResult<()> {
        let args: [&OsStr; 6] = [
            "-i".as_ref(),
            image.as_ref(),
            "-setorient".as_ref(),
            orientation.as_ref(),
            "-o".as_ref(),
            out.as_ref(),
        ];
        self.run(SCT_IMAGE, args)
    }

    fn resample(&self, image: &Path, spacing_mm: &str, out: &Path) -> PipelineResult<()> {
        let args: [&OsStr; 6] = [
            "-i".as_ref(),
            image.as_ref(),
            "-mm".as_ref(),
            spacing_mm.as_ref(),
            "-o".as_ref(),
            out.as_ref(),
        ];
        self.run(SCT_RESAMPLE, args)
    }

    fn dim_count(&self, image: &Path) -> PipelineResult<usize> {
        let args: [&OsStr; 3] = ["-i".as_ref(), image.as_ref(), "-header".as_ref()];
        let stdout = self.capture(SCT_IMAGE, args)?;
        parse_header_dim_count(&stdout).ok_or_else(|| PipelineError::ToolOutput {
            tool: SCT_IMAGE,
            message: format!("no 'dim' field in header of {}", image.display()),
        })
    }

    fn rms_combine(&self, image: &Path, out: &Path) -> PipelineResult<()> {
        let args: [&OsStr; 6] = [
            "-i".as_ref(),
            image.as_ref(),
            "-rms".as_ref(),
            "t".as_ref(),
            "-o".as_ref(),
            out.as_ref(),
        ];
        self.run(SCT_MATHS, args)
    }

    fn register_identity(&self, moving: &Path, fixed: &Path, out: &Path) -> PipelineResult<()> {
        let args: [&OsStr; 10] = [
            "-i".as_ref(),
            moving.as_ref(),
            "-d".as_ref(),
            fixed.as_ref(),
            "-identity".as_ref(),
            "1".as_ref(),
            "-x".as_ref(),
            "nn".as_ref(),
            "-o".as_ref(),
            out.as_ref(),
        ];
        self.run(SCT_REGISTER_MULTIMODAL, args)
    }

    fn qc_report(
        &self,
        process: QcProcess,
        image: &Path,
        centerline: &Path,
        qc_dir: &Path,
    ) -> PipelineResult<()> {
        let args: [&OsStr; 8] = [
            "-i".as_ref(),
            image.as_ref(),
            "-s".as_ref(),
            centerline.as_ref(),
            "-p".as_ref(),
            process.process_name().as_ref(),
            "-qc".as_ref(),
            qc_dir.as_ref(),
        ];
        self.run(SCT_QC, args)
    }
}

/// Extracts the dimension count from a printed NIfTI header.
///
/// The header lists `dim : [n x y z t ...]` where the first entry is the
/// number of dimensions. Matches the `dim` field only, not `pixdim` or
/// `dim_info`.
fn parse_header_dim_count(header: &str) -> Option<usize> {
    for line in header.lines() {
        let mut parts = line.splitn(2, ':');
        let field = parts.next()?.trim();
        if field != "dim" {
            continue;
        }
        let value = parts.next()?;
        let first = value
            .split(|c: char| !c.is_ascii_digit())
            .find(|s| !s.is_empty())?;
        return first.parse().ok();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dim_count_from_header() {
        let header = "\
sizeof_hdr      : 348
dim_info        : 0
dim             : [  3 320 320  56   1   1   1   1]
pixdim          : [1.  0.8 0.8 3.3 1.  1.  1.  1. ]
";
        assert_eq!(parse_header_dim_count(header), Some(3));
    }

    #[test]
    fn parses_four_dimensional_header() {
        let header = "dim : [4 192 192 40 5 1 1 1]\n";
        assert_eq!(parse_header_dim_count(header), Some(4));
    }

    #[test]
    fn rejects_header_without_dim() {
        assert_eq!(parse_header_dim_count("pixdim : [1. 0.8]\n"), None);
    }

    #[test]
    fn qc_process_names() {
        assert_eq!(
            QcProcess::CenterlineExtraction.process_name(),
            "sct_get_centerline"
        );
        assert_eq!(
            QcProcess::VertebralLabelling.process_name(),
            "sct_label_vertebrae"
        );
    }
}

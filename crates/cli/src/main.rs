use anyhow::Context;
use clap::{Parser, Subcommand};
use cordpipe_core::paths::{reference, segmentation};
use cordpipe_core::{PipelineConfig, PipelineRunner, SctToolbox, SubjectId};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cordpipe")]
#[command(about = "Per-subject spinal-cord MRI preprocessing pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline for one subject
    Run {
        /// Subject identifier, optionally with a session (sub-01/ses-M0)
        subject: String,
    },
    /// Print the resolved artifact paths for one subject without processing
    Paths {
        /// Subject identifier, optionally with a session (sub-01/ses-M0)
        subject: String,
    },
}

/// Reads one of the batch harness's required directory variables.
fn env_dir(name: &str) -> anyhow::Result<PathBuf> {
    let value =
        std::env::var(name).with_context(|| format!("environment variable {name} is not set"))?;
    Ok(PathBuf::from(value))
}

/// Resolves the five directory roots supplied by the batch harness.
///
/// The variable names follow the harness's convention: `PATH_DATA`,
/// `PATH_DATA_PROCESSED`, `PATH_RESULTS`, `PATH_LOG`, `PATH_QC`.
fn config_from_env() -> anyhow::Result<PipelineConfig> {
    let config = PipelineConfig::new(
        env_dir("PATH_DATA")?,
        env_dir("PATH_DATA_PROCESSED")?,
        env_dir("PATH_RESULTS")?,
        env_dir("PATH_LOG")?,
        env_dir("PATH_QC")?,
    )?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cordpipe=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { subject } => {
            let subject = SubjectId::new(&subject)?;
            let config = config_from_env()?;
            let toolbox = SctToolbox::new();

            tracing::info!("++ Starting cordpipe run for {}", subject);
            let summary = PipelineRunner::new(&config, &toolbox)
                .run(&subject)
                .with_context(|| format!("pipeline run failed for {subject}"))?;

            println!(
                "done: {} in {:.1}s ({:?}, {} contrast(s) registered)",
                summary.subject,
                summary.duration_secs,
                summary.centerline,
                summary.contrasts_registered.len()
            );
        }
        Commands::Paths { subject } => {
            let subject = SubjectId::new(&subject)?;
            let config = config_from_env()?;
            let anat = config.subject_anat_dir(&subject);

            println!(
                "manual segmentation: {}",
                config
                    .source_labels_dir(&subject)
                    .join(segmentation::manual_filename(&subject))
                    .display()
            );
            println!(
                "centerline:          {}",
                config
                    .derived_labels_dir(&subject)
                    .join(segmentation::centerline_filename(&subject))
                    .display()
            );
            println!(
                "reference image:     {}",
                anat.join(reference::final_filename(&subject)).display()
            );
            println!(
                "raw reference:       {}",
                anat.join(reference::raw_filename(&subject)).display()
            );
            println!("error log:           {}", config.error_log_path().display());
        }
    }

    Ok(())
}

//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::Path;

use log::info;

use crate::config::PipelineConfig;
use crate::engine::{locate_program, write_pcm, FfmpegEncoder, FsAssetSink};
use crate::error::Result;
use crate::manifest::{NoteOutcome, RunReport};
use crate::pipeline::{FailurePolicy, Pipeline};

/// Render and encode every configured note.
pub fn generate(
    config: PipelineConfig,
    keep_going: bool,
    manifest: Option<&Path>,
) -> Result<RunReport> {
    info!(
        "Generating {} notes into {}",
        config.frequencies.len(),
        config.output_dir.display()
    );

    let policy = if keep_going {
        FailurePolicy::Continue
    } else {
        FailurePolicy::Abort
    };

    let encoder = FfmpegEncoder::new(config.encoder.clone())?;
    let mut sink = FsAssetSink::new(&config.output_dir, &config.file_stem, encoder);
    let pipeline = Pipeline::new(config)?.with_policy(policy);

    let mut report = pipeline.run(&mut sink)?;

    if let Some(path) = manifest {
        report.attach_checksums()?;
        report.write_json(path)?;
        info!("Manifest written to {}", path.display());
    }

    print_summary(&report);
    Ok(report)
}

/// Locate the configured encoder.
pub fn check_encoder(config: &PipelineConfig) -> Result<()> {
    let path = locate_program(&config.encoder.program)?;
    println!("Encoder: {}", path.display());
    Ok(())
}

/// Render one note to a WAV file without encoding it.
pub fn render(config: PipelineConfig, index: usize, output: &Path) -> Result<()> {
    info!("Rendering note {} to {}", index, output.display());

    let pipeline = Pipeline::new(config)?;
    let note = pipeline.render_index(index)?;
    write_pcm(&note, output)?;

    println!(
        "Note {} ({} samples at {} Hz): {}",
        index,
        note.num_samples(),
        note.sample_rate(),
        output.display()
    );
    Ok(())
}

/// Process exit code for a finished run: 0 only when every note was encoded.
pub fn exit_code(report: &RunReport) -> u8 {
    if report.is_success() {
        0
    } else {
        1
    }
}

fn print_summary(report: &RunReport) {
    println!(
        "Encoded {} of {} notes",
        report.encoded_count(),
        report.outcomes.len()
    );

    for outcome in report.failures() {
        if let NoteOutcome::Failed {
            index,
            frequency_hz,
            message,
            retained_pcm,
            ..
        } = outcome
        {
            println!("  note {} ({} Hz): {}", index, frequency_hz, message);
            if let Some(pcm) = retained_pcm {
                println!("    intermediate kept at {}", pcm.display());
            }
        }
    }
}

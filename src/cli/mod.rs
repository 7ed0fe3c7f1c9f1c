//! CLI Module
//!
//! Command-line interface for tonegen. With no arguments the binary renders
//! the default note set into `assets/sounds`.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::PipelineConfig;
use crate::error::Result;

/// Tonegen - renders short decaying note clips as compressed sound assets
#[derive(Parser, Debug)]
#[command(name = "tonegen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory the assets are written to
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Encoder executable name or path
    #[arg(long, global = true)]
    pub encoder: Option<String>,

    /// Encoder VBR quality (0 best, 9 smallest)
    #[arg(short, long, global = true, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub quality: Option<u8>,

    /// Skip notes that fail and report them at the end
    #[arg(long, global = true)]
    pub keep_going: bool,

    /// Write a JSON manifest of the produced files
    #[arg(long, global = true)]
    pub manifest: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render and encode every note (default)
    #[command(name = "generate")]
    Generate,

    /// Locate the encoder and print its path
    #[command(name = "check-encoder")]
    CheckEncoder,

    /// Render one note to an uncompressed WAV without encoding
    #[command(name = "render")]
    Render {
        /// Zero-based note index
        index: usize,

        /// Output WAV path
        output: PathBuf,
    },
}

impl Cli {
    /// Build the pipeline configuration from the config file and overrides
    pub fn load_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(program) = &self.encoder {
            config.encoder.program = program.clone();
        }
        if let Some(quality) = self.quality {
            config.encoder.quality = quality;
        }

        config.validate()?;
        Ok(config)
    }
}

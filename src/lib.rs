//! Tonegen - Note Clip Asset Generator
//!
//! Synthesizes short plucked-sounding notes and writes them out as compressed
//! audio files for use as UI sound assets.
//!
//! # Pipeline
//!
//! Each note runs through the same fixed stages, one note at a time:
//! 1. Sine oscillator at the note's frequency
//! 2. Exponential decay envelope
//! 3. Peak normalization and 16-bit quantization
//! 4. Intermediate WAV, external MP3 encoder, intermediate removed

pub mod cli;
pub mod config;
pub mod dsp;
pub mod engine;
pub mod error;
pub mod manifest;
pub mod pipeline;

pub use config::{EncoderSettings, PipelineConfig};
pub use error::{Result, ToneError};
pub use manifest::{NoteOutcome, RunReport};
pub use pipeline::{render_note, FailurePolicy, Pipeline};

//! Run report and asset manifest
//!
//! The pipeline records one outcome per note. Consumers that ship the assets
//! can write the report out as JSON, with a SHA-256 for every produced file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Result, ToneError};

/// What happened to a single note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NoteOutcome {
    /// The compressed asset was produced and the intermediate removed
    Encoded {
        index: usize,
        frequency_hz: f64,
        path: PathBuf,
        num_samples: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size_bytes: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sha256: Option<String>,
    },
    /// The note was skipped
    Failed {
        index: usize,
        frequency_hz: f64,
        code: String,
        message: String,
        /// Intermediate file left behind for inspection, if any
        #[serde(default, skip_serializing_if = "Option::is_none")]
        retained_pcm: Option<PathBuf>,
    },
}

impl NoteOutcome {
    pub fn index(&self) -> usize {
        match self {
            NoteOutcome::Encoded { index, .. } | NoteOutcome::Failed { index, .. } => *index,
        }
    }

    pub fn is_encoded(&self) -> bool {
        matches!(self, NoteOutcome::Encoded { .. })
    }
}

/// Summary of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub sample_rate: u32,
    pub duration_secs: f64,
    pub outcomes: Vec<NoteOutcome>,
}

impl RunReport {
    pub fn new(sample_rate: u32, duration_secs: f64) -> Self {
        Self {
            generated_at: Utc::now(),
            sample_rate,
            duration_secs,
            outcomes: Vec::new(),
        }
    }

    pub fn encoded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_encoded()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &NoteOutcome> {
        self.outcomes.iter().filter(|o| !o.is_encoded())
    }

    /// True when every note was encoded
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Fill in size and checksum for every encoded file
    ///
    /// # Errors
    /// * `Io` - If a produced file can no longer be read
    pub fn attach_checksums(&mut self) -> Result<()> {
        for outcome in &mut self.outcomes {
            if let NoteOutcome::Encoded {
                path,
                size_bytes,
                sha256,
                ..
            } = outcome
            {
                let content = fs::read(&*path)?;
                *size_bytes = Some(content.len() as u64);
                *sha256 = Some(format!("{:x}", Sha256::digest(&content)));
            }
        }
        Ok(())
    }

    /// Write the report as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ToneError::FileWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

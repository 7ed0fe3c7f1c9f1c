//! Error handling for tonegen
//!
//! Every failure carries an error code and, where useful, recovery suggestions
//! that the CLI prints alongside the message.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for tonegen operations
pub type Result<T> = std::result::Result<T, ToneError>;

/// Main error type for tonegen operations
#[derive(Error, Debug)]
pub enum ToneError {
    // Input Errors
    #[error("Invalid tone: {reason}")]
    InvalidTone { reason: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // Signal Errors
    #[error("Cannot normalize silent signal (peak amplitude is zero)")]
    SilentSignal,

    #[error("Cannot normalize signal containing NaN or infinite samples")]
    NonFiniteSignal,

    // Encoder Errors
    #[error("Encoder not found: {program}")]
    EncoderNotFound {
        program: String,
        #[source]
        source: Option<which::Error>,
    },

    #[error("Encoder {program} failed with {status}: {stderr}")]
    EncoderFailed {
        program: String,
        status: String,
        stderr: String,
    },

    // File Errors
    #[error("Directory creation failed: {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove file: {path}: {source}")]
    FileRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read configuration: {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("WAV error for {path}: {source}")]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ToneError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ToneError::InvalidTone { .. } => "INVALID_TONE",
            ToneError::InvalidConfig { .. } => "INVALID_CONFIG",
            ToneError::SilentSignal => "SILENT_SIGNAL",
            ToneError::NonFiniteSignal => "NON_FINITE_SIGNAL",
            ToneError::EncoderNotFound { .. } => "ENCODER_NOT_FOUND",
            ToneError::EncoderFailed { .. } => "ENCODER_FAILED",
            ToneError::DirectoryCreate { .. } => "DIRECTORY_CREATE",
            ToneError::FileWrite { .. } => "FILE_WRITE",
            ToneError::FileRemove { .. } => "FILE_REMOVE",
            ToneError::ConfigRead { .. } => "CONFIG_READ",
            ToneError::Wav { .. } => "WAV_ERROR",
            ToneError::Io(_) => "IO_ERROR",
            ToneError::Json(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Whether the failure is confined to a single note.
    ///
    /// With `--keep-going` the pipeline skips notes that fail with an
    /// isolated error and carries on; anything else still aborts the run.
    pub fn is_note_local(&self) -> bool {
        matches!(
            self,
            ToneError::InvalidTone { .. }
                | ToneError::SilentSignal
                | ToneError::NonFiniteSignal
                | ToneError::EncoderFailed { .. }
                | ToneError::Wav { .. }
                | ToneError::FileWrite { .. }
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            ToneError::InvalidTone { .. } => vec![
                "Frequencies must be finite and non-negative",
                "Duration and sample rate must be positive",
            ],
            ToneError::SilentSignal => vec![
                "A 0 Hz tone produces no audible signal",
                "Remove the zero frequency from the configuration",
            ],
            ToneError::EncoderNotFound { .. } => vec![
                "Install ffmpeg and make sure it is on PATH",
                "Pass --encoder with the full path to the encoder binary",
            ],
            ToneError::EncoderFailed { .. } => vec![
                "Check that the encoder was built with libmp3lame",
                "The intermediate WAV was kept next to the output for inspection",
            ],
            ToneError::DirectoryCreate { .. }
            | ToneError::FileWrite { .. }
            | ToneError::FileRemove { .. } => vec![
                "Check permissions on the output directory",
                "Choose a different location with --output-dir",
            ],
            _ => vec![],
        }
    }
}

//! External encoder invocation
//!
//! Compression is delegated to a command-line encoder. The call blocks until
//! the subprocess exits and its status is always checked.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use crate::config::EncoderSettings;
use crate::error::{Result, ToneError};

/// Transcodes an uncompressed container into a compressed one
pub trait Encoder {
    /// File extension of the compressed output, without the dot
    fn extension(&self) -> &str;

    /// Encode `input` into `output`, blocking until done
    fn encode(&self, input: &Path, output: &Path) -> Result<()>;
}

// ============================================================================
// ffmpeg
// ============================================================================

/// Encoder backed by an ffmpeg executable
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    program: PathBuf,
    settings: EncoderSettings,
}

impl FfmpegEncoder {
    /// Resolve the configured program and build an encoder
    ///
    /// Bare names are looked up on `PATH`; anything containing a path
    /// separator is used as given.
    ///
    /// # Errors
    /// * `EncoderNotFound` - If the program cannot be located
    pub fn new(settings: EncoderSettings) -> Result<Self> {
        let program = locate_program(&settings.program)?;
        debug!("Using encoder at {}", program.display());
        Ok(Self { program, settings })
    }

    /// Resolved path of the encoder executable
    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn settings(&self) -> &EncoderSettings {
        &self.settings
    }

    /// Arguments passed to the executable for one conversion
    ///
    /// Paths are passed through as-is so non-UTF-8 names reach the encoder
    /// unchanged.
    pub fn arguments(&self, input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            "-hide_banner".into(),
            "-loglevel".into(),
            "error".into(),
            "-nostdin".into(),
            "-y".into(),
            "-i".into(),
            input.as_os_str().to_os_string(),
            "-codec:a".into(),
            self.settings.codec.clone().into(),
            "-qscale:a".into(),
            self.settings.quality.to_string().into(),
            output.as_os_str().to_os_string(),
        ]
    }
}

impl Encoder for FfmpegEncoder {
    fn extension(&self) -> &str {
        &self.settings.extension
    }

    fn encode(&self, input: &Path, output: &Path) -> Result<()> {
        let args = self.arguments(input, output);
        debug!(
            "{} {}",
            self.program.display(),
            args.iter()
                .map(|arg| arg.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ToneError::EncoderNotFound {
                        program: self.program.display().to_string(),
                        source: None,
                    }
                } else {
                    ToneError::Io(e)
                }
            })?;

        if !result.status.success() {
            return Err(ToneError::EncoderFailed {
                program: self.program.display().to_string(),
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// Find an executable by name or path
pub fn locate_program(program: &str) -> Result<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return if candidate.is_file() {
            Ok(candidate.to_path_buf())
        } else {
            Err(ToneError::EncoderNotFound {
                program: program.to_string(),
                source: None,
            })
        };
    }

    which::which(program).map_err(|e| ToneError::EncoderNotFound {
        program: program.to_string(),
        source: Some(e),
    })
}

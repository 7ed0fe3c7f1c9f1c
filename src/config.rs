//! Pipeline configuration
//!
//! All settings travel in a [`PipelineConfig`] value; nothing is read from
//! process-wide state. The defaults reproduce the standard C4–B4 note set.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dsp::envelope::DEFAULT_DECAY_RATE;
use crate::dsp::ToneSpec;
use crate::error::{Result, ToneError};

/// Default sample rate in Hz
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Default note length in seconds
pub const DEFAULT_DURATION_SECS: f64 = 0.3;

/// C4 through B4, natural notes only
pub const DEFAULT_FREQUENCIES: [f64; 7] = [261.63, 293.66, 329.63, 349.23, 392.00, 440.00, 493.88];

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "assets/sounds";

/// Highest (lowest quality) LAME VBR setting
const MAX_QUALITY: u8 = 9;

/// Settings for the external encoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderSettings {
    /// Executable name or path
    pub program: String,
    /// Audio codec passed to `-codec:a`
    pub codec: String,
    /// VBR quality passed to `-qscale:a` (0 best, 9 worst)
    pub quality: u8,
    /// Extension of the produced files
    pub extension: String,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            codec: "libmp3lame".to_string(),
            quality: 2,
            extension: "mp3".to_string(),
        }
    }
}

/// Everything the pipeline needs to render and encode a note set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub sample_rate: u32,
    pub duration_secs: f64,
    /// Processed in order; output files are numbered by position
    pub frequencies: Vec<f64>,
    pub envelope_decay: f64,
    pub output_dir: PathBuf,
    /// Prefix of every output file name
    pub file_stem: String,
    pub encoder: EncoderSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration_secs: DEFAULT_DURATION_SECS,
            frequencies: DEFAULT_FREQUENCIES.to_vec(),
            envelope_decay: DEFAULT_DECAY_RATE,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            file_stem: "note".to_string(),
            encoder: EncoderSettings::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file
    ///
    /// Omitted fields take their default values.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ToneError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PipelineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// The tone spec for one frequency under this configuration
    pub fn tone(&self, frequency_hz: f64) -> ToneSpec {
        ToneSpec::new(frequency_hz, self.duration_secs, self.sample_rate)
    }

    /// Check the settings shared by every note
    ///
    /// Individual frequencies are validated when their note is rendered so
    /// that a bad entry only affects that note.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| -> Result<()> { Err(ToneError::InvalidConfig { reason }) };

        if self.frequencies.is_empty() {
            return invalid("at least one frequency is required".to_string());
        }
        if self.sample_rate == 0 {
            return invalid("sample_rate must be positive".to_string());
        }
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return invalid(format!("duration_secs must be positive, got {}", self.duration_secs));
        }
        if !self.envelope_decay.is_finite() || self.envelope_decay < 0.0 {
            return invalid(format!(
                "envelope_decay must be finite and non-negative, got {}",
                self.envelope_decay
            ));
        }
        if self.file_stem.is_empty() || self.file_stem.contains(['/', '\\']) {
            return invalid(format!("file_stem must be a plain name, got {:?}", self.file_stem));
        }
        if self.encoder.program.is_empty() {
            return invalid("encoder.program must not be empty".to_string());
        }
        if self.encoder.quality > MAX_QUALITY {
            return invalid(format!(
                "encoder.quality must be 0-{}, got {}",
                MAX_QUALITY, self.encoder.quality
            ));
        }
        if self.encoder.extension.is_empty() || self.encoder.extension == "wav" {
            return invalid(format!(
                "encoder.extension must differ from the intermediate wav, got {:?}",
                self.encoder.extension
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.frequencies.len(), 7);
        assert_eq!(config.output_dir, PathBuf::from("assets/sounds"));
        assert_eq!(config.encoder.quality, 2);
        assert_eq!(config.tone(440.0).num_samples(), 13230);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{ "frequencies": [440.0], "encoder": { "quality": 0 } }"#)
                .unwrap();

        assert_eq!(config.frequencies, vec![440.0]);
        assert_eq!(config.encoder.quality, 0);
        assert_eq!(config.encoder.codec, "libmp3lame");
        assert_eq!(config.duration_secs, DEFAULT_DURATION_SECS);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = serde_json::from_str::<PipelineConfig>(r#"{ "bitrate": 320 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, r#"{ "output_dir": "out", "file_stem": "tone" }"#).unwrap();

        let config = PipelineConfig::from_file(&path).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.file_stem, "tone");
    }

    #[test]
    fn test_from_missing_file() {
        let err = PipelineConfig::from_file(Path::new("/nonexistent/notes.json")).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_READ");
    }

    #[test]
    fn test_validation_failures() {
        let cases: Vec<Box<dyn Fn(&mut PipelineConfig)>> = vec![
            Box::new(|c| c.frequencies.clear()),
            Box::new(|c| c.sample_rate = 0),
            Box::new(|c| c.duration_secs = 0.0),
            Box::new(|c| c.envelope_decay = -3.0),
            Box::new(|c| c.file_stem = "a/b".to_string()),
            Box::new(|c| c.encoder.quality = 10),
            Box::new(|c| c.encoder.extension = "wav".to_string()),
        ];

        for mutate in cases {
            let mut config = PipelineConfig::default();
            mutate(&mut config);
            let err = config.validate().unwrap_err();
            assert_eq!(err.error_code(), "INVALID_CONFIG");
        }
    }
}

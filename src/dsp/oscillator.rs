//! Sine oscillator
//!
//! Produces the raw waveform for one note.

use std::f64::consts::PI;

use crate::engine::SampleBuffer;
use crate::error::{Result, ToneError};

/// Frequency, duration and sample rate of one note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    pub frequency_hz: f64,
    pub duration_secs: f64,
    pub sample_rate: u32,
}

impl ToneSpec {
    pub fn new(frequency_hz: f64, duration_secs: f64, sample_rate: u32) -> Self {
        Self {
            frequency_hz,
            duration_secs,
            sample_rate,
        }
    }

    /// Number of samples the tone occupies: `floor(duration * sample_rate)`
    pub fn num_samples(&self) -> usize {
        (self.duration_secs * self.sample_rate as f64).floor() as usize
    }

    /// Check the tone can be synthesized
    ///
    /// A 0 Hz tone is accepted here; it synthesizes to silence and is
    /// rejected when the note is normalized.
    ///
    /// # Errors
    /// * `InvalidTone` - Non-finite or negative frequency, non-positive
    ///   duration or sample rate, or a duration shorter than one sample
    pub fn validate(&self) -> Result<()> {
        if !self.frequency_hz.is_finite() || self.frequency_hz < 0.0 {
            return Err(ToneError::InvalidTone {
                reason: format!(
                    "frequency must be finite and non-negative, got {} Hz",
                    self.frequency_hz
                ),
            });
        }

        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(ToneError::InvalidTone {
                reason: format!("duration must be positive, got {}s", self.duration_secs),
            });
        }

        if self.sample_rate == 0 {
            return Err(ToneError::InvalidTone {
                reason: "sample rate must be positive".to_string(),
            });
        }

        if self.num_samples() == 0 {
            return Err(ToneError::InvalidTone {
                reason: format!(
                    "duration {}s is shorter than one sample at {} Hz",
                    self.duration_secs, self.sample_rate
                ),
            });
        }

        Ok(())
    }
}

/// Generate a sine wave for the given tone
///
/// Samples are evenly spaced over `[0, duration)` with the right endpoint
/// excluded, so sample `i` sits at `i * duration / N`.
///
/// # Arguments
/// * `tone` - Frequency, duration and sample rate of the note
///
/// # Returns
/// A buffer of `tone.num_samples()` values in [-1, 1]
pub fn generate_sine(tone: &ToneSpec) -> Result<SampleBuffer> {
    tone.validate()?;

    let num_samples = tone.num_samples();
    let time_step = tone.duration_secs / num_samples as f64;
    let angular_freq = 2.0 * PI * tone.frequency_hz;

    let samples = (0..num_samples)
        .map(|i| (angular_freq * (i as f64 * time_step)).sin())
        .collect();

    Ok(SampleBuffer::from_samples(samples, tone.sample_rate, time_step))
}

//! Exponential decay envelope
//!
//! Fades each note out so it ends quietly instead of clicking at the cutoff.

use crate::engine::SampleBuffer;
use crate::error::{Result, ToneError};

/// Default decay rate, per second
pub const DEFAULT_DECAY_RATE: f64 = 3.0;

/// Multiplies a buffer by `exp(-rate * t)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDecay {
    rate: f64,
}

impl Default for ExponentialDecay {
    fn default() -> Self {
        Self {
            rate: DEFAULT_DECAY_RATE,
        }
    }
}

impl ExponentialDecay {
    /// Create an envelope with the given decay rate
    ///
    /// # Errors
    /// * `InvalidConfig` - If `rate` is negative or not finite
    pub fn new(rate: f64) -> Result<Self> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(ToneError::InvalidConfig {
                reason: format!("envelope decay must be finite and non-negative, got {}", rate),
            });
        }
        Ok(Self { rate })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Envelope gain at time `t` seconds
    #[inline]
    pub fn gain_at(&self, t: f64) -> f64 {
        (-self.rate * t).exp()
    }

    /// Shape the buffer in place
    pub fn apply(&self, buffer: &mut SampleBuffer) {
        let time_step = buffer.time_step();
        for (i, sample) in buffer.samples_mut().iter_mut().enumerate() {
            *sample *= self.gain_at(i as f64 * time_step);
        }
    }
}

//! Sample buffers
//!
//! A note lives in a [`SampleBuffer`] while it is synthesized and shaped, and
//! in a [`QuantizedBuffer`] once it has been converted to 16-bit PCM.

// ============================================================================
// Sample Buffer
// ============================================================================

/// Mono floating-point buffer for one note
///
/// Sample `i` sits at time `i * time_step` seconds.
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    samples: Vec<f64>,
    sample_rate: u32,
    time_step: f64,
}

impl SampleBuffer {
    /// Create a buffer from existing samples
    ///
    /// # Arguments
    /// * `samples` - Amplitudes in time order
    /// * `sample_rate` - Sample rate in Hz
    /// * `time_step` - Seconds between consecutive samples
    pub fn from_samples(samples: Vec<f64>, sample_rate: u32, time_step: f64) -> Self {
        Self {
            samples,
            sample_rate,
            time_step,
        }
    }

    /// Number of samples
    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Seconds between consecutive samples
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Time in seconds of the sample at `index`
    #[inline]
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 * self.time_step
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.time_at(self.samples.len())
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [f64] {
        &mut self.samples
    }

    /// Largest absolute sample value, 0.0 for an empty buffer
    ///
    /// NaN samples propagate so callers can detect a corrupt signal.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0_f64, |peak, &s| {
            if s.is_nan() || peak.is_nan() {
                f64::NAN
            } else {
                peak.max(s.abs())
            }
        })
    }
}

// ============================================================================
// Quantized Buffer
// ============================================================================

/// Signed 16-bit PCM samples ready for container serialization
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuantizedBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl QuantizedBuffer {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Largest absolute sample value, widened so that -32768 is representable
    pub fn peak(&self) -> i32 {
        self.samples
            .iter()
            .map(|&s| (s as i32).abs())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_time_at_follows_step() {
        let buffer = SampleBuffer::from_samples(vec![0.0; 4], 4, 0.25);
        assert_relative_eq!(buffer.time_at(3), 0.75);
        assert_relative_eq!(buffer.duration(), 1.0);
    }

    #[test]
    fn test_peak_uses_absolute_value() {
        let buffer = SampleBuffer::from_samples(vec![0.1, -0.8, 0.5], 44100, 1.0 / 44100.0);
        assert_relative_eq!(buffer.peak(), 0.8);
    }

    #[test]
    fn test_peak_of_empty_buffer_is_zero() {
        let buffer = SampleBuffer::from_samples(Vec::new(), 44100, 1.0 / 44100.0);
        assert_eq!(buffer.peak(), 0.0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_peak_propagates_nan() {
        let buffer = SampleBuffer::from_samples(vec![0.5, f64::NAN, 0.2], 44100, 1.0);
        assert!(buffer.peak().is_nan());
    }

    #[test]
    fn test_quantized_peak_handles_minimum() {
        let buffer = QuantizedBuffer::new(vec![12, i16::MIN, 300], 44100);
        assert_eq!(buffer.peak(), 32768);
    }
}

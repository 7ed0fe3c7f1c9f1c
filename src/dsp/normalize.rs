//! Peak normalization and 16-bit quantization

use crate::engine::{QuantizedBuffer, SampleBuffer};
use crate::error::{Result, ToneError};

/// Full-scale value a normalized sample of 1.0 maps to
pub const FULL_SCALE: f64 = i16::MAX as f64;

/// Rescale the buffer in place so its peak absolute value is exactly 1.0
///
/// # Errors
/// * `SilentSignal` - If the buffer is empty or every sample is zero
/// * `NonFiniteSignal` - If any sample is NaN or infinite
pub fn normalize(buffer: &mut SampleBuffer) -> Result<()> {
    let peak = buffer.peak();

    if !peak.is_finite() {
        return Err(ToneError::NonFiniteSignal);
    }
    if peak == 0.0 {
        return Err(ToneError::SilentSignal);
    }

    for sample in buffer.samples_mut() {
        *sample /= peak;
    }

    Ok(())
}

/// Convert one normalized sample to 16-bit fixed point
#[inline]
pub fn quantize_sample(sample: f64) -> i16 {
    (sample * FULL_SCALE)
        .round()
        .clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Convert a normalized buffer to 16-bit samples
pub fn quantize(buffer: &SampleBuffer) -> QuantizedBuffer {
    let samples = buffer.samples().iter().map(|&s| quantize_sample(s)).collect();
    QuantizedBuffer::new(samples, buffer.sample_rate())
}

/// Normalize then quantize
pub fn normalize_and_quantize(mut buffer: SampleBuffer) -> Result<QuantizedBuffer> {
    normalize(&mut buffer)?;
    Ok(quantize(&buffer))
}

//! Uncompressed PCM container I/O
//!
//! Notes are handed to the encoder as mono 16-bit WAV files at the configured
//! sample rate.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::engine::buffer::QuantizedBuffer;
use crate::error::{Result, ToneError};

/// Bit depth of the intermediate container
pub const PCM_BIT_DEPTH: u16 = 16;

/// WAV header description for a quantized buffer
pub fn pcm_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: PCM_BIT_DEPTH,
        sample_format: SampleFormat::Int,
    }
}

/// Write a quantized buffer to a WAV file
///
/// # Arguments
/// * `buffer` - The 16-bit samples to write
/// * `path` - Destination; an existing file is overwritten
///
/// # Errors
/// * `Wav` - If the file cannot be created or written
pub fn write_pcm(buffer: &QuantizedBuffer, path: &Path) -> Result<()> {
    let wav_err = |source: hound::Error| ToneError::Wav {
        path: path.to_path_buf(),
        source,
    };

    let num_samples = declared_len(buffer.num_samples())?;
    let mut writer = WavWriter::create(path, pcm_spec(buffer.sample_rate())).map_err(wav_err)?;

    {
        let mut samples = writer.get_i16_writer(num_samples);
        for &sample in buffer.samples() {
            samples.write_sample(sample);
        }
        samples.flush().map_err(wav_err)?;
    }

    writer.finalize().map_err(wav_err)?;
    Ok(())
}

/// Sample count as stored in the WAV header
fn declared_len(num_samples: usize) -> Result<u32> {
    u32::try_from(num_samples).map_err(|_| ToneError::InvalidTone {
        reason: format!("{} samples do not fit in a WAV file", num_samples),
    })
}

/// Read a mono 16-bit WAV file back into a quantized buffer
///
/// Only the format produced by [`write_pcm`] is accepted.
pub fn read_pcm(path: &Path) -> Result<QuantizedBuffer> {
    let wav_err = |source: hound::Error| ToneError::Wav {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = WavReader::open(path).map_err(wav_err)?;
    let spec = reader.spec();

    if spec.channels != 1
        || spec.bits_per_sample != PCM_BIT_DEPTH
        || spec.sample_format != SampleFormat::Int
    {
        return Err(wav_err(hound::Error::Unsupported));
    }

    let samples = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<i16>, _>>()
        .map_err(wav_err)?;

    Ok(QuantizedBuffer::new(samples, spec.sample_rate))
}

//! Asset sink
//!
//! Everything the pipeline does to the outside world goes through
//! [`AssetSink`], so synthesis can be exercised without a real directory or a
//! real encoder.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::engine::buffer::QuantizedBuffer;
use crate::engine::encoder::Encoder;
use crate::engine::wav::write_pcm;
use crate::error::{Result, ToneError};

/// Destination for rendered notes
pub trait AssetSink {
    /// Make the destination ready. Must succeed when called repeatedly.
    fn prepare(&mut self) -> Result<()>;

    /// Store the uncompressed note for `index` and return where it went
    fn write_pcm(&mut self, index: usize, buffer: &QuantizedBuffer) -> Result<PathBuf>;

    /// Compress a stored note and return the compressed file's path
    fn encode(&mut self, pcm: &Path) -> Result<PathBuf>;

    /// Delete a stored file
    fn remove(&mut self, path: &Path) -> Result<()>;
}

// ============================================================================
// Filesystem Sink
// ============================================================================

/// Writes notes into a directory as `<stem><index>.wav` and encodes them next
/// to it as `<stem><index>.<ext>`
#[derive(Debug)]
pub struct FsAssetSink<E: Encoder> {
    output_dir: PathBuf,
    file_stem: String,
    encoder: E,
}

impl<E: Encoder> FsAssetSink<E> {
    pub fn new(output_dir: impl Into<PathBuf>, file_stem: impl Into<String>, encoder: E) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_stem: file_stem.into(),
            encoder,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the intermediate file for a note
    pub fn pcm_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(format!("{}{}.wav", self.file_stem, index))
    }

    /// Path of the compressed file for a note
    pub fn compressed_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(format!(
            "{}{}.{}",
            self.file_stem,
            index,
            self.encoder.extension()
        ))
    }
}

impl<E: Encoder> AssetSink for FsAssetSink<E> {
    fn prepare(&mut self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ToneError::DirectoryCreate {
            path: self.output_dir.clone(),
            source,
        })
    }

    fn write_pcm(&mut self, index: usize, buffer: &QuantizedBuffer) -> Result<PathBuf> {
        let path = self.pcm_path(index);
        write_pcm(buffer, &path)?;
        debug!("Wrote {} samples to {}", buffer.num_samples(), path.display());
        Ok(path)
    }

    fn encode(&mut self, pcm: &Path) -> Result<PathBuf> {
        let output = pcm.with_extension(self.encoder.extension());
        self.encoder.encode(pcm, &output)?;
        Ok(output)
    }

    fn remove(&mut self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|source| ToneError::FileRemove {
            path: path.to_path_buf(),
            source,
        })
    }
}

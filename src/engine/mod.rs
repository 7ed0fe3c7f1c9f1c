//! Audio Engine Module
//!
//! Everything that touches storage or external processes:
//! - Sample buffer types
//! - WAV container I/O
//! - External encoder invocation
//! - Asset sink abstraction

pub mod buffer;
pub mod encoder;
pub mod sink;
pub mod wav;

pub use buffer::{QuantizedBuffer, SampleBuffer};
pub use encoder::{locate_program, Encoder, FfmpegEncoder};
pub use sink::{AssetSink, FsAssetSink};
pub use wav::{read_pcm, write_pcm};

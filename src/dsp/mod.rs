//! Note Synthesis DSP
//!
//! The three stages every note passes through, in order:
//! oscillator → envelope → normalize/quantize.

pub mod envelope;
pub mod normalize;
pub mod oscillator;

pub use envelope::{ExponentialDecay, DEFAULT_DECAY_RATE};
pub use normalize::{normalize, normalize_and_quantize, quantize, quantize_sample, FULL_SCALE};
pub use oscillator::{generate_sine, ToneSpec};

//! Note generation pipeline
//!
//! Renders every configured frequency in order and hands each note to an
//! [`AssetSink`]. A note is finished (written, encoded, intermediate removed)
//! before the next one starts.

use std::path::PathBuf;

use log::{error, info, warn};

use crate::config::PipelineConfig;
use crate::dsp::{generate_sine, normalize_and_quantize, ExponentialDecay, ToneSpec};
use crate::engine::{AssetSink, QuantizedBuffer};
use crate::error::{Result, ToneError};
use crate::manifest::{NoteOutcome, RunReport};

/// What to do when a note fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first error
    #[default]
    Abort,
    /// Record note-local failures and move on to the next note
    Continue,
}

/// Synthesize one note: sine, decay envelope, normalize, quantize
///
/// # Errors
/// * `InvalidTone` - If the tone cannot be synthesized
/// * `SilentSignal` - If the shaped note has no energy (e.g. 0 Hz)
pub fn render_note(tone: &ToneSpec, envelope: &ExponentialDecay) -> Result<QuantizedBuffer> {
    let mut buffer = generate_sine(tone)?;
    envelope.apply(&mut buffer);
    normalize_and_quantize(buffer)
}

/// Error for one note, plus the intermediate left on disk
struct NoteFailure {
    error: ToneError,
    retained_pcm: Option<PathBuf>,
}

impl From<ToneError> for NoteFailure {
    fn from(error: ToneError) -> Self {
        Self {
            error,
            retained_pcm: None,
        }
    }
}

/// Drives the note set through synthesis and encoding
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    envelope: ExponentialDecay,
    policy: FailurePolicy,
}

impl Pipeline {
    /// Build a pipeline from a validated configuration
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let envelope = ExponentialDecay::new(config.envelope_decay)?;
        Ok(Self {
            config,
            envelope,
            policy: FailurePolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Render a single note by its position in the frequency list
    pub fn render_index(&self, index: usize) -> Result<QuantizedBuffer> {
        let frequency = *self
            .config
            .frequencies
            .get(index)
            .ok_or_else(|| ToneError::InvalidConfig {
                reason: format!(
                    "note index {} out of range (0-{})",
                    index,
                    self.config.frequencies.len() - 1
                ),
            })?;
        render_note(&self.config.tone(frequency), &self.envelope)
    }

    /// Run every note through the sink
    ///
    /// Files produced for earlier notes are left in place when a later note
    /// aborts the run.
    ///
    /// # Errors
    /// With [`FailurePolicy::Abort`], the first failure. With
    /// [`FailurePolicy::Continue`], only failures that are not confined to a
    /// single note (see [`ToneError::is_note_local`]).
    pub fn run<S: AssetSink + ?Sized>(&self, sink: &mut S) -> Result<RunReport> {
        sink.prepare()?;

        let mut report = RunReport::new(self.config.sample_rate, self.config.duration_secs);

        for (index, &frequency) in self.config.frequencies.iter().enumerate() {
            match self.process_note(sink, index, frequency) {
                Ok(outcome) => {
                    if let NoteOutcome::Encoded { path, .. } = &outcome {
                        info!("Note {} ({} Hz) -> {}", index, frequency, path.display());
                    }
                    report.outcomes.push(outcome);
                }
                Err(failure) => {
                    if let Some(pcm) = &failure.retained_pcm {
                        warn!("Keeping intermediate {} for note {}", pcm.display(), index);
                    }

                    if self.policy == FailurePolicy::Abort || !failure.error.is_note_local() {
                        error!("Note {} ({} Hz) failed: {}", index, frequency, failure.error);
                        return Err(failure.error);
                    }

                    warn!("Skipping note {} ({} Hz): {}", index, frequency, failure.error);
                    report.outcomes.push(NoteOutcome::Failed {
                        index,
                        frequency_hz: frequency,
                        code: failure.error.error_code().to_string(),
                        message: failure.error.to_string(),
                        retained_pcm: failure.retained_pcm,
                    });
                }
            }
        }

        info!(
            "Encoded {} of {} notes",
            report.encoded_count(),
            self.config.frequencies.len()
        );
        Ok(report)
    }

    fn process_note<S: AssetSink + ?Sized>(
        &self,
        sink: &mut S,
        index: usize,
        frequency: f64,
    ) -> std::result::Result<NoteOutcome, NoteFailure> {
        let quantized = render_note(&self.config.tone(frequency), &self.envelope)?;
        let pcm = sink.write_pcm(index, &quantized)?;

        // The intermediate is only removed once the encoder has succeeded
        let compressed = sink.encode(&pcm).map_err(|error| NoteFailure {
            error,
            retained_pcm: Some(pcm.clone()),
        })?;
        sink.remove(&pcm)?;

        Ok(NoteOutcome::Encoded {
            index,
            frequency_hz: frequency,
            path: compressed,
            num_samples: quantized.num_samples(),
            size_bytes: None,
            sha256: None,
        })
    }
}

//! Integration Tests
//!
//! End-to-end runs of the note pipeline against a real directory.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use tonegen::engine::{read_pcm, Encoder, FfmpegEncoder, FsAssetSink};
use tonegen::{FailurePolicy, NoteOutcome, Pipeline, PipelineConfig, Result, ToneError};

const NOTE_FREQUENCIES: [f64; 7] = [261.63, 293.66, 329.63, 349.23, 392.00, 440.00, 493.88];

/// Stands in for ffmpeg: checks the WAV is readable and writes a marker file
struct FakeEncoder;

impl Encoder for FakeEncoder {
    fn extension(&self) -> &str {
        "mp3"
    }

    fn encode(&self, input: &Path, output: &Path) -> Result<()> {
        let pcm = read_pcm(input)?;
        fs::write(output, format!("fake mp3: {} samples", pcm.num_samples()))?;
        Ok(())
    }
}

/// Always fails the way a broken encoder would
struct BrokenEncoder;

impl Encoder for BrokenEncoder {
    fn extension(&self) -> &str {
        "mp3"
    }

    fn encode(&self, _input: &Path, _output: &Path) -> Result<()> {
        Err(ToneError::EncoderFailed {
            program: "broken".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "Unknown encoder 'libmp3lame'".to_string(),
        })
    }
}

fn config_in(dir: &Path, frequencies: &[f64]) -> PipelineConfig {
    PipelineConfig {
        frequencies: frequencies.to_vec(),
        output_dir: dir.to_path_buf(),
        ..PipelineConfig::default()
    }
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// === Full Pipeline Tests ===

#[test]
fn test_seven_notes_and_no_leftover_intermediates() {
    let root = tempdir().unwrap();
    let out = root.path().join("assets").join("sounds");
    let config = config_in(&out, &NOTE_FREQUENCIES);

    let mut sink = FsAssetSink::new(&out, "note", FakeEncoder);
    let report = Pipeline::new(config).unwrap().run(&mut sink).unwrap();

    assert!(report.is_success());
    assert_eq!(
        file_names(&out),
        (0..7).map(|i| format!("note{}.mp3", i)).collect::<Vec<_>>()
    );
    assert_eq!(
        fs::read_to_string(out.join("note4.mp3")).unwrap(),
        "fake mp3: 13230 samples"
    );
}

#[test]
fn test_rerun_over_existing_directory() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path(), &NOTE_FREQUENCIES[..2]);
    let pipeline = Pipeline::new(config).unwrap();

    let mut sink = FsAssetSink::new(dir.path(), "note", FakeEncoder);
    pipeline.run(&mut sink).unwrap();
    pipeline.run(&mut sink).unwrap();

    assert_eq!(file_names(dir.path()), vec!["note0.mp3", "note1.mp3"]);
}

#[test]
fn test_silent_note_aborts_without_artifact() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path(), &[440.0, 0.0, 493.88]);

    let mut sink = FsAssetSink::new(dir.path(), "note", FakeEncoder);
    let err = Pipeline::new(config).unwrap().run(&mut sink).unwrap_err();

    assert!(matches!(err, ToneError::SilentSignal));
    assert_eq!(file_names(dir.path()), vec!["note0.mp3"]);
}

#[test]
fn test_keep_going_skips_silent_note() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path(), &[440.0, 0.0, 493.88]);

    let mut sink = FsAssetSink::new(dir.path(), "note", FakeEncoder);
    let report = Pipeline::new(config)
        .unwrap()
        .with_policy(FailurePolicy::Continue)
        .run(&mut sink)
        .unwrap();

    assert!(!report.is_success());
    assert_eq!(file_names(dir.path()), vec!["note0.mp3", "note2.mp3"]);
}

#[test]
fn test_encoder_failure_keeps_wav() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path(), &[440.0]);

    let mut sink = FsAssetSink::new(dir.path(), "note", BrokenEncoder);
    let err = Pipeline::new(config).unwrap().run(&mut sink).unwrap_err();

    assert_eq!(err.error_code(), "ENCODER_FAILED");
    assert_eq!(file_names(dir.path()), vec!["note0.wav"]);

    let kept = read_pcm(&dir.path().join("note0.wav")).unwrap();
    assert_eq!(kept.num_samples(), 13230);
    assert_eq!(kept.peak(), 32767);
}

#[test]
fn test_manifest_checksums_match_files() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path(), &NOTE_FREQUENCIES[..3]);

    let mut sink = FsAssetSink::new(dir.path(), "note", FakeEncoder);
    let mut report = Pipeline::new(config).unwrap().run(&mut sink).unwrap();
    report.attach_checksums().unwrap();

    let manifest = dir.path().join("manifest.json");
    report.write_json(&manifest).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&manifest).unwrap()).unwrap();
    let outcomes = value["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 3);
    for (i, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome["index"], i);
        assert_eq!(outcome["sha256"].as_str().unwrap().len(), 64);
    }
}

#[test]
fn test_non_default_stem() {
    let dir = tempdir().unwrap();
    let mut config = config_in(dir.path(), &[440.0]);
    config.file_stem = "chime".to_string();

    let mut sink = FsAssetSink::new(dir.path(), &config.file_stem, FakeEncoder);
    let report = Pipeline::new(config).unwrap().run(&mut sink).unwrap();

    match &report.outcomes[0] {
        NoteOutcome::Encoded { path, .. } => {
            assert_eq!(path, &dir.path().join("chime0.mp3"));
        }
        other => panic!("Expected Encoded outcome, got: {:?}", other),
    }
}

// === External Encoder ===

/// Writes an executable shell script that stands in for ffmpeg: it copies
/// the `-i` input (7th argument) to the output (12th argument)
#[cfg(target_os = "linux")]
fn copy_script(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-ffmpeg.sh");
    fs::write(
        &script,
        "#!/bin/sh\ntest -f \"$7\" || { echo \"missing input: $7\" >&2; exit 1; }\ncp \"$7\" \"${12}\"\n",
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

#[cfg(target_os = "linux")]
#[test]
fn test_subprocess_encoder_with_non_utf8_directory() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let root = tempdir().unwrap();
    let out = root.path().join(OsStr::from_bytes(b"sounds_\xff"));

    let mut config = config_in(&out, &NOTE_FREQUENCIES[..2]);
    config.encoder.program = copy_script(root.path()).display().to_string();

    let encoder = FfmpegEncoder::new(config.encoder.clone()).unwrap();
    let mut sink = FsAssetSink::new(&out, "note", encoder);
    let report = Pipeline::new(config).unwrap().run(&mut sink).unwrap();

    assert!(report.is_success());
    assert_eq!(file_names(&out), vec!["note0.mp3", "note1.mp3"]);
}

// === Real Encoder ===

/// Runs only where ffmpeg is installed
#[test]
fn test_ffmpeg_end_to_end() {
    let root = tempdir().unwrap();
    let out: PathBuf = root.path().join("assets").join("sounds");
    let config = config_in(&out, &NOTE_FREQUENCIES);

    let encoder = match FfmpegEncoder::new(config.encoder.clone()) {
        Ok(encoder) => encoder,
        Err(_) => return,
    };

    let mut sink = FsAssetSink::new(&out, "note", encoder);
    let report = match Pipeline::new(config).unwrap().run(&mut sink) {
        Ok(report) => report,
        // ffmpeg without libmp3lame
        Err(ToneError::EncoderFailed { .. }) => return,
        Err(other) => panic!("Unexpected failure: {}", other),
    };

    assert_eq!(report.encoded_count(), 7);
    let names = file_names(&out);
    assert_eq!(names, (0..7).map(|i| format!("note{}.mp3", i)).collect::<Vec<_>>());
    for name in names {
        assert!(fs::metadata(out.join(name)).unwrap().len() > 0);
    }
}

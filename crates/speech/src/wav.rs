//! WAV file helpers.

use std::path::Path;

use scriptreel_common::error::{ReelError, ReelResult};

/// Duration of a WAV file in seconds (`frames / sample_rate`).
pub fn wav_duration_secs(path: &Path) -> ReelResult<f64> {
    if !path.exists() {
        return Err(ReelError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let reader = hound::WavReader::open(path)
        .map_err(|e| ReelError::speech(format!("Failed to open WAV {}: {e}", path.display())))?;
    let spec = reader.spec();
    if spec.sample_rate == 0 || spec.channels == 0 {
        return Err(ReelError::speech(format!(
            "WAV {} has an invalid header",
            path.display()
        )));
    }

    let frames = reader.duration() as f64;
    Ok(frames / spec.sample_rate as f64)
}

/// Write `duration_secs` of mono 16-bit silence.
///
/// The file holds `floor(duration_secs * sample_rate)` frames.
pub fn write_silence(path: &Path, duration_secs: f64, sample_rate: u32) -> ReelResult<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).map_err(|e| {
        ReelError::speech(format!("Failed to create WAV file {}: {e}", path.display()))
    })?;

    let frames = (duration_secs.max(0.0) * sample_rate as f64) as u64;
    for _ in 0..frames {
        writer
            .write_sample(0i16)
            .map_err(|e| ReelError::speech(format!("Failed to write audio sample: {e}")))?;
    }

    writer
        .finalize()
        .map_err(|e| ReelError::speech(format!("Failed to finalize WAV file: {e}")))?;

    Ok(())
}

//! Silence fallback synthesizer.
//!
//! Used when no speech engine is installed. Writes silence for the
//! estimated speaking time so scene timing still follows the script.

use std::path::Path;

use scriptreel_common::error::ReelResult;

use crate::synthesizer::{estimate_duration, SpeechSynthesizer, Synthesis, SynthesisSource};
use crate::wav::write_silence;

pub struct SilenceSynthesizer {
    rate_wpm: u32,
    sample_rate: u32,
}

impl SilenceSynthesizer {
    pub fn new(rate_wpm: u32, sample_rate: u32) -> Self {
        Self {
            rate_wpm,
            sample_rate: sample_rate.max(1),
        }
    }
}

impl SpeechSynthesizer for SilenceSynthesizer {
    fn synthesize(&mut self, text: &str, out_wav: &Path) -> ReelResult<Synthesis> {
        let duration_secs = estimate_duration(text, self.rate_wpm);
        write_silence(out_wav, duration_secs, self.sample_rate)?;
        tracing::debug!(
            path = %out_wav.display(),
            duration_secs,
            "Wrote silence for line"
        );
        Ok(Synthesis {
            path: out_wav.to_path_buf(),
            duration_secs,
            source: SynthesisSource::Silence,
        })
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "silence"
    }
}

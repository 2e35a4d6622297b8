//! Speech synthesis contract and engine selection.

use std::path::{Path, PathBuf};

use scriptreel_common::config::SpeechDefaults;
use scriptreel_common::error::ReelResult;

use crate::espeak::EspeakSynthesizer;
use crate::silence::SilenceSynthesizer;

/// Shortest estimated duration for a line.
pub const MIN_ESTIMATED_SECS: f64 = 0.8;

/// Speech synthesis parameters for one request.
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    /// Engine binary invoked for real synthesis.
    pub engine: String,

    /// Speaking rate in words per minute.
    pub rate_wpm: u32,

    /// Language hint, e.g. "en-US".
    pub language: String,

    /// Voice name; empty selects the engine voice for `language`.
    pub voice: String,

    /// Sample rate of silence fallback audio.
    pub sample_rate: u32,

    /// Skip the engine and always synthesize silence.
    pub force_silence: bool,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self::from_defaults(&SpeechDefaults::default())
    }
}

impl SpeechConfig {
    pub fn from_defaults(defaults: &SpeechDefaults) -> Self {
        Self {
            engine: defaults.engine.clone(),
            rate_wpm: defaults.rate_wpm,
            language: defaults.language.clone(),
            voice: defaults.voice.clone(),
            sample_rate: defaults.sample_rate,
            force_silence: defaults.force_silence,
        }
    }
}

/// Where a synthesized clip came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisSource {
    /// Spoken audio from the TTS engine.
    Engine,
    /// Silence sized by the duration estimate.
    Silence,
}

/// A synthesized clip on disk.
#[derive(Debug, Clone)]
pub struct Synthesis {
    /// WAV file written by the synthesizer.
    pub path: PathBuf,

    /// Playback duration in seconds.
    pub duration_secs: f64,

    pub source: SynthesisSource,
}

/// Turns one line of text into a WAV file and reports its duration.
pub trait SpeechSynthesizer: Send {
    /// Synthesize `text` into `out_wav`.
    fn synthesize(&mut self, text: &str, out_wav: &Path) -> ReelResult<Synthesis>;

    /// Check if this synthesizer can run on the system.
    fn is_available(&self) -> bool;

    /// Synthesizer name.
    fn name(&self) -> &str;
}

/// Estimate spoken duration from word count and speaking rate.
///
/// `max(0.8, words / words_per_second)`, counting at least one word.
pub fn estimate_duration(text: &str, rate_wpm: u32) -> f64 {
    let words = text.split_whitespace().count().max(1) as f64;
    let words_per_sec = (rate_wpm as f64 / 60.0).max(1e-3);
    (words / words_per_sec).max(MIN_ESTIMATED_SECS)
}

/// Pick the engine if it is installed, otherwise fall back to silence.
pub fn build_synthesizer(config: &SpeechConfig) -> Box<dyn SpeechSynthesizer> {
    if config.force_silence {
        tracing::info!("Speech engine disabled; using silence fallback");
        return Box::new(SilenceSynthesizer::new(config.rate_wpm, config.sample_rate));
    }

    let engine = EspeakSynthesizer::new(config);
    if engine.is_available() {
        tracing::info!(engine = engine.name(), voice = %engine.voice(), "Using speech engine");
        Box::new(engine)
    } else {
        tracing::warn!(
            engine = %config.engine,
            "Speech engine not found in PATH; using silence fallback"
        );
        Box::new(SilenceSynthesizer::new(config.rate_wpm, config.sample_rate))
    }
}

//! ScriptReel Speech
//!
//! Produces one spoken-audio WAV per script line and reports its duration:
//! - **Engine:** an external TTS process (espeak-ng by default)
//! - **Silence:** a fallback that writes silence for an estimated duration
//! - **WAV helpers:** duration probing and silence encoding

pub mod espeak;
pub mod silence;
pub mod synthesizer;
pub mod wav;

pub use espeak::EspeakSynthesizer;
pub use silence::SilenceSynthesizer;
pub use synthesizer::*;

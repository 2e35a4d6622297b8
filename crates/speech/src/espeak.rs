//! External TTS engine (espeak-ng compatible command line).

use std::io::{Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use scriptreel_common::error::{ReelError, ReelResult};
use scriptreel_common::process::command_exists;

use crate::synthesizer::{SpeechConfig, SpeechSynthesizer, Synthesis, SynthesisSource};
use crate::wav::wav_duration_secs;

/// Runs `<engine> -s <wpm> -v <voice> -w <out.wav> --stdin` per line and
/// measures the WAV it writes.
pub struct EspeakSynthesizer {
    binary: String,
    rate_wpm: u32,
    voice: String,
}

impl EspeakSynthesizer {
    pub fn new(config: &SpeechConfig) -> Self {
        let voice = if config.voice.trim().is_empty() {
            config.language.trim().to_ascii_lowercase()
        } else {
            config.voice.trim().to_string()
        };
        Self {
            binary: config.engine.clone(),
            rate_wpm: config.rate_wpm.max(1),
            voice,
        }
    }

    /// Voice passed to the engine.
    pub fn voice(&self) -> &str {
        &self.voice
    }

    fn command_args(&self, out_wav: &Path) -> Vec<String> {
        let mut args = vec!["-s".to_string(), self.rate_wpm.to_string()];
        if !self.voice.is_empty() {
            args.push("-v".to_string());
            args.push(self.voice.clone());
        }
        args.push("-w".to_string());
        args.push(out_wav.display().to_string());
        args.push("--stdin".to_string());
        args
    }
}

impl SpeechSynthesizer for EspeakSynthesizer {
    fn synthesize(&mut self, text: &str, out_wav: &Path) -> ReelResult<Synthesis> {
        let args = self.command_args(out_wav);
        tracing::debug!(binary = %self.binary, args = ?args, "Running speech engine");

        let mut child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ReelError::speech(format!("Failed to start {}: {e}", self.binary)))?;

        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| ReelError::speech("Failed to open speech engine stdin"))?;
            stdin.write_all(text.as_bytes())?;
            stdin.write_all(b"\n")?;
        }

        let mut stderr_output = String::new();
        if let Some(mut stderr) = child.stderr.take() {
            stderr.read_to_string(&mut stderr_output).ok();
        }

        let status = child
            .wait()
            .map_err(|e| ReelError::speech(format!("Failed to wait on {}: {e}", self.binary)))?;
        if !status.success() {
            return Err(ReelError::speech(format!(
                "{} failed (status {}): {}",
                self.binary,
                status,
                stderr_output.trim()
            )));
        }

        let duration_secs = wav_duration_secs(out_wav)?;
        if duration_secs <= 0.0 {
            return Err(ReelError::speech(format!(
                "{} produced empty audio for {:?}",
                self.binary, text
            )));
        }

        tracing::debug!(path = %out_wav.display(), duration_secs, "Synthesized line");
        Ok(Synthesis {
            path: out_wav.to_path_buf(),
            duration_secs,
            source: SynthesisSource::Engine,
        })
    }

    fn is_available(&self) -> bool {
        command_exists(&self.binary)
    }

    fn name(&self) -> &str {
        &self.binary
    }
}

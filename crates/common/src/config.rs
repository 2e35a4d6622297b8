//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory where generation jobs are written.
    pub output_dir: PathBuf,

    /// Speech synthesis defaults.
    pub speech: SpeechDefaults,

    /// Rendering defaults.
    pub render: RenderDefaults,

    /// Per-request generation defaults.
    pub generation: GenerationDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default speech synthesis parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechDefaults {
    /// Speech engine binary (invoked as an external process).
    pub engine: String,

    /// Speaking rate in words per minute.
    pub rate_wpm: u32,

    /// Language hint, e.g. "en-US".
    pub language: String,

    /// Voice name; empty selects the engine's voice for `language`.
    pub voice: String,

    /// Sample rate of the silence fallback.
    pub sample_rate: u32,

    /// Skip the engine and always synthesize silence.
    pub force_silence: bool,
}

/// Default rendering parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderDefaults {
    /// Output frame rate.
    pub fps: u32,

    /// Video codec passed to ffmpeg.
    pub video_codec: String,

    /// Audio codec passed to ffmpeg.
    pub audio_codec: String,

    /// Encoder thread count.
    pub threads: u32,

    /// Sample rate of the extracted audio mix.
    pub mix_sample_rate: u32,

    /// Optional TrueType font for captions.
    pub font_file: Option<PathBuf>,

    /// Caption font size in pixels.
    pub font_size: u32,
}

/// Defaults applied when a request leaves a field unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationDefaults {
    /// Ceiling on total video length in seconds.
    pub target_secs: f64,

    /// Background style name ("gradient" or "solid").
    pub style: String,

    /// Aspect name ("vertical", "square" or "landscape").
    pub aspect: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "scriptreel=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            speech: SpeechDefaults::default(),
            render: RenderDefaults::default(),
            generation: GenerationDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SpeechDefaults {
    fn default() -> Self {
        Self {
            engine: "espeak-ng".to_string(),
            rate_wpm: 170,
            language: "en-US".to_string(),
            voice: String::new(),
            sample_rate: 22050,
            force_silence: false,
        }
    }
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            fps: 30,
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            threads: 4,
            mix_sample_rate: 44100,
            font_file: None,
            font_size: 78,
        }
    }
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            target_secs: 60.0,
            style: "gradient".to_string(),
            aspect: "vertical".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("scriptreel").join("config.json")
}

/// Default output directory for generation jobs.
fn default_output_dir() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("scriptreel").join("outputs")
}

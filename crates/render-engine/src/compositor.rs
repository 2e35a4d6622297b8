//! Scene compositor: combines background, caption, and narration.
//!
//! This module defines the composition of each scene that the render
//! backend turns into encoder instructions.

use std::path::PathBuf;

use scriptreel_common::config::RenderDefaults;
use scriptreel_script_model::job::JobDir;
use scriptreel_script_model::request::{AspectMode, BackgroundStyle};
use scriptreel_script_model::segment::ScenePlan;

/// Caption wrap width in characters.
pub const CAPTION_MAX_CHARS: usize = 36;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Hex form accepted by ffmpeg color options (`0xRRGGBB`).
    pub fn to_ffmpeg_hex(&self) -> String {
        format!("0x{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Scene background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    /// Linear vertical gradient.
    Gradient { top: Rgb, bottom: Rgb },
    /// Flat fill.
    Solid(Rgb),
}

impl Background {
    pub fn for_style(style: BackgroundStyle) -> Self {
        match style {
            BackgroundStyle::Gradient => Background::Gradient {
                top: Rgb(30, 34, 56),
                bottom: Rgb(8, 8, 12),
            },
            BackgroundStyle::Solid => Background::Solid(Rgb(12, 12, 16)),
        }
    }
}

/// Slow linear zoom across a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRamp {
    pub start: f64,
    pub end: f64,
}

impl Default for ZoomRamp {
    fn default() -> Self {
        Self {
            start: 1.0,
            end: 1.06,
        }
    }
}

impl ZoomRamp {
    /// zoompan `z` expression reaching `end` on the last of `frames` output frames.
    pub fn zoompan_expr(&self, frames: u64) -> String {
        format!(
            "{:.4}+{:.4}*on/{}",
            self.start,
            self.end - self.start,
            frames.max(1)
        )
    }
}

/// Narration fades applied at scene edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioFade {
    pub fade_in_secs: f64,
    pub fade_out_secs: f64,
}

impl Default for AudioFade {
    fn default() -> Self {
        Self {
            fade_in_secs: 0.05,
            fade_out_secs: 0.1,
        }
    }
}

impl AudioFade {
    /// When the fade-out begins in a scene of `duration_secs`.
    pub fn fade_out_start(&self, duration_secs: f64) -> f64 {
        (duration_secs - self.fade_out_secs).max(0.0)
    }
}

/// Caption typography.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionStyle {
    /// Optional TrueType font; the encoder default is used otherwise.
    pub font_file: Option<PathBuf>,
    pub font_size: u32,
    /// Extra pixels between wrapped lines.
    pub line_spacing: u32,
    /// Drop-shadow offset in pixels.
    pub shadow_offset: u32,
    /// Drop-shadow opacity (0-255).
    pub shadow_alpha: u8,
    pub max_chars: usize,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_file: None,
            font_size: 78,
            line_spacing: 12,
            shadow_offset: 2,
            shadow_alpha: 180,
            max_chars: CAPTION_MAX_CHARS,
        }
    }
}

/// Per-request composition settings.
#[derive(Debug, Clone)]
pub struct CompositionConfig {
    pub width: u32,
    pub height: u32,
    pub background: Background,
    pub caption: CaptionStyle,
    pub zoom: ZoomRamp,
    pub fade: AudioFade,
}

impl CompositionConfig {
    pub fn new(aspect: AspectMode, style: BackgroundStyle, render: &RenderDefaults) -> Self {
        let (width, height) = aspect.dimensions();
        Self {
            width,
            height,
            background: Background::for_style(style),
            caption: CaptionStyle {
                font_file: render.font_file.clone(),
                font_size: render.font_size.max(1),
                ..CaptionStyle::default()
            },
            zoom: ZoomRamp::default(),
            fade: AudioFade::default(),
        }
    }
}

/// Everything needed to render one scene.
#[derive(Debug, Clone)]
pub struct SceneComposition {
    /// Zero-based scene index.
    pub index: usize,

    /// Caption text, already wrapped.
    pub caption: String,

    /// Scheduled duration; the render is clipped to this.
    pub duration_secs: f64,

    /// Narration WAV.
    pub audio_path: PathBuf,

    /// Where the caption text is written for the encoder.
    pub caption_path: PathBuf,

    /// Intermediate render of this scene.
    pub render_path: PathBuf,
}

impl SceneComposition {
    /// Number of frames this scene occupies at `fps`.
    pub fn frame_count(&self, fps: u32) -> u64 {
        ((self.duration_secs * fps as f64).ceil() as u64).max(1)
    }
}

/// Compute the composition of each scheduled scene.
///
/// Scene `i` uses the narration at `job.scene_audio_path(i)`. A truncated
/// last scene reuses its full narration; the render clips it.
pub fn compose_scenes(plan: &ScenePlan, job: &JobDir, config: &CompositionConfig) -> Vec<SceneComposition> {
    plan.iter()
        .enumerate()
        .map(|(index, segment)| SceneComposition {
            index,
            caption: wrap_caption(&segment.text, config.caption.max_chars),
            duration_secs: segment.duration_secs,
            audio_path: job.scene_audio_path(index),
            caption_path: job.scene_caption_path(index),
            render_path: job.scene_video_path(index),
        })
        .collect()
}

/// Greedy word wrap at `max_chars` characters per line.
///
/// Existing line breaks are kept; words longer than a line are split.
pub fn wrap_caption(text: &str, max_chars: usize) -> String {
    let max_chars = max_chars.max(1);
    let mut lines: Vec<String> = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while !word.is_empty() {
                let needed = if current_len == 0 {
                    word.len()
                } else {
                    current_len + 1 + word.len()
                };
                if needed <= max_chars {
                    if current_len > 0 {
                        current.push(' ');
                        current_len += 1;
                    }
                    current.extend(word.iter());
                    current_len += word.len();
                    break;
                }
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                    continue;
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }
        }

        if current_len > 0 || lines.is_empty() || paragraph.trim().is_empty() {
            lines.push(current);
        }
    }

    lines.join("\n")
}

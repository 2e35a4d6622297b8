//! Generation request options.

use std::fmt;
use std::str::FromStr;

use scriptreel_common::error::{ReelError, ReelResult};
use serde::{Deserialize, Serialize};

use crate::script::Script;

/// Default ceiling on output length.
pub const DEFAULT_TARGET_SECS: f64 = 60.0;

/// Background drawn behind each caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundStyle {
    /// Vertical gradient from slate blue to near-black.
    #[default]
    Gradient,
    /// Flat near-black fill.
    Solid,
}

impl BackgroundStyle {
    /// Lenient lookup: anything other than "solid" is a gradient.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundStyle::Gradient => "gradient",
            BackgroundStyle::Solid => "solid",
        }
    }
}

impl FromStr for BackgroundStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gradient" => Ok(BackgroundStyle::Gradient),
            "solid" => Ok(BackgroundStyle::Solid),
            other => Err(format!("Unknown style: {other}. Use: gradient, solid")),
        }
    }
}

impl fmt::Display for BackgroundStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output frame shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AspectMode {
    /// 9:16 portrait, 1080x1920.
    #[default]
    Vertical,
    /// 1:1, 1080x1080.
    Square,
    /// 16:9 widescreen, 1920x1080.
    Landscape,
}

impl AspectMode {
    /// Output resolution in pixels as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            AspectMode::Vertical => (1080, 1920),
            AspectMode::Square => (1080, 1080),
            AspectMode::Landscape => (1920, 1080),
        }
    }

    /// Lenient lookup: unknown names fall back to vertical.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectMode::Vertical => "vertical",
            AspectMode::Square => "square",
            AspectMode::Landscape => "landscape",
        }
    }
}

impl FromStr for AspectMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" => Ok(AspectMode::Vertical),
            "square" => Ok(AspectMode::Square),
            "landscape" => Ok(AspectMode::Landscape),
            other => Err(format!(
                "Unknown aspect: {other}. Use: vertical, square, landscape"
            )),
        }
    }
}

impl fmt::Display for AspectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to generate one video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Raw script text; one scene per non-empty line.
    pub script: String,

    /// Language hint for speech synthesis.
    pub language: String,

    /// Voice name; empty selects the default voice for `language`.
    pub voice: String,

    /// Background style.
    pub style: BackgroundStyle,

    /// Output frame shape.
    pub aspect: AspectMode,

    /// Ceiling on total video length in seconds.
    pub target_secs: f64,
}

impl GenerationRequest {
    /// Create a request with default options.
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            language: "en-US".to_string(),
            voice: String::new(),
            style: BackgroundStyle::default(),
            aspect: AspectMode::default(),
            target_secs: DEFAULT_TARGET_SECS,
        }
    }

    /// Validate the request and parse its script.
    ///
    /// Runs before any synthesis or rendering work.
    pub fn validate(&self) -> ReelResult<Script> {
        if !self.target_secs.is_finite() || self.target_secs <= 0.0 {
            return Err(ReelError::config(format!(
                "Target duration must be a positive number of seconds, got {}",
                self.target_secs
            )));
        }
        Ok(Script::parse(&self.script)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_dimensions() {
        assert_eq!(AspectMode::Vertical.dimensions(), (1080, 1920));
        assert_eq!(AspectMode::Square.dimensions(), (1080, 1080));
        assert_eq!(AspectMode::Landscape.dimensions(), (1920, 1080));
    }

    #[test]
    fn test_lenient_names_fall_back_to_defaults() {
        assert_eq!(
            AspectMode::from_name_or_default("cinema"),
            AspectMode::Vertical
        );
        assert_eq!(
            AspectMode::from_name_or_default("Landscape"),
            AspectMode::Landscape
        );
        assert_eq!(
            BackgroundStyle::from_name_or_default("plaid"),
            BackgroundStyle::Gradient
        );
        assert_eq!(
            BackgroundStyle::from_name_or_default("solid"),
            BackgroundStyle::Solid
        );
    }

    #[test]
    fn test_strict_parse_reports_choices() {
        let err = "cinema".parse::<AspectMode>().unwrap_err();
        assert!(err.contains("vertical, square, landscape"));
    }

    #[test]
    fn test_validate_rejects_empty_script() {
        let request = GenerationRequest::new("  \n \n");
        let err = request.validate().unwrap_err();
        assert!(matches!(err, ReelError::Script { .. }));
    }

    #[test]
    fn test_validate_rejects_non_positive_target() {
        let mut request = GenerationRequest::new("Hello");
        request.target_secs = 0.0;
        assert!(matches!(
            request.validate().unwrap_err(),
            ReelError::Config { .. }
        ));
        request.target_secs = f64::NAN;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_validate_returns_parsed_script() {
        let request = GenerationRequest::new("Hello\n\nWorld\n");
        let script = request.validate().unwrap();
        assert_eq!(script.len(), 2);
    }
}

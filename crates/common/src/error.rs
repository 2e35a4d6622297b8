//! Error types shared across ScriptReel crates.

use std::path::PathBuf;

/// Top-level error type for ScriptReel operations.
#[derive(Debug, thiserror::Error)]
pub enum ReelError {
    #[error("Script error: {message}")]
    Script { message: String },

    #[error("Speech synthesis error: {message}")]
    Speech { message: String },

    #[error("Timing error: {message}")]
    Timing { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Job error: {message}")]
    Job { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ReelError.
pub type ReelResult<T> = Result<T, ReelError>;

impl ReelError {
    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script {
            message: msg.into(),
        }
    }

    pub fn speech(msg: impl Into<String>) -> Self {
        Self::Speech {
            message: msg.into(),
        }
    }

    pub fn timing(msg: impl Into<String>) -> Self {
        Self::Timing {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn job(msg: impl Into<String>) -> Self {
        Self::Job {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }

    /// Whether this error is a problem with the caller's input rather than
    /// with synthesis or rendering.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Script { .. } | Self::Config { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_messages() {
        let err = ReelError::script("Script has no non-empty lines.");
        assert_eq!(
            err.to_string(),
            "Script error: Script has no non-empty lines."
        );
        assert!(err.is_validation());

        let err = ReelError::render("ffmpeg exited with status 1");
        assert!(err.to_string().starts_with("Render error:"));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_io_conversion_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing wav");
        let err: ReelError = io.into();
        assert_eq!(err.to_string(), "missing wav");
    }
}

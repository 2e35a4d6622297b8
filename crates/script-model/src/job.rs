//! Job directories and manifests.
//!
//! Every generation request gets its own directory under the output root:
//!
//! ```text
//! <output_root>/<job_id>/
//! ├── scene_01.wav ...   (per-line speech audio)
//! ├── scene_01.mp4 ...   (per-scene renders, intermediate)
//! ├── <base>.mp4         (final video)
//! ├── <base>.srt         (subtitles)
//! ├── <base>.wav         (extracted audio mix, optional)
//! └── job.json           (manifest)
//! ```

use std::path::{Path, PathBuf};

use scriptreel_common::error::ReelError;
use serde::{Deserialize, Serialize};

use crate::request::{AspectMode, BackgroundStyle, GenerationRequest};
use crate::segment::ScenePlan;

/// Manifest file name inside a job directory.
pub const MANIFEST_FILE: &str = "job.json";

/// A per-request output directory.
#[derive(Debug, Clone)]
pub struct JobDir {
    /// Output root the job lives under.
    pub output_root: PathBuf,

    /// Short job identifier (8 hex chars).
    pub id: String,

    /// Absolute or root-relative path of the job directory.
    pub dir: PathBuf,

    /// Shared file stem of the final artifacts.
    pub basename: String,
}

impl JobDir {
    /// Create a fresh job directory under `output_root`.
    pub fn create(output_root: impl AsRef<Path>) -> Result<Self, JobError> {
        let output_root = output_root.as_ref().to_path_buf();
        let id = short_id();
        let dir = output_root.join(&id);
        std::fs::create_dir_all(&dir).map_err(|e| JobError::IoError {
            path: dir.clone(),
            source: e,
        })?;

        tracing::debug!(job_id = %id, dir = %dir.display(), "Created job directory");

        Ok(Self {
            output_root,
            id,
            dir,
            basename: short_id(),
        })
    }

    /// Speech audio for the scene at zero-based `index`.
    pub fn scene_audio_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.wav", scene_stem(index)))
    }

    /// Intermediate render for the scene at zero-based `index`.
    pub fn scene_video_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.mp4", scene_stem(index)))
    }

    /// Caption text file for the scene at zero-based `index`.
    pub fn scene_caption_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.txt", scene_stem(index)))
    }

    pub fn video_path(&self) -> PathBuf {
        self.dir.join(format!("{}.mp4", self.basename))
    }

    pub fn subtitles_path(&self) -> PathBuf {
        self.dir.join(format!("{}.srt", self.basename))
    }

    pub fn audio_path(&self) -> PathBuf {
        self.dir.join(format!("{}.wav", self.basename))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_FILE)
    }

    /// Path relative to the output root, with forward slashes.
    pub fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.output_root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn scene_stem(index: usize) -> String {
    format!("scene_{:02}", index + 1)
}

fn short_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Request parameters recorded in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestSummary {
    pub language: String,
    pub voice: String,
    pub style: BackgroundStyle,
    pub aspect: AspectMode,
    pub target_secs: f64,
    /// Number of non-empty script lines.
    pub lines: usize,
}

impl RequestSummary {
    pub fn from_request(request: &GenerationRequest, lines: usize) -> Self {
        Self {
            language: request.language.clone(),
            voice: request.voice.clone(),
            style: request.style,
            aspect: request.aspect,
            target_secs: request.target_secs,
            lines,
        }
    }
}

/// Output artifacts, relative to the output root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobArtifacts {
    pub video: String,
    pub subtitles: String,
    #[serde(default)]
    pub audio: Option<String>,
}

/// Top-level job file (`job.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobManifest {
    /// Schema version.
    pub version: String,

    pub job_id: String,

    /// Creation timestamp (RFC 3339).
    pub created_at: String,

    pub request: RequestSummary,

    pub artifacts: JobArtifacts,

    /// Scenes as rendered.
    pub plan: ScenePlan,
}

impl JobManifest {
    pub fn new(
        job: &JobDir,
        request: RequestSummary,
        artifacts: JobArtifacts,
        plan: ScenePlan,
    ) -> Self {
        Self {
            version: "1.0".to_string(),
            job_id: job.id.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
            request,
            artifacts,
            plan,
        }
    }

    /// Write the manifest into the job directory.
    pub fn save(&self, job: &JobDir) -> Result<(), JobError> {
        let path = job.manifest_path();
        let json = serde_json::to_string_pretty(self).map_err(|e| JobError::ParseError {
            path: path.clone(),
            source: e,
        })?;
        std::fs::write(&path, json).map_err(|e| JobError::IoError { path, source: e })
    }

    /// Load the manifest from a job directory.
    pub fn load(job_dir: impl AsRef<Path>) -> Result<Self, JobError> {
        let path = job_dir.as_ref().join(MANIFEST_FILE);
        let json = std::fs::read_to_string(&path).map_err(|e| JobError::IoError {
            path: path.clone(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| JobError::ParseError { path, source: e })
    }
}

/// Errors that can occur when working with job directories.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl From<JobError> for ReelError {
    fn from(err: JobError) -> Self {
        ReelError::job(err.to_string())
    }
}

//! ScriptReel Render Engine
//!
//! Turns a scene plan into a narrated slideshow video by driving an
//! external encoder, and runs the end-to-end generation pipeline.
//!
//! # Pipeline Architecture
//!
//! ```text
//! script ──► synthesize (scene_NN.wav) ──► schedule (ScenePlan)
//!                                               │
//!                                               ▼
//!                                        compose scenes
//!                                               │
//!               ┌───────────────────────────────┤
//!               ▼                               ▼
//!   render scene_NN.mp4 (ffmpeg)          subtitles (.srt)
//!               │
//!               ▼
//!   concat ──► <base>.mp4 ──► extract ──► <base>.wav
//!                                               │
//!                                               ▼
//!                                           job.json
//! ```

pub mod compositor;
pub mod export;
pub mod pipeline;

pub use export::*;
pub use pipeline::{estimate_plan, generate_video, GenerationOutput};

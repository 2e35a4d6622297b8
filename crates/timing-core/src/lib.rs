//! ScriptReel Timing Core
//!
//! Turns spoken-audio durations into a playable timeline:
//! - **Scheduler:** trim a segment sequence to a target duration
//! - **Subtitles:** contiguous subtitle entries and SRT/VTT serialization
//!
//! This crate is pure computation apart from `save_subtitles`.
//! All inputs are data; all outputs are data.

pub mod error;
pub mod scheduler;
pub mod subtitles;

pub use error::TimingError;
pub use scheduler::{schedule, MIN_SCENE_SECS, TRUNCATION_MARKER};
pub use subtitles::*;

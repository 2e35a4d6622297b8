//! ScriptReel Script Model
//!
//! Defines the data contracts shared by the generation pipeline:
//! - **Script:** ordered, trimmed, non-empty lines parsed from input text
//! - **Segment / ScenePlan:** lines paired with spoken-audio durations
//! - **Request:** per-generation options (style, aspect, target duration)
//! - **Job:** the per-request output directory and its manifest

pub mod job;
pub mod request;
pub mod script;
pub mod segment;

pub use job::*;
pub use request::*;
pub use script::*;
pub use segment::*;

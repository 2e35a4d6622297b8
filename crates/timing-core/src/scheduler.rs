//! Scene timing scheduler.
//!
//! Fits a sequence of spoken segments into a target duration.
//!
//! # Algorithm
//!
//! 1. Walk segments in order, accumulating their durations.
//! 2. Keep every segment whose end still fits inside the budget.
//! 3. The first segment that would overflow is cut to the remaining
//!    budget (never below [`MIN_SCENE_SECS`]), marked with
//!    [`TRUNCATION_MARKER`], and becomes the last scene.
//!
//! When the whole input fits, it is returned unchanged. The floor can push
//! the total slightly past very small budgets; at least one scene is always
//! produced.

use scriptreel_script_model::segment::{ScenePlan, Segment};

use crate::error::TimingError;

/// Shortest duration a truncated scene is given.
pub const MIN_SCENE_SECS: f64 = 0.3;

/// Appended to the text of a scene whose audio was cut short.
pub const TRUNCATION_MARKER: &str = " …";

/// Trim `segments` to fit `target_secs`.
///
/// Callers must reject empty scripts before getting here; an empty input is
/// reported as [`TimingError::NoSegments`].
pub fn schedule(segments: &[Segment], target_secs: f64) -> Result<ScenePlan, TimingError> {
    if segments.is_empty() {
        return Err(TimingError::NoSegments);
    }
    if !target_secs.is_finite() || target_secs <= 0.0 {
        return Err(TimingError::InvalidTarget(target_secs));
    }
    if let Some((index, segment)) = segments
        .iter()
        .enumerate()
        .find(|(_, s)| !s.duration_secs.is_finite() || s.duration_secs <= 0.0)
    {
        return Err(TimingError::InvalidDuration {
            index,
            duration: segment.duration_secs,
        });
    }

    let mut scheduled = Vec::with_capacity(segments.len());
    let mut running = 0.0f64;
    let mut truncated = false;

    for (index, segment) in segments.iter().enumerate() {
        if running + segment.duration_secs <= target_secs {
            running += segment.duration_secs;
            scheduled.push(segment.clone());
            continue;
        }

        let remaining = (target_secs - running).max(MIN_SCENE_SECS);
        tracing::debug!(
            scene = index + 1,
            original_secs = segment.duration_secs,
            remaining_secs = remaining,
            dropped = segments.len() - index - 1,
            "Truncating scene to fit target duration"
        );
        scheduled.push(Segment {
            text: format!("{}{}", segment.text, TRUNCATION_MARKER),
            duration_secs: remaining,
        });
        truncated = true;
        break;
    }

    Ok(ScenePlan {
        segments: scheduled,
        target_secs,
        truncated,
    })
}

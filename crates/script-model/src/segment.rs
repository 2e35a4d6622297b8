//! Segments and scene plans.

use serde::{Deserialize, Serialize};

/// One script line paired with its spoken-audio duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Caption text (a script line, possibly with a truncation marker).
    pub text: String,

    /// Spoken duration in seconds.
    pub duration_secs: f64,
}

impl Segment {
    pub fn new(text: impl Into<String>, duration_secs: f64) -> Self {
        Self {
            text: text.into(),
            duration_secs,
        }
    }
}

/// Sum of segment durations in seconds.
pub fn total_duration(segments: &[Segment]) -> f64 {
    segments.iter().map(|s| s.duration_secs).sum()
}

/// Segments after trimming to a target duration.
///
/// The segments are a prefix of the scheduler input. When `truncated` is
/// set, the last segment was shortened and carries the truncation marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePlan {
    /// Scheduled scenes, in playback order.
    pub segments: Vec<Segment>,

    /// Budget the plan was scheduled against.
    pub target_secs: f64,

    /// Whether the input exceeded the budget.
    pub truncated: bool,
}

impl ScenePlan {
    pub fn total_secs(&self) -> f64 {
        total_duration(&self.segments)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_duration() {
        let segments = vec![Segment::new("a", 1.25), Segment::new("b", 0.75)];
        assert!((total_duration(&segments) - 2.0).abs() < 1e-9);
        assert_eq!(total_duration(&[]), 0.0);
    }

    #[test]
    fn test_plan_serialization() {
        let plan = ScenePlan {
            segments: vec![Segment::new("Hello", 2.0), Segment::new("World …", 1.0)],
            target_secs: 3.0,
            truncated: true,
        };
        let json = serde_json::to_string(&plan).unwrap();
        let parsed: ScenePlan = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, plan);
        assert!((parsed.total_secs() - 3.0).abs() < 1e-9);
        assert_eq!(parsed.len(), 2);
    }
}

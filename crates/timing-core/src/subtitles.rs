//! Subtitle timeline generation in SRT and VTT formats.

use std::path::Path;

use scriptreel_common::error::ReelResult;
use scriptreel_script_model::segment::Segment;
use serde::{Deserialize, Serialize};

use crate::error::TimingError;

/// Tolerance (in milliseconds) for binary representation error when
/// truncating seconds to whole milliseconds.
const MS_EPSILON: f64 = 1e-6;

/// A single timed caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleEntry {
    /// 1-based sequence number.
    pub index: usize,
    /// Start time in seconds.
    pub start_secs: f64,
    /// End time in seconds.
    pub end_secs: f64,
    /// Caption text.
    pub text: String,
}

/// Supported subtitle file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    Srt,
    Vtt,
}

impl SubtitleFormat {
    /// Pick a format from a file extension, defaulting to SRT.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("vtt") => SubtitleFormat::Vtt,
            _ => SubtitleFormat::Srt,
        }
    }
}

/// Lay segments end to end on a clock starting at zero.
///
/// Each entry ends exactly where the next begins.
pub fn generate(segments: &[Segment]) -> Vec<SubtitleEntry> {
    let mut clock = 0.0f64;
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let start_secs = clock;
            let end_secs = clock + segment.duration_secs;
            clock = end_secs;
            SubtitleEntry {
                index: i + 1,
                start_secs,
                end_secs,
                text: segment.text.clone(),
            }
        })
        .collect()
}

/// Generate SRT subtitle content.
///
/// Blocks are `index\nstart --> end\ntext\n`, separated by a blank line.
pub fn generate_srt(entries: &[SubtitleEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}\n{} --> {}\n{}\n",
                entry.index,
                format_srt_time(entry.start_secs),
                format_srt_time(entry.end_secs),
                entry.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate WebVTT subtitle content.
pub fn generate_vtt(entries: &[SubtitleEntry]) -> String {
    let body = entries
        .iter()
        .map(|entry| {
            format!(
                "{} --> {}\n{}\n",
                format_vtt_time(entry.start_secs),
                format_vtt_time(entry.end_secs),
                entry.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("WEBVTT\n\n{body}")
}

/// Format seconds as SRT timestamp: HH:MM:SS,mmm
///
/// Sub-millisecond precision is truncated, never rounded up.
pub fn format_srt_time(secs: f64) -> String {
    format_time(secs, ',')
}

/// Format seconds as VTT timestamp: HH:MM:SS.mmm
pub fn format_vtt_time(secs: f64) -> String {
    format_time(secs, '.')
}

fn format_time(secs: f64, separator: char) -> String {
    let total_ms = (secs.max(0.0) * 1000.0 + MS_EPSILON).floor() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02}{separator}{millis:03}")
}

/// Parse an SRT timestamp (`HH:MM:SS,mmm`) into seconds.
pub fn parse_srt_time(value: &str) -> Result<f64, TimingError> {
    let invalid = || TimingError::InvalidTimestamp(value.to_string());

    let (clock, millis) = value.trim().split_once(',').ok_or_else(invalid)?;
    let mut parts = clock.split(':');
    let (Some(h), Some(m), Some(s), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let field = |raw: &str, width: usize| -> Result<u64, TimingError> {
        if raw.len() < width || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        raw.parse::<u64>().map_err(|_| invalid())
    };

    let hours = field(h, 2)?;
    let minutes = field(m, 2)?;
    let seconds = field(s, 2)?;
    if millis.len() != 3 {
        return Err(invalid());
    }
    let millis = field(millis, 3)?;
    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }

    let total_ms = ((hours * 60 + minutes) * 60 + seconds) * 1000 + millis;
    Ok(total_ms as f64 / 1000.0)
}

/// Save subtitles to a file, choosing the format from its extension.
pub fn save_subtitles(entries: &[SubtitleEntry], path: &Path) -> ReelResult<()> {
    let content = match SubtitleFormat::from_path(path) {
        SubtitleFormat::Vtt => generate_vtt(entries),
        SubtitleFormat::Srt => generate_srt(entries),
    };
    std::fs::write(path, content)?;
    tracing::debug!(path = %path.display(), entries = entries.len(), "Wrote subtitles");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_contiguous() {
        let entries = generate(&[
            Segment::new("Hello", 2.0),
            Segment::new("World …", 1.0),
        ]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].index, 1);
        assert_eq!(entries[0].start_secs, 0.0);
        assert_eq!(entries[0].end_secs, entries[1].start_secs);
        assert_eq!(entries[1].end_secs, 3.0);
    }

    #[test]
    fn test_srt_generation() {
        let entries = generate(&[
            Segment::new("Hello", 2.0),
            Segment::new("World …", 1.0),
        ]);
        let srt = generate_srt(&entries);
        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:02,000\nHello\n\n2\n00:00:02,000 --> 00:00:03,000\nWorld …\n"
        );
    }

    #[test]
    fn test_single_short_segment() {
        let srt = generate_srt(&generate(&[Segment::new("Hi", 0.1)]));
        assert_eq!(srt, "1\n00:00:00,000 --> 00:00:00,100\nHi\n");
    }

    #[test]
    fn test_vtt_generation() {
        let entries = vec![SubtitleEntry {
            index: 1,
            start_secs: 61.5,
            end_secs: 63.0,
            text: "One minute in".to_string(),
        }];

        let vtt = generate_vtt(&entries);
        assert!(vtt.starts_with("WEBVTT\n\n"));
        assert!(vtt.contains("00:01:01.500 --> 00:01:03.000\nOne minute in"));
    }

    #[test]
    fn test_time_formatting() {
        assert_eq!(format_srt_time(0.0), "00:00:00,000");
        assert_eq!(format_srt_time(3725.25), "01:02:05,250");
        assert_eq!(format_srt_time(3661.5), "01:01:01,500");
        assert_eq!(format_vtt_time(3661.5), "01:01:01.500");
    }

    #[test]
    fn test_time_formatting_truncates() {
        assert_eq!(format_srt_time(1.9999), "00:00:01,999");
        assert_eq!(format_srt_time(2.3), "00:00:02,300");
        assert_eq!(format_srt_time(-0.5), "00:00:00,000");
    }

    #[test]
    fn test_parse_srt_time() {
        assert_eq!(parse_srt_time("01:02:05,250").unwrap(), 3725.25);
        assert_eq!(parse_srt_time("00:00:00,100").unwrap(), 0.1);
        assert_eq!(parse_srt_time("100:00:00,000").unwrap(), 360_000.0);
    }

    #[test]
    fn test_parse_srt_time_rejects_malformed() {
        for bad in [
            "",
            "00:00:00.000",
            "00:00,000",
            "00:61:00,000",
            "00:00:00,00",
            "aa:00:00,000",
            "00:00:00:00,000",
        ] {
            assert!(parse_srt_time(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            SubtitleFormat::from_path(Path::new("out/captions.VTT")),
            SubtitleFormat::Vtt
        );
        assert_eq!(
            SubtitleFormat::from_path(Path::new("out/captions.srt")),
            SubtitleFormat::Srt
        );
        assert_eq!(
            SubtitleFormat::from_path(Path::new("captions")),
            SubtitleFormat::Srt
        );
    }

    #[test]
    fn test_save_subtitles_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let entries = generate(&[Segment::new("Hi", 1.0)]);

        let srt_path = dir.path().join("out.srt");
        save_subtitles(&entries, &srt_path).unwrap();
        assert!(std::fs::read_to_string(&srt_path)
            .unwrap()
            .starts_with("1\n00:00:00,000 --> 00:00:01,000"));

        let vtt_path = dir.path().join("out.vtt");
        save_subtitles(&entries, &vtt_path).unwrap();
        assert!(std::fs::read_to_string(&vtt_path)
            .unwrap()
            .starts_with("WEBVTT"));
    }

    proptest::proptest! {
        #[test]
        fn prop_timestamp_roundtrip(total_ms in 0u64..360_000_000) {
            let secs = total_ms as f64 / 1000.0;
            let text = format_srt_time(secs);
            let parsed = parse_srt_time(&text).unwrap();
            proptest::prop_assert_eq!(format_srt_time(parsed), text);
        }

        #[test]
        fn prop_entries_are_contiguous(durations in proptest::collection::vec(0.01f64..30.0, 1..40)) {
            let segments: Vec<Segment> = durations
                .iter()
                .enumerate()
                .map(|(i, d)| Segment::new(format!("line {i}"), *d))
                .collect();
            let entries = generate(&segments);

            proptest::prop_assert_eq!(entries.len(), segments.len());
            proptest::prop_assert_eq!(entries[0].start_secs, 0.0);
            for pair in entries.windows(2) {
                proptest::prop_assert_eq!(pair[0].end_secs, pair[1].start_secs);
                proptest::prop_assert_eq!(pair[0].index + 1, pair[1].index);
            }
            for entry in &entries {
                proptest::prop_assert!(entry.end_secs > entry.start_secs);
            }
        }
    }
}

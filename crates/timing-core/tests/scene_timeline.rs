use scriptreel_script_model::script::Script;
use scriptreel_script_model::segment::Segment;
use scriptreel_timing_core::{generate, generate_srt, schedule, TimingError};

fn segments_for(script: &str, secs_per_line: f64) -> Vec<Segment> {
    Script::parse(script)
        .expect("script should have lines")
        .iter()
        .map(|line| Segment::new(line.as_str(), secs_per_line))
        .collect()
}

#[test]
fn overflowing_script_produces_truncated_subtitles() {
    let segments = segments_for("Hello\n\nWorld\nGoodbye\n", 2.0);
    let plan = schedule(&segments, 3.0).unwrap();
    let srt = generate_srt(&generate(&plan.segments));

    assert_eq!(
        srt,
        "1\n00:00:00,000 --> 00:00:02,000\nHello\n\n\
         2\n00:00:02,000 --> 00:00:03,000\nWorld …\n"
    );
}

#[test]
fn short_script_keeps_original_timing() {
    let segments = vec![Segment::new("Hi", 0.1)];
    let plan = schedule(&segments, 60.0).unwrap();
    let entries = generate(&plan.segments);

    assert_eq!(entries.len(), 1);
    assert_eq!(
        generate_srt(&entries),
        "1\n00:00:00,000 --> 00:00:00,100\nHi\n"
    );
}

#[test]
fn subtitle_end_matches_scheduled_total() {
    let segments = segments_for("one\ntwo\nthree\nfour\nfive", 3.7);
    let plan = schedule(&segments, 10.0).unwrap();
    let entries = generate(&plan.segments);

    let last = entries.last().unwrap();
    assert!((last.end_secs - plan.total_secs()).abs() < 1e-9);
    assert!(plan.total_secs() <= 10.0 + 1e-9);
}

#[test]
fn empty_script_never_reaches_the_scheduler() {
    assert!(Script::parse("\n   \n").is_err());
    assert_eq!(schedule(&[], 60.0), Err(TimingError::NoSegments));
}

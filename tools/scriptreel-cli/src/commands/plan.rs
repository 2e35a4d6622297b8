//! Preview scene timing without synthesizing or rendering.

use std::path::PathBuf;

use scriptreel_common::config::AppConfig;
use scriptreel_render_engine::pipeline::estimate_plan;
use scriptreel_script_model::request::GenerationRequest;
use scriptreel_timing_core::{format_srt_time, generate, generate_srt, save_subtitles};

pub fn run(
    config: &AppConfig,
    script: String,
    target_seconds: Option<f64>,
    rate_wpm: Option<u32>,
    srt: Option<PathBuf>,
) -> anyhow::Result<()> {
    let text = super::read_script(&script)?;
    let request = GenerationRequest {
        target_secs: target_seconds.unwrap_or(config.generation.target_secs),
        ..GenerationRequest::new(text)
    };
    let rate_wpm = rate_wpm.unwrap_or(config.speech.rate_wpm);

    let plan = estimate_plan(&request, rate_wpm)?;
    let entries = generate(&plan.segments);

    println!(
        "Scene plan ({} scenes, {:.2}s of {}s target, {} wpm estimate)",
        plan.len(),
        plan.total_secs(),
        plan.target_secs,
        rate_wpm
    );
    for entry in &entries {
        println!(
            "  {:>3}. {} --> {}  {}",
            entry.index,
            format_srt_time(entry.start_secs),
            format_srt_time(entry.end_secs),
            entry.text
        );
    }
    if plan.truncated {
        println!("Script truncated to fit the target duration.");
    }

    match srt {
        Some(path) => {
            save_subtitles(&entries, &path)?;
            println!("Subtitles written to {}", path.display());
        }
        None => {
            println!();
            print!("{}", generate_srt(&entries));
        }
    }

    Ok(())
}

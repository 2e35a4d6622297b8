//! Show a job manifest.

use std::path::PathBuf;

use scriptreel_script_model::job::JobManifest;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let manifest =
        JobManifest::load(&path).map_err(|e| anyhow::anyhow!("Failed to load job: {e}"))?;

    println!("Job: {}", manifest.job_id);
    println!("  Created: {}", manifest.created_at);
    println!("  Manifest version: {}", manifest.version);
    println!();

    let r = &manifest.request;
    println!("Request:");
    println!("  Lines: {}", r.lines);
    println!("  Language: {}", r.language);
    if !r.voice.is_empty() {
        println!("  Voice: {}", r.voice);
    }
    println!("  Style: {}  Aspect: {}", r.style, r.aspect);
    println!("  Target: {}s", r.target_secs);
    println!();

    println!("Artifacts:");
    println!("  Video: {}", manifest.artifacts.video);
    println!("  Subtitles: {}", manifest.artifacts.subtitles);
    match &manifest.artifacts.audio {
        Some(audio) => println!("  Audio: {audio}"),
        None => println!("  Audio: (none)"),
    }
    println!();

    println!(
        "Scenes: {} ({:.2}s{})",
        manifest.plan.len(),
        manifest.plan.total_secs(),
        if manifest.plan.truncated {
            ", truncated"
        } else {
            ""
        }
    );
    for (i, segment) in manifest.plan.iter().enumerate() {
        println!("  {:>3}. [{:.2}s] {}", i + 1, segment.duration_secs, segment.text);
    }

    Ok(())
}

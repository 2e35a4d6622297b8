//! Generate a narrated video from a script.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use scriptreel_common::config::AppConfig;
use scriptreel_render_engine::export::{default_backend, ExportProgress, ExportStage};
use scriptreel_render_engine::pipeline::{generate_video, GenerationOutput};
use scriptreel_script_model::request::{AspectMode, BackgroundStyle, GenerationRequest};
use scriptreel_speech::synthesizer::{build_synthesizer, SpeechConfig};

/// Exit code used when generation exceeds `--timeout-secs`.
const TIMEOUT_EXIT_CODE: i32 = 124;

pub struct GenerateOptions {
    pub script: String,
    pub language: Option<String>,
    pub voice: Option<String>,
    pub style: Option<String>,
    pub aspect: Option<String>,
    pub target_seconds: Option<f64>,
    pub output: Option<PathBuf>,
    pub silent: bool,
    pub timeout_secs: Option<u64>,
    pub json: bool,
}

pub async fn run(config: AppConfig, options: GenerateOptions) -> anyhow::Result<()> {
    let text = super::read_script(&options.script)?;

    let style_name = options.style.unwrap_or(config.generation.style.clone());
    let aspect_name = options.aspect.unwrap_or(config.generation.aspect.clone());
    if style_name.parse::<BackgroundStyle>().is_err() {
        tracing::warn!(style = %style_name, "Unknown style; using gradient");
    }
    if aspect_name.parse::<AspectMode>().is_err() {
        tracing::warn!(aspect = %aspect_name, "Unknown aspect; using vertical");
    }

    let request = GenerationRequest {
        script: text,
        language: options
            .language
            .unwrap_or(config.speech.language.clone()),
        voice: options.voice.unwrap_or(config.speech.voice.clone()),
        style: BackgroundStyle::from_name_or_default(&style_name),
        aspect: AspectMode::from_name_or_default(&aspect_name),
        target_secs: options
            .target_seconds
            .unwrap_or(config.generation.target_secs),
    };

    // Reject bad input before touching external tools.
    request.validate()?;

    let mut backend = default_backend()?;

    let mut speech = SpeechConfig::from_defaults(&config.speech);
    speech.language = request.language.clone();
    speech.voice = request.voice.clone();
    speech.force_silence |= options.silent;

    let output_root = options.output.unwrap_or(config.output_dir.clone());
    let render = config.render.clone();

    println!("Generating video");
    println!("  Output root: {}", output_root.display());
    println!(
        "  Style: {}  Aspect: {}  Target: {}s",
        request.style, request.aspect, request.target_secs
    );

    let progress_cb: Box<dyn Fn(ExportProgress) + Send> = Box::new(|p| {
        let mut stderr = std::io::stderr();
        match p.stage {
            ExportStage::Rendering => {
                let _ = write!(
                    stderr,
                    "\r  Rendering: {:.1}% ({}/{} frames, ETA: {:.0}s)  ",
                    p.progress * 100.0,
                    p.frames_rendered,
                    p.total_frames,
                    p.eta_secs,
                );
            }
            ExportStage::Complete => {
                let _ = writeln!(stderr, "\r  Render complete{}", " ".repeat(40));
            }
            stage => {
                let _ = write!(stderr, "\r  {}...{}", stage.as_str(), " ".repeat(40));
            }
        }
        let _ = stderr.flush();
    });

    let task = tokio::task::spawn_blocking(move || {
        let mut synthesizer = build_synthesizer(&speech);
        generate_video(
            &request,
            &output_root,
            synthesizer.as_mut(),
            &render,
            backend.as_mut(),
            Some(progress_cb),
        )
    });

    let joined = match options.timeout_secs {
        Some(secs) => match tokio::time::timeout(Duration::from_secs(secs), task).await {
            Ok(joined) => joined,
            Err(_) => {
                // The blocking task cannot be cancelled; exit instead of
                // waiting for the runtime to drain it.
                eprintln!("\nError: Generation timed out after {secs}s");
                std::process::exit(TIMEOUT_EXIT_CODE);
            }
        },
        None => task.await,
    };
    let output = joined.map_err(|e| anyhow::anyhow!("Generation task failed: {e}"))??;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&response_json(&output))?);
    } else {
        print_summary(&output);
    }

    Ok(())
}

/// Result object with paths relative to the output root.
fn response_json(output: &GenerationOutput) -> serde_json::Value {
    let relative = |path: &std::path::Path| {
        let root = output.job_dir.parent().unwrap_or(output.job_dir.as_path());
        path.strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    };

    serde_json::json!({
        "job_id": output.job_id,
        "video": relative(&output.video),
        "srt": relative(&output.subtitles),
        "audio": output.audio.as_deref().map(relative),
        "scenes": output.plan.len(),
        "duration_secs": output.plan.total_secs(),
        "truncated": output.plan.truncated,
    })
}

fn print_summary(output: &GenerationOutput) {
    println!("Generation complete");
    println!("  Job: {}", output.job_id);
    println!("  Video: {}", output.video.display());
    println!("  Subtitles: {}", output.subtitles.display());
    match &output.audio {
        Some(audio) => println!("  Audio: {}", audio.display()),
        None => println!("  Audio: (not extracted)"),
    }
    println!(
        "  Scenes: {} ({:.2}s{})",
        output.plan.len(),
        output.plan.total_secs(),
        if output.plan.truncated {
            ", truncated to fit target"
        } else {
            ""
        }
    );
}

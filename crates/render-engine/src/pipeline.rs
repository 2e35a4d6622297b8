//! End-to-end generation: script in, video, subtitles, and manifest out.

use std::path::{Path, PathBuf};

use scriptreel_common::config::RenderDefaults;
use scriptreel_common::error::ReelResult;
use scriptreel_script_model::job::{JobArtifacts, JobDir, JobManifest, RequestSummary};
use scriptreel_script_model::request::GenerationRequest;
use scriptreel_script_model::script::Script;
use scriptreel_script_model::segment::{ScenePlan, Segment};
use scriptreel_speech::synthesizer::{estimate_duration, SpeechSynthesizer};
use scriptreel_timing_core::{generate, save_subtitles, schedule};

use crate::compositor::{compose_scenes, CompositionConfig};
use crate::export::{ExportConfig, ExportJob, ProgressCallback, RenderBackend};

/// Artifacts of one generation request.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    pub job_id: String,
    pub job_dir: PathBuf,
    pub video: PathBuf,
    pub subtitles: PathBuf,
    /// Extracted audio mix, when extraction succeeded.
    pub audio: Option<PathBuf>,
    pub manifest: PathBuf,
    /// Scenes as rendered.
    pub plan: ScenePlan,
}

/// Run one generation request.
///
/// The request is validated before the job directory is created, so an
/// empty script leaves nothing behind under `output_root`.
pub fn generate_video(
    request: &GenerationRequest,
    output_root: &Path,
    synthesizer: &mut dyn SpeechSynthesizer,
    render: &RenderDefaults,
    backend: &mut dyn RenderBackend,
    progress: Option<ProgressCallback>,
) -> ReelResult<GenerationOutput> {
    let script = request.validate()?;
    let job = JobDir::create(output_root)?;
    tracing::info!(
        job_id = %job.id,
        lines = script.len(),
        target_secs = request.target_secs,
        synthesizer = synthesizer.name(),
        backend = backend.name(),
        "Starting generation"
    );

    let segments = synthesize_segments(&script, &job, synthesizer)?;
    let plan = schedule(&segments, request.target_secs)?;
    if plan.truncated {
        tracing::info!(
            kept = plan.len(),
            dropped = segments.len() - plan.len(),
            total_secs = plan.total_secs(),
            "Script trimmed to target duration"
        );
    }

    let composition = CompositionConfig::new(request.aspect, request.style, render);
    let export_job = ExportJob {
        scenes: compose_scenes(&plan, &job, &composition),
        composition,
        work_dir: job.dir.clone(),
        output_path: job.video_path(),
        audio_output_path: Some(job.audio_path()),
        config: ExportConfig::from_defaults(render),
    };
    let outcome = backend.render(&export_job, progress)?;

    let subtitles = job.subtitles_path();
    save_subtitles(&generate(&plan.segments), &subtitles)?;

    let artifacts = JobArtifacts {
        video: job.relative(&outcome.video),
        subtitles: job.relative(&subtitles),
        audio: outcome.audio.as_deref().map(|p| job.relative(p)),
    };
    let manifest = JobManifest::new(
        &job,
        RequestSummary::from_request(request, script.len()),
        artifacts,
        plan.clone(),
    );
    manifest.save(&job)?;

    tracing::info!(
        job_id = %job.id,
        scenes = plan.len(),
        total_secs = plan.total_secs(),
        video = %outcome.video.display(),
        "Generation complete"
    );

    Ok(GenerationOutput {
        job_id: job.id.clone(),
        job_dir: job.dir.clone(),
        video: outcome.video,
        subtitles,
        audio: outcome.audio,
        manifest: job.manifest_path(),
        plan,
    })
}

/// Synthesize every script line to `scene_NN.wav` and pair it with its duration.
pub fn synthesize_segments(
    script: &Script,
    job: &JobDir,
    synthesizer: &mut dyn SpeechSynthesizer,
) -> ReelResult<Vec<Segment>> {
    let mut segments = Vec::with_capacity(script.len());
    for (index, line) in script.iter().enumerate() {
        let synthesis = synthesizer
            .synthesize(line.as_str(), &job.scene_audio_path(index))
            .map_err(|err| {
                tracing::error!(scene = index + 1, error = %err, "Speech synthesis failed");
                err
            })?;
        tracing::debug!(
            scene = index + 1,
            duration_secs = synthesis.duration_secs,
            source = ?synthesis.source,
            "Synthesized scene audio"
        );
        segments.push(Segment::new(line.as_str(), synthesis.duration_secs));
    }
    Ok(segments)
}

/// Scene plan from estimated durations, without synthesizing or rendering.
pub fn estimate_plan(request: &GenerationRequest, rate_wpm: u32) -> ReelResult<ScenePlan> {
    let script = request.validate()?;
    let segments: Vec<Segment> = script
        .iter()
        .map(|line| Segment::new(line.as_str(), estimate_duration(line.as_str(), rate_wpm)))
        .collect();
    Ok(schedule(&segments, request.target_secs)?)
}

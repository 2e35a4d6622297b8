//! Export configuration and job management.

use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use scriptreel_common::config::RenderDefaults;
use scriptreel_common::error::{ReelError, ReelResult};
use scriptreel_common::process::command_exists;

use crate::compositor::{Background, CompositionConfig, SceneComposition};

/// Encoder settings shared by every scene of a job.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    pub fps: u32,
    pub video_codec: String,
    pub audio_codec: String,
    pub threads: u32,
    /// Sample rate of the rendered audio and the extracted mix.
    pub audio_sample_rate: u32,
    pub audio_bitrate_kbps: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::from_defaults(&RenderDefaults::default())
    }
}

impl ExportConfig {
    pub fn from_defaults(defaults: &RenderDefaults) -> Self {
        Self {
            fps: defaults.fps.max(1),
            video_codec: defaults.video_codec.clone(),
            audio_codec: defaults.audio_codec.clone(),
            threads: defaults.threads.max(1),
            audio_sample_rate: defaults.mix_sample_rate.max(8000),
            audio_bitrate_kbps: 192,
        }
    }
}

/// An export job ready to be rendered.
#[derive(Debug, Clone)]
pub struct ExportJob {
    /// Scenes in playback order.
    pub scenes: Vec<SceneComposition>,

    /// Frame size, background, and caption styling.
    pub composition: CompositionConfig,

    /// Directory for intermediate files (concat list, reports).
    pub work_dir: PathBuf,

    /// Final video path.
    pub output_path: PathBuf,

    /// Where to extract the audio mix, if wanted.
    pub audio_output_path: Option<PathBuf>,

    /// Export configuration.
    pub config: ExportConfig,
}

impl ExportJob {
    /// Sum of scene durations.
    pub fn total_secs(&self) -> f64 {
        self.scenes.iter().map(|s| s.duration_secs).sum()
    }

    /// Frames across all scenes.
    pub fn total_frames(&self) -> u64 {
        self.scenes
            .iter()
            .map(|s| s.frame_count(self.config.fps))
            .sum()
    }

    fn validate(&self) -> ReelResult<()> {
        if self.scenes.is_empty() {
            return Err(ReelError::render("Export job has no scenes"));
        }
        for scene in &self.scenes {
            if !scene.duration_secs.is_finite() || scene.duration_secs <= 0.0 {
                return Err(ReelError::render(format!(
                    "Scene {} has invalid duration {}",
                    scene.index + 1,
                    scene.duration_secs
                )));
            }
            if !scene.audio_path.exists() {
                return Err(ReelError::FileNotFound {
                    path: scene.audio_path.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Files produced by a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub video: PathBuf,
    /// Extracted mix; `None` when not requested or extraction failed.
    pub audio: Option<PathBuf>,
}

/// Progress callback for export rendering.
pub type ProgressCallback = Box<dyn Fn(ExportProgress) + Send>;

/// Export progress report.
#[derive(Debug, Clone)]
pub struct ExportProgress {
    /// Current progress [0.0, 1.0].
    pub progress: f64,

    /// Frames rendered so far.
    pub frames_rendered: u64,

    /// Total frames to render.
    pub total_frames: u64,

    /// Estimated time remaining in seconds.
    pub eta_secs: f64,

    /// Current stage.
    pub stage: ExportStage,
}

/// Stages of the export process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Preparing,
    Rendering,
    Encoding,
    Finalizing,
    Complete,
}

impl ExportStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportStage::Preparing => "preparing",
            ExportStage::Rendering => "rendering",
            ExportStage::Encoding => "encoding",
            ExportStage::Finalizing => "finalizing",
            ExportStage::Complete => "complete",
        }
    }
}

/// Trait for render backends.
pub trait RenderBackend: Send {
    /// Execute the export job.
    fn render(
        &mut self,
        job: &ExportJob,
        progress: Option<ProgressCallback>,
    ) -> ReelResult<ExportOutcome>;

    /// Check if this backend is available on the system.
    fn is_available(&self) -> bool;

    /// Backend name.
    fn name(&self) -> &str;
}

/// The ffmpeg backend, or `Unsupported` if ffmpeg is not installed.
pub fn default_backend() -> ReelResult<Box<dyn RenderBackend>> {
    let backend = FfmpegBackend::new();
    if !backend.is_available() {
        return Err(ReelError::unsupported(
            "No supported render backend found (expected ffmpeg in PATH)",
        ));
    }
    tracing::info!(backend = backend.name(), "Using render backend");
    Ok(Box::new(backend))
}

#[derive(Debug, Default)]
struct VerificationSummary {
    expected_secs: f64,
    probed_secs: Option<f64>,
    within_tolerance: bool,
}

/// Renders scenes with the `ffmpeg` command line tool.
#[derive(Debug, Clone)]
pub struct FfmpegBackend {
    ffmpeg: String,
    ffprobe: String,
}

impl Default for FfmpegBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegBackend {
    pub fn new() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }

    fn write_captions(&self, job: &ExportJob) -> ReelResult<()> {
        for scene in &job.scenes {
            std::fs::write(&scene.caption_path, &scene.caption).map_err(|e| {
                ReelError::render(format!(
                    "Failed to write caption file {}: {e}",
                    scene.caption_path.display()
                ))
            })?;
        }
        Ok(())
    }

    fn run_ffmpeg(
        &self,
        args: &[String],
        mut on_progress: impl FnMut(&ProgressState),
    ) -> ReelResult<()> {
        tracing::debug!(args = ?args, "Running ffmpeg");
        let mut child = Command::new(&self.ffmpeg)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ReelError::render(format!("Failed to start ffmpeg: {e}")))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ReelError::render("Failed to capture ffmpeg stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| ReelError::render("Failed to capture ffmpeg stderr"))?;

        // Drain stderr concurrently so ffmpeg never blocks on a full pipe.
        let stderr_task = std::thread::spawn(move || -> String {
            let mut reader = BufReader::new(stderr);
            let mut output = String::new();
            match reader.read_to_string(&mut output) {
                Ok(_) => output,
                Err(err) => format!("<failed to read ffmpeg stderr: {err}>"),
            }
        });

        let mut reader = BufReader::new(stdout);
        let mut line = String::new();
        let mut state = ProgressState::default();
        loop {
            line.clear();
            let bytes = reader
                .read_line(&mut line)
                .map_err(|e| ReelError::render(format!("Failed reading ffmpeg progress: {e}")))?;
            if bytes == 0 {
                break;
            }

            if let Some((key, value)) = line.trim().split_once('=') {
                state.update(key, value);
                if key == "progress" {
                    on_progress(&state);
                }
            }
        }

        let status = child
            .wait()
            .map_err(|e| ReelError::render(format!("Failed to wait on ffmpeg: {e}")))?;
        if !state.complete {
            tracing::debug!(out_time_secs = state.out_time_secs, "ffmpeg exited without a final progress report");
        }
        let stderr_output = stderr_task
            .join()
            .unwrap_or_else(|_| "<failed to join stderr reader>".to_string());

        if !status.success() {
            return Err(ReelError::render(format!(
                "ffmpeg failed (status {}): {}",
                status,
                stderr_output.trim()
            )));
        }
        Ok(())
    }

    fn concat_scenes(&self, job: &ExportJob) -> ReelResult<()> {
        let mut renders = Vec::with_capacity(job.scenes.len());
        for scene in &job.scenes {
            renders.push(std::fs::canonicalize(&scene.render_path).map_err(|e| {
                ReelError::render(format!(
                    "Scene render missing at {}: {e}",
                    scene.render_path.display()
                ))
            })?);
        }

        let list_path = job.work_dir.join("concat.txt");
        std::fs::write(&list_path, concat_list(&renders))?;
        self.run_ffmpeg(&concat_args(&list_path, &job.output_path), |_| {})
    }

    fn extract_audio(&self, video: &Path, out: &Path, sample_rate: u32) -> Option<PathBuf> {
        match self.run_ffmpeg(&extract_audio_args(video, out, sample_rate), |_| {}) {
            Ok(()) => Some(out.to_path_buf()),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    path = %out.display(),
                    "Audio extraction failed; continuing without audio file"
                );
                None
            }
        }
    }

    fn probe_duration(&self, path: &Path) -> Option<f64> {
        let output = Command::new(&self.ffprobe)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }

        let raw = String::from_utf8(output.stdout).ok()?;
        let secs = raw.lines().next()?.trim().parse::<f64>().ok()?;
        (secs.is_finite() && secs > 0.0).then_some(secs)
    }

    fn run_verification(&self, job: &ExportJob) -> ReelResult<VerificationSummary> {
        let expected_secs = job.total_secs();
        let probed_secs = self.probe_duration(&job.output_path);
        // One frame per scene plus audio priming slack.
        let tolerance = job.scenes.len() as f64 / job.config.fps.max(1) as f64 + 0.1;
        let summary = VerificationSummary {
            expected_secs,
            probed_secs,
            within_tolerance: probed_secs
                .map(|p| (p - expected_secs).abs() <= tolerance)
                .unwrap_or(true),
        };

        let report_path = job.output_path.with_extension("verification.json");
        let report = serde_json::json!({
            "output": job.output_path,
            "scenes": job.scenes.len(),
            "expected_secs": summary.expected_secs,
            "probed_secs": summary.probed_secs,
            "tolerance_secs": tolerance,
            "status": if summary.within_tolerance { "ok" } else { "warn" }
        });
        std::fs::write(&report_path, serde_json::to_string_pretty(&report)?)?;
        tracing::info!(report = %report_path.display(), "Wrote render verification report");

        Ok(summary)
    }
}

impl RenderBackend for FfmpegBackend {
    fn render(
        &mut self,
        job: &ExportJob,
        progress: Option<ProgressCallback>,
    ) -> ReelResult<ExportOutcome> {
        let started = std::time::Instant::now();
        job.validate()?;
        if let Some(parent) = job.output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::create_dir_all(&job.work_dir)?;

        let total_secs = job.total_secs();
        let total_frames = job.total_frames();
        let emit = |report: ExportProgress| {
            if let Some(cb) = &progress {
                cb(report);
            }
        };
        let stage_marker = |stage: ExportStage, progress: f64| ExportProgress {
            progress,
            frames_rendered: (progress * total_frames as f64).round() as u64,
            total_frames,
            eta_secs: 0.0,
            stage,
        };

        emit(stage_marker(ExportStage::Preparing, 0.0));
        self.write_captions(job)?;

        let mut debug_report = format!(
            "scenes={}\nduration_secs={:.3}\nframes={}\nsize={}x{}\n",
            job.scenes.len(),
            total_secs,
            total_frames,
            job.composition.width,
            job.composition.height,
        );

        let mut done_secs = 0.0f64;
        for scene in &job.scenes {
            let args = scene_args(scene, &job.composition, &job.config);
            debug_report.push_str(&format!(
                "scene_{:02}_args={}\n",
                scene.index + 1,
                args.join(" ")
            ));
            tracing::info!(
                scene = scene.index + 1,
                duration_secs = scene.duration_secs,
                frames = scene.frame_count(job.config.fps),
                "Rendering scene"
            );

            let offset = done_secs;
            self.run_ffmpeg(&args, |state| {
                emit(progress_report(
                    offset + state.out_time_secs.min(scene.duration_secs),
                    total_secs,
                    total_frames,
                    started.elapsed().as_secs_f64(),
                ));
            })?;
            done_secs += scene.duration_secs;
        }

        let debug_path = job.output_path.with_extension("ffmpeg-debug.txt");
        if let Err(err) = std::fs::write(&debug_path, &debug_report) {
            tracing::warn!(error = %err, path = %debug_path.display(), "Failed to write ffmpeg debug report");
        }

        emit(stage_marker(ExportStage::Encoding, 1.0));
        self.concat_scenes(job)?;

        emit(stage_marker(ExportStage::Finalizing, 1.0));
        let audio = job.audio_output_path.as_deref().and_then(|out| {
            self.extract_audio(&job.output_path, out, job.config.audio_sample_rate)
        });

        let summary = self.run_verification(job)?;
        if !summary.within_tolerance {
            tracing::warn!(
                expected_secs = summary.expected_secs,
                probed_secs = ?summary.probed_secs,
                "Rendered video duration differs from the scene plan"
            );
        }

        emit(stage_marker(ExportStage::Complete, 1.0));
        tracing::info!(
            elapsed_secs = started.elapsed().as_secs_f64(),
            output = %job.output_path.display(),
            "Export finished"
        );

        Ok(ExportOutcome {
            video: job.output_path.clone(),
            audio,
        })
    }

    fn is_available(&self) -> bool {
        command_exists(&self.ffmpeg)
    }

    fn name(&self) -> &str {
        "ffmpeg"
    }
}

/// ffmpeg arguments that render one scene to its intermediate file.
fn scene_args(
    scene: &SceneComposition,
    composition: &CompositionConfig,
    config: &ExportConfig,
) -> Vec<String> {
    let fps = config.fps.max(1);

    let mut args = vec![
        "-y".to_string(),
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-nostats".to_string(),
        "-progress".to_string(),
        "pipe:1".to_string(),
        "-f".to_string(),
        "lavfi".to_string(),
        "-i".to_string(),
        background_source(
            &composition.background,
            composition.width,
            composition.height,
            fps,
            scene.duration_secs,
        ),
        "-i".to_string(),
        scene.audio_path.display().to_string(),
        "-filter_complex".to_string(),
        build_filter_graph(scene, composition, fps, config.audio_sample_rate),
        "-map".to_string(),
        "[vout]".to_string(),
        "-map".to_string(),
        "[aout]".to_string(),
        "-r".to_string(),
        fps.to_string(),
        "-t".to_string(),
        format!("{:.6}", scene.duration_secs),
    ];
    args.append(&mut codec_args(config));
    args.push(scene.render_path.display().to_string());
    args
}

fn background_source(
    background: &Background,
    width: u32,
    height: u32,
    fps: u32,
    duration: f64,
) -> String {
    match background {
        Background::Solid(color) => format!(
            "color=c={}:s={width}x{height}:r={fps}:d={duration:.6}",
            color.to_ffmpeg_hex()
        ),
        Background::Gradient { top, bottom } => format!(
            "gradients=s={width}x{height}:r={fps}:d={duration:.6}:n=2:c0={}:c1={}:x0=0:y0=0:x1=0:y1={height}:speed=0.00001",
            top.to_ffmpeg_hex(),
            bottom.to_ffmpeg_hex()
        ),
    }
}

fn build_filter_graph(
    scene: &SceneComposition,
    composition: &CompositionConfig,
    fps: u32,
    sample_rate: u32,
) -> String {
    let caption = &composition.caption;
    let zoom = &composition.zoom;
    let fade = &composition.fade;

    let mut drawtext = format!(
        "drawtext=textfile={}:expansion=none:fontsize={}:fontcolor=white:line_spacing={}:x=(w-text_w)/2:y=(h-text_h)/2:shadowcolor=black@{:.3}:shadowx={}:shadowy={}",
        escape_filter_value(&scene.caption_path.display().to_string()),
        caption.font_size,
        caption.line_spacing,
        caption.shadow_alpha as f64 / 255.0,
        caption.shadow_offset,
        caption.shadow_offset,
    );
    if let Some(font) = &caption.font_file {
        drawtext.push_str(&format!(
            ":fontfile={}",
            escape_filter_value(&font.display().to_string())
        ));
    }

    format!(
        "[0:v]zoompan=z='{z}':x='iw/2-(iw/zoom/2)':y='ih/2-(ih/zoom/2)':d=1:s={w}x{h}:fps={fps},{drawtext},format=yuv420p[vout];\
         [1:a]aformat=sample_rates={sample_rate}:channel_layouts=stereo,afade=t=in:st=0:d={fi:.3},afade=t=out:st={fo_start:.3}:d={fo:.3},apad[aout]",
        z = zoom.zoompan_expr(scene.frame_count(fps)),
        w = composition.width,
        h = composition.height,
        fi = fade.fade_in_secs,
        fo_start = fade.fade_out_start(scene.duration_secs),
        fo = fade.fade_out_secs,
    )
}

fn codec_args(config: &ExportConfig) -> Vec<String> {
    vec![
        "-c:v".to_string(),
        config.video_codec.clone(),
        "-preset".to_string(),
        "medium".to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
        "-c:a".to_string(),
        config.audio_codec.clone(),
        "-b:a".to_string(),
        format!("{}k", config.audio_bitrate_kbps.max(64)),
        "-ar".to_string(),
        config.audio_sample_rate.to_string(),
        "-threads".to_string(),
        config.threads.max(1).to_string(),
    ]
}

fn concat_args(list_path: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-f".to_string(),
        "concat".to_string(),
        "-safe".to_string(),
        "0".to_string(),
        "-i".to_string(),
        list_path.display().to_string(),
        "-c".to_string(),
        "copy".to_string(),
        "-movflags".to_string(),
        "+faststart".to_string(),
        output.display().to_string(),
    ]
}

fn extract_audio_args(video: &Path, out: &Path, sample_rate: u32) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-i".to_string(),
        video.display().to_string(),
        "-vn".to_string(),
        "-acodec".to_string(),
        "pcm_s16le".to_string(),
        "-ar".to_string(),
        sample_rate.to_string(),
        out.display().to_string(),
    ]
}

/// Concat demuxer list. A single quote inside a path closes the quoted
/// string, is escaped, and reopens it.
fn concat_list(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("file '{}'\n", p.display().to_string().replace('\'', r"'\''")))
        .collect()
}

/// Escape a value for a filter option inside a filtergraph string.
///
/// Escaped twice: once for the option parser, once for the graph parser.
fn escape_filter_value(value: &str) -> String {
    fn escape(input: &str, special: &[char]) -> String {
        let mut out = String::with_capacity(input.len());
        for c in input.chars() {
            if c == '\\' || special.contains(&c) {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }

    let option_level = escape(value, &['\'', ':']);
    escape(&option_level, &['\'', '[', ']', ',', ';'])
}

#[derive(Debug, Default)]
struct ProgressState {
    out_time_secs: f64,
    complete: bool,
}

impl ProgressState {
    fn update(&mut self, key: &str, value: &str) {
        match key {
            // Both keys carry microseconds.
            "out_time_ms" | "out_time_us" => {
                if let Ok(us) = value.parse::<f64>() {
                    self.out_time_secs = us / 1_000_000.0;
                }
            }
            "progress" => {
                self.complete = value == "end";
            }
            _ => {}
        }
    }
}

fn progress_report(
    rendered_secs: f64,
    total_secs: f64,
    total_frames: u64,
    elapsed_secs: f64,
) -> ExportProgress {
    let progress = if total_secs <= 0.0 {
        0.0
    } else {
        (rendered_secs / total_secs).clamp(0.0, 1.0)
    };

    let frames_rendered = (progress * total_frames as f64).round() as u64;
    let eta_secs = if progress > 0.0 {
        (elapsed_secs / progress) - elapsed_secs
    } else {
        0.0
    }
    .max(0.0);

    ExportProgress {
        progress,
        frames_rendered,
        total_frames,
        eta_secs,
        stage: ExportStage::Rendering,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::Rgb;
    use scriptreel_script_model::request::{AspectMode, BackgroundStyle};

    fn scene(duration_secs: f64) -> SceneComposition {
        SceneComposition {
            index: 0,
            caption: "Hello".to_string(),
            duration_secs,
            audio_path: PathBuf::from("/jobs/ab12cd34/scene_01.wav"),
            caption_path: PathBuf::from("/jobs/ab12cd34/scene_01.txt"),
            render_path: PathBuf::from("/jobs/ab12cd34/scene_01.mp4"),
        }
    }

    fn composition(style: BackgroundStyle) -> CompositionConfig {
        CompositionConfig::new(AspectMode::Vertical, style, &RenderDefaults::default())
    }

    #[test]
    fn test_scene_args_clip_to_scheduled_duration() {
        let args = scene_args(
            &scene(1.5),
            &composition(BackgroundStyle::Gradient),
            &ExportConfig::default(),
        );

        let t = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t + 1], "1.500000");
        assert!(args.contains(&"/jobs/ab12cd34/scene_01.wav".to_string()));
        assert_eq!(args.last().unwrap(), "/jobs/ab12cd34/scene_01.mp4");

        let threads = args.iter().position(|a| a == "-threads").unwrap();
        assert_eq!(args[threads + 1], "4");
        let codec = args.iter().position(|a| a == "-c:v").unwrap();
        assert_eq!(args[codec + 1], "libx264");
        let rate = args.iter().position(|a| a == "-r").unwrap();
        assert_eq!(args[rate + 1], "30");
    }

    #[test]
    fn test_background_sources() {
        let solid = background_source(&Background::Solid(Rgb(12, 12, 16)), 1080, 1080, 30, 2.0);
        assert_eq!(solid, "color=c=0x0c0c10:s=1080x1080:r=30:d=2.000000");

        let gradient = background_source(
            &Background::for_style(BackgroundStyle::Gradient),
            1080,
            1920,
            30,
            2.0,
        );
        assert!(gradient.starts_with("gradients=s=1080x1920"));
        assert!(gradient.contains("c0=0x1e2238"));
        assert!(gradient.contains("c1=0x08080c"));
        assert!(gradient.contains("y1=1920"));
    }

    #[test]
    fn test_filter_graph_zoom_fade_and_caption() {
        let comp = composition(BackgroundStyle::Solid);
        let graph = build_filter_graph(&scene(2.0), &comp, 30, 44100);

        assert!(graph.contains("textfile=/jobs/ab12cd34/scene_01.txt"));
        assert!(graph.contains("expansion=none"));
        assert!(graph.contains("fontsize=78"));
        assert!(graph.contains("line_spacing=12"));
        assert!(graph.contains("shadowcolor=black@0.706"));
        assert!(graph.contains("shadowx=2:shadowy=2"));
        assert!(graph.contains("zoompan=z='1.0000+0.0600*on/60'"));
        assert!(graph.contains("s=1080x1920:fps=30"));
        assert!(graph.contains("aformat=sample_rates=44100"));
        assert!(graph.contains("afade=t=in:st=0:d=0.050"));
        assert!(graph.contains("afade=t=out:st=1.900:d=0.100"));
        assert!(graph.ends_with("apad[aout]"));
        assert!(!graph.contains("fontfile"));

        // Only the background is zoomed; the caption is drawn on top.
        let zoom_at = graph.find("zoompan=").unwrap();
        let text_at = graph.find("drawtext=").unwrap();
        let format_at = graph.find("format=yuv420p").unwrap();
        assert!(graph.starts_with("[0:v]zoompan="));
        assert!(zoom_at < text_at && text_at < format_at);
    }

    #[test]
    fn test_filter_graph_with_font_file() {
        let mut comp = composition(BackgroundStyle::Solid);
        comp.caption.font_file = Some(PathBuf::from("/fonts/DejaVuSans-Bold.ttf"));
        let graph = build_filter_graph(&scene(2.0), &comp, 30, 44100);
        assert!(graph.contains(":fontfile=/fonts/DejaVuSans-Bold.ttf"));
    }

    #[test]
    fn test_escape_filter_value() {
        assert_eq!(escape_filter_value("/tmp/plain.txt"), "/tmp/plain.txt");
        assert_eq!(escape_filter_value("/tmp/a:b.txt"), r"/tmp/a\\:b.txt");
        assert_eq!(escape_filter_value("/tmp/a,b"), r"/tmp/a\,b");
        assert_eq!(escape_filter_value("it's"), r"it\\\'s");
    }

    #[test]
    fn test_concat_list_quotes_paths() {
        let list = concat_list(&[
            PathBuf::from("/jobs/x/scene_01.mp4"),
            PathBuf::from("/jobs/it's/scene_02.mp4"),
        ]);
        assert_eq!(
            list,
            "file '/jobs/x/scene_01.mp4'\nfile '/jobs/it'\\''s/scene_02.mp4'\n"
        );
    }

    #[test]
    fn test_concat_and_extract_args() {
        let args = concat_args(Path::new("/jobs/x/concat.txt"), Path::new("/jobs/x/out.mp4"));
        assert!(args
            .join(" ")
            .contains("-f concat -safe 0 -i /jobs/x/concat.txt -c copy"));

        let args = extract_audio_args(
            Path::new("/jobs/x/out.mp4"),
            Path::new("/jobs/x/out.wav"),
            44100,
        );
        assert!(args
            .join(" ")
            .ends_with("-vn -acodec pcm_s16le -ar 44100 /jobs/x/out.wav"));
    }

    #[test]
    fn test_progress_state_parses_out_time() {
        let mut state = ProgressState::default();
        state.update("out_time_us", "1500000");
        assert!((state.out_time_secs - 1.5).abs() < 1e-9);
        assert!(!state.complete);
        state.update("progress", "end");
        assert!(state.complete);
    }

    #[test]
    fn test_progress_report_spans_all_scenes() {
        let report = progress_report(3.0, 6.0, 180, 2.0);
        assert!((report.progress - 0.5).abs() < 1e-9);
        assert_eq!(report.frames_rendered, 90);
        assert!((report.eta_secs - 2.0).abs() < 1e-9);
        assert_eq!(report.stage, ExportStage::Rendering);

        let clamped = progress_report(9.0, 6.0, 180, 2.0);
        assert_eq!(clamped.progress, 1.0);
    }

    #[test]
    fn test_export_job_rejects_missing_audio() {
        let dir = tempfile::tempdir().unwrap();
        let job = ExportJob {
            scenes: vec![scene(1.0)],
            composition: composition(BackgroundStyle::Solid),
            work_dir: dir.path().to_path_buf(),
            output_path: dir.path().join("out.mp4"),
            audio_output_path: None,
            config: ExportConfig::default(),
        };
        assert!(matches!(
            job.validate().unwrap_err(),
            ReelError::FileNotFound { .. }
        ));
        assert_eq!(job.total_frames(), 30);
        assert!((job.total_secs() - 1.0).abs() < 1e-12);
    }
}

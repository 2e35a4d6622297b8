//! ScriptReel CLI: turn a text script into a narrated slideshow video.
//!
//! Usage:
//!   scriptreel generate <SCRIPT|->   Synthesize, render, and subtitle a script
//!   scriptreel plan <SCRIPT|->       Preview scene timing from estimated durations
//!   scriptreel info <JOB_DIR>        Show a job manifest
//!   scriptreel check                 Check external tools

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use scriptreel_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "scriptreel",
    about = "Turn a text script into a narrated slideshow video",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/scriptreel/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a video, subtitles, and audio track from a script
    Generate {
        /// Script file, or "-" to read stdin
        script: String,

        /// Language hint for speech synthesis
        #[arg(long)]
        language: Option<String>,

        /// Speech engine voice
        #[arg(long)]
        voice: Option<String>,

        /// Background style: gradient|solid
        #[arg(long)]
        style: Option<String>,

        /// Frame shape: vertical|square|landscape
        #[arg(long)]
        aspect: Option<String>,

        /// Ceiling on total video length in seconds
        #[arg(long)]
        target_seconds: Option<f64>,

        /// Output root; each job gets its own directory below it
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the speech engine and narrate with silence
        #[arg(long)]
        silent: bool,

        /// Abort if generation takes longer than this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Preview the scene plan using estimated speech durations
    Plan {
        /// Script file, or "-" to read stdin
        script: String,

        /// Ceiling on total video length in seconds
        #[arg(long)]
        target_seconds: Option<f64>,

        /// Speaking rate used for the estimate
        #[arg(long)]
        rate_wpm: Option<u32>,

        /// Write subtitles for the plan (.srt or .vtt)
        #[arg(long)]
        srt: Option<PathBuf>,
    },

    /// Show a job manifest
    Info {
        /// Path to the job directory
        path: PathBuf,
    },

    /// Check external tool availability
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    scriptreel_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Generate {
            script,
            language,
            voice,
            style,
            aspect,
            target_seconds,
            output,
            silent,
            timeout_secs,
            json,
        } => {
            commands::generate::run(
                config,
                commands::generate::GenerateOptions {
                    script,
                    language,
                    voice,
                    style,
                    aspect,
                    target_seconds,
                    output,
                    silent,
                    timeout_secs,
                    json,
                },
            )
            .await
        }
        Commands::Plan {
            script,
            target_seconds,
            rate_wpm,
            srt,
        } => commands::plan::run(&config, script, target_seconds, rate_wpm, srt),
        Commands::Info { path } => commands::info::run(path),
        Commands::Check => commands::check::run(&config),
    }
}

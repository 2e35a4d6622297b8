//! Check external tool availability.

use scriptreel_common::config::{config_file_path, AppConfig};
use scriptreel_common::process::command_exists;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("ScriptReel System Check");
    println!("{}", "=".repeat(50));

    let ffmpeg = command_exists("ffmpeg");
    let ffprobe = command_exists("ffprobe");
    let engine = command_exists(&config.speech.engine);

    report("ffmpeg", ffmpeg, "required for rendering");
    report("ffprobe", ffprobe, "used to verify rendered duration");
    report(
        &config.speech.engine,
        engine,
        "speech engine; silence is used when missing",
    );

    println!();
    println!("Config file: {}", config_file_path().display());
    println!("Output directory: {}", config.output_dir.display());

    println!();
    if ffmpeg {
        println!("ffmpeg is available. ScriptReel is ready.");
    } else {
        println!("ffmpeg is missing. Install it to generate videos.");
    }

    Ok(())
}

fn report(name: &str, available: bool, note: &str) {
    let status = if available { "[OK]" } else { "[MISSING]" };
    println!("{status} {name} ({note})");
}

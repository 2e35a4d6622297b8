pub mod check;
pub mod generate;
pub mod info;
pub mod plan;

use std::io::Read;
use std::path::Path;

/// Read a script from a file, or from stdin when `source` is "-".
pub fn read_script(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| anyhow::anyhow!("Failed to read script from stdin: {e}"))?;
        return Ok(text);
    }

    std::fs::read_to_string(Path::new(source))
        .map_err(|e| anyhow::anyhow!("Failed to read script {source}: {e}"))
}

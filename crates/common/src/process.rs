//! Helpers for external tool invocation.

/// Check whether `binary` resolves to an executable.
///
/// Bare names are looked up on `PATH`; names containing a path separator
/// are checked directly.
pub fn command_exists(binary: &str) -> bool {
    !binary.trim().is_empty() && which::which(binary).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_exists() {
        assert!(command_exists("sh"));
        assert!(!command_exists("scriptreel-definitely-not-installed"));
        assert!(!command_exists(""));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_exists_with_space_in_path() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let tool_dir = dir.path().join("tts tools");
        std::fs::create_dir(&tool_dir).unwrap();
        let tool = tool_dir.join("fake-tts");
        std::fs::write(&tool, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        assert!(command_exists(tool.to_str().unwrap()));
    }

    #[test]
    fn test_command_exists_does_not_run_shell() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("marker");
        let name = format!("sh; touch {}", marker.display());

        assert!(!command_exists(&name));
        assert!(!marker.exists());
    }
}

//! Directory where the executable lives. A `frame.json` placed next to the
//! binary is picked up when no config path is given.

use std::path::PathBuf;

/// Directory containing the running executable. Falls back to current directory if unavailable.
pub fn exe_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Default location of the frame config.
pub fn default_config_path() -> PathBuf {
    exe_directory().join("frame.json")
}

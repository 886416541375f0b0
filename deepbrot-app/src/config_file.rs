use std::fs;
use std::path::Path;

use tracing::{debug, error, info};

use deepbrot_core::FrameConfig;

/// Load a frame config from `path`, falling back to defaults.
///
/// A missing file is not an error. Unreadable or malformed files are logged
/// and replaced by [`FrameConfig::default`].
pub fn load(path: &Path) -> FrameConfig {
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(json) => match parse(&json) {
                Ok(config) => {
                    info!("Loaded frame config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    error!("Failed to parse frame config: {e}");
                }
            },
            Err(e) => {
                error!("Failed to read frame config: {e}");
            }
        }
    } else {
        debug!("No frame config at {}", path.display());
    }
    FrameConfig::default()
}

pub fn parse(json: &str) -> serde_json::Result<FrameConfig> {
    serde_json::from_str(json)
}

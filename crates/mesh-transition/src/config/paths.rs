//! Path utilities for the transition engine config file

use std::path::PathBuf;

/// File name of the transition engine config inside the collection
pub const CONFIG_FILENAME: &str = "transition-config.yaml";

/// Get the default config file path
///
/// Returns: `~/Music/mesh-collection/transition-config.yaml`
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Music")
        .join("mesh-collection")
        .join(CONFIG_FILENAME)
}

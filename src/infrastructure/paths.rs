//! Path utilities for the Zellij sandbox environment.
//!
//! This module provides functions for working with filesystem paths in the
//! Zellij plugin sandbox, where the host filesystem is mounted under
//! `/host`. It handles tilde expansion and the plugin's data directory.

use std::path::PathBuf;

/// Returns the data directory for zest.
///
/// The directory is located at `/host/.local/share/zellij/zest` in the
/// Zellij sandbox. In Zellij's plugin environment, `/host` points to the
/// cwd of the last focused terminal, or the folder where Zellij was
/// started if that's not available.
///
/// This typically resolves to the user's home directory when Zellij is
/// started from a home directory terminal, making the actual path
/// `~/.local/share/zellij/zest`. The catalog file `recipes.json` and the
/// trace file live within this directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zest")
}

/// Expands tilde paths to use the `/host` prefix for the Zellij sandbox.
///
/// In the sandbox environment, the host's home directory (`~`) maps to
/// `/host`. This function converts tilde-prefixed paths (such as a
/// configured theme file) to their sandbox equivalents.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expands_to_host_prefix() {
        assert_eq!(expand_tilde("~/themes/custom.toml"), "/host/themes/custom.toml");
        assert_eq!(expand_tilde("~"), "/host");
        assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
        assert_eq!(expand_tilde("relative/path"), "relative/path");
    }
}

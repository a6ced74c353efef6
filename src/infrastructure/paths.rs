//! Path helpers for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted at `/host`, which maps to
//! the directory Zellij was started from (normally the user's home).

use std::path::PathBuf;

/// Sandbox mount point of the host filesystem.
const HOST_ROOT: &str = "/host";

/// Returns the Carpicker data directory, `/host/.local/share/zellij/carpicker`.
///
/// Holds trace files and, by default, the `assets/` directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij").join("carpicker")
}

/// Default directory searched for preview images.
#[must_use]
pub fn default_asset_dir() -> PathBuf {
    get_data_dir().join("assets")
}

/// Maps `~` and `~/...` onto the `/host` mount; other paths pass through.
///
/// ```
/// use carpicker::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/cars.toml"), "/host/cars.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/cars.toml"), "/etc/cars.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        format!("{HOST_ROOT}/{rest}")
    } else if path == "~" {
        HOST_ROOT.to_string()
    } else {
        path.to_string()
    }
}

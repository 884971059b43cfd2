//! Path handling for the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host`. Paths from the plugin
//! configuration (seed catalogs, theme files) are written the way a user types
//! them on the host and translated here.

use std::path::PathBuf;

/// Returns the data directory for RentDesk files (trace output).
///
/// Resolves to `/host/.local/share/zellij/rentdesk` in the sandbox. `/host`
/// is the cwd of the last focused terminal, or the folder Zellij was started
/// from, so this is usually `~/.local/share/zellij/rentdesk` on the host.
///
/// # Examples
///
/// ```
/// use rentdesk::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str().unwrap(), "/host/.local/share/zellij/rentdesk");
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("rentdesk")
}

/// Expands `~` to the `/host` mount.
///
/// # Examples
///
/// ```
/// use rentdesk::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/rentals.toml"), "/host/rentals.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/rentals.toml"), "/etc/rentals.toml");
/// ```
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

/// Turns a sandbox path back into the `~` form the user configured.
///
/// # Examples
///
/// ```
/// use rentdesk::infrastructure::display_path;
///
/// assert_eq!(display_path("/host/rentals.toml"), "~/rentals.toml");
/// assert_eq!(display_path("/etc/rentals.toml"), "/etc/rentals.toml");
/// ```
#[must_use]
pub fn display_path(path: &str) -> String {
    path.strip_prefix("/host")
        .map_or_else(|| path.to_string(), |rest| format!("~{rest}"))
}

//! Infrastructure layer for the plugin sandbox and the terminal.
//!
//! - [`paths`]: `/host` path translation and the data directory
//! - [`clipboard`]: OSC 52 clipboard sequences

pub mod clipboard;
pub mod paths;

pub use clipboard::{osc52_sequence, ClipboardError, MAX_ENCODED_LEN};
pub use paths::{display_path, expand_tilde, get_data_dir};

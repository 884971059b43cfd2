//! Theme management and ANSI escape sequence generation.
//!
//! Supports the built-in themes under `themes/` and custom themes loaded from
//! TOML files, and converts hex colors to 24-bit ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//! - `prime-green`: Dark theme in the desk's green
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#a6e3a1"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#a6e3a1"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! accent_fg = "#a6e3a1"
//! available_fg = "#a6e3a1"
//! rented_fg = "#fab387"
//! overdue_fg = "#f38ba8"
//! flash_info_fg = "#89b4fa"
//! flash_error_fg = "#f38ba8"
//! modal_border = "#a6e3a1"
//! ```
//!
//! # Example
//!
//! ```rust
//! use rentdesk::ui::Theme;
//!
//! let theme = Theme::from_name("catppuccin-latte").unwrap();
//! print!("{}Overdue{}", Theme::fg(&theme.colors.overdue_fg), Theme::reset());
//! ```

use crate::domain::error::{RentDeskError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected row.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, secondary info, field labels.
    pub text_dim: String,

    /// Separator lines.
    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Landing title, focused fields, emphasized modal text.
    pub accent_fg: String,

    /// Status column colors.
    pub available_fg: String,
    pub rented_fg: String,
    pub overdue_fg: String,

    pub flash_info_fg: String,
    pub flash_error_fg: String,

    pub modal_border: String,
}

impl Theme {
    /// Loads a built-in theme by name, `None` if the name is unknown.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rentdesk::ui::Theme;
    ///
    /// assert_eq!(Theme::from_name("prime-green").unwrap().name, "prime-green");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "prime-green" => include_str!("../../themes/prime-green.toml"),
            _ => return None,
        };

        match toml::from_str(toml_str) {
            Ok(theme) => Some(theme),
            Err(err) => {
                tracing::warn!(theme = name, error = %err, "built-in theme failed to parse");
                None
            }
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// [`RentDeskError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| RentDeskError::Theme(format!("Failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents).map_err(|e| RentDeskError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Plain palette used when even the built-in theme is unavailable.
    fn monochrome() -> Self {
        let white = "#ffffff".to_string();
        let grey = "#808080".to_string();
        let black = "#000000".to_string();
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                header_fg: white.clone(),
                header_bg: None,
                selection_fg: black.clone(),
                selection_bg: white.clone(),
                text_normal: white.clone(),
                text_dim: grey.clone(),
                border: grey.clone(),
                search_bar_border: white.clone(),
                match_highlight_fg: black,
                match_highlight_bg: white.clone(),
                empty_state_fg: white.clone(),
                accent_fg: white.clone(),
                available_fg: white.clone(),
                rented_fg: grey.clone(),
                overdue_fg: white.clone(),
                flash_info_fg: white.clone(),
                flash_error_fg: white.clone(),
                modal_border: grey,
            },
        }
    }

    /// Converts a hex color to an RGB tuple. White on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground color sequence, `\x1b[38;2;r;g;bm`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background color sequence, `\x1b[48;2;r;g;bm`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// ```rust
    /// use rentdesk::ui::Theme;
    ///
    /// assert_eq!(Theme::default().name, "catppuccin-mocha");
    /// ```
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(Self::monochrome)
    }
}

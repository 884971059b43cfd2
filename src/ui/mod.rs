//! User interface rendering layer.
//!
//! Turns application state into ANSI-styled output:
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready view model types
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Component renderers (header, table, modal, ...)
//! - [`helpers`]: Cursor placement, highlighting, char-safe text fitting
//! - [`theme`]: Color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DisplayItem, EmptyState, FlashInfo, FooterInfo, HeaderInfo, LandingInfo, ModalLine, ModalView, SearchBarInfo,
    TableLayout, UIViewModel,
};

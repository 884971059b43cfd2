//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain, catalog and
//! reminder layers.
//!
//! # Architecture
//!
//! ```text
//! Key / Host event → Event → handle_event → State mutation → Actions → Side effects
//!                                 ↑                                        ↓
//!                                 └──── WebRequestResult / Timer ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`forms`]: Modal form state (login, rent, edit, reminder)
//! - [`gate`]: Admin access code check
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Screen, modal, and input mode types
//! - [`state`]: Central application state and view model computation
//!
//! # Example
//!
//! ```rust
//! use rentdesk::app::{handle_event, AppState, Event};
//! use rentdesk::catalog::CatalogStore;
//! use rentdesk::domain::RentalPeriod;
//! use rentdesk::ui::Theme;
//!
//! let catalog = CatalogStore::from_seed(vec![], RentalPeriod::default())?;
//! let mut state = AppState::new(catalog, Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(actions.is_empty());
//! # Ok::<(), rentdesk::RentDeskError>(())
//! ```

pub mod actions;
pub mod forms;
pub mod gate;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use gate::AccessGate;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, Modal, Screen, SearchFocus};
pub use state::AppState;

//! Application layer: selection state machine, events and actions.
//!
//! Data flows one way:
//!
//! ```text
//! Key / worker message → Event → handle_event → AppState → Actions → Zellij
//!                                     ↑                        │
//!                                     └──── WorkerResponse ────┘
//! ```
//!
//! - [`selection`]: the `NoSelection → ItemChosen → FullSelection` machine
//! - [`state`]: [`AppState`] and view model computation
//! - [`handler`]: [`handle_event`]
//! - [`modes`]: focus and search modes
//! - [`actions`]: side effects for the plugin runtime

pub mod actions;
pub mod handler;
pub mod modes;
pub mod selection;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, Panel, SearchFocus};
pub use selection::{Phase, Selection, Visibility};
pub use state::AppState;

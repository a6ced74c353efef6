//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) never talks to Zellij itself. It
//! returns a list of [`Action`]s and the plugin shim executes them in order.

use crate::worker::WorkerMessage;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Posts a message to the background worker, e.g. an asset load request.
    PostToWorker(WorkerMessage),
}

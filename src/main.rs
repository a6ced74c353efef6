//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Carpicker library and Zellij. It
//! implements `ZellijPlugin` for the UI thread and `ZellijWorker` for the
//! asset loader, and is the only place that calls Zellij host functions.
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← selection, rendering
//! │  └──────────────────┘   │
//! │       │        ▲        │
//! │  LoadAsset   Asset      │  ← JSON over IPC
//! │       ▼        │        │
//! │  ┌──────────────────┐   │
//! │  │   AssetWorker    │   │  ← preview file reads
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! Normal mode:
//! - `j`/`Down`, `k`/`Up`: Move within the focused panel
//! - `Tab`/`l`: Focus colors, `Shift-Tab`/`h`: Focus cars
//! - `Enter`: Choose the car or color under the cursor
//! - `/`: Search cars
//! - `Esc`: Back to the car list
//! - `q`: Hide the plugin
//!
//! Search mode:
//! - Printable keys: Edit the query
//! - `Tab`: Move to results, `/`: Back to the query
//! - `Enter`: Choose the highlighted car
//! - `Esc`: Exit search

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use carpicker::worker::{CarpickerWorker, WorkerMessage, WorkerResponse};
use carpicker::{handle_event, Action, Config, Event, InputMode, Panel};

const WORKER_NAME: &str = "carpicker";

register_plugin!(State);
register_worker!(AssetWorker, carpicker_worker, CARPICKER_WORKER);

/// Plugin state wrapper.
struct State {
    app: carpicker::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: carpicker::initialize(&Config::default()),
            worker_name: WORKER_NAME.to_string(),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds the state, and subscribes to events.
    ///
    /// `FullHdAccess` is needed for the worker to read catalog, theme and
    /// preview files under `/host`.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        carpicker::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(config = ?config, "parsed configuration");
        self.app = carpicker::initialize(&config);

        request_permission(&[PermissionType::FullHdAccess]);
        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                match status {
                    PermissionStatus::Granted => tracing::debug!("permissions granted"),
                    PermissionStatus::Denied => {
                        tracing::warn!("permissions denied - preview images will be unavailable");
                    }
                }
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in actions {
                    self.execute_action(&action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "event rejected");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        carpicker::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        let mode = self.app.input_mode;
        if mode.is_typing() {
            return Some(match key.bare_key {
                BareKey::Esc => Event::ExitSearch,
                BareKey::Enter => Event::Activate,
                BareKey::Tab => Event::FocusResults,
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::FocusCars,
            BareKey::Tab if self.app.focus == Panel::Colors => Event::FocusCars,
            BareKey::Tab | BareKey::Char('l') => Event::FocusColors,
            BareKey::Char('h') => Event::FocusCars,
            BareKey::Enter => Event::Activate,
            BareKey::Esc => match mode {
                InputMode::Search(_) => Event::ExitSearch,
                InputMode::Normal => Event::Escape,
            },
            BareKey::Char('/') => match mode {
                InputMode::Normal => Event::SearchMode,
                InputMode::Search(_) => Event::FocusSearchBar,
            },
            BareKey::Char('q') if mode == InputMode::Normal => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Decodes worker responses; other custom messages are ignored.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => {
                tracing::debug!(response = ?response, "worker response received");
                Some(Event::WorkerResponse(response))
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("hiding plugin");
                hide_self();
            }
            Action::PostToWorker(message) => self.post_worker_message(message),
        }
    }
}

/// Zellij worker entry point wrapping [`CarpickerWorker`].
#[derive(Default, Serialize, Deserialize)]
struct AssetWorker {
    inner: CarpickerWorker,
}

/// Set once the worker thread has its own tracing subscriber.
static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

impl ZellijWorker<'_> for AssetWorker {
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
            carpicker::observability::init_tracing(&Config::default());
        }

        match self.inner.respond(&payload) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::warn!(error = %e, "failed to answer worker message"),
        }
    }
}

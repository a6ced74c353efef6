//! Event handling and state transition logic.
//!
//! The plugin shim turns Zellij key presses and worker messages into
//! [`Event`]s; [`handle_event`] applies them to [`AppState`] and returns
//! whether to re-render plus the side effects to run.
//!
//! Events fall into a few groups:
//! - **Navigation**: `KeyDown`, `KeyUp`, `FocusColors`, `FocusCars`
//! - **Activation**: `Activate`, `ChooseItem`, `ChooseColor`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`,
//!   `Char`, `Backspace`, `Escape`
//! - **Worker**: `WorkerResponse`
//!
//! `Activate` resolves what is under the cursor and then goes through the
//! same path as `ChooseItem` / `ChooseColor`.
//!
//! ```
//! use carpicker::app::{handle_event, AppState, Event};
//! use carpicker::domain::{Catalog, Palette};
//! use carpicker::ui::Theme;
//!
//! let mut state = AppState::new(Catalog::builtin(), Palette::default(), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Activate)?;
//! assert!(render && actions.is_empty());
//! assert_eq!(state.selection.selected_item().map(|i| i.model.as_str()), Some("Accord"));
//! # Ok::<(), carpicker::CarpickerError>(())
//! ```

use super::modes::{InputMode, Panel, SearchFocus};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{Color, Item};
use crate::worker::WorkerResponse;

/// Input to [`handle_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the cursor of the focused panel down (wraps to top).
    KeyDown,
    /// Moves the cursor of the focused panel up (wraps to bottom).
    KeyUp,
    /// Focuses the color selector; ignored until a car is chosen.
    FocusColors,
    /// Focuses the car selector.
    FocusCars,
    /// Activates whatever is under the cursor in the focused panel.
    Activate,
    /// Hides the plugin pane.
    CloseFocus,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input (from navigating).
    FocusSearchBar,
    /// Focuses the filtered results (from typing).
    FocusResults,
    /// Leaves search mode and clears the query.
    ExitSearch,
    /// Appends a character to the search query.
    Char(char),
    /// Removes the last character of the search query.
    Backspace,
    /// Leaves search, or returns focus to the car list.
    Escape,

    /// A car was activated in the car selector.
    ChooseItem(Item),
    /// A color was activated in the color selector.
    ChooseColor(Color),

    /// A reply from the asset worker.
    WorkerResponse(WorkerResponse),
}

/// Applies an event to the state.
///
/// This is the only entry point that mutates [`AppState`] in response to
/// input. While the catalog is empty every event except `CloseFocus` and
/// worker replies is ignored.
///
/// # Parameters
///
/// * `state` - Application state to update
/// * `event` - Key press, choose event, or worker reply
///
/// # Returns
///
/// `(should_render, actions)`: whether the UI changed, and the side effects
/// the plugin shim must run in order.
///
/// # Errors
///
/// `ChooseColor` without a selected car yields
/// [`CarpickerError::Selection`](crate::CarpickerError::Selection); the state
/// is unchanged.
///
/// # Example
///
/// ```
/// use carpicker::app::{handle_event, Action, AppState, Event};
/// use carpicker::domain::{Catalog, Color, Item, Palette};
/// use carpicker::ui::Theme;
///
/// let mut state = AppState::new(Catalog::builtin(), Palette::default(), Theme::default());
///
/// assert!(handle_event(&mut state, &Event::ChooseColor(Color::new("Red"))).is_err());
///
/// handle_event(&mut state, &Event::ChooseItem(Item::new("Ford", "Mustang")))?;
/// let (render, actions) = handle_event(&mut state, &Event::ChooseColor(Color::new("Red")))?;
/// assert!(render);
/// assert!(matches!(actions.as_slice(), [Action::PostToWorker(_)]));
///
/// let (render, actions) = handle_event(&mut state, &Event::CloseFocus)?;
/// assert_eq!((render, actions), (false, vec![Action::CloseFocus]));
/// # Ok::<(), carpicker::CarpickerError>(())
/// ```
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    if state.catalog.is_empty() && is_inert_on_empty_catalog(event) {
        tracing::debug!("catalog is empty, ignoring event");
        return Ok((false, vec![]));
    }

    match event {
        Event::KeyDown => {
            state.move_cursor_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_cursor_up();
            Ok((true, vec![]))
        }
        Event::FocusColors => Ok((state.focus_colors(), vec![])),
        Event::FocusCars => {
            state.focus_cars();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Activate => activate(state),

        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.focus_cars();
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query = String::new();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.search_query.is_empty() {
                exit_search(state);
                return Ok((true, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.search_query, "exiting search mode");
            exit_search(state);
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            state.search_query.push(*c);
            tracing::trace!(query = %state.search_query, char = %c, "search query updated");
            state.apply_search_filter();
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            state.search_query.pop();
            state.apply_search_filter();
            Ok((true, vec![]))
        }
        Event::Escape => {
            if state.input_mode.is_search() {
                exit_search(state);
            } else {
                state.focus_cars();
            }
            Ok((true, vec![]))
        }

        Event::ChooseItem(item) => {
            state.choose_item(item.clone());
            Ok((true, vec![]))
        }
        Event::ChooseColor(color) => {
            let actions = state.choose_color(color.clone())?;
            Ok((true, actions))
        }

        Event::WorkerResponse(response) => match response {
            WorkerResponse::Asset(outcome) => Ok((state.record_asset_outcome(outcome), vec![])),
            WorkerResponse::Error { message } => {
                tracing::error!("Worker error: {}", message);
                Ok((state.fail_pending_asset(message), vec![]))
            }
        },
    }
}

/// Navigation and search have nothing to act on without cars.
const fn is_inert_on_empty_catalog(event: &Event) -> bool {
    !matches!(event, Event::CloseFocus | Event::WorkerResponse(_))
}

/// Resolves the cursor target and re-dispatches it as a choose event.
fn activate(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    match state.focus {
        Panel::Cars => {
            let Some(item) = state.highlighted_item().cloned() else {
                tracing::debug!("no car under cursor");
                return Ok((false, vec![]));
            };
            let result = handle_event(state, &Event::ChooseItem(item))?;
            if state.input_mode.is_search() {
                exit_search(state);
                state.cursor_to_selected_item();
            }
            Ok(result)
        }
        Panel::Colors => {
            let Some(color) = state.highlighted_color().cloned() else {
                tracing::debug!("no color under cursor");
                return Ok((false, vec![]));
            };
            handle_event(state, &Event::ChooseColor(color))
        }
    }
}

fn exit_search(state: &mut AppState) {
    state.input_mode = InputMode::Normal;
    state.search_query = String::new();
    state.apply_search_filter();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetKey, AssetOutcome, AssetStatus, Catalog, Palette, PreviewSize, SelectionError};
    use crate::ui::viewmodel::{CarListView, ImageState};
    use crate::ui::Theme;
    use crate::worker::WorkerMessage;
    use crate::CarpickerError;

    fn state() -> AppState {
        AppState::new(Catalog::builtin(), Palette::default(), Theme::default())
    }

    fn camry() -> Item {
        Item::new("Toyota", "Camry").with_color("Red")
    }

    fn dispatch(state: &mut AppState, events: &[Event]) -> Vec<Action> {
        events
            .iter()
            .flat_map(|event| handle_event(state, event).unwrap().1)
            .collect()
    }

    #[test]
    fn test_choose_camry_shows_color_selector_only() {
        let mut state = state();
        handle_event(&mut state, &Event::ChooseItem(camry())).unwrap();

        let vm = state.compute_viewmodel(24, 80);
        let colors = vm.color_selector.expect("color selector visible");
        assert_eq!(colors.title, "Select a Color for your Toyota Camry");
        assert!(vm.preview.is_none());
    }

    #[test]
    fn test_choose_green_shows_summary_and_requests_asset() {
        let mut state = state();
        let actions = dispatch(
            &mut state,
            &[Event::ChooseItem(camry()), Event::ChooseColor(Color::new("Green"))],
        );

        let preview = state.compute_viewmodel(24, 80).preview.expect("preview visible");
        assert_eq!(preview.summary, "Your selected car is a Toyota Camry painted Green.");
        assert_eq!(preview.image.state, ImageState::Pending);
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::LoadAsset { request, .. })] if request.key.as_str() == "toyota-camry"
        ));
    }

    #[test]
    fn test_choosing_another_car_resets_color() {
        let mut state = state();
        dispatch(
            &mut state,
            &[
                Event::ChooseItem(camry()),
                Event::ChooseColor(Color::new("Green")),
                Event::ChooseItem(Item::new("Honda", "Accord")),
            ],
        );

        let vm = state.compute_viewmodel(24, 80);
        let colors = vm.color_selector.expect("color selector visible");
        assert_eq!(colors.title, "Select a Color for your Honda Accord");
        assert!(colors.swatches.iter().all(|s| !s.is_chosen));
        assert!(vm.preview.is_none());
    }

    #[test]
    fn test_empty_catalog_is_inert() {
        let mut state = AppState::new(Catalog::empty(), Palette::default(), Theme::default());
        for event in [
            Event::KeyDown,
            Event::Activate,
            Event::FocusColors,
            Event::SearchMode,
            Event::Char('a'),
        ] {
            assert_eq!(handle_event(&mut state, &event).unwrap(), (false, vec![]));
        }

        let vm = state.compute_viewmodel(24, 80);
        assert!(matches!(vm.car_list, CarListView::Empty(_)));
        assert!(vm.color_selector.is_none());
        assert!(vm.preview.is_none());
        assert!(!state.input_mode.is_search());
    }

    #[test]
    fn test_choose_color_without_car_is_rejected() {
        let mut state = state();
        let err = handle_event(&mut state, &Event::ChooseColor(Color::new("Red"))).unwrap_err();

        assert!(matches!(err, CarpickerError::Selection(SelectionError::NoItemSelected)));
        assert!(state.selection.selected_item().is_none());
    }

    #[test]
    fn test_reselecting_same_color_is_idempotent() {
        let mut state = state();
        dispatch(&mut state, &[Event::ChooseItem(camry()), Event::ChooseColor(Color::new("Blue"))]);
        let before = state.selection.clone();

        let (_, actions) = handle_event(&mut state, &Event::ChooseColor(Color::new("Blue"))).unwrap();
        assert_eq!(state.selection, before);
        assert!(actions.is_empty());
    }

    #[test]
    fn test_keyboard_flow_car_then_color() {
        let mut state = state();
        let actions = dispatch(
            &mut state,
            &[
                Event::KeyDown,
                Event::Activate,
                Event::KeyDown,
                Event::KeyDown,
                Event::Activate,
            ],
        );

        let (item, color) = state.selection.full().expect("full selection");
        assert_eq!(item.label(), "Toyota Camry");
        assert_eq!(color.name(), "Green");
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn test_focus_colors_ignored_without_car() {
        let mut state = state();
        let (render, _) = handle_event(&mut state, &Event::FocusColors).unwrap();
        assert!(!render);

        handle_event(&mut state, &Event::Activate).unwrap();
        handle_event(&mut state, &Event::FocusCars).unwrap();
        let (render, _) = handle_event(&mut state, &Event::FocusColors).unwrap();
        assert!(render);
        assert_eq!(state.focus, Panel::Colors);
    }

    #[test]
    fn test_search_then_activate_exits_search() {
        let mut state = state();
        dispatch(
            &mut state,
            &[
                Event::SearchMode,
                Event::Char('m'),
                Event::Char('u'),
                Event::Char('s'),
                Event::Activate,
            ],
        );

        assert_eq!(state.selection.selected_item().map(Item::label), Some("Ford Mustang".to_string()));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.filtered.len(), 3);
        assert_eq!(state.car_cursor, 2);
    }

    #[test]
    fn test_activate_with_no_matches_does_nothing() {
        let mut state = state();
        dispatch(&mut state, &[Event::SearchMode, Event::Char('x'), Event::Char('q')]);

        assert_eq!(handle_event(&mut state, &Event::Activate).unwrap(), (false, vec![]));
        assert!(state.selection.selected_item().is_none());
    }

    #[test]
    fn test_chars_ignored_outside_typing() {
        let mut state = state();
        assert_eq!(handle_event(&mut state, &Event::Char('a')).unwrap(), (false, vec![]));
        assert!(state.search_query.is_empty());
    }

    #[test]
    fn test_escape_returns_focus_to_cars() {
        let mut state = state();
        handle_event(&mut state, &Event::Activate).unwrap();
        assert_eq!(state.focus, Panel::Colors);

        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.focus, Panel::Cars);
        assert!(state.selection.selected_item().is_some());
    }

    #[test]
    fn test_worker_outcome_updates_preview_line() {
        let mut state = state();
        dispatch(&mut state, &[Event::ChooseItem(camry()), Event::ChooseColor(Color::new("Red"))]);

        let outcome = AssetOutcome::Loaded {
            key: AssetKey::for_item(&camry()),
            file_name: "toyota-camry.png".to_string(),
            byte_len: 2048,
            size: PreviewSize::default(),
        };
        let (render, _) =
            handle_event(&mut state, &Event::WorkerResponse(WorkerResponse::Asset(outcome))).unwrap();

        assert!(render);
        assert!(matches!(state.asset_status, AssetStatus::Loaded { byte_len: 2048, .. }));
        let preview = state.compute_viewmodel(24, 80).preview.expect("preview visible");
        assert_eq!(preview.image.state, ImageState::Ready);
        assert_eq!(preview.image.text, "[Toyota Camry] toyota-camry.png (2048 bytes, shown at 500x300)");
    }

    #[test]
    fn test_worker_error_resolves_pending_preview() {
        let mut state = state();
        dispatch(&mut state, &[Event::ChooseItem(camry()), Event::ChooseColor(Color::new("Red"))]);

        let error = WorkerResponse::Error {
            message: "invalid message".to_string(),
        };
        let (render, actions) = handle_event(&mut state, &Event::WorkerResponse(error)).unwrap();

        assert!(render && actions.is_empty());
        assert!(matches!(state.asset_status, AssetStatus::Failed { ref message, .. } if message == "invalid message"));
        let preview = state.compute_viewmodel(24, 80).preview.expect("preview visible");
        assert_eq!(preview.image.state, ImageState::Unavailable);
        assert_eq!(preview.summary, "Your selected car is a Toyota Camry painted Red.");

        let late = WorkerResponse::Error {
            message: "again".to_string(),
        };
        assert_eq!(handle_event(&mut state, &Event::WorkerResponse(late)).unwrap(), (false, vec![]));
    }

    #[test]
    fn test_stale_worker_outcome_not_rendered() {
        let mut state = state();
        dispatch(
            &mut state,
            &[
                Event::ChooseItem(camry()),
                Event::ChooseColor(Color::new("Red")),
                Event::ChooseItem(Item::new("Honda", "Accord")),
            ],
        );

        let outcome = AssetOutcome::Failed {
            key: AssetKey::for_item(&camry()),
            message: "late".to_string(),
        };
        let (render, _) =
            handle_event(&mut state, &Event::WorkerResponse(WorkerResponse::Asset(outcome))).unwrap();

        assert!(!render);
        assert_eq!(state.asset_status, AssetStatus::Idle);
        assert_eq!(state.selection.selected_item().map(Item::label), Some("Honda Accord".to_string()));
    }

    #[test]
    fn test_reset_invariant_over_item_sequences() {
        let items = Catalog::builtin().items().to_vec();
        let mut state = state();
        for (i, item) in items.iter().cycle().take(7).enumerate() {
            handle_event(&mut state, &Event::ChooseItem(item.clone())).unwrap();
            assert_eq!(state.selection.selected_item(), Some(item));
            assert!(state.selection.selected_color().is_none());
            if i % 2 == 0 {
                handle_event(&mut state, &Event::ChooseColor(Color::new("Red"))).unwrap();
            }
        }
    }
}

//! Top-level rendering entry point.
//!
//! Rendering is two steps: [`AppState::compute_viewmodel`] snapshots the
//! state, then the components print the snapshot. Nothing here reads
//! `AppState` beyond the theme.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout for a `rows` x `cols` pane.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    tracing::trace!(
        color_selector = viewmodel.color_selector.is_some(),
        preview = viewmodel.preview.is_some(),
        "rendering frame"
    );

    components::render_layout(&viewmodel, &state.theme, cols, rows);
}

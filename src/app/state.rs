//! Application state and view model computation.
//!
//! [`AppState`] is the selection controller: it owns the [`Selection`], the
//! immutable catalog and palette, and the purely navigational state (cursors,
//! focus, search). Selection changes only through [`AppState::choose_item`]
//! and [`AppState::choose_color`]; everything else is derived.
//!
//! The preview asset status is kept next to the selection, not inside it, so
//! worker completions can never alter what the user chose.

use super::modes::{InputMode, Panel};
use super::selection::{Selection, Visibility};
use crate::app::Action;
use crate::domain::error::Result;
use crate::domain::{AssetKey, AssetOutcome, AssetRequest, AssetStatus, Catalog, Color, Item, Palette, PreviewSize};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CarListView, CarRow, ColorSelectorView, EmptyState, FooterInfo, HeaderInfo, PreviewView, SearchBarInfo,
    UIViewModel,
};
use crate::worker::WorkerMessage;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Rows never available to content: the blank top line, header, top border,
/// bottom border, footer and the undrawn last row.
///
/// Must agree with `ui::components::render_layout`, which puts the bottom
/// border on `rows - 2` and the footer on `rows - 1`.
pub const CHROME_ROWS: usize = 6;

/// Rows used by the search box.
const SEARCH_ROWS: usize = 3;

/// Rows used by the color selector (spacer, title, swatches).
const COLOR_SELECTOR_ROWS: usize = 3;

/// Rows used by the preview (spacer, summary, image line).
const PREVIEW_ROWS: usize = 3;

/// Central application state container.
///
/// Holds the catalog and palette, the user's [`Selection`], and the UI state
/// around it (cursors, focus, search). Mutated by the event handler; view
/// models are computed on demand by [`AppState::compute_viewmodel`].
#[derive(Debug, Clone)]
pub struct AppState {
    /// Cars on offer; fixed for the session.
    pub catalog: Catalog,

    /// Colors on offer; fixed for the session.
    pub palette: Palette,

    /// What the user has chosen so far.
    ///
    /// Written only by `choose_item()` and `choose_color()`. Search,
    /// navigation and worker replies never touch it.
    pub selection: Selection,

    /// Catalog indices matching the search query, in catalog order.
    ///
    /// Recomputed by `apply_search_filter()`. Holds every index while no
    /// query is active.
    pub filtered: Vec<usize>,

    /// Zero-based cursor position within `filtered`.
    ///
    /// Clamped by `apply_search_filter()`. Wraps during navigation.
    pub car_cursor: usize,

    /// Zero-based cursor position within the palette.
    ///
    /// Reset to the first color whenever a new car is chosen.
    pub color_cursor: usize,

    /// Panel receiving navigation keys.
    pub focus: Panel,

    pub input_mode: InputMode,

    /// Current search query.
    ///
    /// Grown by `Char`, shrunk by `Backspace`, cleared when search is left.
    /// Split on whitespace into tokens that must all match.
    pub search_query: String,

    /// Load state of the preview image for the selected car.
    ///
    /// `Loading(key)` marks the one request in flight. Worker replies for any
    /// other key are dropped.
    pub asset_status: AssetStatus,

    /// Directory the worker searches for preview images.
    pub asset_dir: String,

    /// Size hints for the preview image.
    pub preview_size: PreviewSize,

    pub theme: Theme,
}

impl AppState {
    /// Creates the state for a fresh session.
    ///
    /// Nothing is selected, the car list is focused and unfiltered, and the
    /// asset directory is the default one.
    ///
    /// # Parameters
    ///
    /// * `catalog` - Cars on offer (may be empty)
    /// * `palette` - Colors on offer
    /// * `theme` - Color scheme for rendering
    ///
    /// # Example
    ///
    /// ```
    /// use carpicker::domain::{Catalog, Palette};
    /// use carpicker::{AppState, Panel, Selection, Theme};
    ///
    /// let state = AppState::new(Catalog::builtin(), Palette::default(), Theme::default());
    /// assert_eq!(state.selection, Selection::NoSelection);
    /// assert_eq!(state.focus, Panel::Cars);
    /// assert_eq!(state.filtered, vec![0, 1, 2]);
    /// ```
    #[must_use]
    pub fn new(catalog: Catalog, palette: Palette, theme: Theme) -> Self {
        let filtered = (0..catalog.len()).collect();
        Self {
            catalog,
            palette,
            selection: Selection::default(),
            filtered,
            car_cursor: 0,
            color_cursor: 0,
            focus: Panel::Cars,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            asset_status: AssetStatus::Idle,
            asset_dir: crate::infrastructure::default_asset_dir().to_string_lossy().to_string(),
            preview_size: PreviewSize::default(),
            theme,
        }
    }

    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.selection.visibility()
    }

    /// Car under the cursor in the (filtered) car list.
    #[must_use]
    pub fn highlighted_item(&self) -> Option<&Item> {
        self.filtered
            .get(self.car_cursor)
            .and_then(|&idx| self.catalog.get(idx))
    }

    /// Color under the cursor, only while the color selector is shown.
    #[must_use]
    pub fn highlighted_color(&self) -> Option<&Color> {
        if !self.visibility().color_selector {
            return None;
        }
        self.palette.get(self.color_cursor)
    }

    /// Moves the cursor of the focused panel down, wrapping at the end.
    ///
    /// Called by the `KeyDown` handler. No-op if the focused list is empty.
    pub fn move_cursor_down(&mut self) {
        let (cursor, len) = self.focused_cursor();
        if len == 0 {
            return;
        }
        *cursor = (*cursor + 1) % len;
    }

    /// Moves the cursor of the focused panel up, wrapping at the start.
    pub fn move_cursor_up(&mut self) {
        let (cursor, len) = self.focused_cursor();
        if len == 0 {
            return;
        }
        *cursor = if *cursor == 0 { len - 1 } else { *cursor - 1 };
    }

    fn focused_cursor(&mut self) -> (&mut usize, usize) {
        match self.focus {
            Panel::Cars => (&mut self.car_cursor, self.filtered.len()),
            Panel::Colors => (&mut self.color_cursor, self.palette.len()),
        }
    }

    /// Moves focus to the color selector. Returns `false` if it is not shown.
    pub fn focus_colors(&mut self) -> bool {
        if !self.visibility().color_selector {
            tracing::debug!("color selector hidden, focus stays on cars");
            return false;
        }
        self.focus = Panel::Colors;
        true
    }

    pub fn focus_cars(&mut self) {
        self.focus = Panel::Cars;
    }

    /// Selects a car, clearing the color and the previous asset status.
    ///
    /// Focus moves to the color selector so the next step is one key away.
    /// Choosing the car that is already selected still clears its color.
    ///
    /// # Example
    ///
    /// ```
    /// use carpicker::domain::{Catalog, Palette};
    /// use carpicker::{AppState, Color, Item, Panel, Theme};
    ///
    /// let mut state = AppState::new(Catalog::builtin(), Palette::default(), Theme::default());
    /// state.choose_item(Item::new("Toyota", "Camry"));
    /// state.choose_color(Color::new("Blue"))?;
    ///
    /// state.choose_item(Item::new("Ford", "Mustang"));
    /// assert!(state.selection.selected_color().is_none());
    /// assert_eq!(state.focus, Panel::Colors);
    /// # Ok::<(), carpicker::CarpickerError>(())
    /// ```
    pub fn choose_item(&mut self, item: Item) {
        self.selection.select_item(item);
        self.asset_status = AssetStatus::Idle;
        self.color_cursor = 0;
        self.focus = Panel::Colors;
    }

    /// Selects a color for the selected car and requests its preview asset.
    ///
    /// The asset is keyed by make and model only, so re-choosing a color for
    /// the same car does not request it again.
    ///
    /// # Returns
    ///
    /// A single [`Action::PostToWorker`] carrying a `LoadAsset` request when
    /// the selected car has no asset loading or loaded yet, otherwise nothing.
    ///
    /// # Errors
    ///
    /// Propagates [`SelectionError::NoItemSelected`](crate::domain::SelectionError)
    /// when no car is selected; nothing changes in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use carpicker::domain::{Catalog, Palette};
    /// use carpicker::{Action, AppState, Color, Item, Theme};
    ///
    /// let mut state = AppState::new(Catalog::builtin(), Palette::default(), Theme::default());
    /// assert!(state.choose_color(Color::new("Red")).is_err());
    ///
    /// state.choose_item(Item::new("Toyota", "Camry"));
    /// let first = state.choose_color(Color::new("Red"))?;
    /// assert!(matches!(first.as_slice(), [Action::PostToWorker(_)]));
    ///
    /// // Same car, new color: the asset is already on its way.
    /// assert!(state.choose_color(Color::new("Green"))?.is_empty());
    /// # Ok::<(), carpicker::CarpickerError>(())
    /// ```
    pub fn choose_color(&mut self, color: Color) -> Result<Vec<Action>> {
        self.selection.select_color(color)?;

        let Some((item, color)) = self.selection.full() else {
            return Ok(vec![]);
        };
        if let Some(idx) = self.palette.position(color) {
            self.color_cursor = idx;
        }

        let key = AssetKey::for_item(item);
        if self.asset_status.key() == Some(&key) {
            tracing::debug!(key = %key, "asset already requested for this car");
            return Ok(vec![]);
        }

        tracing::debug!(key = %key, asset_dir = %self.asset_dir, "requesting preview asset");
        self.asset_status = AssetStatus::Loading(key.clone());
        Ok(vec![Action::PostToWorker(WorkerMessage::load_asset(AssetRequest {
            key,
            asset_dir: self.asset_dir.clone(),
            size: self.preview_size,
        }))])
    }

    /// Folds an asset load outcome into the asset status.
    ///
    /// Outcomes for anything other than the asset currently loading are stale
    /// and ignored. Never touches the selection.
    ///
    /// # Returns
    ///
    /// `true` if the status changed and the preview needs a re-render.
    pub fn record_asset_outcome(&mut self, outcome: &AssetOutcome) -> bool {
        let AssetStatus::Loading(pending) = &self.asset_status else {
            tracing::debug!(key = %outcome.key(), "asset outcome with nothing loading, ignoring");
            return false;
        };
        if pending != outcome.key() {
            tracing::debug!(key = %outcome.key(), pending = %pending, "stale asset outcome, ignoring");
            return false;
        }

        self.asset_status = match outcome {
            AssetOutcome::Loaded { key, file_name, byte_len, .. } => {
                tracing::info!(key = %key, file_name = %file_name, byte_len = *byte_len, "preview asset loaded");
                AssetStatus::Loaded {
                    key: key.clone(),
                    file_name: file_name.clone(),
                    byte_len: *byte_len,
                }
            }
            AssetOutcome::Failed { key, message } => {
                tracing::warn!(key = %key, error = %message, "preview asset failed to load");
                AssetStatus::Failed {
                    key: key.clone(),
                    message: message.clone(),
                }
            }
        };
        true
    }

    /// Marks the pending asset request as failed after a worker error.
    ///
    /// A [`WorkerResponse::Error`](crate::worker::WorkerResponse::Error) carries
    /// no key. The worker answers requests in order and only one load is
    /// outstanding at a time, so the error belongs to whatever is `Loading`.
    ///
    /// # Returns
    ///
    /// `true` if a pending load was resolved, `false` if nothing was loading.
    pub fn fail_pending_asset(&mut self, message: &str) -> bool {
        let AssetStatus::Loading(pending) = &self.asset_status else {
            return false;
        };

        tracing::warn!(key = %pending, error = %message, "worker failed pending asset load");
        self.asset_status = AssetStatus::Failed {
            key: pending.clone(),
            message: message.to_string(),
        };
        true
    }

    /// Recomputes `filtered` from the search query and clamps the car cursor.
    ///
    /// Every whitespace-separated token must fuzzy-match `"{make} {model}"`.
    /// Matching ignores case. An empty query keeps every car.
    ///
    /// # Example
    ///
    /// ```
    /// use carpicker::domain::{Catalog, Palette};
    /// use carpicker::{AppState, Theme};
    ///
    /// let mut state = AppState::new(Catalog::builtin(), Palette::default(), Theme::default());
    /// state.search_query = "ford MUS".to_string();
    /// state.apply_search_filter();
    /// assert_eq!(state.filtered, vec![2]);
    ///
    /// state.search_query.clear();
    /// state.apply_search_filter();
    /// assert_eq!(state.filtered.len(), 3);
    /// ```
    pub fn apply_search_filter(&mut self) {
        let _span = tracing::debug_span!(
            "apply_search_filter",
            catalog_len = self.catalog.len(),
            query_len = self.search_query.len()
        )
        .entered();

        let tokens: Vec<String> = self.search_query.split_whitespace().map(fold_case).collect();
        let matcher = SkimMatcherV2::default();

        self.filtered = self
            .catalog
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                let label = fold_case(&item.label());
                tokens.iter().all(|token| matcher.fuzzy_match(&label, token).is_some())
            })
            .map(|(idx, _)| idx)
            .collect();

        self.car_cursor = self.car_cursor.min(self.filtered.len().saturating_sub(1));

        tracing::debug!(filtered_count = self.filtered.len(), "search filter applied");
    }

    /// Puts the car cursor on the selected car if it is visible.
    pub fn cursor_to_selected_item(&mut self) {
        let Some(selected) = self.selection.selected_item() else {
            return;
        };
        let position = self
            .filtered
            .iter()
            .position(|&idx| self.catalog.get(idx).is_some_and(|item| item.same_car(selected)));
        if let Some(position) = position {
            self.car_cursor = position;
        }
    }

    /// Builds the view model for a `rows` x `cols` pane.
    ///
    /// The color selector and preview are present exactly when the selection
    /// phase shows them. The car list is windowed around the cursor so that
    /// it fits between the header and the panels below it:
    ///
    /// ```text
    /// rows - CHROME_ROWS - [search 3] - [colors 3] - [preview 3] = car rows
    /// ```
    ///
    /// # Parameters
    ///
    /// * `rows` - Pane height in rows
    /// * `cols` - Pane width in columns (labels are truncated to fit)
    ///
    /// # Example
    ///
    /// ```
    /// use carpicker::domain::{Catalog, Palette};
    /// use carpicker::{AppState, Item, Theme};
    ///
    /// let mut state = AppState::new(Catalog::builtin(), Palette::default(), Theme::default());
    /// assert!(state.compute_viewmodel(24, 80).color_selector.is_none());
    ///
    /// state.choose_item(Item::new("Honda", "Accord"));
    /// let vm = state.compute_viewmodel(24, 80);
    /// assert_eq!(
    ///     vm.color_selector.map(|c| c.title),
    ///     Some("Select a Color for your Honda Accord".to_string())
    /// );
    /// assert!(vm.preview.is_none());
    /// ```
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let visibility = self.visibility();

        let color_selector = self.selection.selected_item().map(|item| {
            let cursor = (self.focus == Panel::Colors).then_some(self.color_cursor);
            ColorSelectorView::new(
                item,
                &self.palette,
                self.selection.selected_color(),
                cursor,
                self.focus == Panel::Colors,
            )
        });

        let preview = self
            .selection
            .full()
            .map(|(item, color)| PreviewView::new(item, color, &self.asset_status, self.preview_size));

        debug_assert_eq!(color_selector.is_some(), visibility.color_selector);
        debug_assert_eq!(preview.is_some(), visibility.preview);

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            car_list: self.compute_car_list(rows, cols),
            color_selector,
            preview,
            footer: self.compute_footer(),
        }
    }

    fn compute_car_list(&self, rows: usize, cols: usize) -> CarListView {
        if self.catalog.is_empty() {
            return CarListView::Empty(EmptyState {
                message: "No cars available".to_string(),
                subtitle: "Add [[items]] to the catalog file to get started".to_string(),
            });
        }

        let focused = self.focus == Panel::Cars;
        if self.filtered.is_empty() {
            return CarListView::Items {
                rows: vec![],
                no_matches: Some(format!("No cars match \"{}\"", self.search_query)),
                focused,
            };
        }

        let available_rows = self.calculate_available_rows(rows);
        let mut visible_start = self.car_cursor.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.filtered.len());
        if visible_end - visible_start < available_rows && self.filtered.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let matcher = (self.input_mode.is_search() && !self.search_query.trim().is_empty())
            .then(SkimMatcherV2::default);
        let max_label = cols.saturating_sub(4);

        let rows = self.filtered[visible_start..visible_end]
            .iter()
            .enumerate()
            .filter_map(|(offset, &catalog_idx)| {
                let item = self.catalog.get(catalog_idx)?;
                let label = truncate_label(&item.label(), max_label);
                let highlight_ranges = matcher
                    .as_ref()
                    .map_or_else(Vec::new, |m| self.compute_highlight_ranges(&label, m));

                Some(CarRow {
                    is_cursor: focused && visible_start + offset == self.car_cursor,
                    is_chosen: self.selection.selected_item().is_some_and(|chosen| chosen.same_car(item)),
                    label,
                    highlight_ranges,
                })
            })
            .collect();

        CarListView::Items {
            rows,
            no_matches: None,
            focused,
        }
    }

    /// Coalesces fuzzy match indices into `(start, end)` char ranges.
    ///
    /// Both sides go through [`fold_case`] like the filter does, so an
    /// uppercase query highlights the same chars it matched.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        let query = fold_case(&self.search_query.split_whitespace().collect::<Vec<_>>().join(" "));
        let Some((_score, indices)) = matcher.fuzzy_indices(&fold_case(text), &query) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.selection.phase() {
            super::selection::Phase::NoSelection => " Select a Car ".to_string(),
            super::selection::Phase::ItemChosen => " Select a Color ".to_string(),
            super::selection::Phase::FullSelection => " Your Car ".to_string(),
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        use super::modes::SearchFocus;

        let keybindings = match (self.input_mode, self.focus) {
            _ if self.catalog.is_empty() => "q: quit".to_string(),
            (InputMode::Search(SearchFocus::Typing), _) => {
                "ESC: exit search  Enter: choose  Tab: results  Ctrl+n/p: navigate  Type to filter".to_string()
            }
            (InputMode::Search(SearchFocus::Navigating), _) => {
                "ESC: exit search  /: edit query  j/k: navigate  Enter: choose".to_string()
            }
            (InputMode::Normal, Panel::Cars) if self.visibility().color_selector => {
                "j/k: navigate  Enter: choose car  l/Tab: colors  /: search  q: quit".to_string()
            }
            (InputMode::Normal, Panel::Cars) => "j/k: navigate  Enter: choose car  /: search  q: quit".to_string(),
            (InputMode::Normal, Panel::Colors) => {
                "j/k: navigate  Enter: choose color  h/Tab/ESC: cars  q: quit".to_string()
            }
        };

        FooterInfo { keybindings }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        self.input_mode.is_search().then(|| SearchBarInfo {
            query: self.search_query.clone(),
        })
    }

    /// Rows left for car entries after chrome and the visible panels.
    fn calculate_available_rows(&self, total_rows: usize) -> usize {
        let visibility = self.visibility();
        let mut reserved = CHROME_ROWS;
        if self.input_mode.is_search() {
            reserved += SEARCH_ROWS;
        }
        if visibility.color_selector {
            reserved += COLOR_SELECTOR_ROWS;
        }
        if visibility.preview {
            reserved += PREVIEW_ROWS;
        }
        total_rows.saturating_sub(reserved).max(1)
    }
}

/// Lowercases `text` without changing its length in chars.
fn fold_case(text: &str) -> String {
    text.chars().map(|c| c.to_lowercase().next().unwrap_or(c)).collect()
}

/// Shortens a label to `max` chars with a trailing `...`.
fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        return label.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut truncated: String = label.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

//! Terminal UI layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! - [`viewmodel`]: Render-ready snapshots; a panel that must not be shown
//!   is simply absent
//! - [`renderer`]: Entry point called from the plugin's `render`
//! - [`components`]: One renderer per screen section
//! - [`helpers`]: Cursor positioning, centering, match highlighting
//! - [`theme`]: Color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    CarListView, CarRow, ColorSelectorView, EmptyState, FooterInfo, HeaderInfo, ImageLine, ImageState, PreviewView,
    SearchBarInfo, Swatch, UIViewModel,
};

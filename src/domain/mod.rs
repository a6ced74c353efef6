//! Domain layer for the Carpicker plugin.
//!
//! Core types with no dependency on Zellij APIs or rendering.
//!
//! - [`error`]: Error types and result alias
//! - [`item`]: Catalog entries, colors and palettes
//! - [`catalog`]: The immutable car catalog
//! - [`asset`]: Preview asset keys, requests and load outcomes

pub mod asset;
pub mod catalog;
pub mod error;
pub mod item;

pub use asset::{AssetKey, AssetOutcome, AssetRequest, AssetStatus, PreviewSize};
pub use catalog::Catalog;
pub use error::{CarpickerError, Result, SelectionError};
pub use item::{Color, Item, Palette, DEFAULT_PALETTE};

//! Infrastructure layer for sandbox filesystem conventions.

pub mod paths;

pub use paths::{default_asset_dir, expand_tilde, get_data_dir};

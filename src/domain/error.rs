//! Error types for the Carpicker plugin.
//!
//! [`CarpickerError`] is the crate-wide error; [`SelectionError`] covers
//! precondition violations of the selection state machine and converts into it
//! with `?`.

use thiserror::Error;

/// Precondition violations raised by [`Selection`](crate::app::Selection).
///
/// These are returned, never panicked on. The state machine is left untouched
/// whenever one is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// A color was chosen while no car was selected.
    #[error("cannot choose a color before a car is selected")]
    NoItemSelected,
}

/// The main error type for Carpicker operations.
///
/// # Examples
///
/// ```
/// use carpicker::domain::{CarpickerError, SelectionError};
///
/// let err: CarpickerError = SelectionError::NoItemSelected.into();
/// assert!(err.to_string().contains("before a car is selected"));
/// ```
#[derive(Debug, Error)]
pub enum CarpickerError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file could not be read or parsed.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A selection transition was invoked without its required prior state.
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),
}

/// A specialized `Result` type for Carpicker operations.
pub type Result<T> = std::result::Result<T, CarpickerError>;

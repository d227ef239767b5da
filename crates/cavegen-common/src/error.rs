//! Error types for cavegen.

use thiserror::Error;

/// Errors raised by grid and buffer operations.
///
/// These are programming errors in the caller (bad coordinate math, a
/// replacement grid of the wrong shape). They are reported at the call that
/// caused them and never clamped or retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Coordinate outside `[0, size)` on either axis
    #[error("Coordinate ({x}, {y}) is outside a {size}x{size} grid")]
    OutOfRange {
        /// X coordinate
        x: i32,
        /// Y coordinate
        y: i32,
        /// Side length of the grid
        size: usize,
    },

    /// Supplied data does not match the grid dimensions
    #[error("Size mismatch: expected {expected}, got {actual}")]
    SizeMismatch {
        /// Expected length
        expected: usize,
        /// Actual length found
        actual: usize,
    },

    /// A grid with side length zero was requested
    #[error("Grid size must be greater than zero")]
    ZeroSize,
}

/// Result type alias for grid operations.
pub type GridResult<T> = Result<T, GridError>;

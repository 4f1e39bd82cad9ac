//! Error types for palette preload validation.

use thiserror::Error;

/// Errors surfaced when replaying a previously saved palette state.
///
/// Only [`Palette::preloaded`](crate::Palette::preloaded) can fail; the
/// `exact*` and `analyzed*` constructors substitute the built-in fallback
/// palette instead of reporting invalid input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// The saved palette array must hold exactly 256 entries.
    #[error("palette array must have {expected} entries, got {actual}")]
    PaletteSize {
        /// Required entry count (256).
        expected: usize,
        /// Entry count supplied by the caller.
        actual: usize,
    },

    /// The saved nearest-color index must be a flat 32 768-byte dump.
    #[error("nearest-color mapping must be {expected} bytes, got {actual}")]
    MappingSize {
        /// Required byte count (32 768).
        expected: usize,
        /// Byte count supplied by the caller.
        actual: usize,
    },
}

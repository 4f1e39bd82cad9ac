//! Palette derivation, storage, and the perceptual nearest-color index.

mod error;
mod haltonic;
#[allow(clippy::module_inception)]
mod palette;

pub use error::PaletteError;
pub use haltonic::HALTONIC;
pub use palette::{Palette, DEFAULT_THRESHOLD, MAX_COLORS};

//! The precomputed Oklab table over the RGB555 grid and the perceptual
//! distance metric built on it.
//!
//! Every one of the 32 768 15-bit RGB keys maps to an Oklab triple computed
//! once on first use. The table is read-only after initialization and shared
//! freely across threads.

use std::sync::LazyLock;

use super::oklab::{oklab_from_key, Oklab};
use super::{is_opaque, shrink, KEY_COUNT};

/// Scale applied to squared Oklab distances, 2^14.2.
///
/// The value is a convention inherited by every caller-facing threshold:
/// the analyzer's similarity threshold is expressed in these units.
pub const METRIC_SCALE: f64 = 18_820.273_849;

/// Oklab coordinates for every 15-bit RGB key.
static OKLAB: LazyLock<Box<[Oklab]>> = LazyLock::new(|| {
    (0..KEY_COUNT).map(|key| oklab_from_key(key as u16)).collect()
});

/// Look up the Oklab coordinates of a 15-bit RGB key.
#[inline]
pub fn oklab(key: u16) -> Oklab {
    OKLAB[key as usize]
}

/// Scaled squared Oklab distance between two keys. No alpha guard; both
/// keys describe opaque colors by construction.
#[inline]
pub(crate) fn difference_keys(a: u16, b: u16) -> f64 {
    let x = OKLAB[a as usize];
    let y = OKLAB[b as usize];
    x.distance_squared(y) * METRIC_SCALE
}

/// Perceptual distance between two packed RGBA colors.
///
/// Returns `f64::INFINITY` when the two colors disagree on their alpha bit;
/// a transparent color is infinitely far from every opaque one.
///
/// # Example
///
/// ```
/// use okquant::color::difference;
///
/// assert_eq!(difference(0xFF0000FF, 0xFF0000FF), 0.0);
/// assert!(difference(0xFF0000FF, 0x00FF00FF) > difference(0xFF0000FF, 0xFF8080FF));
/// assert!(difference(0xFF000000, 0xFF0000FF).is_infinite());
/// ```
#[inline]
pub fn difference(color1: u32, color2: u32) -> f64 {
    if ((color1 ^ color2) & 0x80) != 0 {
        return f64::INFINITY;
    }
    difference_keys(shrink(color1), shrink(color2))
}

/// Perceptual distance between a packed RGBA color and a second color given
/// as 8-bit channels (implicitly opaque).
#[inline]
pub fn difference_rgb(color1: u32, r: u8, g: u8, b: u8) -> f64 {
    if !is_opaque(color1) {
        return f64::INFINITY;
    }
    let key = (((r as u16) << 7) & 0x7C00) | (((g as u16) << 2) & 0x3E0) | ((b as u16) >> 3);
    difference_keys(shrink(color1), key)
}

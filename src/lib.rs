#![allow(
    clippy::excessive_precision,
    clippy::needless_range_loop,
    clippy::module_inception,
    clippy::manual_range_contains
)]

//! okquant: perceptual palette reduction and dithering for indexed-color
//! images.
//!
//! This library reduces true-color RGBA rasters to a palette of at most 256
//! entries, with perceptual color matching in Oklab space and a selection of
//! dithering strategies. One palette can be shared across many frames,
//! which is the backbone of animated indexed-color encoding; the encoders
//! themselves (GIF, PNG-8) live outside this crate and only consume the
//! palette, the per-pixel index writer, and the reduced frames.
//!
//! # Quick Start
//!
//! Derive a palette, wrap it in a [`Quantizer`], and reduce frames in
//! place:
//!
//! ```
//! use okquant::{DitherAlgorithm, Palette, Pixmap, Quantizer};
//!
//! let palette = Palette::exact(&[0x000000FF, 0xFFFFFFFF]);
//! let mut quantizer = Quantizer::new(palette);
//!
//! let mut frame = Pixmap::from_pixels(2, 2, vec![0x808080FF; 4]);
//! quantizer.reduce(&mut frame, DitherAlgorithm::Scatter);
//!
//! for &pixel in frame.data() {
//!     assert!(pixel == 0x000000FF || pixel == 0xFFFFFFFF);
//! }
//! ```
//!
//! Palettes can also be derived from the frames themselves
//! ([`Palette::analyzed`], [`Palette::analyzed_group`]) or restored from a
//! previously saved array/mapping pair ([`Palette::preloaded`]), which
//! skips the nearest-color index build entirely.
//!
//! # Dithering strategies
//!
//! Selected through [`DitherAlgorithm`] or called directly on
//! [`Quantizer`]:
//!
//! - Solid (no dithering)
//! - Floyd-Steinberg and Sierra Lite error diffusion
//! - Scatter (noise-modulated error diffusion, the default)
//! - Gradient interleaved noise, blue-noise, and chaotic-noise ordered
//!   dithers
//! - Knoll and Knoll-Roberts pattern dithers
//!
//! # Concurrency
//!
//! The Oklab table, the noise textures, and the built-in fallback palette
//! are immutable after first use and shared freely. A [`Quantizer`] owns
//! mutable state (error rows, gamma palette) and must not be shared across
//! threads mid-operation; clone the [`Palette`] into one quantizer per
//! thread instead.

pub mod color;
pub mod dither;
pub mod frame;
pub mod noise;
pub mod palette;


pub use color::{difference, difference_rgb, is_opaque, shrink, snap, stretch, Oklab};
pub use dither::{DitherAlgorithm, Quantizer};
pub use frame::{Blending, Frame, Pixmap};
pub use palette::{Palette, PaletteError, DEFAULT_THRESHOLD, HALTONIC, MAX_COLORS};

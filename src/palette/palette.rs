//! The palette store: up to 256 RGBA entries, the population bias, and the
//! 32 768-byte nearest-color index over the RGB555 grid.
//!
//! Palettes are derived either by adopting a caller-supplied array verbatim
//! (`exact*`), by analyzing the colors of one or more frames (`analyzed*`),
//! or by replaying a previously saved palette + mapping pair (`preloaded`).
//! All derived state is computed at construction; lookups afterwards are
//! single array reads.

use std::collections::HashMap;

use super::error::PaletteError;
use super::haltonic::HALTONIC;
use crate::color::{difference_keys, is_opaque, shrink, KEY_COUNT};
use crate::frame::Frame;

/// Maximum number of palette entries.
pub const MAX_COLORS: usize = 256;

/// Default similarity threshold for [`Palette::analyzed`], in the scaled
/// Oklab metric units of [`difference`](crate::color::difference).
/// Interpreted internally as `threshold >> 2`.
pub const DEFAULT_THRESHOLD: u32 = 150;

/// A color palette with a precomputed perceptual nearest-color index.
///
/// # Slot 0
///
/// `colors()[0] == 0` exactly when the palette reserves a transparent slot;
/// transparent input pixels then short-circuit to RGBA 0 during reduction,
/// and the reserved entry itself never wins a nearest-color search (a
/// transparent entry is infinitely far from every opaque key). When slot 0
/// holds a real color it participates in matching like any other entry.
///
/// # Example
///
/// ```
/// use okquant::Palette;
///
/// let palette = Palette::exact(&[0x000000FF, 0xFF0000FF, 0x00FF00FF]);
/// assert_eq!(palette.color_count(), 3);
/// assert!(!palette.has_transparent());
/// ```
#[derive(Debug, Clone)]
pub struct Palette {
    colors: [u32; MAX_COLORS],
    /// RGB555 key -> palette index. Always `KEY_COUNT` bytes.
    mapping: Box<[u8]>,
    count: usize,
    population_bias: f32,
}

impl Palette {
    /// Adopt a caller-supplied palette verbatim, up to 256 entries.
    ///
    /// Entries whose alpha bit is clear leave their slot zeroed (they count
    /// toward `color_count` but are never matched). Input shorter than two
    /// entries falls back to the built-in [`HALTONIC`] palette; this is a
    /// silent substitution, not an error.
    pub fn exact(colors: &[u32]) -> Self {
        Self::exact_limited(colors, MAX_COLORS)
    }

    /// [`exact`](Self::exact) with an explicit slot limit.
    pub fn exact_limited(colors: &[u32], limit: usize) -> Self {
        if colors.len() < 2 || limit < 2 {
            tracing::warn!(
                supplied = colors.len(),
                limit,
                "unusable palette input, substituting built-in fallback"
            );
            return Self::haltonic();
        }
        let count = colors.len().min(limit).min(MAX_COLORS);
        let mut array = [0u32; MAX_COLORS];
        for (slot, &color) in array.iter_mut().zip(colors.iter().take(count)) {
            if is_opaque(color) {
                *slot = color;
            }
        }
        Self::from_colors(array, count)
    }

    /// The built-in 256-color fallback palette.
    pub fn haltonic() -> Self {
        Self::from_colors(HALTONIC, MAX_COLORS)
    }

    /// Restore a palette from a previously saved `colors()` / `mapping()`
    /// pair, skipping the index build entirely.
    ///
    /// Both arrays are copied verbatim; the caller is responsible for their
    /// integrity (the mapping is a flat byte dump with no framing). The
    /// used-slot count is recovered as one past the last non-zero entry.
    pub fn preloaded(colors: &[u32], mapping: &[u8]) -> Result<Self, PaletteError> {
        if colors.len() != MAX_COLORS {
            return Err(PaletteError::PaletteSize {
                expected: MAX_COLORS,
                actual: colors.len(),
            });
        }
        if mapping.len() != KEY_COUNT {
            return Err(PaletteError::MappingSize {
                expected: KEY_COUNT,
                actual: mapping.len(),
            });
        }
        let mut array = [0u32; MAX_COLORS];
        array.copy_from_slice(colors);
        let count = array
            .iter()
            .rposition(|&c| c != 0)
            .map_or(1, |last| last + 1);
        Ok(Self {
            colors: array,
            mapping: mapping.into(),
            count,
            population_bias: population_bias(count),
        })
    }

    /// Derive a palette from the colors of a single frame.
    ///
    /// See [`analyzed_group`](Self::analyzed_group); this is the one-frame
    /// convenience form.
    pub fn analyzed<F: Frame + ?Sized>(frame: &F, threshold: u32, limit: usize) -> Self {
        let mut histogram = Histogram::default();
        histogram.scan(frame);
        Self::from_histogram(histogram, threshold, limit)
    }

    /// Derive one shared palette from a group of frames (the animation
    /// case: every frame of a sequence quantizes against the same palette).
    ///
    /// Every opaque pixel is snapped onto the RGB555-reconstructed grid and
    /// counted. Colors are ranked by frequency; if they all fit, they are
    /// adopted outright, otherwise a greedy pass accepts a color only when
    /// its perceptual distance to every already-accepted entry is at least
    /// `threshold >> 2`. Rejected colors are dropped regardless of their
    /// popularity; preserving distinct shapes under dithering matters more
    /// than exact color reproduction.
    ///
    /// Fewer than two distinct opaque colors falls back to [`HALTONIC`].
    pub fn analyzed_group<F: Frame>(frames: &[F], threshold: u32, limit: usize) -> Self {
        let mut histogram = Histogram::default();
        for frame in frames {
            histogram.scan(frame);
        }
        Self::from_histogram(histogram, threshold, limit)
    }

    fn from_histogram(histogram: Histogram, threshold: u32, limit: usize) -> Self {
        let limit = limit.min(MAX_COLORS);
        let distinct = histogram.counts.len();
        let has_transparent = histogram.has_transparent;
        tracing::debug!(distinct, has_transparent, "frame analysis complete");

        if distinct < 2 || limit < 2 {
            tracing::warn!(distinct, "too few distinct colors, substituting built-in fallback");
            return Self::haltonic();
        }

        // Rank by frequency, first-seen order breaking ties deterministically.
        let mut ranked: Vec<(u32, ColorStat)> = histogram.counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.1.seq.cmp(&b.1.seq)));

        let mut array = [0u32; MAX_COLORS];
        let count;
        if distinct + has_transparent as usize <= limit {
            let base = has_transparent as usize;
            for (i, (color, _)) in ranked.iter().enumerate() {
                array[base + i] = *color;
            }
            count = distinct + base;
        } else {
            // Too many colors: slot 0 is reserved and the greedy threshold
            // pass picks well-separated survivors in popularity order.
            let min_distance = (threshold >> 2) as f64;
            let mut used = 1usize;
            for (color, _) in &ranked {
                if used >= limit {
                    break;
                }
                let key = shrink(*color);
                let separated = array[1..used]
                    .iter()
                    .all(|&p| difference_keys(shrink(p), key) >= min_distance);
                if separated {
                    array[used] = *color;
                    used += 1;
                }
            }
            count = used;
        }
        Self::from_colors(array, count)
    }

    /// Compute the population bias and nearest-color index for a populated
    /// color array.
    fn from_colors(colors: [u32; MAX_COLORS], count: usize) -> Self {
        let mapping = build_mapping(&colors, count);
        Self {
            colors,
            mapping,
            count,
            population_bias: population_bias(count),
        }
    }

    /// The full 256-entry color array; unused tail slots are zero.
    #[inline]
    pub fn colors(&self) -> &[u32; MAX_COLORS] {
        &self.colors
    }

    /// The color stored at a palette index.
    #[inline]
    pub fn color_at(&self, index: usize) -> u32 {
        self.colors[index]
    }

    /// The nearest-color index as a flat 32 768-byte slice. Callers may
    /// persist it verbatim and replay it through
    /// [`preloaded`](Self::preloaded).
    #[inline]
    pub fn mapping(&self) -> &[u8] {
        &self.mapping
    }

    /// Number of used palette slots.
    #[inline]
    pub fn color_count(&self) -> usize {
        self.count
    }

    /// `exp(-1.375 / color_count)`: dither weights shrink with the palette
    /// so small palettes dither less aggressively.
    #[inline]
    pub fn population_bias(&self) -> f32 {
        self.population_bias
    }

    /// Whether slot 0 is the reserved fully-transparent entry.
    #[inline]
    pub fn has_transparent(&self) -> bool {
        self.colors[0] == 0
    }

    /// Palette index of the entry nearest to a 15-bit RGB key.
    #[inline]
    pub fn nearest_index(&self, key: u16) -> u8 {
        self.mapping[key as usize]
    }

    /// Palette color nearest to a 15-bit RGB key.
    #[inline]
    pub fn nearest_color(&self, key: u16) -> u32 {
        self.colors[self.mapping[key as usize] as usize]
    }
}

#[inline]
fn population_bias(count: usize) -> f32 {
    (-1.375 / count.max(1) as f64).exp() as f32
}

/// Build the RGB555 -> palette-index table.
///
/// Every opaque entry pre-marks its own key, then every remaining key takes
/// the argmin of the perceptual distance over the opaque entries, ties
/// going to the lowest index. Transparent entries are infinitely far from
/// every key, so the reserved slot 0 (and any mid-palette transparent
/// entry) never wins the search. A stored 0 doubles as the "unassigned"
/// sentinel during construction; recomputing such a key reproduces the
/// pre-marked answer, so the ambiguity is harmless.
fn build_mapping(colors: &[u32; MAX_COLORS], count: usize) -> Box<[u8]> {
    let mut mapping = vec![0u8; KEY_COUNT].into_boxed_slice();
    for (i, &color) in colors.iter().enumerate().take(count) {
        if is_opaque(color) {
            mapping[shrink(color) as usize] = i as u8;
        }
    }
    for key in 0..KEY_COUNT {
        if mapping[key] != 0 {
            continue;
        }
        let mut best = 0usize;
        let mut best_distance = f64::INFINITY;
        for (i, &color) in colors.iter().enumerate().take(count) {
            if !is_opaque(color) {
                continue;
            }
            let distance = difference_keys(shrink(color), key as u16);
            if distance < best_distance {
                best_distance = distance;
                best = i;
            }
        }
        mapping[key] = best as u8;
    }
    tracing::trace!(count, "nearest-color index built");
    mapping
}

#[derive(Default)]
struct ColorStat {
    count: u32,
    seq: u32,
}

/// Occurrence counts of snapped opaque colors across one or more frames.
#[derive(Default)]
struct Histogram {
    counts: HashMap<u32, ColorStat>,
    has_transparent: bool,
    next_seq: u32,
}

impl Histogram {
    fn scan<F: Frame + ?Sized>(&mut self, frame: &F) {
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                let color = frame.pixel(x, y);
                if !is_opaque(color) {
                    self.has_transparent = true;
                    continue;
                }
                // Snap onto the RGB555-reconstructed grid before counting
                let snapped = color | ((color >> 5) & 0x0707_0700) | 0xFF;
                let seq = self.next_seq;
                let stat = self.counts.entry(snapped).or_insert_with(|| {
                    ColorStat { count: 0, seq }
                });
                if stat.count == 0 {
                    self.next_seq += 1;
                }
                stat.count += 1;
            }
        }
    }
}

//! Pattern dithers: Knoll and Knoll-Roberts.
//!
//! Thomas Knoll's algorithm runs a small error-feedback loop per pixel,
//! collecting a list of candidate palette colors, orders the candidates by
//! lightness, and picks one through an ordered threshold matrix. The
//! Roberts variant halves the candidate count and rotates the matrix index
//! with a quasirandom sequence, trading the crisp 4x4 patterns for a looser
//! texture.
//!
//! Candidate ordering uses fixed sorting networks. The networks are part of
//! the output contract: a generic sort would order equal-lightness
//! candidates differently and change pixels.

use super::{channel_key, unpack, Quantizer};
use crate::color::{is_opaque, oklab, shrink};
use crate::frame::{Frame, ReplaceBlending};

/// 4x4 ordered threshold matrix, indexed `(x & 3) | ((y & 3) << 2)`.
const PATTERN_MATRIX: [usize; 16] = [0, 12, 3, 15, 8, 4, 11, 7, 2, 14, 1, 13, 10, 6, 9, 5];

/// Roberts quasirandom steps for the Knoll-Roberts matrix rotation:
/// `(1 + 1/g) * 8` with g the plastic constant, and the golden ratio
/// conjugate over 4.
const ROBERTS_X: f64 = 14.039_021_329_973_542;
const ROBERTS_Y: f64 = 0.404_508_497_187_473_7;

/// Batcher odd-even merge network for 8 elements (19 compare-exchanges).
const SORT_8: [(usize, usize); 19] = [
    (0, 1), (2, 3), (4, 5), (6, 7),
    (0, 2), (1, 3), (4, 6), (5, 7),
    (1, 2), (5, 6),
    (0, 4), (1, 5), (2, 6), (3, 7),
    (2, 4), (3, 5),
    (1, 2), (3, 4), (5, 6),
];

/// Green's 60-comparator network for 16 elements, the smallest known.
const SORT_16: [(usize, usize); 60] = [
    (0, 1), (2, 3), (4, 5), (6, 7), (8, 9), (10, 11), (12, 13), (14, 15),
    (0, 2), (1, 3), (4, 6), (5, 7), (8, 10), (9, 11), (12, 14), (13, 15),
    (0, 4), (1, 5), (2, 6), (3, 7), (8, 12), (9, 13), (10, 14), (11, 15),
    (0, 8), (1, 9), (2, 10), (3, 11), (4, 12), (5, 13), (6, 14), (7, 15),
    (5, 10), (6, 9), (3, 12), (13, 14), (7, 11), (1, 2), (4, 8),
    (1, 4), (7, 13), (2, 8), (11, 14),
    (2, 4), (5, 6), (9, 10), (11, 13), (3, 8), (7, 12),
    (6, 8), (10, 12), (3, 5), (7, 9),
    (3, 4), (5, 6), (7, 8), (9, 10), (11, 12),
    (6, 7), (8, 9),
];

/// Compare-exchange candidates into ascending lightness order.
fn sort_by_lightness(colors: &mut [u32], lightness: &mut [f64], network: &[(usize, usize)]) {
    for &(a, b) in network {
        if lightness[a] > lightness[b] {
            lightness.swap(a, b);
            colors.swap(a, b);
        }
    }
}

impl Quantizer {
    /// Knoll pattern dithering: 16 candidates per pixel, picked through the
    /// 4x4 threshold matrix.
    ///
    /// The per-iteration error accounts against the gamma-adjusted palette
    /// rather than the real one; raising the dither strength lowers the
    /// gamma exponent, which skews candidate lists brighter and keeps
    /// pattern coverage from collapsing at high strengths.
    pub fn reduce_knoll<F: Frame + ?Sized>(&mut self, frame: &mut F) {
        let strength = (self.dither_strength * self.palette.population_bias()) as f64;
        let mut frame = ReplaceBlending::new(frame);
        let palette = &self.palette;
        let gamma_palette = &self.gamma_palette;
        let has_transparent = palette.has_transparent();
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                let color = frame.pixel(x, y);
                if !is_opaque(color) && has_transparent {
                    frame.set_pixel(x, y, 0);
                    continue;
                }
                let (or_, og, ob) = unpack(color);
                let mut er = 0i32;
                let mut eg = 0i32;
                let mut eb = 0i32;
                let mut candidates = [0u32; 16];
                let mut lightness = [0f64; 16];
                for slot in 0..16 {
                    let rr = ((or_ as f64 + er as f64 * strength) as i32).clamp(0, 255);
                    let gg = ((og as f64 + eg as f64 * strength) as i32).clamp(0, 255);
                    let bb = ((ob as f64 + eb as f64 * strength) as i32).clamp(0, 255);
                    let index = palette.nearest_index(channel_key(rr, gg, bb)) as usize;
                    let used = palette.color_at(index);
                    candidates[slot] = used;
                    lightness[slot] = oklab(shrink(used)).l;
                    let (gr, gg2, gb) = unpack(gamma_palette[index]);
                    er += or_ - gr;
                    eg += og - gg2;
                    eb += ob - gb;
                }
                sort_by_lightness(&mut candidates, &mut lightness, &SORT_16);
                let pick = PATTERN_MATRIX[((x & 3) | ((y & 3) << 2)) as usize];
                frame.set_pixel(x, y, candidates[pick]);
            }
        }
    }

    /// Knoll-Roberts pattern dithering: 8 candidates, a 0.6x error
    /// multiplier, and a Roberts-sequence rotation of the matrix index.
    pub fn reduce_knoll_roberts<F: Frame + ?Sized>(&mut self, frame: &mut F) {
        let strength = (0.6 * self.dither_strength * self.palette.population_bias()) as f64;
        let mut frame = ReplaceBlending::new(frame);
        let palette = &self.palette;
        let gamma_palette = &self.gamma_palette;
        let has_transparent = palette.has_transparent();
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                let color = frame.pixel(x, y);
                if !is_opaque(color) && has_transparent {
                    frame.set_pixel(x, y, 0);
                    continue;
                }
                let (or_, og, ob) = unpack(color);
                let mut er = 0i32;
                let mut eg = 0i32;
                let mut eb = 0i32;
                let mut candidates = [0u32; 8];
                let mut lightness = [0f64; 8];
                for slot in 0..8 {
                    let rr = ((or_ as f64 + er as f64 * strength) as i32).clamp(0, 255);
                    let gg = ((og as f64 + eg as f64 * strength) as i32).clamp(0, 255);
                    let bb = ((ob as f64 + eb as f64 * strength) as i32).clamp(0, 255);
                    let index = palette.nearest_index(channel_key(rr, gg, bb)) as usize;
                    let used = palette.color_at(index);
                    candidates[slot] = used;
                    lightness[slot] = oklab(shrink(used)).l;
                    let (gr, gg2, gb) = unpack(gamma_palette[index]);
                    er += or_ - gr;
                    eg += og - gg2;
                    eb += ob - gb;
                }
                sort_by_lightness(&mut candidates, &mut lightness, &SORT_8);
                let rotation =
                    ((x as f64 * ROBERTS_X + y as f64 * ROBERTS_Y).floor() as i64 & 3) as usize;
                let pick = rotation ^ ((x & 3) as usize | (((y & 1) as usize) << 2));
                frame.set_pixel(x, y, candidates[pick]);
            }
        }
    }
}

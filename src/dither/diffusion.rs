//! Error-diffusion dithers: Floyd-Steinberg, Sierra Lite, and scatter.
//!
//! All three carry residual quantization error in two signed byte rows per
//! channel (current and next). Error accumulates in floating point but each
//! stored value keeps only the low byte of the sum; the wrap-around is
//! intentional and bounds how far a run of same-direction errors can push
//! later pixels.

use super::{accumulate, channel_key, unpack, Quantizer};
use crate::color::is_opaque;
use crate::frame::{Frame, ReplaceBlending};
use crate::noise::{noise_index, TRI_MULTIPLIERS};

/// Per-neighbor diffusion weights, already scaled by dither strength and
/// population bias.
struct Weights {
    right: f32,
    down_left: f32,
    down: f32,
    down_right: f32,
}

impl Quantizer {
    /// Floyd-Steinberg error diffusion.
    ///
    /// The classic 7/3/5/1 kernel, with all four weights scaled by
    /// `dither_strength * population_bias / 8` so that smaller palettes
    /// diffuse less aggressively.
    pub fn reduce_floyd_steinberg<F: Frame + ?Sized>(&mut self, frame: &mut F) {
        let w = self.dither_strength * self.palette.population_bias() * 0.125;
        let weights = Weights {
            right: 7.0 * w,
            down_left: 3.0 * w,
            down: 5.0 * w,
            down_right: w,
        };
        self.diffuse(frame, weights, false);
    }

    /// Sierra Lite error diffusion.
    ///
    /// A minimal three-neighbor kernel (right, down-left, down). Faster
    /// than Floyd-Steinberg and slightly softer.
    pub fn reduce_sierra_lite<F: Frame + ?Sized>(&mut self, frame: &mut F) {
        let w = self.dither_strength * self.palette.population_bias();
        let weights = Weights {
            right: w,
            down_left: 0.5 * w,
            down: 0.5 * w,
            down_right: 0.0,
        };
        self.diffuse(frame, weights, false);
    }

    /// Noise-modulated error diffusion.
    ///
    /// Floyd-Steinberg's kernel shape, but the error read back at each
    /// pixel is scaled by a per-cell triangular-noise multiplier. The
    /// varying error magnitude breaks up the regular worm artifacts of
    /// plain diffusion while keeping its shape preservation.
    pub fn reduce_scatter<F: Frame + ?Sized>(&mut self, frame: &mut F) {
        let w = 0.140625 * self.dither_strength * self.palette.population_bias();
        let weights = Weights {
            right: 7.0 * w,
            down_left: 3.0 * w,
            down: 5.0 * w,
            down_right: w,
        };
        self.diffuse(frame, weights, true);
    }

    fn diffuse<F: Frame + ?Sized>(&mut self, frame: &mut F, weights: Weights, modulated: bool) {
        let mut frame = ReplaceBlending::new(frame);
        let width = frame.width() as usize;
        let height = frame.height();
        if width == 0 || height == 0 {
            return;
        }
        let palette = &self.palette;
        let rows = &mut self.rows;
        rows.prepare(width);
        let has_transparent = palette.has_transparent();

        for y in 0..height {
            for x in 0..width as u32 {
                let color = frame.pixel(x, y);
                if !is_opaque(color) && has_transparent {
                    frame.set_pixel(x, y, 0);
                    continue;
                }
                let px = x as usize;
                let mut er = rows.cur[0][px] as f32;
                let mut eg = rows.cur[1][px] as f32;
                let mut eb = rows.cur[2][px] as f32;
                if modulated {
                    let multiplier = TRI_MULTIPLIERS[noise_index(x, y)];
                    er *= multiplier;
                    eg *= multiplier;
                    eb *= multiplier;
                }

                let (or_, og, ob) = unpack(color);
                let rr = ((or_ as f32 + er) as i32).clamp(0, 255);
                let gg = ((og as f32 + eg) as i32).clamp(0, 255);
                let bb = ((ob as f32 + eb) as i32).clamp(0, 255);

                let used = palette.nearest_color(channel_key(rr, gg, bb));
                frame.set_pixel(x, y, used);

                let (ur, ug, ub) = unpack(used);
                let rdiff = (or_ - ur) as f32;
                let gdiff = (og - ug) as f32;
                let bdiff = (ob - ub) as f32;

                if px + 1 < width {
                    accumulate(&mut rows.cur[0], px + 1, rdiff * weights.right);
                    accumulate(&mut rows.cur[1], px + 1, gdiff * weights.right);
                    accumulate(&mut rows.cur[2], px + 1, bdiff * weights.right);
                }
                if y + 1 < height {
                    if px > 0 {
                        accumulate(&mut rows.next[0], px - 1, rdiff * weights.down_left);
                        accumulate(&mut rows.next[1], px - 1, gdiff * weights.down_left);
                        accumulate(&mut rows.next[2], px - 1, bdiff * weights.down_left);
                    }
                    accumulate(&mut rows.next[0], px, rdiff * weights.down);
                    accumulate(&mut rows.next[1], px, gdiff * weights.down);
                    accumulate(&mut rows.next[2], px, bdiff * weights.down);
                    if weights.down_right != 0.0 && px + 1 < width {
                        accumulate(&mut rows.next[0], px + 1, rdiff * weights.down_right);
                        accumulate(&mut rows.next[1], px + 1, gdiff * weights.down_right);
                        accumulate(&mut rows.next[2], px + 1, bdiff * weights.down_right);
                    }
                }
            }
            rows.advance();
        }
    }
}

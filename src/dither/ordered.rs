//! Ordered dithers: gradient interleaved noise, blue noise, and chaotic
//! noise.
//!
//! None of these carry residual error between pixels. Each computes a
//! first-pass nearest color, derives a screen-space adjustment, perturbs the
//! target toward or away from that color, and looks the perturbed target up
//! again. Because every pixel is independent they parallelize trivially,
//! unlike the diffusion dithers.

use super::{channel_key, unpack, Quantizer};
use crate::color::{is_opaque, shrink, snap};
use crate::frame::{Frame, ReplaceBlending};
use crate::noise::{noise_index, BLUE_NOISE_RAW};

/// Weyl-sequence constants for the interleaved gradient noise function
/// (Jimenez, "Next Generation Post Processing in Call of Duty: Advanced
/// Warfare").
const IGN_X: f64 = 0.067_110_56;
const IGN_Y: f64 = 0.005_837_15;
const IGN_SCALE: f64 = 52.982_918_9;

/// Low-bit scale for the checkerboard term of the blue-noise adjustment,
/// -(1.375 * 2^-10).
const CHECKER_SCALE: f64 = -0.001_342_773_437_5;

/// Mixing constants for the chaotic-noise accumulator.
const MIX_MULTIPLIER: u64 = 0xD134_2543_DE82_EF95;
const MIX_INCREMENT: u64 = 0x91E1_0DA5_C79E_7B1D;
const MIX_SEED: u64 = 0xC13F_A9A9_02A6_328F;

/// 1.5 * 2^-49, sized so the summed accumulator windows land in a usable
/// perturbation range.
const CHAOS_SCALE: f64 = 2.664_535_259_100_375_7e-15;

#[inline]
fn fract(x: f64) -> f64 {
    x - x.floor()
}

/// Move one channel away from the first-pass color by `adjust` times the
/// quantization gap, clamped to the 8-bit range.
#[inline]
fn perturb(target: i32, used: i32, adjust: f64) -> i32 {
    ((target as f64 + adjust * (target - used) as f64) as i32).clamp(0, 255)
}

impl Quantizer {
    /// Gradient interleaved noise dithering.
    ///
    /// The adjustment is a sine of the interleaved gradient noise value at
    /// the pixel coordinate, which has no tiling period yet avoids visible
    /// regular structure.
    pub fn reduce_gradient_noise<F: Frame + ?Sized>(&mut self, frame: &mut F) {
        let strength =
            3.333 * self.dither_strength as f64 * self.palette.population_bias() as f64;
        let mut frame = ReplaceBlending::new(frame);
        let palette = &self.palette;
        let has_transparent = palette.has_transparent();
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                let color = frame.pixel(x, y);
                if !is_opaque(color) && has_transparent {
                    frame.set_pixel(x, y, 0);
                    continue;
                }
                let target = snap(color);
                let (tr, tg, tb) = unpack(target);
                let used = palette.nearest_color(shrink(target));
                let (ur, ug, ub) = unpack(used);

                let pos = fract(IGN_SCALE * fract(IGN_X * x as f64 + IGN_Y * y as f64));
                let adjust = (2.0 * pos - 1.0).sin() * strength;

                let rr = perturb(tr, ur, adjust);
                let gg = perturb(tg, ug, adjust);
                let bb = perturb(tb, ub, adjust);
                frame.set_pixel(x, y, palette.nearest_color(channel_key(rr, gg, bb)));
            }
        }
    }

    /// Ordered dithering against the tiling 64x64 noise texture.
    ///
    /// A second texture tap at a decorrelated coordinate, flipped on a
    /// checkerboard, breaks the 64-pixel tiling period.
    pub fn reduce_blue_noise<F: Frame + ?Sized>(&mut self, frame: &mut F) {
        let strength = 1.5 * self.dither_strength as f64 * self.palette.population_bias() as f64;
        let mut frame = ReplaceBlending::new(frame);
        let palette = &self.palette;
        let has_transparent = palette.has_transparent();
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                let color = frame.pixel(x, y);
                if !is_opaque(color) && has_transparent {
                    frame.set_pixel(x, y, 0);
                    continue;
                }
                let target = snap(color);
                let (tr, tg, tb) = unpack(target);
                let used = palette.nearest_color(shrink(target));
                let (ur, ug, ub) = unpack(used);

                let adjust = blue_noise_adjust(x, y) * strength;

                let rr = perturb(tr, ur, adjust);
                let gg = perturb(tg, ug, adjust);
                let bb = perturb(tb, ub, adjust);
                frame.set_pixel(x, y, palette.nearest_color(channel_key(rr, gg, bb)));
            }
        }
    }

    /// Chaotic-noise dithering.
    ///
    /// The cube of the scaled blue-noise adjustment supplies structure; a
    /// 64-bit accumulator mixed with every first-pass color supplies
    /// content-dependent chaos on top. Output is deterministic for a given
    /// frame but carries no visible pattern at all.
    pub fn reduce_chaotic_noise<F: Frame + ?Sized>(&mut self, frame: &mut F) {
        let strength = self.dither_strength as f64 * self.palette.population_bias() as f64;
        let mut frame = ReplaceBlending::new(frame);
        let palette = &self.palette;
        let has_transparent = palette.has_transparent();
        let mut state = MIX_SEED;
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                let color = frame.pixel(x, y);
                if !is_opaque(color) && has_transparent {
                    frame.set_pixel(x, y, 0);
                    continue;
                }
                let target = snap(color);
                let (tr, tg, tb) = unpack(target);
                let used = palette.nearest_color(shrink(target));
                let (ur, ug, ub) = unpack(used);

                state = (state ^ used as u64)
                    .wrapping_mul(MIX_MULTIPLIER)
                    .wrapping_add(MIX_INCREMENT);
                // Three staggered windows of the accumulator
                let mixed = (state >> 17) as f64 + (state >> 18) as f64 + (state >> 19) as f64;

                let scaled = blue_noise_adjust(x, y) * (1.5 * strength);
                let checker = (((x + y) & 1) as f64) - 0.5;
                let adjust = scaled * scaled * scaled + mixed * (CHAOS_SCALE * strength * checker);

                let rr = perturb(tr, ur, adjust);
                let gg = perturb(tg, ug, adjust);
                let bb = perturb(tb, ub, adjust);
                frame.set_pixel(x, y, palette.nearest_color(channel_key(rr, gg, bb)));
            }
        }
    }
}

/// The blue-noise adjustment before strength scaling: primary texture tap
/// plus a checkerboard-flipped secondary tap at a sheared coordinate.
#[inline]
fn blue_noise_adjust(x: u32, y: u32) -> f64 {
    let primary = (BLUE_NOISE_RAW[noise_index(x, y)] as f64 + 0.5) / 127.5;
    let secondary_index = (x.wrapping_mul(19) & 63) | ((y.wrapping_mul(23) & 63) << 6);
    let secondary = BLUE_NOISE_RAW[secondary_index as usize] as f64;
    let checker = (((x + y) & 1) as f64) - 0.5;
    primary + checker * (0.5 + secondary) * CHECKER_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dither::DitherAlgorithm;
    use crate::frame::Pixmap;
    use crate::palette::Palette;

    fn black_white() -> Palette {
        Palette::exact(&[0x000000FF, 0xFFFFFFFF])
    }

    fn gradient_frame() -> Pixmap {
        let pixels = (0..64u32 * 64)
            .map(|i| {
                let v = i % 256;
                (v << 24) | (v << 16) | (v << 8) | 0xFF
            })
            .collect();
        Pixmap::from_pixels(64, 64, pixels)
    }

    fn all_in_palette(frame: &Pixmap, palette: &Palette) -> bool {
        frame
            .data()
            .iter()
            .all(|p| palette.colors()[..palette.color_count()].contains(p))
    }

    #[test]
    fn test_gradient_noise_outputs_palette_colors() {
        let mut quantizer = Quantizer::new(black_white());
        let mut frame = gradient_frame();
        quantizer.reduce(&mut frame, DitherAlgorithm::GradientNoise);
        assert!(all_in_palette(&frame, quantizer.palette()));
    }

    #[test]
    fn test_blue_noise_outputs_palette_colors() {
        let mut quantizer = Quantizer::new(black_white());
        let mut frame = gradient_frame();
        quantizer.reduce(&mut frame, DitherAlgorithm::BlueNoise);
        assert!(all_in_palette(&frame, quantizer.palette()));
    }

    #[test]
    fn test_chaotic_noise_outputs_palette_colors() {
        let mut quantizer = Quantizer::new(black_white());
        let mut frame = gradient_frame();
        quantizer.reduce(&mut frame, DitherAlgorithm::ChaoticNoise);
        assert!(all_in_palette(&frame, quantizer.palette()));
    }

    #[test]
    fn test_ordered_dithers_are_deterministic() {
        for algorithm in [
            DitherAlgorithm::GradientNoise,
            DitherAlgorithm::BlueNoise,
            DitherAlgorithm::ChaoticNoise,
        ] {
            let mut quantizer = Quantizer::new(black_white());
            let mut first = gradient_frame();
            let mut second = gradient_frame();
            quantizer.reduce(&mut first, algorithm);
            quantizer.reduce(&mut second, algorithm);
            assert_eq!(first.data(), second.data(), "{algorithm:?} not deterministic");
        }
    }

    #[test]
    fn test_blue_noise_mid_gray_mixes_both_colors() {
        let mut quantizer = Quantizer::new(black_white()).with_dither_strength(1.0);
        let mut frame = Pixmap::from_pixels(64, 64, vec![0x6A6A6AFF; 64 * 64]);
        quantizer.reduce_blue_noise(&mut frame);
        let white = frame.data().iter().filter(|&&p| p == 0xFFFFFFFF).count();
        assert!(white > 0 && white < 64 * 64, "white count {white} should be a mix");
    }

    #[test]
    fn test_gradient_noise_perturbation_depends_on_position() {
        // A flat field near the quantization boundary must not come out flat.
        let mut quantizer = Quantizer::new(black_white()).with_dither_strength(1.0);
        let mut frame = Pixmap::from_pixels(64, 64, vec![0x6A6A6AFF; 64 * 64]);
        quantizer.reduce_gradient_noise(&mut frame);
        let first = frame.data()[0];
        assert!(frame.data().iter().any(|&p| p != first));
    }

    #[test]
    fn test_chaotic_noise_transparent_shortcut() {
        let mut quantizer = Quantizer::new(Palette::exact(&[0x00000000, 0xFFFFFFFF, 0x000000FF]));
        let mut frame = Pixmap::from_pixels(2, 1, vec![0x11223300, 0x808080FF]);
        quantizer.reduce_chaotic_noise(&mut frame);
        assert_eq!(frame.data()[0], 0);
        assert_ne!(frame.data()[1], 0);
    }

    #[test]
    fn test_zero_strength_matches_solid() {
        // With no perturbation the second lookup sees the unchanged target.
        let mut dithered = gradient_frame();
        let mut solid = gradient_frame();
        let mut quantizer = Quantizer::new(black_white()).with_dither_strength(0.0);
        quantizer.reduce_gradient_noise(&mut dithered);
        quantizer.reduce_solid(&mut solid);
        assert_eq!(dithered.data(), solid.data());
    }

    #[test]
    fn test_blue_noise_zero_strength_matches_solid() {
        let mut dithered = gradient_frame();
        let mut solid = gradient_frame();
        let mut quantizer = Quantizer::new(black_white()).with_dither_strength(0.0);
        quantizer.reduce_blue_noise(&mut dithered);
        quantizer.reduce_solid(&mut solid);
        assert_eq!(dithered.data(), solid.data());
    }

    #[test]
    fn test_chaotic_noise_zero_strength_matches_solid() {
        // Both the cubed noise term and the accumulator term scale with
        // strength, so zero strength degenerates to a plain nearest-color
        // pass.
        let mut dithered = gradient_frame();
        let mut solid = gradient_frame();
        let mut quantizer = Quantizer::new(black_white()).with_dither_strength(0.0);
        quantizer.reduce_chaotic_noise(&mut dithered);
        quantizer.reduce_solid(&mut solid);
        assert_eq!(dithered.data(), solid.data());
    }
}

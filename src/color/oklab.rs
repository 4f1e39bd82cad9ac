//! Oklab perceptual color space.
//!
//! Oklab distances track perceived color differences closely, which makes
//! it the working space for palette synthesis and nearest-color matching.
//!
//! # References
//!
//! Björn Ottosson, "A perceptual color space for image processing"
//! <https://bottosson.github.io/posts/oklab/>

/// A color in Oklab perceptual color space.
///
/// # Components
///
/// - `l`: Lightness (0.0 = black, 1.0 = white for in-gamut colors)
/// - `a`: Green-red axis (roughly -0.5 to 0.5)
/// - `b`: Blue-yellow axis (roughly -0.5 to 0.5)
///
/// Components are `f64`; the nearest-color index is sensitive enough to the
/// metric that single-precision rounding can flip argmin ties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    /// Lightness: 0.0 (black) to 1.0 (white) for in-gamut colors
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Oklab {
    /// Create a new Oklab color.
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Squared Euclidean distance in Oklab space.
    ///
    /// Unscaled; see [`difference`](crate::color::difference) for the
    /// metric the palette machinery exposes to callers.
    #[inline]
    pub fn distance_squared(self, other: Oklab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }
}

/// Convert linear RGB components (0.0..=1.0) to Oklab.
///
/// Linear RGB to LMS, cube root, LMS to Lab. The matrix constants are kept
/// at the precision the lookup table was defined with.
pub(crate) fn oklab_from_linear(r: f64, g: f64, b: f64) -> Oklab {
    let lin_l = (0.4121656 * r + 0.5362752 * g + 0.0514576 * b).cbrt();
    let lin_m = (0.2118591 * r + 0.6807190 * g + 0.1074066 * b).cbrt();
    let lin_s = (0.0883098 * r + 0.2818474 * g + 0.6302614 * b).cbrt();
    Oklab {
        l: 0.2104543 * lin_l + 0.7936178 * lin_m - 0.0040720 * lin_s,
        a: 1.9779985 * lin_l - 2.4285922 * lin_m + 0.4505937 * lin_s,
        b: 0.0259040 * lin_l + 0.7827718 * lin_m - 0.8086758 * lin_s,
    }
}

/// Convert a 15-bit RGB key to Oklab.
///
/// Each 5-bit channel `i` samples the squared ramp `(i * i) / 31^2`, which
/// doubles as an inexpensive sRGB-decode approximation over the key grid.
pub(crate) fn oklab_from_key(key: u16) -> Oklab {
    let r = ((key >> 10) & 0x1F) as f64;
    let g = ((key >> 5) & 0x1F) as f64;
    let b = (key & 0x1F) as f64;
    oklab_from_linear((r * r) / 961.0, (g * g) / 961.0, (b * b) / 961.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tolerance for the palette crate comparison. The matrix constants here
    /// are truncated to 7 decimals, so agreement is to ~3 decimal places,
    /// not machine precision.
    const PALETTE_TOLERANCE: f64 = 5e-3;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_oklab_matches_palette_crate() {
        use palette::{IntoColor, LinSrgb, Oklab as PaletteOklab};

        let test_colors = [
            (1.0, 0.0, 0.0), // Red
            (0.0, 1.0, 0.0), // Green
            (0.0, 0.0, 1.0), // Blue
            (0.5, 0.5, 0.5), // Mid gray
            (1.0, 1.0, 1.0), // White
            (0.0, 0.0, 0.0), // Black
        ];

        for (r, g, b) in test_colors {
            let ours = oklab_from_linear(r, g, b);

            let lin: LinSrgb<f64> = LinSrgb::new(r, g, b);
            let reference: PaletteOklab<f64> = lin.into_color();

            assert!(
                approx_eq(ours.l, reference.l, PALETTE_TOLERANCE),
                "L mismatch for ({r}, {g}, {b}): ours={}, palette={}",
                ours.l,
                reference.l
            );
            assert!(
                approx_eq(ours.a, reference.a, PALETTE_TOLERANCE),
                "a mismatch for ({r}, {g}, {b}): ours={}, palette={}",
                ours.a,
                reference.a
            );
            assert!(
                approx_eq(ours.b, reference.b, PALETTE_TOLERANCE),
                "b mismatch for ({r}, {g}, {b}): ours={}, palette={}",
                ours.b,
                reference.b
            );
        }
    }

    #[test]
    fn test_known_values() {
        let white = oklab_from_linear(1.0, 1.0, 1.0);
        assert!(approx_eq(white.l, 1.0, PALETTE_TOLERANCE), "white L = {}", white.l);
        assert!(white.a.abs() < PALETTE_TOLERANCE, "white a = {}", white.a);
        assert!(white.b.abs() < PALETTE_TOLERANCE, "white b = {}", white.b);

        let black = oklab_from_linear(0.0, 0.0, 0.0);
        assert!(black.l.abs() < PALETTE_TOLERANCE, "black L = {}", black.l);

        // Greys are achromatic
        let gray = oklab_from_linear(0.5, 0.5, 0.5);
        assert!(gray.a.abs() < PALETTE_TOLERANCE, "gray a = {}", gray.a);
        assert!(gray.b.abs() < PALETTE_TOLERANCE, "gray b = {}", gray.b);
    }

    #[test]
    fn test_key_ramp_endpoints() {
        let black = oklab_from_key(0);
        let white = oklab_from_key(0x7FFF);
        assert!(black.l.abs() < PALETTE_TOLERANCE);
        assert!(approx_eq(white.l, 1.0, PALETTE_TOLERANCE));
        assert!(black.l < white.l);
    }

    #[test]
    fn test_key_lightness_monotonic_on_greys() {
        let mut prev = f64::NEG_INFINITY;
        for i in 0..32u16 {
            let grey = oklab_from_key((i << 10) | (i << 5) | i);
            assert!(grey.l > prev, "grey ramp not monotonic at {i}");
            prev = grey.l;
        }
    }

    #[test]
    fn test_distance_squared() {
        let white = Oklab::new(1.0, 0.0, 0.0);
        let black = Oklab::new(0.0, 0.0, 0.0);
        let gray = Oklab::new(0.5, 0.0, 0.0);

        assert!((white.distance_squared(black) - 1.0).abs() < 1e-12);
        assert!(white.distance_squared(white) < 1e-15);
        assert!(
            (gray.distance_squared(black) - gray.distance_squared(white)).abs() < 1e-12,
            "gray should be equidistant from black and white"
        );
    }
}

//! Tiling 64x64 noise textures consumed by the ordered and scatter dithers.
//!
//! Two signed byte textures are generated at build time (see `build.rs`):
//! one with a uniform value distribution for the ordered dithers, one with a
//! triangular distribution whose exponential forms the scatter multiplier
//! table. Both tile seamlessly and are indexed `(x & 63) | ((y & 63) << 6)`.

use std::sync::LazyLock;

include!(concat!(env!("OUT_DIR"), "/blue_noise.rs"));

/// Per-cell multipliers for the scatter dither:
/// `multiplier[i] = exp((tri[i] + 0.5) / 128)`.
///
/// The triangular texture is centered on zero, so the geometric mean of the
/// multipliers is approximately 1 and scatter neither brightens nor darkens
/// the diffused error on average.
pub static TRI_MULTIPLIERS: LazyLock<[f32; 4096]> = LazyLock::new(|| {
    let mut table = [0.0f32; 4096];
    for (m, &t) in table.iter_mut().zip(BLUE_NOISE_TRI.iter()) {
        *m = ((t as f64 + 0.5) / 128.0).exp() as f32;
    }
    table
});

/// Index into the 64x64 textures for a pixel coordinate.
#[inline]
pub fn noise_index(x: u32, y: u32) -> usize {
    ((x & 63) | ((y & 63) << 6)) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_have_4096_entries() {
        assert_eq!(BLUE_NOISE_RAW.len(), 4096);
        assert_eq!(BLUE_NOISE_TRI.len(), 4096);
    }

    #[test]
    fn test_raw_histogram_is_exactly_uniform() {
        let mut histogram = [0u32; 256];
        for &v in BLUE_NOISE_RAW.iter() {
            histogram[(v as i16 + 128) as usize] += 1;
        }
        assert!(
            histogram.iter().all(|&c| c == 16),
            "every byte value should appear exactly 16 times"
        );
    }

    #[test]
    fn test_tri_mean_near_zero() {
        let sum: i64 = BLUE_NOISE_TRI.iter().map(|&v| v as i64).sum();
        let mean = sum as f64 / 4096.0;
        assert!(mean.abs() < 2.0, "triangular mean {mean} should be near 0");
    }

    #[test]
    fn test_tri_peaked_at_center() {
        // Triangular: ~44% of mass within a quarter range of zero, ~25% in
        // the outer half. A uniform distribution would show 25% / 50%.
        let near = BLUE_NOISE_TRI.iter().filter(|&&v| (-32..32).contains(&(v as i16))).count();
        let far = BLUE_NOISE_TRI.iter().filter(|&&v| !(-64..64).contains(&(v as i16))).count();
        assert!(near > far, "near={near} far={far}");
        assert!(near > 4096 / 4 + 200, "near={near} looks uniform, not triangular");
    }

    #[test]
    fn test_multipliers_match_formula() {
        let m = &*TRI_MULTIPLIERS;
        for i in (0..4096).step_by(127) {
            let expected = ((BLUE_NOISE_TRI[i] as f64 + 0.5) / 128.0).exp() as f32;
            assert_eq!(m[i], expected, "multiplier mismatch at {i}");
        }
    }

    #[test]
    fn test_multipliers_geometric_mean_near_one() {
        let log_sum: f64 = TRI_MULTIPLIERS.iter().map(|&m| (m as f64).ln()).sum();
        let geo_mean = (log_sum / 4096.0).exp();
        assert!(
            (geo_mean - 1.0).abs() < 0.02,
            "geometric mean {geo_mean} should be ~1"
        );
    }

    #[test]
    fn test_noise_index_tiles() {
        assert_eq!(noise_index(0, 0), 0);
        assert_eq!(noise_index(64, 64), 0);
        assert_eq!(noise_index(63, 0), 63);
        assert_eq!(noise_index(0, 63), 63 << 6);
        assert_eq!(noise_index(65, 2), noise_index(1, 2));
    }

    #[test]
    fn test_textures_are_not_constant() {
        assert!(BLUE_NOISE_RAW.iter().any(|&v| v != BLUE_NOISE_RAW[0]));
        assert!(BLUE_NOISE_TRI.iter().any(|&v| v != BLUE_NOISE_TRI[0]));
    }
}

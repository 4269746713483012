mod config;
mod fpa;

#[doc(inline)]
pub use config::DraftConfig;
#[doc(inline)]
pub use fpa::Fpa;

/// Number of decimal digits coordinates are rounded to on every write.
/// With millimeters as the base unit this is a 1/1000 mm resolution.
pub const COORDINATE_DECIMALS: i32 = 3;

/// Rounds `v` to [`COORDINATE_DECIMALS`] decimal digits.
///
/// Applied consistently on every coordinate write so that equality
/// comparisons after arithmetic remain stable.
#[inline(always)]
pub fn round_coordinate(v: f64) -> f64 {
    let scale = 10f64.powi(COORDINATE_DECIMALS);
    (v * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::round_coordinate;

    #[test]
    fn rounding_is_stable_under_repetition() {
        let v = round_coordinate(1.0 / 3.0);
        assert_eq!(v, 0.333);
        assert_eq!(round_coordinate(v), v);
    }

    #[test]
    fn rounding_handles_negatives() {
        assert_eq!(round_coordinate(-2.71828), -2.718);
    }
}

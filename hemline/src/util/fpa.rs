use std::cmp::Ordering;

/// Half of the coordinate rounding step
/// (see [`COORDINATE_DECIMALS`](crate::util::COORDINATE_DECIMALS)).
const RESOLUTION_EPSILON: f64 = 0.5e-3;

/// Comparison key that treats values within coordinate resolution as equal.
///
/// Coordinates are rounded to 1/1000 mm on every write
/// ([`round_coordinate`](crate::util::round_coordinate)), so two quantities
/// derived from them that differ by less than half a rounding step are
/// indistinguishable in any output. Wrapping such values in `Fpa` collapses
/// those near-ties to [`Ordering::Equal`] instead of letting arithmetic
/// noise decide an order.
#[derive(Debug, Clone, Copy)]
pub struct Fpa(pub f64);

impl PartialEq for Fpa {
    fn eq(&self, other: &Self) -> bool {
        float_cmp::approx_eq!(f64, self.0, other.0, epsilon = RESOLUTION_EPSILON, ulps = 4)
    }
}

impl PartialOrd for Fpa {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.eq(other) {
            true => Some(Ordering::Equal),
            false => self.0.partial_cmp(&other.0),
        }
    }
}

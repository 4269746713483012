use anyhow::{ensure, Result};

use crate::geometry::primitives::Vector;
use crate::util::round_coordinate;

/// A named drafting point.
///
/// Coordinates are rounded to a fixed precision (1/1000 mm) on every write,
/// so that points which are equal after arithmetic compare equal exactly.
/// Points live in a part's point table and are referenced by
/// [`PointId`](crate::entities::PointId) from path segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Free-form annotation, carried along but never interpreted.
    pub description: String,
}

impl Point {
    /// Creates a point, rounding both coordinates.
    /// Non-finite coordinates are an error in the upstream drafting logic
    /// and rejected here rather than silently coerced.
    pub fn try_new(x: f64, y: f64, description: impl Into<String>) -> Result<Self> {
        ensure!(
            x.is_finite() && y.is_finite(),
            "non-finite point coordinates: ({x}, {y})"
        );
        Ok(Point {
            x: round_coordinate(x),
            y: round_coordinate(y),
            description: description.into(),
        })
    }

    /// Overwrites the coordinates, applying the same rounding and validation
    /// as construction.
    pub fn set_position(&mut self, x: f64, y: f64) -> Result<()> {
        ensure!(
            x.is_finite() && y.is_finite(),
            "non-finite point coordinates: ({x}, {y})"
        );
        self.x = round_coordinate(x);
        self.y = round_coordinate(y);
        Ok(())
    }

    pub fn position(&self) -> Vector {
        Vector(self.x, self.y)
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl TryFrom<Vector> for Point {
    type Error = anyhow::Error;

    fn try_from(v: Vector) -> Result<Self> {
        Point::try_new(v.0, v.1, "")
    }
}

#[cfg(test)]
mod tests {
    use super::Point;

    #[test]
    fn coordinates_are_rounded_on_write() {
        let p = Point::try_new(1.00049, 2.00051, "test").unwrap();
        assert_eq!((p.x, p.y), (1.0, 2.001));
    }

    #[test]
    fn non_finite_input_is_rejected() {
        assert!(Point::try_new(f64::NAN, 0.0, "").is_err());
        assert!(Point::try_new(0.0, f64::INFINITY, "").is_err());

        let mut p = Point::try_new(0.0, 0.0, "").unwrap();
        assert!(p.set_position(f64::NEG_INFINITY, 1.0).is_err());
        // a failed write leaves the point untouched
        assert_eq!((p.x, p.y), (0.0, 0.0));
    }
}

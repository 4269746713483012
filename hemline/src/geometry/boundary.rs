use anyhow::{ensure, Result};

use crate::geometry::primitives::Vector;

/// Axis-aligned bounding box of a path, a part or a single curve.
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Boundary {
    pub top_left: Vector,
    pub bottom_right: Vector,
}

impl Boundary {
    pub fn try_new(top_left: Vector, bottom_right: Vector) -> Result<Self> {
        ensure!(
            top_left.0 <= bottom_right.0 && top_left.1 <= bottom_right.1,
            "invalid boundary, top_left: {top_left:?}, bottom_right: {bottom_right:?}"
        );
        Ok(Boundary {
            top_left,
            bottom_right,
        })
    }

    /// Boundary spanning two arbitrary diagonal corners.
    pub fn from_diagonal_corners(c1: Vector, c2: Vector) -> Self {
        Boundary {
            top_left: c1.min(c2),
            bottom_right: c1.max(c2),
        }
    }

    /// Degenerate boundary containing a single position.
    pub fn at(v: Vector) -> Self {
        Boundary {
            top_left: v,
            bottom_right: v,
        }
    }

    /// Smallest boundary containing both `self` and `v`.
    pub fn extended_to(self, v: Vector) -> Self {
        Boundary {
            top_left: self.top_left.min(v),
            bottom_right: self.bottom_right.max(v),
        }
    }

    /// Smallest boundary containing both `a` and `b`.
    pub fn union(a: Boundary, b: Boundary) -> Boundary {
        Boundary {
            top_left: a.top_left.min(b.top_left),
            bottom_right: a.bottom_right.max(b.bottom_right),
        }
    }

    pub fn width(&self) -> f64 {
        self.bottom_right.0 - self.top_left.0
    }

    pub fn height(&self) -> f64 {
        self.bottom_right.1 - self.top_left.1
    }

    /// Largest of width and height, the sort key for sheet packing.
    pub fn max_size(&self) -> f64 {
        f64::max(self.width(), self.height())
    }

    pub fn contains(&self, v: Vector) -> bool {
        v.0 >= self.top_left.0
            && v.0 <= self.bottom_right.0
            && v.1 >= self.top_left.1
            && v.1 <= self.bottom_right.1
    }

    pub fn overlaps(&self, other: &Boundary) -> bool {
        f64::max(self.top_left.0, other.top_left.0)
            <= f64::min(self.bottom_right.0, other.bottom_right.0)
            && f64::max(self.top_left.1, other.top_left.1)
                <= f64::min(self.bottom_right.1, other.bottom_right.1)
    }
}

#[cfg(test)]
mod tests {
    use super::Boundary;
    use crate::geometry::primitives::Vector;

    #[test]
    fn diagonal_corners_normalize() {
        let b = Boundary::from_diagonal_corners(Vector(10.0, -5.0), Vector(-2.0, 7.0));
        assert_eq!(b.top_left, Vector(-2.0, -5.0));
        assert_eq!(b.bottom_right, Vector(10.0, 7.0));
        assert_eq!(b.width(), 12.0);
        assert_eq!(b.height(), 12.0);
    }

    #[test]
    fn union_covers_both() {
        let a = Boundary::from_diagonal_corners(Vector(0.0, 0.0), Vector(1.0, 1.0));
        let b = Boundary::from_diagonal_corners(Vector(3.0, -1.0), Vector(4.0, 0.5));
        let u = Boundary::union(a, b);
        assert!(u.contains(Vector(0.5, 0.5)));
        assert!(u.contains(Vector(3.5, -0.5)));
        assert_eq!(u.max_size(), 4.0);
    }
}

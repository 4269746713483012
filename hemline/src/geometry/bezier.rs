use crate::geometry::primitives::Vector;
use crate::geometry::{Boundary, Polynomial};

/// Evaluates one axis of a cubic Bezier in Bernstein form at `t ∈ [0,1]`.
pub fn bezier_point(t: f64, v0: f64, v1: f64, v2: f64, v3: f64) -> f64 {
    let mt = 1.0 - t;
    v0 * mt.powi(3) + 3.0 * v1 * mt.powi(2) * t + 3.0 * v2 * mt * t.powi(2) + v3 * t.powi(3)
}

/// A single cubic Bezier segment defined by its 4 control points.
#[derive(Debug, Clone, PartialEq, Copy)]
pub struct CubicBezier {
    pub from: Vector,
    pub cp1: Vector,
    pub cp2: Vector,
    pub to: Vector,
}

impl CubicBezier {
    pub fn new(from: Vector, cp1: Vector, cp2: Vector, to: Vector) -> Self {
        CubicBezier { from, cp1, cp2, to }
    }

    pub fn point_at(&self, t: f64) -> Vector {
        Vector(
            bezier_point(t, self.from.0, self.cp1.0, self.cp2.0, self.to.0),
            bezier_point(t, self.from.1, self.cp1.1, self.cp2.1, self.to.1),
        )
    }

    /// The curve rewritten in power basis for one axis:
    /// `v0 + 3(v1-v0)t + 3(v0-2v1+v2)t² + (v3-3v2+3v1-v0)t³`.
    fn power_basis(v0: f64, v1: f64, v2: f64, v3: f64) -> Polynomial {
        Polynomial::new(vec![
            v0,
            3.0 * (v1 - v0),
            3.0 * (v0 - 2.0 * v1 + v2),
            v3 - 3.0 * v2 + 3.0 * v1 - v0,
        ])
    }

    pub fn power_basis_x(&self) -> Polynomial {
        Self::power_basis(self.from.0, self.cp1.0, self.cp2.0, self.to.0)
    }

    pub fn power_basis_y(&self) -> Polynomial {
        Self::power_basis(self.from.1, self.cp1.1, self.cp2.1, self.to.1)
    }

    /// Derivative vector at `t`. May be zero at degenerate control points.
    pub fn tangent_at(&self, t: f64) -> Vector {
        let mt = 1.0 - t;
        let d1 = (self.cp1 - self.from) * (3.0 * mt * mt);
        let d2 = (self.cp2 - self.cp1) * (6.0 * mt * t);
        let d3 = (self.to - self.cp2) * (3.0 * t * t);
        d1 + d2 + d3
    }

    /// Direction of travel at the start of the curve, robust against a
    /// control point coinciding with the endpoint.
    pub fn direction_at_start(&self) -> Option<Vector> {
        [self.cp1, self.cp2, self.to]
            .into_iter()
            .find_map(|c| (c - self.from).unit())
    }

    /// Direction of travel at the end of the curve, robust against a
    /// control point coinciding with the endpoint.
    pub fn direction_at_end(&self) -> Option<Vector> {
        [self.cp2, self.cp1, self.from]
            .into_iter()
            .find_map(|c| (self.to - c).unit())
    }

    /// Splits the curve at `t` via de Casteljau, yielding two sub-curves
    /// that together trace the exact same geometry.
    pub fn split(&self, t: f64) -> (CubicBezier, CubicBezier) {
        let a = self.from.lerp(self.cp1, t);
        let b = self.cp1.lerp(self.cp2, t);
        let c = self.cp2.lerp(self.to, t);
        let ab = a.lerp(b, t);
        let bc = b.lerp(c, t);
        let mid = ab.lerp(bc, t);

        (
            CubicBezier::new(self.from, a, ab, mid),
            CubicBezier::new(mid, bc, c, self.to),
        )
    }

    /// Exact axis-aligned bounding box.
    ///
    /// Evaluates the curve at the roots of the derivative polynomial on each
    /// axis (the curve's extrema) plus both endpoints. Strictly tighter than
    /// the control-point hull whenever a control point overshoots the curve,
    /// which is what makes downstream seam allowances land correctly near
    /// curve extrema.
    pub fn boundary(&self) -> Boundary {
        let mut boundary = Boundary::from_diagonal_corners(self.from, self.to);

        let extrema_x = self.power_basis_x().derivative().roots_in_interval(0.0, 1.0);
        let extrema_y = self.power_basis_y().derivative().roots_in_interval(0.0, 1.0);
        for t in extrema_x.into_iter().chain(extrema_y) {
            boundary = boundary.extended_to(self.point_at(t));
        }
        boundary
    }

    /// Bounding box of the control points. Always contains the curve, but
    /// loosely; used as the cheap pre-reject in curve/curve intersection.
    pub fn control_boundary(&self) -> Boundary {
        Boundary::from_diagonal_corners(self.from, self.cp1)
            .extended_to(self.cp2)
            .extended_to(self.to)
    }

    /// Straight-line distance between the two endpoints.
    pub fn chord_length(&self) -> f64 {
        self.from.distance(self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::{bezier_point, CubicBezier};
    use crate::geometry::primitives::Vector;

    fn arch() -> CubicBezier {
        // symmetric arch: curve tops out at y = 75, control points at y = 100
        CubicBezier::new(
            Vector(0.0, 0.0),
            Vector(0.0, 100.0),
            Vector(100.0, 100.0),
            Vector(100.0, 0.0),
        )
    }

    #[test]
    fn bernstein_interpolates_endpoints() {
        assert_eq!(bezier_point(0.0, 5.0, 1.0, 2.0, 9.0), 5.0);
        assert_eq!(bezier_point(1.0, 5.0, 1.0, 2.0, 9.0), 9.0);
    }

    #[test]
    fn boundary_is_tighter_than_control_hull() {
        let curve = arch();
        let exact = curve.boundary();
        let hull = curve.control_boundary();

        // the true apex of this arch is at y = 75: 3/4 of the control height
        assert!((exact.bottom_right.1 - 75.0).abs() < 1e-6);
        assert_eq!(hull.bottom_right.1, 100.0);
        assert!(exact.bottom_right.1 < hull.bottom_right.1);
    }

    #[test]
    fn boundary_matches_dense_sampling() {
        let curve = CubicBezier::new(
            Vector(0.0, 0.0),
            Vector(120.0, 40.0),
            Vector(-30.0, 80.0),
            Vector(90.0, 10.0),
        );
        let boundary = curve.boundary();

        let mut sampled = boundary;
        for i in 0..=2000 {
            let p = curve.point_at(i as f64 / 2000.0);
            sampled = sampled.extended_to(p);
        }
        // dense sampling should not enlarge an exact boundary beyond noise
        assert!(sampled.width() - boundary.width() < 1e-9);
        assert!(sampled.height() - boundary.height() < 1e-9);
    }

    #[test]
    fn split_preserves_geometry() {
        let curve = arch();
        let (left, right) = curve.split(0.3);
        assert_eq!(left.from, curve.from);
        assert_eq!(right.to, curve.to);
        assert_eq!(left.to, right.from);

        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let on_left = left.point_at(t);
            let original = curve.point_at(t * 0.3);
            assert!(on_left.distance(original) < 1e-9);
        }
    }

    #[test]
    fn start_direction_skips_degenerate_control_point() {
        let curve = CubicBezier::new(
            Vector(0.0, 0.0),
            Vector(0.0, 0.0), // cp1 collapsed onto the start
            Vector(50.0, 50.0),
            Vector(100.0, 0.0),
        );
        let dir = curve.direction_at_start().unwrap();
        assert!(dir.0 > 0.0 && dir.1 > 0.0);
    }
}

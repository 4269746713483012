use std::ops::{Add, Mul, Neg, Sub};

use crate::geometry::primitives::Point;

/// Geometric primitive representing a 2D vector (or an anonymous position).
///
/// Lighter-weight than [`Point`]: carries no description, is never rounded
/// and never owns long-lived identity. All intermediate geometry math runs
/// on this type.
#[derive(Debug, Clone, PartialEq, Copy, Default)]
pub struct Vector(pub f64, pub f64);

impl Vector {
    pub fn dot(&self, other: Vector) -> f64 {
        self.0 * other.0 + self.1 * other.1
    }

    /// 2D cross product (z-component of the 3D cross product).
    pub fn cross(&self, other: Vector) -> f64 {
        self.0 * other.1 - self.1 * other.0
    }

    pub fn length(&self) -> f64 {
        (self.0.powi(2) + self.1.powi(2)).sqrt()
    }

    pub fn distance(&self, other: Vector) -> f64 {
        (*self - other).length()
    }

    pub fn sq_distance(&self, other: Vector) -> f64 {
        (self.0 - other.0).powi(2) + (self.1 - other.1).powi(2)
    }

    /// Linear interpolation between `self` (t=0) and `other` (t=1).
    pub fn lerp(&self, other: Vector, t: f64) -> Vector {
        Vector(
            self.0 + (other.0 - self.0) * t,
            self.1 + (other.1 - self.1) * t,
        )
    }

    /// Component-wise minimum, used to accumulate bounding boxes.
    pub fn min(&self, other: Vector) -> Vector {
        Vector(f64::min(self.0, other.0), f64::min(self.1, other.1))
    }

    /// Component-wise maximum, used to accumulate bounding boxes.
    pub fn max(&self, other: Vector) -> Vector {
        Vector(f64::max(self.0, other.0), f64::max(self.1, other.1))
    }

    /// Returns the vector scaled to unit length, or `None` for a (near-)zero vector.
    pub fn unit(&self) -> Option<Vector> {
        let l = self.length();
        if l <= f64::EPSILON {
            None
        } else {
            Some(Vector(self.0 / l, self.1 / l))
        }
    }

    /// Unit normal: `self` rotated 90° counterclockwise and normalized.
    /// `None` for a (near-)zero vector.
    pub fn normal(&self) -> Option<Vector> {
        self.unit().map(|Vector(x, y)| Vector(-y, x))
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector(-self.0, -self.1)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector(self.0 * rhs, self.1 * rhs)
    }
}

impl From<Vector> for (f64, f64) {
    fn from(v: Vector) -> Self {
        (v.0, v.1)
    }
}

impl From<(f64, f64)> for Vector {
    fn from(v: (f64, f64)) -> Self {
        Vector(v.0, v.1)
    }
}

impl From<&Point> for Vector {
    fn from(p: &Point) -> Self {
        Vector(p.x, p.y)
    }
}

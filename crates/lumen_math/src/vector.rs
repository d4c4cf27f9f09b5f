//! Free vectors and locations in 3D space.
//!
//! `Vector3` is a displacement with no position, `Point3` is a location.
//! They are kept as distinct types so a point can never be used where a
//! direction is expected: `Point3 - Point3` yields a `Vector3` and
//! `Point3 + Vector3` yields a `Point3`. Anything else needs an explicit verb.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use glam::DVec3;

/// A direction or displacement in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A location in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);
    pub const X: Vector3 = Vector3::new(1.0, 0.0, 0.0);
    pub const Y: Vector3 = Vector3::new(0.0, 1.0, 0.0);
    pub const Z: Vector3 = Vector3::new(0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Vector3) -> f64 {
        self.to_dvec3().dot(other.to_dvec3())
    }

    #[inline]
    pub fn cross(self, other: Vector3) -> Vector3 {
        self.to_dvec3().cross(other.to_dvec3()).into()
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.to_dvec3().length()
    }

    #[inline]
    pub fn length_squared(self) -> f64 {
        self.to_dvec3().length_squared()
    }

    /// Unit vector in the direction of `self`.
    ///
    /// # Panics
    ///
    /// Panics if the vector has zero length or non-finite components. A
    /// degenerate direction is a programming error, and letting it through
    /// would only smear NaN across the rest of the frame.
    #[inline]
    pub fn normalize(self) -> Vector3 {
        match self.try_normalize() {
            Some(unit) => unit,
            None => panic!("cannot normalize degenerate vector {self}"),
        }
    }

    /// Unit vector in the direction of `self`, or `None` if it has no direction.
    #[inline]
    pub fn try_normalize(self) -> Option<Vector3> {
        self.to_dvec3().try_normalize().map(Vector3::from)
    }

    /// Mirror this vector about a surface normal.
    ///
    /// `normal` is expected to be unit length.
    #[inline]
    pub fn reflect(self, normal: Vector3) -> Vector3 {
        self - normal * (2.0 * self.dot(normal))
    }

    #[inline]
    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance between two points.
    #[inline]
    pub fn distance(self, other: Point3) -> f64 {
        (self - other).length()
    }

    #[inline]
    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl From<DVec3> for Vector3 {
    #[inline]
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<DVec3> for Point3 {
    #[inline]
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// Vector space

impl Add for Vector3 {
    type Output = Vector3;

    #[inline]
    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vector3) {
        *self = *self + rhs;
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    #[inline]
    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vector3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vector3) {
        *self = *self - rhs;
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    #[inline]
    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        rhs * self
    }
}

impl Div<f64> for Vector3 {
    type Output = Vector3;

    #[inline]
    fn div(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

// Affine space

impl Add<Vector3> for Point3 {
    type Output = Point3;

    #[inline]
    fn add(self, rhs: Vector3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign<Vector3> for Point3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vector3) {
        *self = *self + rhs;
    }
}

impl Sub<Vector3> for Point3 {
    type Output = Point3;

    #[inline]
    fn sub(self, rhs: Vector3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Vector3;

    #[inline]
    fn sub(self, rhs: Point3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

// Affine transforms mapping object space to world space.
//
// Backed by a glam DMat4 (column-major). Only translation and axis-aligned
// scale are exposed, which is what makes the decomposition inverse below valid.

use std::fmt;
use std::ops::Mul;

use glam::{DMat3, DMat4, DVec3};

use crate::{Point3, Vector3};

/// An affine map: a 3x3 linear block plus a translation column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    matrix: DMat4,
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform {
        matrix: DMat4::IDENTITY,
    };

    /// The identity transform.
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Build a transform from a linear block and a translation.
    pub fn from_linear(linear: DMat3, translation: Vector3) -> Self {
        Self {
            matrix: DMat4::from_cols(
                linear.x_axis.extend(0.0),
                linear.y_axis.extend(0.0),
                linear.z_axis.extend(0.0),
                translation.to_dvec3().extend(1.0),
            ),
        }
    }

    /// Increment the translation column.
    pub fn translate(mut self, dx: f64, dy: f64, dz: f64) -> Self {
        self.matrix.w_axis.x += dx;
        self.matrix.w_axis.y += dy;
        self.matrix.w_axis.z += dz;
        self
    }

    /// Overwrite the translation column.
    pub fn set_translation(mut self, x: f64, y: f64, z: f64) -> Self {
        self.matrix.w_axis.x = x;
        self.matrix.w_axis.y = y;
        self.matrix.w_axis.z = z;
        self
    }

    /// Multiply every diagonal entry of the linear block by `k`.
    pub fn scale(self, k: f64) -> Self {
        self.scale_xyz(k, k, k)
    }

    /// Multiply the diagonal of the linear block by `kx`, `ky` and `kz`.
    pub fn scale_xyz(mut self, kx: f64, ky: f64, kz: f64) -> Self {
        self.matrix.x_axis.x *= kx;
        self.matrix.y_axis.y *= ky;
        self.matrix.z_axis.z *= kz;
        self
    }

    /// The top-left 3x3 block.
    pub fn extract_linear(&self) -> DMat3 {
        DMat3::from_mat4(self.matrix)
    }

    /// The translation column.
    pub fn translation(&self) -> Vector3 {
        self.matrix.w_axis.truncate().into()
    }

    /// The full homogeneous matrix.
    pub fn matrix(&self) -> DMat4 {
        self.matrix
    }

    /// Invert the transform by decomposing its linear block.
    ///
    /// The diagonal is taken as the scale, divided out of the linear block,
    /// and the remainder is treated as a rotation and inverted by transposing
    /// it. The translation inverse is then `L⁻¹ · (−t)`.
    ///
    /// This is exact for translation combined with axis-aligned, possibly
    /// non-uniform, scale, which is every transform this crate can build. It
    /// is NOT a general inverse: once rotation enters the linear block the
    /// diagonal no longer holds the scale factors and the result is wrong.
    /// Supporting rotation needs a real decomposition (or a general inverse),
    /// not a tweak to this routine.
    ///
    /// Every diagonal scale factor must be nonzero. That is a precondition on
    /// the caller; a zero factor silently yields non-finite entries.
    pub fn inverse(&self) -> Self {
        let linear = self.extract_linear();

        let inverse_scale = DMat3::from_diagonal(DVec3::new(
            linear.x_axis.x.recip(),
            linear.y_axis.y.recip(),
            linear.z_axis.z.recip(),
        ));

        let inverse_rotation = (inverse_scale * linear).transpose();
        let inverse_linear = inverse_rotation * inverse_scale;

        let inverse_translation = inverse_linear * -self.matrix.w_axis.truncate();
        Self::from_linear(inverse_linear, inverse_translation.into())
    }

    /// Map a point; the translation column applies.
    #[inline]
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.matrix.transform_point3(point.to_dvec3()).into()
    }

    /// Map a vector; the translation column does not apply.
    #[inline]
    pub fn transform_vector(&self, vector: Vector3) -> Vector3 {
        self.matrix.transform_vector3(vector.to_dvec3()).into()
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for AffineTransform {
    type Output = AffineTransform;

    fn mul(self, rhs: AffineTransform) -> AffineTransform {
        AffineTransform {
            matrix: self.matrix * rhs.matrix,
        }
    }
}

impl Mul<Point3> for AffineTransform {
    type Output = Point3;

    #[inline]
    fn mul(self, rhs: Point3) -> Point3 {
        self.transform_point(rhs)
    }
}

impl Mul<Vector3> for AffineTransform {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.transform_vector(rhs)
    }
}

impl Mul<Point3> for &AffineTransform {
    type Output = Point3;

    #[inline]
    fn mul(self, rhs: Point3) -> Point3 {
        self.transform_point(rhs)
    }
}

impl Mul<Vector3> for &AffineTransform {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.transform_vector(rhs)
    }
}

impl fmt::Display for AffineTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..4 {
            let r = self.matrix.row(row);
            writeln!(f, "[ {}, {}, {}, {} ]", r.x, r.y, r.z, r.w)?;
        }
        Ok(())
    }
}

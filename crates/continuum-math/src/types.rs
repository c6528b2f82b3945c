//! Typed roles for 3×3 matrices.
//!
//! The free functions in [`crate::so3`] accept any [`DMat3`] and trust the caller. The
//! wrappers here make the two roles explicit: [`SkewMatrix`] for elements of so(3) and
//! [`RotationMatrix`] for elements of SO(3). Their checked constructors validate the
//! matrix once, after which the unchecked free functions are safe to call on them.

use crate::error::ContinuumMathError;
use crate::so3::{
    hat, inv_hat, linear_rotation_error, matrix_log, rotation_angle, rotation_error,
};
use glam::{DMat3, DQuat, DVec3};
use rand::Rng;

/// Default absolute tolerance used by the checked constructors.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

fn max_abs(m: &DMat3) -> f64 {
    m.to_cols_array().iter().fold(0.0, |acc, x| acc.max(x.abs()))
}

/// A 3×3 skew-symmetric matrix, an element of so(3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkewMatrix(DMat3);

impl SkewMatrix {
    /// The zero element of so(3).
    pub const ZERO: Self = Self(DMat3::ZERO);

    /// Create a skew-symmetric matrix, checking `m = -mᵗ` with [`DEFAULT_TOLERANCE`].
    pub fn new(m: DMat3) -> Result<Self, ContinuumMathError> {
        Self::new_with_tolerance(m, DEFAULT_TOLERANCE)
    }

    /// Create a skew-symmetric matrix, checking `m = -mᵗ` with the given tolerance.
    pub fn new_with_tolerance(m: DMat3, tolerance: f64) -> Result<Self, ContinuumMathError> {
        if !m.is_finite() {
            log::debug!("rejecting non-finite skew matrix: {m:?}");
            return Err(ContinuumMathError::NonFinite);
        }

        let deviation = max_abs(&(m + m.transpose()));
        if deviation > tolerance {
            log::debug!("rejecting skew matrix, deviation {deviation:e} > {tolerance:e}");
            return Err(ContinuumMathError::NotSkewSymmetric {
                deviation,
                tolerance,
            });
        }

        Ok(Self(m))
    }

    /// Build the skew-symmetric matrix of a vector via [`hat`].
    #[inline]
    pub fn from_vector(v: DVec3) -> Self {
        Self(hat(v))
    }

    /// The vector form of this matrix via [`inv_hat`].
    #[inline]
    pub fn vector(&self) -> DVec3 {
        inv_hat(self.0)
    }

    /// The underlying matrix.
    #[inline]
    pub fn matrix(&self) -> DMat3 {
        self.0
    }
}

impl From<DVec3> for SkewMatrix {
    fn from(v: DVec3) -> Self {
        Self::from_vector(v)
    }
}

impl std::ops::Mul<DVec3> for SkewMatrix {
    type Output = DVec3;

    /// Equivalent to `self.vector().cross(rhs)`.
    fn mul(self, rhs: DVec3) -> Self::Output {
        self.0 * rhs
    }
}

/// A 3×3 rotation matrix, an element of SO(3).
///
/// # Important
///
/// - Composition with `*` does not re-orthogonalize. Long products drift off SO(3)
///   slowly; run the result through [`RotationMatrix::new`] if it has to stay checked.
/// - [`RotationMatrix::log`] and [`RotationMatrix::error_to`] share the θ → π
///   singularity of [`matrix_log`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix(DMat3);

impl RotationMatrix {
    /// The identity rotation.
    pub const IDENTITY: Self = Self(DMat3::IDENTITY);

    /// Create a rotation matrix, checking `mᵗm = I` and `det(m) = +1` with
    /// [`DEFAULT_TOLERANCE`].
    pub fn new(m: DMat3) -> Result<Self, ContinuumMathError> {
        Self::new_with_tolerance(m, DEFAULT_TOLERANCE)
    }

    /// Create a rotation matrix, checking `mᵗm = I` and `det(m) = +1` with the given
    /// tolerance.
    pub fn new_with_tolerance(m: DMat3, tolerance: f64) -> Result<Self, ContinuumMathError> {
        Self::validate(&m, tolerance)?;
        Ok(Self(m))
    }

    /// Wrap a matrix without checking it.
    ///
    /// NOTE: the matrix is only validated in debug builds.
    #[inline]
    pub fn from_matrix_unchecked(m: DMat3) -> Self {
        debug_assert!(
            Self::validate(&m, DEFAULT_TOLERANCE).is_ok(),
            "not a rotation matrix: {m:?}"
        );
        Self(m)
    }

    /// Create a rotation matrix from rows, `rows[i][j]` being row `i`, column `j`.
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Result<Self, ContinuumMathError> {
        Self::new(DMat3::from_cols_array_2d(&rows).transpose())
    }

    /// Lie algebra -> Lie group, the rotation of angle `|v|` about `v`.
    pub fn exp(v: DVec3) -> Self {
        let theta = v.length();
        if theta == 0.0 {
            return Self::IDENTITY;
        }
        Self(DMat3::from_axis_angle(v / theta, theta))
    }

    /// Lie group -> Lie algebra, the axis-angle vector of this rotation.
    ///
    /// Zero for the identity.
    #[inline]
    pub fn log(&self) -> DVec3 {
        inv_hat(matrix_log(self.0))
    }

    /// Uniformly distributed random rotation.
    pub fn from_random() -> Self {
        let mut rng = rand::rng();

        let r1: f64 = rng.random();
        let r2: f64 = rng.random();
        let r3: f64 = rng.random();

        // Shoemake's uniform unit quaternion
        let one_minus_r1_sqrt = (1.0 - r1).sqrt();
        let r1_sqrt = r1.sqrt();

        let w = one_minus_r1_sqrt * (2.0 * std::f64::consts::PI * r2).cos();
        let x = one_minus_r1_sqrt * (2.0 * std::f64::consts::PI * r2).sin();
        let y = r1_sqrt * (2.0 * std::f64::consts::PI * r3).cos();
        let z = r1_sqrt * (2.0 * std::f64::consts::PI * r3).sin();

        Self(DMat3::from_quat(DQuat::from_xyzw(x, y, z, w).normalize()))
    }

    /// The underlying matrix.
    #[inline]
    pub fn matrix(&self) -> DMat3 {
        self.0
    }

    /// The transpose, which is also the inverse.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self(self.0.transpose())
    }

    /// The inverse rotation.
    #[inline]
    pub fn inverse(&self) -> Self {
        self.transpose()
    }

    /// Rotation angle in [0, π].
    #[inline]
    pub fn angle(&self) -> f64 {
        rotation_angle(&self.0)
    }

    /// Exact rotation error to `other`, see [`rotation_error`].
    #[inline]
    pub fn error_to(&self, other: &Self) -> DVec3 {
        rotation_error(self.0, other.0)
    }

    /// Linearized rotation error to `other`, see [`linear_rotation_error`].
    #[inline]
    pub fn linear_error_to(&self, other: &Self) -> DVec3 {
        linear_rotation_error(self.0, other.0)
    }

    fn validate(m: &DMat3, tolerance: f64) -> Result<(), ContinuumMathError> {
        if !m.is_finite() {
            log::debug!("rejecting non-finite rotation matrix: {m:?}");
            return Err(ContinuumMathError::NonFinite);
        }

        let deviation = max_abs(&(m.transpose() * *m - DMat3::IDENTITY));
        if deviation > tolerance {
            log::debug!("rejecting rotation matrix, deviation {deviation:e} > {tolerance:e}");
            return Err(ContinuumMathError::NotOrthogonal {
                deviation,
                tolerance,
            });
        }

        let determinant = m.determinant();
        if determinant < 0.0 {
            log::debug!("rejecting reflection, determinant {determinant}");
            return Err(ContinuumMathError::NotProperRotation(determinant));
        }

        Ok(())
    }
}

impl TryFrom<DMat3> for RotationMatrix {
    type Error = ContinuumMathError;

    fn try_from(m: DMat3) -> Result<Self, Self::Error> {
        Self::new(m)
    }
}

impl From<RotationMatrix> for DMat3 {
    fn from(r: RotationMatrix) -> Self {
        r.0
    }
}

impl std::ops::Mul<RotationMatrix> for RotationMatrix {
    type Output = RotationMatrix;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl std::ops::MulAssign<RotationMatrix> for RotationMatrix {
    #[inline]
    fn mul_assign(&mut self, rhs: RotationMatrix) {
        *self = *self * rhs;
    }
}

impl std::ops::Mul<DVec3> for RotationMatrix {
    type Output = DVec3;

    fn mul(self, rhs: DVec3) -> Self::Output {
        self.0 * rhs
    }
}

#[cfg(feature = "approx")]
impl approx::AbsDiffEq for SkewMatrix {
    type Epsilon = <DMat3 as approx::AbsDiffEq>::Epsilon;

    #[inline]
    fn default_epsilon() -> Self::Epsilon {
        <DMat3 as approx::AbsDiffEq>::default_epsilon()
    }

    #[inline]
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.0, &other.0, epsilon)
    }
}

#[cfg(feature = "approx")]
impl approx::RelativeEq for SkewMatrix {
    #[inline]
    fn default_max_relative() -> Self::Epsilon {
        <DMat3 as approx::RelativeEq>::default_max_relative()
    }

    #[inline]
    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        approx::RelativeEq::relative_eq(&self.0, &other.0, epsilon, max_relative)
    }
}

#[cfg(feature = "approx")]
impl approx::AbsDiffEq for RotationMatrix {
    type Epsilon = <DMat3 as approx::AbsDiffEq>::Epsilon;

    #[inline]
    fn default_epsilon() -> Self::Epsilon {
        <DMat3 as approx::AbsDiffEq>::default_epsilon()
    }

    #[inline]
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.0, &other.0, epsilon)
    }
}

#[cfg(feature = "approx")]
impl approx::RelativeEq for RotationMatrix {
    #[inline]
    fn default_max_relative() -> Self::Epsilon {
        <DMat3 as approx::RelativeEq>::default_max_relative()
    }

    #[inline]
    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        approx::RelativeEq::relative_eq(&self.0, &other.0, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_skew_from_vector() {
        let v = DVec3::new(1.0, 2.0, 3.0);
        let s = SkewMatrix::from_vector(v);
        assert_eq!(s.matrix(), hat(v));
        assert_eq!(s.vector(), v);
        assert_eq!(SkewMatrix::from(v), s);
    }

    #[test]
    fn test_skew_new() {
        assert!(SkewMatrix::new(hat(DVec3::new(0.1, -0.2, 0.3))).is_ok());
        assert_eq!(SkewMatrix::new(DMat3::ZERO), Ok(SkewMatrix::ZERO));

        let res = SkewMatrix::new(DMat3::IDENTITY);
        assert_eq!(
            res,
            Err(ContinuumMathError::NotSkewSymmetric {
                deviation: 2.0,
                tolerance: DEFAULT_TOLERANCE,
            })
        );

        let nan = DMat3::from_diagonal(DVec3::new(f64::NAN, 0.0, 0.0));
        assert_eq!(SkewMatrix::new(nan), Err(ContinuumMathError::NonFinite));
    }

    #[test]
    fn test_skew_new_with_tolerance() {
        let mut m = hat(DVec3::new(1.0, 1.0, 1.0));
        m.x_axis.y += 1e-6;
        assert!(SkewMatrix::new(m).is_err());
        assert!(SkewMatrix::new_with_tolerance(m, 1e-5).is_ok());
    }

    #[test]
    fn test_skew_mul_is_cross() {
        let v = DVec3::new(0.3, -0.7, 1.1);
        let u = DVec3::new(2.0, 0.5, -1.0);
        let lhs = SkewMatrix::from_vector(v) * u;
        let rhs = v.cross(u);
        assert_relative_eq!(lhs.x, rhs.x, epsilon = EPSILON);
        assert_relative_eq!(lhs.y, rhs.y, epsilon = EPSILON);
        assert_relative_eq!(lhs.z, rhs.z, epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_new() {
        assert_eq!(
            RotationMatrix::new(DMat3::IDENTITY),
            Ok(RotationMatrix::IDENTITY)
        );
        assert!(RotationMatrix::new(DMat3::from_rotation_z(0.4)).is_ok());

        let scaled = DMat3::from_diagonal(DVec3::new(2.0, 1.0, 1.0));
        assert!(matches!(
            RotationMatrix::new(scaled),
            Err(ContinuumMathError::NotOrthogonal { .. })
        ));

        let reflection = DMat3::from_diagonal(DVec3::new(-1.0, 1.0, 1.0));
        assert_eq!(
            RotationMatrix::new(reflection),
            Err(ContinuumMathError::NotProperRotation(-1.0))
        );

        let inf = DMat3::from_diagonal(DVec3::new(f64::INFINITY, 1.0, 1.0));
        assert_eq!(RotationMatrix::new(inf), Err(ContinuumMathError::NonFinite));
    }

    #[test]
    fn test_rotation_from_rows() {
        let r = RotationMatrix::from_rows([[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]])
            .unwrap();
        let v = r * DVec3::X;
        assert_eq!(v, DVec3::Y);

        assert!(RotationMatrix::from_rows([[1.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
            .is_err());
    }

    #[test]
    fn test_rotation_try_from() {
        let m = DMat3::from_rotation_x(-0.9);
        let r = RotationMatrix::try_from(m).unwrap();
        assert_eq!(DMat3::from(r), m);
        assert!(RotationMatrix::try_from(DMat3::ZERO).is_err());
    }

    #[test]
    fn test_rotation_exp_log() {
        assert_eq!(RotationMatrix::exp(DVec3::ZERO), RotationMatrix::IDENTITY);
        assert_eq!(RotationMatrix::IDENTITY.log(), DVec3::ZERO);

        let v = DVec3::new(0.2, -0.4, 0.9);
        let log = RotationMatrix::exp(v).log();
        assert_relative_eq!(log.x, v.x, epsilon = EPSILON);
        assert_relative_eq!(log.y, v.y, epsilon = EPSILON);
        assert_relative_eq!(log.z, v.z, epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_angle() {
        let r = RotationMatrix::exp(DVec3::new(0.0, 0.0, -1.5));
        assert_relative_eq!(r.angle(), 1.5, epsilon = EPSILON);
        assert_eq!(RotationMatrix::IDENTITY.angle(), 0.0);
    }

    #[test]
    fn test_rotation_inverse() {
        let r = RotationMatrix::exp(DVec3::new(0.5, -0.2, 0.1));
        let identity = (r * r.inverse()).matrix();
        assert!(max_abs(&(identity - DMat3::IDENTITY)) < EPSILON);
        assert_eq!(r.inverse(), r.transpose());
    }

    #[test]
    fn test_rotation_mul_assign() {
        let a = RotationMatrix::exp(DVec3::new(0.1, 0.0, 0.0));
        let b = RotationMatrix::exp(DVec3::new(0.0, 0.2, 0.0));
        let mut c = a;
        c *= b;
        assert_eq!(c, a * b);
    }

    #[test]
    fn test_rotation_from_random() {
        for _ in 0..100 {
            let r = RotationMatrix::from_random();
            assert!(RotationMatrix::new(r.matrix()).is_ok());
        }
    }

    #[test]
    fn test_rotation_error_to() {
        let r1 = RotationMatrix::exp(DVec3::new(0.3, 0.1, -0.2));
        let tau = DVec3::new(0.05, -0.02, 0.01);
        let r2 = r1 * RotationMatrix::exp(tau);

        let err = r1.error_to(&r2);
        assert_relative_eq!(err.x, tau.x, epsilon = 1e-10);
        assert_relative_eq!(err.y, tau.y, epsilon = 1e-10);
        assert_relative_eq!(err.z, tau.z, epsilon = 1e-10);

        // the linear metric mixes r1's frame and the world frame, to first order
        let linear = r1.linear_error_to(&r2);
        assert!((linear - (tau + r1 * tau)).length() < 1e-2);

        let r2 = RotationMatrix::exp(tau);
        let linear = RotationMatrix::IDENTITY.linear_error_to(&r2);
        assert!((linear - 2.0 * tau).length() < 1e-4);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not a rotation matrix")]
    fn test_rotation_from_matrix_unchecked_debug_rejects() {
        let shear = DMat3::from_cols_array_2d(&[[1.0, 0.0, 0.0], [0.5, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        let _ = RotationMatrix::from_matrix_unchecked(shear);
    }

    #[test]
    #[cfg(feature = "approx")]
    fn test_skew_approx() {
        use approx::{assert_abs_diff_eq, assert_abs_diff_ne, assert_relative_ne};

        let a = SkewMatrix::from_vector(DVec3::new(0.1, 0.2, 0.3));
        let b = SkewMatrix::from_vector(DVec3::new(0.1, 0.2, 0.3 + 1e-10));
        let c = SkewMatrix::from_vector(DVec3::new(0.1, 0.2, 0.4));

        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        assert_relative_eq!(a, b, epsilon = 1e-9);
        assert_abs_diff_ne!(a, c, epsilon = 1e-9);
        assert_relative_ne!(a, c, epsilon = 1e-9);
    }

    #[test]
    #[cfg(feature = "approx")]
    fn test_rotation_approx() {
        use approx::{assert_abs_diff_eq, assert_abs_diff_ne, assert_relative_ne};

        let a = RotationMatrix::exp(DVec3::new(0.5, -0.2, 0.1));
        let b = RotationMatrix::exp(DVec3::new(0.5, -0.2, 0.1 + 1e-10));
        let c = RotationMatrix::exp(DVec3::new(0.5, -0.2, 0.2));

        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        assert_relative_eq!(a, b, epsilon = 1e-9);
        assert_abs_diff_ne!(a, c, epsilon = 1e-9);
        assert_relative_ne!(a, c, epsilon = 1e-9);
        assert_relative_eq!(a * a.inverse(), RotationMatrix::IDENTITY, epsilon = EPSILON);
    }
}

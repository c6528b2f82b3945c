//! # SO(3) primitives
//!
//! The Lie algebra **so(3)** is the space of 3×3 skew-symmetric matrices, isomorphic to
//! R³ through the hat map. A vector `v ∈ R³` encodes an axis-angle rotation: the
//! direction is the axis, the norm is the angle in radians.
//!
//! All functions here are pure and total. They take plain [`DMat3`] / [`DVec3`] values
//! and never check that a matrix really is skew-symmetric or orthogonal; passing
//! something else yields a well-defined but meaningless result.
//!
//! ## Index convention
//!
//! glam stores matrices column-major. Element `(i, j)` (row `i`, column `j`) is
//! `m.col(j)[i]`, so `m.x_axis.y` is row 1, column 0.
//!
//! ## Edge cases of the logarithm
//!
//! - θ = 0: [`matrix_log`] returns the **identity** matrix, not the zero matrix.
//!   [`inv_hat`] of the identity is the zero vector, so [`rotation_error`] is still zero.
//! - θ → π: `sin θ → 0` and the result blows up. No special branch exists for it.

use glam::{DMat3, DVec3};

/// Maps a vector in R³ to its 3×3 skew-symmetric matrix in so(3).
///
/// The result `m` satisfies `m * u == v.cross(u)` for every `u`:
///
/// ```text
/// [  0   -v2   v1 ]
/// [ v2    0   -v0 ]
/// [-v1   v0    0  ]
/// ```
///
/// # Example
///
/// ```rust
/// use continuum_math::hat;
/// use glam::{DMat3, DVec3};
///
/// let m = hat(DVec3::new(1.0, 2.0, 3.0));
/// let expected = DMat3::from_cols_array_2d(&[
///     [0.0, 3.0, -2.0],
///     [-3.0, 0.0, 1.0],
///     [2.0, -1.0, 0.0],
/// ]);
/// assert_eq!(m, expected);
/// ```
#[inline]
pub fn hat(v: DVec3) -> DMat3 {
    DMat3::from_cols(
        DVec3::new(0.0, v.z, -v.y),
        DVec3::new(-v.z, 0.0, v.x),
        DVec3::new(v.y, -v.x, 0.0),
    )
}

/// Maps a skew-symmetric matrix in so(3) back to R³.
///
/// Reads `(m[2][1], m[0][2], m[1][0])` (row, column). The input is not validated: the
/// diagonal and the entries at `(1, 2)`, `(2, 0)` and `(0, 1)` are ignored, so a
/// non skew-symmetric matrix still produces a value.
#[inline]
pub fn inv_hat(m: DMat3) -> DVec3 {
    DVec3::new(m.y_axis.z, m.z_axis.x, m.x_axis.y)
}

/// Rotation angle θ ∈ [0, π] of a rotation matrix, from its trace.
///
/// The acos argument is clamped to [-1, 1] so a trace drifting slightly outside
/// [-1, 3] gives 0 or π instead of NaN.
#[inline]
pub(crate) fn rotation_angle(r: &DMat3) -> f64 {
    let trace = r.x_axis.x + r.y_axis.y + r.z_axis.z;
    ((trace - 1.0) / 2.0).clamp(-1.0, 1.0).acos()
}

/// Principal matrix logarithm of a rotation matrix.
///
/// Returns the skew-symmetric matrix `hat(θ · axis)` with
/// `θ = acos((trace(r) - 1) / 2)`, computed as `θ / (2 sin θ) · (r - rᵗ)`.
///
/// NOTE: for θ = 0 this returns [`DMat3::IDENTITY`], not the zero matrix. Near θ = π
/// the factor `θ / sin θ` is singular and the output is not usable.
///
/// # Example
///
/// ```rust
/// use continuum_math::{inv_hat, matrix_log};
/// use glam::{DMat3, DVec3};
///
/// let r = DMat3::from_rotation_x(0.3);
/// let omega = inv_hat(matrix_log(r));
/// assert!((omega - DVec3::new(0.3, 0.0, 0.0)).length() < 1e-12);
///
/// assert_eq!(matrix_log(DMat3::IDENTITY), DMat3::IDENTITY);
/// ```
pub fn matrix_log(r: DMat3) -> DMat3 {
    let theta = rotation_angle(&r);

    if theta == 0.0 {
        return DMat3::IDENTITY;
    }

    (theta / (2.0 * theta.sin())) * (r - r.transpose())
}

/// Rotation vector (axis times angle) taking `r1` to `r2`, in the frame of `r1`.
///
/// Computed as `inv_hat(matrix_log(r1ᵗ r2))`, so it inherits both edge cases of
/// [`matrix_log`]. Equal inputs give the zero vector.
#[inline]
pub fn rotation_error(r1: DMat3, r2: DMat3) -> DVec3 {
    inv_hat(matrix_log(r1.transpose() * r2))
}

/// Linearized distance between two rotation matrices.
///
/// Computed as `inv_hat(r1ᵗ r2 - r1 r2ᵗ)`, without any trigonometry. For a small
/// relative rotation with exact error `e = rotation_error(r1, r2)` it approaches
/// `e + r1 * e`, which is `2 * e` when `r1` is the identity.
///
/// WARNING: the result is the zero vector whenever `r1ᵗ r2 = r1 r2ᵗ`, even though the
/// rotations differ. This holds for any 180 degree rotation when the other input is the
/// identity, e.g. `r1 = I` and `r2` a half-turn. The second term is `r1 (r1ᵗ r2)ᵗ r1ᵗ`, so
/// the same relative half-turn seen from another `r1` is generally not zero.
#[inline]
pub fn linear_rotation_error(r1: DMat3, r2: DMat3) -> DVec3 {
    inv_hat(r1.transpose() * r2 - r1 * r2.transpose())
}

#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Continuum Math
//!
//! Small closed-form routines for 3D rotations, expressed through the Lie group SO(3)
//! and its Lie algebra so(3). Everything works on `f64` [`glam`] containers:
//! [`DVec3`](glam::DVec3) for vectors and [`DMat3`](glam::DMat3) for matrices.
//!
//! ## Functions
//!
//! | Function | Maps |
//! |----------|------|
//! | [`hat`] | R³ → so(3), `hat(v) * u == v × u` |
//! | [`inv_hat`] | so(3) → R³, unchecked inverse of [`hat`] |
//! | [`matrix_log`] | SO(3) → so(3), principal logarithm |
//! | [`rotation_error`] | SO(3) × SO(3) → R³, exact axis-angle error |
//! | [`linear_rotation_error`] | SO(3) × SO(3) → R³, small-angle error |
//!
//! The free functions never validate their inputs. The [`SkewMatrix`] and
//! [`RotationMatrix`] wrappers carry the same operations behind checked constructors.
//!
//! ## Example
//!
//! ```rust
//! use continuum_math::{rotation_error, PI};
//! use glam::{DMat3, DVec3};
//!
//! let r1 = DMat3::IDENTITY;
//! let r2 = DMat3::from_rotation_z(PI / 2.0);
//!
//! let err = rotation_error(r1, r2);
//! assert!((err - DVec3::new(0.0, 0.0, PI / 2.0)).length() < 1e-12);
//! ```

/// Error types for the checked matrix constructors.
pub mod error;

/// Hat map, rotation logarithm and rotation error metrics.
pub mod so3;

/// Typed skew-symmetric and rotation matrices.
pub mod types;

pub use error::ContinuumMathError;
pub use so3::{hat, inv_hat, linear_rotation_error, matrix_log, rotation_error};
pub use types::{RotationMatrix, SkewMatrix, DEFAULT_TOLERANCE};

/// π at double precision.
pub const PI: f64 = std::f64::consts::PI;

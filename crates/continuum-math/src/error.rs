use thiserror::Error;

/// An error type for the checked skew-symmetric and rotation matrix constructors.
#[derive(Error, Debug, PartialEq)]
pub enum ContinuumMathError {
    /// The matrix contains a NaN or infinite entry.
    #[error("The matrix contains non-finite entries")]
    NonFinite,

    /// `m + mᵗ` is not the zero matrix.
    #[error("Matrix is not skew-symmetric: max |m + mᵗ| = {deviation} > {tolerance}")]
    NotSkewSymmetric {
        /// Largest absolute entry of `m + mᵗ`.
        deviation: f64,
        /// Tolerance the check was run with.
        tolerance: f64,
    },

    /// `mᵗ m` is not the identity matrix.
    #[error("Matrix is not orthogonal: max |mᵗm - I| = {deviation} > {tolerance}")]
    NotOrthogonal {
        /// Largest absolute entry of `mᵗ m - I`.
        deviation: f64,
        /// Tolerance the check was run with.
        tolerance: f64,
    },

    /// The matrix is orthogonal but a reflection.
    #[error("Matrix is not a proper rotation: determinant is {0}")]
    NotProperRotation(f64),
}

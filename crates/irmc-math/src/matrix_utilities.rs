//! Matrix decompositions.
//!
//! Wraps nalgebra's Cholesky factorisation and adds the variant used by the
//! one-factor simulation, which removes a leading block of (numerically)
//! zero variances before factorising.

use crate::matrix::Matrix;
use irmc_core::{
    errors::{Error, Result},
    Real,
};

/// Cholesky decomposition of a symmetric positive-definite matrix.
///
/// Returns the lower-triangular factor `L` such that `A = L * Lᵀ`.
pub fn cholesky_decomposition(m: &Matrix) -> Result<Matrix> {
    if !m.is_square() {
        return Err(Error::InvalidArgument("matrix must be square".into()));
    }
    if m.rows() == 0 {
        return Ok(Matrix::zeros(0, 0));
    }
    match m.inner().clone().cholesky() {
        Some(chol) => Ok(Matrix::from(chol.l())),
        None => Err(Error::NumericalPrecondition(format!(
            "Cholesky decomposition failed: {}x{} matrix is not positive-definite",
            m.rows(),
            m.cols()
        ))),
    }
}

/// Result of [`cholesky_decomposition_stripped`].
#[derive(Debug, Clone)]
pub struct StrippedCholesky {
    /// Full-size lower-triangular factor; rows and columns of the stripped
    /// entries are zero.
    pub factor: Matrix,
    /// Number of leading diagonal entries that were below the threshold.
    pub nb_zero: usize,
}

/// Cholesky decomposition of a covariance matrix whose leading diagonal
/// entries may vanish.
///
/// The leading run of diagonal entries strictly below `threshold` is removed,
/// the remaining trailing block is factorised and the factor is re-embedded
/// into a zero matrix of the original size. If every diagonal entry is below
/// the threshold the factor is the zero matrix.
///
/// # Errors
/// [`Error::NumericalPrecondition`] if the reduced block is not
/// positive-definite.
pub fn cholesky_decomposition_stripped(m: &Matrix, threshold: Real) -> Result<StrippedCholesky> {
    if !m.is_square() {
        return Err(Error::InvalidArgument("matrix must be square".into()));
    }
    let n = m.rows();
    let nb_zero = (0..n).take_while(|&i| m[(i, i)] < threshold).count();
    if nb_zero == n {
        return Ok(StrippedCholesky {
            factor: Matrix::zeros(n, n),
            nb_zero,
        });
    }
    let reduced = cholesky_decomposition(&m.trailing_block(nb_zero))?;
    Ok(StrippedCholesky {
        factor: Matrix::embed_trailing(&reduced, n),
        nb_zero,
    })
}

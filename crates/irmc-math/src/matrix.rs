//! `Matrix` — covariance matrices and their Cholesky factors.
//!
//! A newtype over `nalgebra::DMatrix<f64>` with the few operations the
//! path generators use: building a covariance entry by entry, cutting and
//! re-embedding a trailing block, and applying a lower-triangular factor
//! to independent draws stored row by row.

use irmc_core::Real;
use nalgebra::DMatrix;
use std::ops::{Index, IndexMut, Mul};

/// A dense matrix of `Real` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix(DMatrix<Real>);

impl Matrix {
    /// `rows × cols` zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self(DMatrix::zeros(rows, cols))
    }

    /// From row-major data.
    pub fn from_row_slice(rows: usize, cols: usize, data: &[Real]) -> Self {
        Self(DMatrix::from_row_slice(rows, cols, data))
    }

    /// Entry `(i, j)` set to `f(i, j)`.
    pub fn from_fn<F: FnMut(usize, usize) -> Real>(rows: usize, cols: usize, f: F) -> Self {
        Self(DMatrix::from_fn(rows, cols, f))
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.0.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.0.ncols()
    }

    /// Whether the matrix is square.
    pub fn is_square(&self) -> bool {
        self.0.nrows() == self.0.ncols()
    }

    /// The underlying nalgebra matrix.
    pub fn inner(&self) -> &DMatrix<Real> {
        &self.0
    }

    /// Transpose.
    pub fn transpose(&self) -> Self {
        Self(self.0.transpose())
    }

    /// Copy of the block below and right of `(offset, offset)`.
    pub fn trailing_block(&self, offset: usize) -> Self {
        let shape = (self.rows() - offset, self.cols() - offset);
        Self(self.0.view((offset, offset), shape).clone_owned())
    }

    /// `size × size` zeros with `block` in the bottom-right corner.
    pub fn embed_trailing(block: &Matrix, size: usize) -> Self {
        let offset = size - block.rows();
        let mut full = DMatrix::zeros(size, size);
        full.view_mut((offset, offset), (block.rows(), block.cols()))
            .copy_from(&block.0);
        Self(full)
    }

    /// `y = L·x` for this lower-triangular `L`, where `x[k]` holds the draws
    /// of factor `k` across paths. Zero entries of `L` are skipped.
    pub fn lower_triangular_apply(&self, x: &[Vec<Real>]) -> Vec<Vec<Real>> {
        let nb_path = x.first().map_or(0, Vec::len);
        (0..self.rows())
            .map(|r| {
                let mut y = vec![0.0; nb_path];
                for (k, xk) in x.iter().enumerate().take(r + 1) {
                    let l = self.0[(r, k)];
                    if l != 0.0 {
                        y.iter_mut().zip(xk).for_each(|(yp, xp)| *yp += l * xp);
                    }
                }
                y
            })
            .collect()
    }

    /// Largest absolute entry-wise difference with `other`.
    pub fn max_abs_diff(&self, other: &Matrix) -> Real {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(0.0, |acc, (a, b)| acc.max((a - b).abs()))
    }
}

impl From<DMatrix<Real>> for Matrix {
    fn from(m: DMatrix<Real>) -> Self {
        Self(m)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Real;
    fn index(&self, (i, j): (usize, usize)) -> &Real {
        &self.0[(i, j)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Real {
        &mut self.0[(i, j)]
    }
}

impl Mul for &Matrix {
    type Output = Matrix;
    fn mul(self, rhs: &Matrix) -> Matrix {
        Matrix(&self.0 * &rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_times_transpose() {
        let l = Matrix::from_row_slice(2, 2, &[2.0, 0.0, 1.0, 3.0]);
        let c = &l * &l.transpose();
        assert_eq!(c, Matrix::from_row_slice(2, 2, &[4.0, 2.0, 2.0, 10.0]));
    }

    #[test]
    fn trailing_block_and_embed() {
        let m = Matrix::from_fn(3, 3, |i, j| (3 * i + j + 1) as Real);
        let block = m.trailing_block(1);
        assert_eq!(block, Matrix::from_row_slice(2, 2, &[5.0, 6.0, 8.0, 9.0]));
        let full = Matrix::embed_trailing(&block, 3);
        assert_eq!(full[(0, 0)], 0.0);
        assert_eq!(full[(1, 0)], 0.0);
        assert_eq!(full[(1, 2)], 6.0);
        assert_eq!(full[(2, 2)], 9.0);
    }

    #[test]
    fn entry_assignment() {
        let mut m = Matrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        m[(0, 1)] = 3.0;
        m[(1, 1)] += 0.5;
        assert_eq!(m, Matrix::from_row_slice(2, 2, &[1.0, 3.0, 0.0, 1.5]));
    }

    #[test]
    fn lower_triangular_apply_by_row() {
        let l = Matrix::from_row_slice(2, 2, &[0.0, 0.0, 0.5, 2.0]);
        let y = l.lower_triangular_apply(&[vec![1.0, -1.0], vec![0.5, 0.25]]);
        assert_eq!(y[0], vec![0.0, 0.0]);
        assert_eq!(y[1], vec![1.5, 0.0]);
    }
}

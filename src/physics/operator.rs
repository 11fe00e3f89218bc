//! Sparse linear operators
//!
//! A [`LinearOperator`] is the right-hand side `A` of the semi-discrete
//! system `ds/dt = A·s`. It wraps a square CSR matrix and supports
//! matrix-vector application plus the small algebra needed to build models
//! from pieces (`A + B`, `c·A`).
//!
//! # Ownership
//!
//! The matrix lives behind an [`Arc`]: cloning an operator is cheap and
//! shares the storage, so one operator can drive many environments. Nothing
//! ever mutates a matrix in place; addition and scaling allocate a new one.

use nalgebra::DVector;
use nalgebra_sparse::{CooMatrix, CsrMatrix};
use std::ops::{Add, Mul};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{EngineError, EngineResult};

/// Immutable sparse linear operator
///
/// # Example
///
/// ```rust
/// use diffuse_rs::physics::LinearOperator;
/// use nalgebra::DVector;
///
/// let a = LinearOperator::from_triplets(2, &[(0, 0, 2.0), (1, 0, 1.0), (1, 1, -1.0)])?;
/// let b = LinearOperator::identity(2);
///
/// let sum = a.checked_add(&b)? * 0.5;
/// let result = sum.apply(&DVector::from_vec(vec![1.0, 1.0]))?;
///
/// assert_eq!(result.as_slice(), &[1.5, 0.5]);
/// # Ok::<(), diffuse_rs::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LinearOperator {
    matrix: Arc<CsrMatrix<f64>>,
}

impl LinearOperator {
    /// Wrap a square sparse matrix
    ///
    /// # Errors
    ///
    /// [`EngineError::Dimension`] when the matrix is not square.
    pub fn new(matrix: CsrMatrix<f64>) -> EngineResult<Self> {
        if matrix.nrows() != matrix.ncols() {
            return Err(EngineError::dimension(
                "operator construction",
                matrix.nrows(),
                matrix.ncols(),
            ));
        }

        Ok(Self {
            matrix: Arc::new(matrix),
        })
    }

    /// Build an `n × n` operator from `(row, column, value)` triplets
    ///
    /// Duplicate positions are summed.
    pub fn from_triplets(n: usize, triplets: &[(usize, usize, f64)]) -> EngineResult<Self> {
        let mut coo = CooMatrix::new(n, n);

        for &(row, col, value) in triplets {
            if row >= n {
                return Err(EngineError::dimension("operator triplet row", n, row));
            }
            if col >= n {
                return Err(EngineError::dimension("operator triplet column", n, col));
            }
            coo.push(row, col, value);
        }

        Self::new(CsrMatrix::from(&coo))
    }

    /// The `n × n` zero operator
    pub fn zeros(n: usize) -> Self {
        Self {
            matrix: Arc::new(CsrMatrix::from(&CooMatrix::new(n, n))),
        }
    }

    /// The `n × n` identity operator
    pub fn identity(n: usize) -> Self {
        Self {
            matrix: Arc::new(CsrMatrix::identity(n)),
        }
    }

    // ========================================== Queries ==========================================

    /// Dimension `n` of the square matrix
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    /// Underlying CSR matrix
    pub fn matrix(&self) -> &CsrMatrix<f64> {
        &self.matrix
    }

    /// Value at `(row, col)`, zero when nothing is stored there
    pub fn entry(&self, row: usize, col: usize) -> f64 {
        self.matrix
            .get_entry(row, col)
            .map(|entry| entry.into_value())
            .unwrap_or(0.0)
    }

    /// Non-zero entries of a row as `(column, value)` pairs, by column
    pub fn row_entries(&self, row: usize) -> Vec<(usize, f64)> {
        match self.matrix.get_row(row) {
            Some(row) => row
                .col_indices()
                .iter()
                .copied()
                .zip(row.values().iter().copied())
                .filter(|&(_, value)| value != 0.0)
                .collect(),
            None => Vec::new(),
        }
    }

    // ======================================== Application ========================================

    /// Compute `A · vector`
    ///
    /// # Errors
    ///
    /// [`EngineError::Dimension`] when `vector.len()` differs from the
    /// operator dimension.
    pub fn apply(&self, vector: &DVector<f64>) -> EngineResult<DVector<f64>> {
        let n = self.matrix.ncols();
        if vector.len() != n {
            return Err(EngineError::dimension("apply", n, vector.len()));
        }

        #[cfg(feature = "parallel")]
        if self.matrix.nrows() > crate::solver::parallel_threshold() {
            return Ok(self.apply_rows_parallel(vector));
        }

        Ok(self.matrix.as_ref() * vector)
    }

    /// Row-parallel product, one stencil dot product per Rayon task
    #[cfg(feature = "parallel")]
    fn apply_rows_parallel(&self, vector: &DVector<f64>) -> DVector<f64> {
        let rows: Vec<f64> = (0..self.matrix.nrows())
            .into_par_iter()
            .map(|r| {
                let row = self.matrix.row(r);
                row.col_indices()
                    .iter()
                    .zip(row.values())
                    .map(|(&col, &value)| value * vector[col])
                    .sum::<f64>()
            })
            .collect();

        DVector::from_vec(rows)
    }

    // ========================================= Algebra ==========================================

    /// Operator sum `A + B`
    ///
    /// # Errors
    ///
    /// [`EngineError::Dimension`] when the dimensions differ.
    pub fn checked_add(&self, other: &LinearOperator) -> EngineResult<LinearOperator> {
        if self.dim() != other.dim() {
            return Err(EngineError::dimension("operator addition", self.dim(), other.dim()));
        }

        Ok(Self {
            matrix: Arc::new(self.matrix.as_ref() + other.matrix.as_ref()),
        })
    }

    /// Operator scaled element-wise by `factor`
    ///
    /// Any real factor is allowed: zero gives the zero operator (same
    /// sparsity pattern), a negative factor flips the sign.
    pub fn scale(&self, factor: f64) -> LinearOperator {
        Self {
            matrix: Arc::new(self.matrix.as_ref() * factor),
        }
    }
}

// ================================== Operator overloading ==================================

impl Add for &LinearOperator {
    type Output = LinearOperator;

    /// # Panics
    ///
    /// Panics when dimensions differ; use [`LinearOperator::checked_add`] to
    /// handle the mismatch.
    fn add(self, rhs: Self) -> Self::Output {
        match self.checked_add(rhs) {
            Ok(sum) => sum,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Add for LinearOperator {
    type Output = LinearOperator;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl Mul<f64> for &LinearOperator {
    type Output = LinearOperator;

    fn mul(self, factor: f64) -> Self::Output {
        self.scale(factor)
    }
}

impl Mul<f64> for LinearOperator {
    type Output = LinearOperator;

    fn mul(self, factor: f64) -> Self::Output {
        self.scale(factor)
    }
}

impl Mul<LinearOperator> for f64 {
    type Output = LinearOperator;

    fn mul(self, rhs: LinearOperator) -> Self::Output {
        rhs.scale(self)
    }
}

// ==================== Tests ====================

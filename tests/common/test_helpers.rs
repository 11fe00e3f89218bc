//! Helper functions for integration tests

use std::f64::consts::PI;

use diffuse_rs::physics::Grid2D;
use ndarray::{Array2, ArrayView2};

/// Assert that two fields are close (within tolerance)
pub fn assert_fields_close(
    field1: ArrayView2<f64>,
    field2: ArrayView2<f64>,
    tolerance: f64,
    message: &str,
) {
    assert_eq!(field1.dim(), field2.dim(), "{}: Dimension mismatch", message);

    for ((index, &v1), &v2) in field1.indexed_iter().zip(field2.iter()) {
        let diff = (v1 - v2).abs();
        assert!(
            diff < tolerance,
            "{}: Element {:?} differs by {} (tolerance {})",
            message, index, diff, tolerance
        );
    }
}

/// Compute the RMS difference between two fields
pub fn compute_l2_error(field1: ArrayView2<f64>, field2: ArrayView2<f64>) -> f64 {
    let count = field1.len();
    if count == 0 {
        return 0.0;
    }

    let sum_squared_diff: f64 = field1
        .iter()
        .zip(field2.iter())
        .map(|(&v1, &v2)| (v1 - v2).powi(2))
        .sum();

    (sum_squared_diff / count as f64).sqrt()
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Gaussian bump of width `sigma` centred on `(x0, y0)`
pub fn gaussian_field(grid: &Grid2D, x0: f64, y0: f64, sigma: f64) -> Array2<f64> {
    let (x, y) = grid.coordinates();

    Array2::from_shape_fn(grid.shape(), |(i, j)| {
        let r2 = (x[[i, j]] - x0).powi(2) + (y[[i, j]] - y0).powi(2);
        (-r2 / (2.0 * sigma * sigma)).exp()
    })
}

/// Eigenpair `(mode, λ)` of the assembled Laplacian on `grid`
///
/// The matrix is the graph Laplacian of an `nx × ny` lattice with zero
/// Dirichlet closure, divided by `dx·dy`. Its eigenvectors are products of
/// discrete sines:
///
/// ```text
/// v[i, j] = sin(π p (i+1) / (nx+1)) · sin(π q (j+1) / (ny+1))
/// λ       = (2cos(π p / (nx+1)) + 2cos(π q / (ny+1)) - 4) / (dx·dy)
/// ```
///
/// for `1 ≤ p ≤ nx`, `1 ≤ q ≤ ny`.
pub fn dirichlet_mode(grid: &Grid2D, p: usize, q: usize) -> (Array2<f64>, f64) {
    let (nx, ny) = grid.shape();
    let ax = PI * p as f64 / (nx + 1) as f64;
    let ay = PI * q as f64 / (ny + 1) as f64;

    let mode = Array2::from_shape_fn((nx, ny), |(i, j)| {
        (ax * (i + 1) as f64).sin() * (ay * (j + 1) as f64).sin()
    });
    let eigenvalue = (2.0 * ax.cos() + 2.0 * ay.cos() - 4.0) / (grid.dx() * grid.dy());

    (mode, eigenvalue)
}

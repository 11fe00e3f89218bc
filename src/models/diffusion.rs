//! Linear diffusion on a 2D grid
//!
//! # Mathematical Background
//!
//! ```text
//! ∂u/∂t = D·∇²u
//! ```
//!
//! The Laplacian is discretized with the 5-point stencil on the flattened
//! grid (`idx = i*ny + j`):
//!
//! ```text
//!                 +1 (idx - ny)
//!                      │
//!   +1 (idx - 1) ── -4 (idx) ── +1 (idx + 1)      × 1/(dx·dy)
//!                      │
//!                 +1 (idx + ny)
//! ```
//!
//! # Boundary Conditions
//!
//! Zero Dirichlet, implicit: couplings to cells outside the domain are simply
//! not stored, so edge rows keep the −4 diagonal with fewer neighbours.
//!
//! # Scaling
//!
//! The whole matrix is divided by `dx·dy`. This is the exact `1/h²` factor
//! for square cells only; for `dx != dy` it is an approximation that is kept
//! as is (a warning is logged).

use nalgebra_sparse::{CooMatrix, CsrMatrix};

use crate::error::{EngineError, EngineResult};
use crate::physics::{Grid2D, LinearOperator, PhysicalModel};

// =================================================================================================
// Laplacian assembly
// =================================================================================================

/// Assemble the 5-point Laplacian for an `nx × ny` grid
///
/// # Algorithm
///
/// 1. Main diagonal: −4 for every cell
/// 2. `idx ↔ idx ± 1`: neighbours along `y` (the fast axis). The coupling is
///    omitted when `(idx + 1) % ny == 0`, i.e. between the last cell of one
///    `x` row and the first cell of the next, which are adjacent in memory
///    only.
/// 3. `idx ↔ idx ± ny`: neighbours along `x`. Out-of-range indices are simply
///    absent, no further guard is applied.
/// 4. Everything divided by `dx·dy`
///
/// # Errors
///
/// [`EngineError::Configuration`] for a zero resolution or a non-positive
/// spacing.
///
/// # Example
///
/// ```rust
/// use diffuse_rs::models::build_laplacian;
///
/// let laplacian = build_laplacian(3, 3, 1.0, 1.0)?;
/// assert_eq!(laplacian.nrows(), 9);
/// // 9 diagonal + 2 * 6 horizontal + 2 * 6 vertical couplings
/// assert_eq!(laplacian.nnz(), 33);
/// # Ok::<(), diffuse_rs::EngineError>(())
/// ```
pub fn build_laplacian(nx: usize, ny: usize, dx: f64, dy: f64) -> EngineResult<CsrMatrix<f64>> {
    if nx == 0 || ny == 0 {
        return Err(EngineError::configuration(format!(
            "laplacian requires a non-empty grid, got {} x {}",
            nx, ny
        )));
    }
    if !(dx.is_finite() && dx > 0.0) || !(dy.is_finite() && dy > 0.0) {
        return Err(EngineError::configuration(format!(
            "laplacian requires positive spacing, got dx = {}, dy = {}",
            dx, dy
        )));
    }
    if (dx - dy).abs() > 1e-12 * dx.max(dy) {
        log::warn!(
            "laplacian scaled by 1/(dx*dy) on non-square cells (dx = {}, dy = {}): \
             this only approximates the exact stencil",
            dx,
            dy
        );
    }

    let n = nx * ny;
    let h2 = dx * dy;
    let diagonal = -4.0 / h2;
    let neighbour = 1.0 / h2;

    let mut coo = CooMatrix::new(n, n);

    for idx in 0..n {
        coo.push(idx, idx, diagonal);

        // along y, never across the end of an x row
        if idx + 1 < n && (idx + 1) % ny != 0 {
            coo.push(idx, idx + 1, neighbour);
            coo.push(idx + 1, idx, neighbour);
        }

        // along x
        if idx + ny < n {
            coo.push(idx, idx + ny, neighbour);
            coo.push(idx + ny, idx, neighbour);
        }
    }

    let laplacian = CsrMatrix::from(&coo);
    log::debug!(
        "assembled {}x{} laplacian on a {} x {} grid ({} non-zeros)",
        n,
        n,
        nx,
        ny,
        laplacian.nnz()
    );

    Ok(laplacian)
}

/// Laplacian operator for `grid`
pub fn laplacian(grid: &Grid2D) -> EngineResult<LinearOperator> {
    LinearOperator::new(build_laplacian(grid.nx(), grid.ny(), grid.dx(), grid.dy())?)
}

/// Laplacian operator for `grid`, scaled by `scale` (typically a diffusivity)
///
/// # Example
///
/// ```rust
/// use diffuse_rs::physics::Grid2D;
/// use diffuse_rs::models::build_operator;
///
/// let grid = Grid2D::new(3, 3)?;
/// let operator = build_operator(&grid, 0.5)?;
///
/// // centre cell: -4 * 9 * 0.5
/// assert!((operator.entry(4, 4) + 18.0).abs() < 1e-9);
/// # Ok::<(), diffuse_rs::EngineError>(())
/// ```
pub fn build_operator(grid: &Grid2D, scale: f64) -> EngineResult<LinearOperator> {
    Ok(laplacian(grid)? * scale)
}

// =================================================================================================
// Diffusion model
// =================================================================================================

/// Linear diffusion `∂u/∂t = D·∇²u` with zero Dirichlet boundaries
///
/// The operator `D·L` is assembled once at construction.
///
/// # Example
///
/// ```rust
/// use diffuse_rs::models::DiffusionModel;
/// use diffuse_rs::physics::{Grid2D, PhysicalModel};
///
/// let model = DiffusionModel::new(Grid2D::new(16, 16)?, 0.01)?;
///
/// assert_eq!(model.operator().dim(), 256);
/// assert!(model.stable_dt() > 0.0);
/// # Ok::<(), diffuse_rs::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DiffusionModel {
    grid: Grid2D,
    diffusivity: f64,
    operator: LinearOperator,
}

impl DiffusionModel {
    /// Build the model and its operator
    ///
    /// # Errors
    ///
    /// [`EngineError::Configuration`] for a non-finite diffusivity.
    pub fn new(grid: Grid2D, diffusivity: f64) -> EngineResult<Self> {
        if !diffusivity.is_finite() {
            return Err(EngineError::configuration(format!(
                "diffusivity must be finite, got {}",
                diffusivity
            )));
        }

        let operator = build_operator(&grid, diffusivity)?;

        Ok(Self {
            grid,
            diffusivity,
            operator,
        })
    }

    pub fn diffusivity(&self) -> f64 {
        self.diffusivity
    }

    /// Largest time step for which explicit Euler stays stable
    ///
    /// Every eigenvalue of `D·L` lies in `[-8|D|/(dx·dy), 0]`, hence
    /// `dt ≤ dx·dy / (4|D|)`. Infinite when `D == 0`.
    pub fn stable_dt(&self) -> f64 {
        if self.diffusivity == 0.0 {
            return f64::INFINITY;
        }
        self.grid.dx() * self.grid.dy() / (4.0 * self.diffusivity.abs())
    }
}

impl PhysicalModel for DiffusionModel {
    fn grid(&self) -> &Grid2D {
        &self.grid
    }

    fn operator(&self) -> &LinearOperator {
        &self.operator
    }

    fn name(&self) -> &str {
        "Linear Diffusion"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::BTreeSet;

    /// Neighbours of cell `idx` by geometry, ignoring memory layout
    fn geometric_neighbours(nx: usize, ny: usize, idx: usize) -> BTreeSet<usize> {
        let (i, j) = (idx / ny, idx % ny);
        let mut neighbours = BTreeSet::new();

        if i > 0 {
            neighbours.insert((i - 1) * ny + j);
        }
        if i + 1 < nx {
            neighbours.insert((i + 1) * ny + j);
        }
        if j > 0 {
            neighbours.insert(i * ny + j - 1);
        }
        if j + 1 < ny {
            neighbours.insert(i * ny + j + 1);
        }

        neighbours
    }

    fn assembled_neighbours(operator: &LinearOperator, idx: usize) -> BTreeSet<usize> {
        operator
            .row_entries(idx)
            .into_iter()
            .map(|(col, _)| col)
            .filter(|&col| col != idx)
            .collect()
    }

    #[test]
    fn test_three_by_three_centre_row() {
        let grid = Grid2D::new(3, 3).unwrap();
        let op = laplacian(&grid).unwrap();
        let scale = 1.0 / (grid.dx() * grid.dy());

        assert_relative_eq!(scale, 9.0, epsilon = 1e-12);

        let row = op.row_entries(4);
        assert_eq!(row.len(), 5);
        assert_relative_eq!(op.entry(4, 4) / scale, -4.0, epsilon = 1e-12);

        for col in [1, 3, 5, 7] {
            assert_relative_eq!(op.entry(4, col) / scale, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_interior_rows_have_five_entries() {
        let (nx, ny) = (5, 4);
        let op = LinearOperator::new(build_laplacian(nx, ny, 1.0, 1.0).unwrap()).unwrap();

        for i in 1..nx - 1 {
            for j in 1..ny - 1 {
                let idx = i * ny + j;
                let row = op.row_entries(idx);

                assert_eq!(row.len(), 5, "row {}", idx);
                assert_eq!(op.entry(idx, idx), -4.0);
                assert_eq!(row.iter().filter(|&&(_, v)| v == 1.0).count(), 4);
            }
        }
    }

    #[test]
    fn test_edge_rows_have_fewer_neighbours() {
        let (nx, ny) = (4, 5);
        let op = LinearOperator::new(build_laplacian(nx, ny, 1.0, 1.0).unwrap()).unwrap();

        for idx in 0..nx * ny {
            let (i, j) = (idx / ny, idx % ny);
            let on_edge = i == 0 || j == 0 || i == nx - 1 || j == ny - 1;
            let neighbours = assembled_neighbours(&op, idx).len();

            if on_edge {
                assert!(neighbours < 4, "edge row {} has {} neighbours", idx, neighbours);
            } else {
                assert_eq!(neighbours, 4);
            }
            // diagonal stays -4 everywhere
            assert_eq!(op.entry(idx, idx), -4.0);
        }

        // corners
        assert_eq!(assembled_neighbours(&op, 0).len(), 2);
        assert_eq!(assembled_neighbours(&op, nx * ny - 1).len(), 2);
    }

    #[test]
    fn test_no_wrap_between_rows() {
        let (nx, ny) = (3, 4);
        let op = LinearOperator::new(build_laplacian(nx, ny, 1.0, 1.0).unwrap()).unwrap();

        // last cell of row 0 and first cell of row 1 are adjacent in memory only
        assert_eq!(op.entry(ny - 1, ny), 0.0);
        assert_eq!(op.entry(ny, ny - 1), 0.0);
        assert_eq!(op.entry(2 * ny - 1, 2 * ny), 0.0);
    }

    #[test]
    fn test_rows_match_geometric_adjacency() {
        for (nx, ny) in [(1, 1), (1, 5), (5, 1), (2, 3), (3, 2), (4, 7), (6, 6)] {
            let op = LinearOperator::new(build_laplacian(nx, ny, 1.0, 1.0).unwrap()).unwrap();

            for idx in 0..nx * ny {
                assert_eq!(
                    assembled_neighbours(&op, idx),
                    geometric_neighbours(nx, ny, idx),
                    "grid {} x {}, row {}",
                    nx,
                    ny,
                    idx
                );
            }
        }
    }

    #[test]
    fn test_symmetric() {
        let op = LinearOperator::new(build_laplacian(4, 3, 0.5, 0.5).unwrap()).unwrap();

        for row in 0..op.dim() {
            for (col, value) in op.row_entries(row) {
                assert_eq!(op.entry(col, row), value);
            }
        }
    }

    #[test]
    fn test_non_square_cells_scale_by_dx_dy() {
        let grid = Grid2D::with_extents(4, 2, 1.0, 1.0).unwrap();
        let op = laplacian(&grid).unwrap();

        // dx = 0.25, dy = 0.5 -> 1/(dx*dy) = 8
        assert_relative_eq!(op.entry(0, 0), -32.0);
        assert_relative_eq!(op.entry(0, 1), 8.0);
        assert_relative_eq!(op.entry(0, 2), 8.0);
    }

    #[test]
    fn test_non_square_cells_log_one_warning() {
        let warnings = crate::log_capture::warnings_from(|| {
            build_laplacian(4, 2, 0.25, 0.5).unwrap();
        });
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("non-square cells"));

        let square = crate::log_capture::warnings_from(|| {
            build_laplacian(4, 2, 0.25, 0.25).unwrap();
        });
        assert!(square.is_empty());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(build_laplacian(0, 3, 1.0, 1.0).is_err());
        assert!(build_laplacian(3, 3, 0.0, 1.0).is_err());
        assert!(build_laplacian(3, 3, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_build_operator_scales_laplacian() {
        let grid = Grid2D::new(4, 4).unwrap();
        let base = laplacian(&grid).unwrap();
        let scaled = build_operator(&grid, -0.3).unwrap();

        for row in 0..base.dim() {
            for (col, value) in base.row_entries(row) {
                assert_relative_eq!(scaled.entry(row, col), -0.3 * value);
            }
        }
    }

    #[test]
    fn test_diffusion_model() {
        let grid = Grid2D::new(5, 5).unwrap();
        let model = DiffusionModel::new(grid.clone(), 0.2).unwrap();

        assert_eq!(model.name(), "Linear Diffusion");
        assert!(model.description().is_none());
        assert_eq!(model.grid(), &grid);
        assert_eq!(model.diffusivity(), 0.2);
        assert_relative_eq!(model.operator().entry(12, 12), -4.0 * 25.0 * 0.2, epsilon = 1e-9);
        assert_relative_eq!(model.stable_dt(), 0.04 / 0.8, epsilon = 1e-15);
    }

    #[test]
    fn test_diffusion_model_zero_diffusivity() {
        let model = DiffusionModel::new(Grid2D::new(3, 3).unwrap(), 0.0).unwrap();

        assert!(model.stable_dt().is_infinite());
        assert!(model.operator().row_entries(4).is_empty());
    }

    #[test]
    fn test_diffusion_model_rejects_nan() {
        assert!(DiffusionModel::new(Grid2D::new(3, 3).unwrap(), f64::NAN).is_err());
    }
}

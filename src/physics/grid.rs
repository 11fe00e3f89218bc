//! Two-dimensional discretization geometry
//!
//! A [`Grid2D`] fixes the resolution and physical extents of the domain and
//! precomputes its coordinate arrays. Cells are flattened row-major with `y`
//! varying fastest: the flat index of cell `(i, j)` is `i * ny + j`.

use ndarray::{Array1, Array2};

use crate::error::{EngineError, EngineResult};

/// Uniform 2D grid with `nx × ny` cells over `[0, lx] × [0, ly]`
///
/// # Coordinates
///
/// The 1D samples are evenly spaced from 0 to the extent, endpoints included
/// (`linspace(0, lx, nx)`). The 2D arrays use matrix ("ij") indexing:
///
/// ```text
/// X[i, j] = x[i]      (varies along the first axis)
/// Y[i, j] = y[j]      (varies along the second axis)
/// ```
///
/// Note that the spacing `dx = lx / nx` is the cell width, which differs from
/// the distance between consecutive samples `lx / (nx - 1)`.
///
/// # Example
///
/// ```rust
/// use diffuse_rs::physics::Grid2D;
///
/// let grid = Grid2D::new(3, 3)?;
/// assert!((grid.dx() - 1.0 / 3.0).abs() < 1e-15);
///
/// let (x, y) = grid.coordinates();
/// assert_eq!(x.dim(), (3, 3));
/// assert_eq!(x[[2, 0]], 1.0);
/// assert_eq!(y[[0, 2]], 1.0);
/// # Ok::<(), diffuse_rs::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2D {
    nx: usize,
    ny: usize,
    lx: f64,
    ly: f64,
    dx: f64,
    dy: f64,
    x: Array1<f64>,
    y: Array1<f64>,
    x_grid: Array2<f64>,
    y_grid: Array2<f64>,
}

impl Grid2D {
    /// Create a grid over the unit square
    pub fn new(nx: usize, ny: usize) -> EngineResult<Self> {
        Self::with_extents(nx, ny, 1.0, 1.0)
    }

    /// Create a grid over `[0, lx] × [0, ly]`
    ///
    /// # Errors
    ///
    /// [`EngineError::Configuration`] when a cell count is zero or an extent
    /// is not a positive finite number.
    pub fn with_extents(nx: usize, ny: usize, lx: f64, ly: f64) -> EngineResult<Self> {
        if nx == 0 || ny == 0 {
            return Err(EngineError::configuration(format!(
                "grid resolution must be positive, got {} x {}",
                nx, ny
            )));
        }
        if !(lx.is_finite() && lx > 0.0) || !(ly.is_finite() && ly > 0.0) {
            return Err(EngineError::configuration(format!(
                "grid extents must be positive and finite, got {} x {}",
                lx, ly
            )));
        }

        let x = Array1::linspace(0.0, lx, nx);
        let y = Array1::linspace(0.0, ly, ny);

        let x_grid = Array2::from_shape_fn((nx, ny), |(i, _)| x[i]);
        let y_grid = Array2::from_shape_fn((nx, ny), |(_, j)| y[j]);

        Ok(Self {
            nx,
            ny,
            lx,
            ly,
            dx: lx / nx as f64,
            dy: ly / ny as f64,
            x,
            y,
            x_grid,
            y_grid,
        })
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn lx(&self) -> f64 {
        self.lx
    }

    pub fn ly(&self) -> f64 {
        self.ly
    }

    /// Cell width along the first axis
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Cell width along the second axis
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Field shape `(nx, ny)`
    pub fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Total number of cells
    pub fn n_cells(&self) -> usize {
        self.nx * self.ny
    }

    /// Flat index of cell `(i, j)`
    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.nx && j < self.ny);
        i * self.ny + j
    }

    /// Whether cells are square (`dx == dy` up to rounding)
    pub fn is_uniform(&self) -> bool {
        (self.dx - self.dy).abs() <= 1e-12 * self.dx.max(self.dy)
    }

    /// 1D samples along the first axis
    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    /// 1D samples along the second axis
    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    /// Coordinate arrays `(X, Y)`, both of shape `(nx, ny)`
    pub fn coordinates(&self) -> (&Array2<f64>, &Array2<f64>) {
        (&self.x_grid, &self.y_grid)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

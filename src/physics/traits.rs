//! Physical model trait
//!
//! A physical model owns a grid and the linear operator describing its
//! dynamics. It provides the "physics" (the operator `A` in `ds/dt = A·s`);
//! integrators and the environment provide the "numerics".

use crate::physics::{Grid2D, LinearOperator};

// =================================================================================================
// Physical Model Trait
// =================================================================================================

/// Trait for linear physical models on a 2D grid
///
/// # Responsibility
///
/// Assembles the operator once, at construction, and hands it out by
/// reference. Does NOT step anything (that's the integrator's job).
///
/// # Example
///
/// ```rust
/// use diffuse_rs::physics::{Grid2D, LinearOperator, PhysicalModel};
///
/// struct Decay {
///     grid: Grid2D,
///     operator: LinearOperator,
/// }
///
/// impl PhysicalModel for Decay {
///     fn grid(&self) -> &Grid2D { &self.grid }
///     fn operator(&self) -> &LinearOperator { &self.operator }
///     fn name(&self) -> &str { "Uniform decay" }
/// }
///
/// let grid = Grid2D::new(4, 4)?;
/// let model = Decay { operator: LinearOperator::identity(grid.n_cells()) * -0.5, grid };
/// assert_eq!(model.operator().dim(), 16);
/// # Ok::<(), diffuse_rs::EngineError>(())
/// ```
pub trait PhysicalModel: Send + Sync {
    /// Discretization the operator was assembled on
    fn grid(&self) -> &Grid2D;

    /// Right-hand side operator `A` of `ds/dt = A·s`
    fn operator(&self) -> &LinearOperator;

    /// Name of the model (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the model (option)
    fn description(&self) -> Option<&str> {
        None
    }
}

//! Spatial discretization and linear operators
//!
//! This module holds everything that describes WHAT is being evolved:
//!
//! - **Grid** ([`Grid2D`]): resolution, extents and coordinate arrays
//! - **State** ([`StateVector`]): fields flattened into the 1D buffer seen by
//!   integrators
//! - **Operator** ([`LinearOperator`]): sparse matrix `A` of `ds/dt = A·s`
//! - **Model** ([`PhysicalModel`]): a grid paired with the operator built on it
//!
//! # Architecture
//!
//! Physical models are **separate from time integrators**:
//! - The model provides the **operator** (physics)
//! - The integrator provides the **method** to advance it (numerics)
//!
//! # Example
//!
//! ```rust
//! use diffuse_rs::physics::{Grid2D, StateVector};
//! use diffuse_rs::models::build_operator;
//!
//! let grid = Grid2D::new(8, 8)?;
//! let operator = build_operator(&grid, 0.1)?;
//!
//! let (x, y) = grid.coordinates();
//! let field = (x * y).mapv(f64::sin);
//! let state = StateVector::from_field(&field)?;
//!
//! let rate = operator.apply(state.data())?;
//! assert_eq!(rate.len(), 64);
//! # Ok::<(), diffuse_rs::EngineError>(())
//! ```

// module declaration
pub mod grid;
pub mod operator;
pub mod state;
pub mod traits;

// re-export commonly used types for convenience
pub use grid::Grid2D;
pub use operator::LinearOperator;
pub use state::StateVector;
pub use traits::PhysicalModel;

//! Physical models on a 2D grid
//!
//! All models implement the [`PhysicalModel`](crate::physics::PhysicalModel) trait.
//! A model assembles its operator once; integrators and the environment only
//! ever apply it.
//!
//! # Available Models
//!
//! ## [`DiffusionModel`]: linear diffusion
//!
//! `∂u/∂t = D·∇²u` with zero Dirichlet boundaries, discretized with the
//! 5-point Laplacian.
//!
//! # Operator Builders
//!
//! [`build_laplacian`] returns the raw sparse matrix, [`laplacian`] wraps it
//! for a [`Grid2D`](crate::physics::Grid2D) and [`build_operator`] applies a
//! scale factor. Operators compose with `+` and `*`, so other linear models
//! can be assembled from these pieces:
//!
//! ```rust
//! use diffuse_rs::models::laplacian;
//! use diffuse_rs::physics::{Grid2D, LinearOperator};
//!
//! // diffusion with uniform first-order decay: D·L - k·I
//! let grid = Grid2D::new(10, 10)?;
//! let operator = laplacian(&grid)? * 0.01 + LinearOperator::identity(100) * -0.5;
//!
//! assert_eq!(operator.dim(), 100);
//! # Ok::<(), diffuse_rs::EngineError>(())
//! ```

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod diffusion;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use diffusion::{DiffusionModel, build_laplacian, build_operator, laplacian};

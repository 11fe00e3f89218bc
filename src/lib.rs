//! diffuse-rs: 2D Field Evolution Engine
//!
//! Evolves scalar fields on a uniform 2D grid under linear operators,
//! `ds/dt = A·s`, with explicit time integrators.
//!
//! # Architecture
//!
//! diffuse-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Models assemble a sparse operator once (what to evolve)
//!    - Integrators advance the state with it (how to evolve)
//!
//! 2. **Flat state, 2D views**
//!    - Integrators see one flat vector
//!    - Users read and write `ndarray` fields, converted without copies on
//!      the way out
//!
//! # Quick Start
//!
//! ```rust
//! use diffuse_rs::prelude::*;
//! use ndarray::Array2;
//!
//! // 1. Physics: diffusion on a 32 x 32 grid
//! let model = DiffusionModel::new(Grid2D::new(32, 32)?, 0.01)?;
//!
//! // 2. Numerics: RK4 at half the explicit stability limit
//! let dt = 0.5 * model.stable_dt();
//! let mut env = SimulationEnvironment::from_model(&model, dt, IntegratorType::RungeKutta4)?;
//!
//! // 3. Initial condition: hot spot in the centre
//! let mut field = Array2::<f64>::zeros((32, 32));
//! field[[16, 16]] = 100.0;
//! env.set_state(&field)?;
//!
//! // 4. Run and read back
//! env.advance(50)?;
//! let current = env.get_field().expect("state was set");
//! assert!(current[[16, 16]] < 100.0);
//! # Ok::<(), diffuse_rs::EngineError>(())
//! ```
//!
//! # Modules
//!
//! - [`physics`]: grid, state vectors, operators
//! - [`models`]: Laplacian assembly and the diffusion model
//! - [`solver`]: integrators and the simulation environment
//! - [`error`]: error type shared by all fallible operations
//!
//! # Features
//!
//! - `parallel`: row-parallel operator application with Rayon (see
//!   [`solver::set_parallel_threshold`])

// Core modules
pub mod error;
pub mod physics;

pub mod models;
pub mod solver;

#[cfg(test)]
pub(crate) mod log_capture;

pub use error::{EngineError, EngineResult};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use diffuse_rs::prelude::*;
    //! ```
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::models::{DiffusionModel, build_operator, laplacian};
    pub use crate::physics::{Grid2D, LinearOperator, PhysicalModel, StateVector};
    pub use crate::solver::{
        EnvironmentConfiguration, ExplicitEuler, Integrator, IntegratorType, RK4,
        SimulationEnvironment,
    };
}

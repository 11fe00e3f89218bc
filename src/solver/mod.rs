//! Time integration
//!
//! This module provides the numerical side of the engine: integrators that
//! advance `ds/dt = A·s` by one step, and the environment that drives them.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Model** ([`PhysicalModel`](crate::physics::PhysicalModel)) - WHAT to evolve
//!    - Grid
//!    - Linear operator `A`
//!
//! 2. **Configuration** ([`EnvironmentConfiguration`]) - HOW to evolve it
//!    - Grid resolution
//!    - Time step
//!    - Integration method ([`IntegratorType`])
//!
//! 3. **Integrator** ([`Integrator`] trait) - The numerical method
//!    - One step `s_n -> s_{n+1}`
//!    - Independent of physics
//!
//! 4. **Environment** ([`SimulationEnvironment`]) - The stepping loop
//!    - Owns the current state and the simulated time
//!
//! # Module Organization
//!
//! - **`traits`**: [`Integrator`], [`IntegratorType`], [`EnvironmentConfiguration`]
//! - **`methods`**: [`ExplicitEuler`], [`RK4`]
//! - **`environment`**: [`SimulationEnvironment`]
//!
//! # Quick Start Example
//!
//! ```rust
//! use ndarray::Array2;
//! use diffuse_rs::models::build_operator;
//! use diffuse_rs::physics::Grid2D;
//! use diffuse_rs::solver::{EnvironmentConfiguration, IntegratorType, SimulationEnvironment};
//!
//! let grid = Grid2D::new(32, 32)?;
//! let operator = build_operator(&grid, 0.05)?;
//!
//! let config = EnvironmentConfiguration::new(32, 32, 1e-3)
//!     .with_integrator(IntegratorType::RungeKutta4);
//! let mut env = SimulationEnvironment::from_configuration(config, operator)?;
//!
//! env.set_state(&Array2::from_elem((32, 32), 1.0))?;
//! env.advance(100)?;
//!
//! assert!((env.t() - 0.1).abs() < 1e-12);
//! # Ok::<(), diffuse_rs::EngineError>(())
//! ```
//!
//! # Time Step Selection
//!
//! Both integrators are explicit and conditionally stable. For diffusion,
//! [`DiffusionModel::stable_dt()`](crate::models::DiffusionModel::stable_dt)
//! gives the explicit Euler limit. Nothing enforces it: an unstable step
//! grows the state until it overflows, which the environment reports once
//! through `log::warn!`.

// =================================================================================================
// Module Declarations
// =================================================================================================
mod environment;
mod methods;
mod traits;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Operator rows are handed to Rayon only when the matrix is large enough for
// the split to pay off. A Laplacian row holds at most five entries, so small
// grids are faster on one thread.
//
// The value is a tuning knob read on every `apply()`, hence an atomic with
// relaxed ordering instead of a lock.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Largest operator dimension multiplied on the calling thread
///
/// A 31 x 31 grid (961 cells) stays sequential, a 32 x 32 grid (1024 cells)
/// goes parallel.
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Operator dimension above which mat-vec rows run on the Rayon pool
///
/// Only consulted when the crate is built with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use diffuse_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Change the dimension at which [`LinearOperator::apply()`] goes parallel
///
/// The setting is process-wide and takes effect on the next application.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use diffuse_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// // keep a 64 x 64 Laplacian on one thread
/// let previous = parallel_threshold();
/// set_parallel_threshold(64 * 64);
/// assert_eq!(parallel_threshold(), 4096);
///
/// set_parallel_threshold(previous);
/// ```
///
/// [`LinearOperator::apply()`]: crate::physics::LinearOperator::apply
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

// held by every ThresholdGuard so threshold tests never overlap
#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Test-only override of the threshold, restored on drop
///
/// ```rust,ignore
/// let _guard = crate::solver::ThresholdGuard::save(8);
/// // every operator above 8 rows now runs in parallel
/// ```
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        // a panicking test poisons the lock but the threshold was restored
        let lock = THRESHOLD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self {
            previous,
            _lock: lock,
        }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use environment::SimulationEnvironment;
pub use methods::{ExplicitEuler, RK4};
pub use traits::{EnvironmentConfiguration, Integrator, IntegratorType};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::error::{EngineError, EngineResult};
use crate::physics::StateVector;

/// Check a state for numerical blow-up
///
/// NaN or Inf values indicate an unstable time step (or an operator with
/// non-finite entries).
///
/// # Returns
///
/// `Ok(())` if every value is finite, [`EngineError::InvalidState`] with
/// diagnostic information otherwise.
pub(crate) fn validate_state(state: &StateVector, step: usize) -> EngineResult<()> {
    let data = state.data();

    // NaN can arise from 0/0 or Inf - Inf
    if let Some(index) = data.iter().position(|x| x.is_nan()) {
        return Err(EngineError::invalid_state(format!(
            "NaN detected at index {} after step {}. This indicates numerical instability. \
             Try reducing the time step.",
            index, step
        )));
    }

    // Inf indicates overflow
    if let Some(index) = data.iter().position(|x| x.is_infinite()) {
        return Err(EngineError::invalid_state(format!(
            "Infinity detected at index {} after step {}. This indicates numerical overflow. \
             Try reducing the time step.",
            index, step
        )));
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

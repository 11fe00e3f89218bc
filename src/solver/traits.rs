//! Integrator trait and environment configuration
//!
//! # Design
//!
//! - [`Integrator`]: the numerical method, independent of the physics. It
//!   receives the current state and the operator and returns the next state.
//! - [`IntegratorType`]: the closed set of available methods, selectable at
//!   runtime (for instance from a configuration) and dispatched statically.
//! - [`EnvironmentConfiguration`]: resolution, time step and method of a
//!   [`SimulationEnvironment`](crate::solver::SimulationEnvironment).

use std::fmt::Debug;

use nalgebra::DVector;

use crate::error::{EngineError, EngineResult};
use crate::physics::LinearOperator;
use crate::solver::methods::{ExplicitEuler, RK4};

// =================================================================================================
// Integrator trait
// =================================================================================================

/// Time-stepping scheme for the linear system `ds/dt = A·s`
///
/// Implementations are stateless: a single step depends only on its inputs,
/// so one integrator can be shared by any number of environments.
///
/// # Example
///
/// ```rust
/// use nalgebra::DVector;
/// use diffuse_rs::physics::LinearOperator;
/// use diffuse_rs::solver::{ExplicitEuler, Integrator};
///
/// let operator = LinearOperator::identity(3) * -1.0;
/// let state = DVector::from_element(3, 1.0);
///
/// let next = ExplicitEuler.step(&state, &operator, 0.1)?;
/// assert!((next[0] - 0.9).abs() < 1e-12);
/// # Ok::<(), diffuse_rs::EngineError>(())
/// ```
pub trait Integrator: Debug + Send + Sync {
    /// Advance `state` by one step of size `dt`
    ///
    /// # Errors
    ///
    /// [`EngineError::Dimension`] when the state length differs from the
    /// operator dimension.
    fn step(
        &self,
        state: &DVector<f64>,
        operator: &LinearOperator,
        dt: f64,
    ) -> EngineResult<DVector<f64>>;

    /// Human readable name
    fn name(&self) -> &'static str;

    /// Order of accuracy of the global error
    fn order(&self) -> u32;

    /// Number of operator applications per step
    fn evaluations_per_step(&self) -> usize;
}

// =================================================================================================
// Integrator selection
// =================================================================================================

/// Available integration methods
///
/// Implements [`Integrator`] by forwarding to the matching unit struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorType {
    /// First order, one evaluation per step
    #[default]
    ExplicitEuler,

    /// Classical fourth order Runge-Kutta, four evaluations per step
    RungeKutta4,
}

impl Integrator for IntegratorType {
    fn step(
        &self,
        state: &DVector<f64>,
        operator: &LinearOperator,
        dt: f64,
    ) -> EngineResult<DVector<f64>> {
        match self {
            IntegratorType::ExplicitEuler => ExplicitEuler.step(state, operator, dt),
            IntegratorType::RungeKutta4 => RK4.step(state, operator, dt),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            IntegratorType::ExplicitEuler => ExplicitEuler.name(),
            IntegratorType::RungeKutta4 => RK4.name(),
        }
    }

    fn order(&self) -> u32 {
        match self {
            IntegratorType::ExplicitEuler => ExplicitEuler.order(),
            IntegratorType::RungeKutta4 => RK4.order(),
        }
    }

    fn evaluations_per_step(&self) -> usize {
        match self {
            IntegratorType::ExplicitEuler => ExplicitEuler.evaluations_per_step(),
            IntegratorType::RungeKutta4 => RK4.evaluations_per_step(),
        }
    }
}

// =================================================================================================
// Environment configuration
// =================================================================================================

/// Parameters of a simulation environment
///
/// # Example
///
/// ```rust
/// use diffuse_rs::solver::{EnvironmentConfiguration, IntegratorType};
///
/// let config = EnvironmentConfiguration::new(64, 64, 1e-4)
///     .with_integrator(IntegratorType::RungeKutta4);
///
/// assert!(config.validate().is_ok());
/// assert!(EnvironmentConfiguration::new(0, 64, 1e-4).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentConfiguration {
    /// Grid points along x
    pub nx: usize,

    /// Grid points along y
    pub ny: usize,

    /// Time step
    pub dt: f64,

    /// Integration method
    pub integrator: IntegratorType,
}

impl EnvironmentConfiguration {
    /// Configuration with the default integrator
    pub fn new(nx: usize, ny: usize, dt: f64) -> Self {
        Self {
            nx,
            ny,
            dt,
            integrator: IntegratorType::default(),
        }
    }

    pub fn with_integrator(mut self, integrator: IntegratorType) -> Self {
        self.integrator = integrator;
        self
    }

    /// Number of cells of one field
    pub fn n_cells(&self) -> usize {
        self.nx * self.ny
    }

    /// Validate configuration
    pub fn validate(&self) -> EngineResult<()> {
        if self.nx == 0 || self.ny == 0 {
            return Err(EngineError::configuration(format!(
                "grid resolution must be non-zero, got {} x {}",
                self.nx, self.ny
            )));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(EngineError::configuration(format!(
                "time step must be positive and finite, got {}",
                self.dt
            )));
        }
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

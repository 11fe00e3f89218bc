//! Simulation environment
//!
//! Owns one evolving field together with the operator, the integrator and
//! the simulated time.
//!
//! # Lifecycle
//!
//! ```text
//!   new() ──► uninitialized ──set_state()──► running ◄──┐
//!                  │                            │        │ step() / set_state()
//!             step() → InvalidState             └────────┘
//! ```
//!
//! There is no terminal state: a running environment accepts new states and
//! steps indefinitely. Installing a new state does not reset the clock.
//!
//! # Time
//!
//! `t` is derived from the step count (`t = steps · dt`) instead of being
//! accumulated, so it does not drift over long runs.

use ndarray::{ArrayBase, ArrayView2, Data, Ix2};

use crate::error::{EngineError, EngineResult};
use crate::physics::{LinearOperator, PhysicalModel, StateVector};
use crate::solver::{EnvironmentConfiguration, Integrator, IntegratorType, validate_state};

// =================================================================================================
// Simulation environment
// =================================================================================================

/// Stepping loop around a single 2D field
///
/// # Example
///
/// ```rust
/// use ndarray::Array2;
/// use diffuse_rs::models::DiffusionModel;
/// use diffuse_rs::physics::Grid2D;
/// use diffuse_rs::solver::{IntegratorType, SimulationEnvironment};
///
/// let model = DiffusionModel::new(Grid2D::new(16, 16)?, 0.1)?;
/// let dt = 0.5 * model.stable_dt();
///
/// let mut env = SimulationEnvironment::from_model(&model, dt, IntegratorType::RungeKutta4)?;
///
/// let mut field = Array2::<f64>::zeros((16, 16));
/// field[[8, 8]] = 1.0;
/// env.set_state(&field)?;
/// env.advance(10)?;
///
/// let current = env.get_field().expect("state was set");
/// assert!(current[[8, 8]] < 1.0);
/// assert!((env.t() - 10.0 * dt).abs() < 1e-15);
/// # Ok::<(), diffuse_rs::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SimulationEnvironment {
    nx: usize,
    ny: usize,
    dt: f64,
    operator: LinearOperator,
    integrator: IntegratorType,

    state: Option<StateVector>,
    steps: usize,
    reported_non_finite: bool,
}

impl SimulationEnvironment {
    // ======================================= Construction =======================================

    /// Environment using the default integrator ([`IntegratorType::ExplicitEuler`])
    ///
    /// # Errors
    ///
    /// [`EngineError::Configuration`] when `nx` or `ny` is zero, `dt` is not
    /// positive and finite, or the operator dimension differs from `nx * ny`.
    pub fn new(nx: usize, ny: usize, dt: f64, operator: LinearOperator) -> EngineResult<Self> {
        Self::from_configuration(EnvironmentConfiguration::new(nx, ny, dt), operator)
    }

    /// Environment built from a validated configuration
    pub fn from_configuration(
        config: EnvironmentConfiguration,
        operator: LinearOperator,
    ) -> EngineResult<Self> {
        config.validate()?;

        if operator.dim() != config.n_cells() {
            return Err(EngineError::configuration(format!(
                "operator dimension {} does not match grid {} x {} ({} cells)",
                operator.dim(),
                config.nx,
                config.ny,
                config.n_cells()
            )));
        }

        log::debug!(
            "simulation environment: {} x {} grid, dt = {}, {} ({} operator non-zeros)",
            config.nx,
            config.ny,
            config.dt,
            config.integrator.name(),
            operator.nnz()
        );

        Ok(Self {
            nx: config.nx,
            ny: config.ny,
            dt: config.dt,
            operator,
            integrator: config.integrator,
            state: None,
            steps: 0,
            reported_non_finite: false,
        })
    }

    /// Environment on the grid and operator of `model`
    ///
    /// The operator is shared with the model, not copied.
    pub fn from_model<M>(model: &M, dt: f64, integrator: IntegratorType) -> EngineResult<Self>
    where
        M: PhysicalModel + ?Sized,
    {
        let (nx, ny) = model.grid().shape();
        let config = EnvironmentConfiguration::new(nx, ny, dt).with_integrator(integrator);

        Self::from_configuration(config, model.operator().clone())
    }

    /// Replace the integration method
    pub fn with_integrator(mut self, integrator: IntegratorType) -> Self {
        self.integrator = integrator;
        self
    }

    // ========================================== State ===========================================

    /// Install a new field as the current state
    ///
    /// Moves the environment to the running state. The simulated time is
    /// kept.
    ///
    /// # Errors
    ///
    /// [`EngineError::Shape`] when the field shape is not `(nx, ny)`.
    pub fn set_state<S>(&mut self, field: &ArrayBase<S, Ix2>) -> EngineResult<()>
    where
        S: Data<Elem = f64>,
    {
        if field.dim() != (self.nx, self.ny) {
            return Err(EngineError::shape(format!(
                "expected field of shape ({}, {}), got {:?}",
                self.nx,
                self.ny,
                field.dim()
            )));
        }

        self.install(StateVector::from_field(field)?);
        Ok(())
    }

    /// Install an already flattened state
    ///
    /// # Errors
    ///
    /// [`EngineError::Shape`] when the state length differs from the operator
    /// dimension or its field shape is not `(nx, ny)`.
    pub fn set_state_vector(&mut self, state: StateVector) -> EngineResult<()> {
        if state.len() != self.operator.dim() {
            return Err(EngineError::shape(format!(
                "state of size {} does not match operator dimension {}",
                state.len(),
                self.operator.dim()
            )));
        }
        if state.shape() != (self.nx, self.ny) {
            return Err(EngineError::shape(format!(
                "expected fields of shape ({}, {}), got {:?}",
                self.nx,
                self.ny,
                state.shape()
            )));
        }

        self.install(state);
        Ok(())
    }

    fn install(&mut self, state: StateVector) {
        log::trace!("state installed at t = {}: {}", self.t(), state);
        self.state = Some(state);
        self.reported_non_finite = false;
    }

    // ========================================= Stepping =========================================

    /// Advance the state by one time step
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidState`] before any state was set. Non-finite
    /// values are not an error: they are logged once and stepping goes on.
    pub fn step(&mut self) -> EngineResult<()> {
        let state = self
            .state
            .as_ref()
            .ok_or_else(|| EngineError::invalid_state("state not initialized"))?;

        let data = self.integrator.step(state.data(), &self.operator, self.dt)?;
        let next = state.with_data(data)?;

        self.steps += 1;

        if !self.reported_non_finite
            && let Err(e) = validate_state(&next, self.steps)
        {
            log::warn!("{}", e);
            self.reported_non_finite = true;
        }

        log::trace!("step {} done, t = {}", self.steps, self.t());
        self.state = Some(next);

        Ok(())
    }

    /// Take `steps` consecutive steps, stopping at the first error
    pub fn advance(&mut self, steps: usize) -> EngineResult<()> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    // ========================================= Queries ==========================================

    /// Current field, `None` until a state has been set
    pub fn get_field(&self) -> Option<ArrayView2<'_, f64>> {
        self.state.as_ref().and_then(|state| state.to_field().ok())
    }

    /// Simulated time
    pub fn t(&self) -> f64 {
        self.steps as f64 * self.dt
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Number of steps taken since construction
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&StateVector> {
        self.state.as_ref()
    }

    pub fn operator(&self) -> &LinearOperator {
        &self.operator
    }

    pub fn integrator(&self) -> IntegratorType {
        self.integrator
    }
}

// =================================================================================================
// Tests
// =================================================================================================

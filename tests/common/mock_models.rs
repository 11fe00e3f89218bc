//! Mock physical models for testing
//!
//! These models have known analytical solutions, making them
//! ideal for validating integrator accuracy.

use diffuse_rs::EngineResult;
use diffuse_rs::physics::{Grid2D, LinearOperator, PhysicalModel};

// =================================================================================================
// Exponential Decay: du/dt = -k*u
// =================================================================================================

/// Uniform exponential decay on every cell: du/dt = -k*u
///
/// Analytical solution: u(t) = u₀ * exp(-k*t)
pub struct ExponentialDecay {
    pub grid: Grid2D,
    pub decay_rate: f64,
    operator: LinearOperator,
}

impl ExponentialDecay {
    pub fn new(nx: usize, ny: usize, decay_rate: f64) -> EngineResult<Self> {
        let grid = Grid2D::new(nx, ny)?;
        let operator = LinearOperator::identity(grid.n_cells()) * -decay_rate;

        Ok(Self { grid, decay_rate, operator })
    }

    /// Compute analytical solution at time t
    pub fn analytical_solution(&self, t: f64, u0: f64) -> f64 {
        u0 * (-self.decay_rate * t).exp()
    }
}

impl PhysicalModel for ExponentialDecay {
    fn grid(&self) -> &Grid2D {
        &self.grid
    }

    fn operator(&self) -> &LinearOperator {
        &self.operator
    }

    fn name(&self) -> &str {
        "Exponential Decay"
    }

    fn description(&self) -> Option<&str> {
        Some("du/dt = -k*u on every cell")
    }
}

// =================================================================================================
// Independent fields: block diagonal operator
// =================================================================================================

/// Block diagonal operator acting on `rates.len()` stacked fields
///
/// Field `f` decays with its own rate: du_f/dt = -rates[f] * u_f. The fields
/// are not coupled, so each one can be checked against its own solution.
pub struct IndependentFields {
    pub field_size: usize,
    pub rates: Vec<f64>,
    pub operator: LinearOperator,
}

impl IndependentFields {
    pub fn new(field_size: usize, rates: &[f64]) -> EngineResult<Self> {
        let triplets: Vec<_> = rates
            .iter()
            .enumerate()
            .flat_map(|(f, &rate)| {
                (0..field_size).map(move |cell| {
                    let idx = f * field_size + cell;
                    (idx, idx, -rate)
                })
            })
            .collect();

        let operator = LinearOperator::from_triplets(field_size * rates.len(), &triplets)?;

        Ok(Self {
            field_size,
            rates: rates.to_vec(),
            operator,
        })
    }
}

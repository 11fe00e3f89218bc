//! Explicit (forward) Euler integrator
//!
//! # Mathematical Background
//!
//! For the linear system `ds/dt = A·s`:
//!
//! ```text
//! s_{n+1} = s_n + dt · A·s_n
//! ```
//!
//! # Characteristics
//!
//! - **Order**: first order (global error ~ O(dt))
//! - **Stability**: conditional. For the diffusion operator `D·L` on a grid
//!   with spacing `h`, the step must satisfy `dt ≤ h² / (4·D)`
//! - **Complexity**: 1 operator application per step
//!
//! No stability guard is applied: an unstable `dt` simply makes the state
//! grow without bound.

use nalgebra::DVector;

use crate::error::EngineResult;
use crate::physics::LinearOperator;
use crate::solver::Integrator;

// =================================================================================================
// Explicit Euler
// =================================================================================================

/// Forward Euler time stepping
///
/// # Example
///
/// ```rust
/// use diffuse_rs::solver::{ExplicitEuler, Integrator};
///
/// let euler = ExplicitEuler::new();
/// assert_eq!(euler.name(), "Explicit Euler");
/// assert_eq!(euler.order(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl ExplicitEuler {
    pub fn new() -> Self {
        Self
    }
}

impl Integrator for ExplicitEuler {
    fn step(
        &self,
        state: &DVector<f64>,
        operator: &LinearOperator,
        dt: f64,
    ) -> EngineResult<DVector<f64>> {
        let rate = operator.apply(state)?;
        Ok(state + rate * dt)
    }

    fn name(&self) -> &'static str {
        "Explicit Euler"
    }

    fn order(&self) -> u32 {
        1
    }

    fn evaluations_per_step(&self) -> usize {
        1
    }
}

// =================================================================================================
// Tests
// =================================================================================================

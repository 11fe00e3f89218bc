//! Time integration methods
//!
//! Concrete implementations of the [`Integrator`](crate::solver::Integrator)
//! trait. Both are explicit and stateless unit structs, so they can be shared
//! freely between environments.
//!
//! - **[`ExplicitEuler`]**: forward Euler
//!   - Order: first-order O(dt)
//!   - Cost: 1 operator application per step
//!
//! - **[`RK4`]**: classical fourth-order Runge-Kutta
//!   - Order: fourth-order O(dt⁴)
//!   - Cost: 4 operator applications per step
//!
//! # Example
//!
//! ```rust
//! use nalgebra::DVector;
//! use diffuse_rs::physics::LinearOperator;
//! use diffuse_rs::solver::{ExplicitEuler, Integrator, RK4};
//!
//! let operator = LinearOperator::identity(2) * -1.0;
//! let state = DVector::from_element(2, 1.0);
//!
//! let euler = ExplicitEuler::new().step(&state, &operator, 0.1)?;
//! let rk4 = RK4::new().step(&state, &operator, 0.1)?;
//!
//! let exact = (-0.1f64).exp();
//! assert!((rk4[0] - exact).abs() < (euler[0] - exact).abs());
//! # Ok::<(), diffuse_rs::EngineError>(())
//! ```

mod euler;
mod rk4;

pub use euler::ExplicitEuler;
pub use rk4::RK4;

//! Heat diffusion from a hot square
//!
//! ∂u/∂t = D·∇²u, u = 0 on the boundary
//!
//! Runs the same problem with explicit Euler and RK4, prints the decay of
//! the peak and total heat, and a coarse map of the final field.

use diffuse_rs::{
    models::DiffusionModel,
    physics::{Grid2D, PhysicalModel},
    solver::{Integrator, IntegratorType, SimulationEnvironment},
};
use ndarray::{Array2, ArrayView2, s};
use std::error::Error;

fn peak(field: ArrayView2<f64>) -> f64 {
    field.iter().cloned().fold(f64::MIN, f64::max)
}

/// One character per cell, darker is hotter
fn render(field: ArrayView2<f64>, max: f64) -> String {
    const SHADES: [char; 5] = [' ', '.', ':', 'o', '@'];

    field
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|&v| {
                    let level = ((v / max).clamp(0.0, 1.0) * (SHADES.len() - 1) as f64).round();
                    SHADES[level as usize]
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== 2D Heat Diffusion: Euler vs RK4 ===\n");

    // Physical parameters
    let n = 40;
    let diffusivity = 0.01;

    // Simulation parameters
    let final_time = 2.0;
    let report_every = 500;

    let model = DiffusionModel::new(Grid2D::new(n, n)?, diffusivity)?;
    let dt = 0.8 * model.stable_dt();
    let n_steps = (final_time / dt).ceil() as usize;

    println!("Physical Parameters:");
    println!("  Grid: {} x {} (dx = {:.4})", n, n, model.grid().dx());
    println!("  Diffusivity D: {}", diffusivity);
    println!("\nSimulation:");
    println!("  Stable dt (Euler): {:.3e}", model.stable_dt());
    println!("  dt: {:.3e}", dt);
    println!("  Time steps: {}\n", n_steps);

    // Initial condition: hot square in the centre
    let mut initial = Array2::<f64>::zeros((n, n));
    initial.slice_mut(s![n / 2 - 4..n / 2 + 4, n / 2 - 4..n / 2 + 4]).fill(100.0);

    let mut finals = Vec::new();

    for integrator in [IntegratorType::ExplicitEuler, IntegratorType::RungeKutta4] {
        let mut env = SimulationEnvironment::from_model(&model, dt, integrator)?;
        env.set_state(&initial)?;

        println!("--- {} ({}) ---", model.name(), integrator.name());
        println!("{:>10} {:>12} {:>14}", "t", "peak", "total heat");

        for step in 0..n_steps {
            env.step()?;

            if (step + 1) % report_every == 0 || step + 1 == n_steps {
                let field = env.get_field().ok_or("state not set")?;
                println!("{:>10.4} {:>12.6} {:>14.4}", env.t(), peak(field), field.sum());
            }
        }

        let field = env.get_field().ok_or("state not set")?.to_owned();
        println!("\n{} done after {} steps\n", integrator.name(), env.steps());
        finals.push(field);
    }

    let difference = (&finals[0] - &finals[1]).mapv(f64::abs);
    println!("Max |Euler - RK4|: {:.3e}\n", peak(difference.view()));

    println!("Final field (RK4):");
    let max = peak(finals[1].view());
    println!("{}", render(finals[1].slice(s![..;2, ..]), max));

    Ok(())
}

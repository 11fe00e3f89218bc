//! Performance benchmarks for the integrators
//!
//! Compares explicit Euler and RK4 stepping the diffusion operator on grids
//! of increasing size.
//!
//! # What We're Measuring
//!
//! 1. **Explicit Euler**: 1 sparse mat-vec per step
//! 2. **RK4**: 4 sparse mat-vecs per step plus the stage combinations
//!
//! # Expected Results
//!
//! **Performance ratio**: RK4 ≈ 4× slower than Euler per step. Time per step
//! scales linearly with the number of cells (5 non-zeros per row).
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all integrator benchmarks
//! cargo bench --bench integrator_performance
//!
//! # Direct comparison only
//! cargo bench --bench integrator_performance comparison
//!
//! # With row-parallel mat-vec
//! cargo bench --bench integrator_performance --features parallel
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use diffuse_rs::models::DiffusionModel;
use diffuse_rs::physics::{Grid2D, PhysicalModel};
use diffuse_rs::solver::{IntegratorType, SimulationEnvironment};
use ndarray::Array2;

/// Grid side lengths: 1 024 to 262 144 cells
const SIDES: [usize; 4] = [32, 64, 128, 512];

/// Steps per measured iteration
const STEPS: usize = 10;

/// Environment on an `n × n` diffusion problem with a hot spot in the centre
fn setup(n: usize, integrator: IntegratorType) -> SimulationEnvironment {
    let model = DiffusionModel::new(Grid2D::new(n, n).unwrap(), 0.1).unwrap();
    let dt = 0.5 * model.stable_dt();

    let mut env = SimulationEnvironment::from_model(&model, dt, integrator).unwrap();

    let mut field = Array2::<f64>::zeros(model.grid().shape());
    field[[n / 2, n / 2]] = 1.0;
    env.set_state(&field).unwrap();

    env
}

fn benchmark_integrator(c: &mut Criterion, label: &str, integrator: IntegratorType) {
    let mut group = c.benchmark_group(label);

    for &n in SIDES.iter() {
        group.throughput(Throughput::Elements((n * n * STEPS) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            // Setup phase (NOT measured by criterion)
            let mut env = setup(n, integrator);

            // Measurement phase
            b.iter(|| {
                env.advance(black_box(STEPS)).unwrap();
            });
        });
    }

    group.finish();
}

fn benchmark_euler(c: &mut Criterion) {
    benchmark_integrator(c, "Explicit Euler", IntegratorType::ExplicitEuler);
}

fn benchmark_rk4(c: &mut Criterion) {
    benchmark_integrator(c, "Runge-Kutta 4", IntegratorType::RungeKutta4);
}

/// Same problem, both methods, side by side
fn benchmark_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("integrator_comparison");
    let n = 128;

    for integrator in [IntegratorType::ExplicitEuler, IntegratorType::RungeKutta4] {
        let mut env = setup(n, integrator);

        group.bench_function(BenchmarkId::new(integrator_label(integrator), n), |b| {
            b.iter(|| {
                env.step().unwrap();
                black_box(env.t())
            });
        });
    }

    group.finish();
}

fn integrator_label(integrator: IntegratorType) -> &'static str {
    match integrator {
        IntegratorType::ExplicitEuler => "euler",
        IntegratorType::RungeKutta4 => "rk4",
    }
}

criterion_group!(benches, benchmark_euler, benchmark_rk4, benchmark_comparison);
criterion_main!(benches);

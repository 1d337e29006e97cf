use criterion::{black_box, criterion_group, criterion_main, Criterion};
use spot_core::{PhysicalParameters, QuadratureOpts};
use spot_int::IntegralSolver;

fn bench_simplified(c: &mut Criterion) {
    let solver = IntegralSolver::new(QuadratureOpts::default()).unwrap();
    let params = PhysicalParameters::new(5e-7, 1e-7, 0.5).unwrap();
    c.bench_function("solve_simplified", |b| {
        b.iter(|| solver.solve_simplified(black_box(&params)).unwrap())
    });
}

fn bench_full_radii(c: &mut Criterion) {
    let solver = IntegralSolver::new(QuadratureOpts::default()).unwrap();
    let params = PhysicalParameters::new(1e-7, 1e-7, 0.5).unwrap();
    let radii: Vec<f64> = (0..16).map(|i| i as f64 * 0.3 * params.a).collect();
    c.bench_function("solve_full_16_radii", |b| {
        b.iter(|| {
            for radius in &radii {
                black_box(solver.solve_full(*radius, &params).unwrap());
            }
        })
    });
}

criterion_group!(benches, bench_simplified, bench_full_radii);
criterion_main!(benches);

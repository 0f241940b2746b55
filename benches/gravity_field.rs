//! Benchmarks for forging and the pairwise gravity field
//!
//! The field is O(N²); these benchmarks show how a full scan grows with N
//! and how cheap an early-terminated scan stays.
//! Run with: `cargo bench --bench gravity_field`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use orbital_lattice::{CelestialBody, Lattice};

// =============================================================================
// Benchmark Data
// =============================================================================

fn soul(i: u32) -> String {
    [i.wrapping_mul(2_654_435_761), i ^ 0x5bd1_e995, i.rotate_left(7), i]
        .iter()
        .flat_map(|w| w.to_le_bytes())
        .map(|b| format!("{:02x}", b))
        .collect()
}

fn constellation(lattice: &Lattice, n: u32) -> Vec<CelestialBody> {
    (0..n)
        .map(|i| lattice.forge(format!("cid-{}", i), soul(i), &[0.5, 0.25, 0.125]).unwrap())
        .collect()
}

// =============================================================================
// Forging
// =============================================================================

fn bench_forge(c: &mut Criterion) {
    let lattice = Lattice::default();
    let soul = soul(42);
    let eigen: Vec<f64> = (0..16).map(|i| 1.0 / (i as f64 + 1.0)).collect();

    c.bench_function("forge_16_eigenvalues", |b| {
        b.iter(|| lattice.forge("cid", black_box(soul.as_str()), black_box(&eigen)).unwrap())
    });
}

// =============================================================================
// Pairwise Field
// =============================================================================

fn bench_full_field(c: &mut Criterion) {
    let lattice = Lattice::default();
    let mut group = c.benchmark_group("pairwise_field");

    for n in [16u32, 64, 256] {
        let bodies = constellation(&lattice, n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &bodies, |b, bodies| {
            b.iter(|| {
                lattice
                    .constellation(black_box(bodies))
                    .field()
                    .map(|p| p.pull)
                    .filter(|p| p.is_finite())
                    .sum::<f64>()
            })
        });
    }

    group.finish();
}

fn bench_field_early_exit(c: &mut Criterion) {
    let lattice = Lattice::default();
    let bodies = constellation(&lattice, 1_024);

    c.bench_function("pairwise_field_first_1000_of_1024", |b| {
        b.iter(|| lattice.constellation(black_box(&bodies)).field().take(1_000).count())
    });
}

criterion_group!(benches, bench_forge, bench_full_field, bench_field_early_exit);
criterion_main!(benches);

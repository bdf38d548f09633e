use criterion::{black_box, criterion_group, criterion_main, Criterion};
use twosample_core::Sample;
use twosample_stats::advisor::analyze;
use twosample_stats::normality::shapiro_wilk;
use twosample_stats::testing::mann_whitney_u;
use twosample_stats::variance::{levene, LeveneCenter};

fn random_f64(n: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            (state >> 11) as f64 / (1u64 << 53) as f64
        })
        .collect()
}

fn bench_shapiro_wilk(c: &mut Criterion) {
    let mut group = c.benchmark_group("shapiro_wilk");

    for n in [50, 5_000] {
        let data = random_f64(n, 42);
        group.bench_function(format!("{n}_values"), |b| {
            b.iter(|| shapiro_wilk(black_box(&data)))
        });
    }

    group.finish();
}

fn bench_levene(c: &mut Criterion) {
    let x = random_f64(10_000, 1);
    let y = random_f64(10_000, 2);
    let groups: [&[f64]; 2] = [&x, &y];
    c.bench_function("levene/10k_x2", |b| {
        b.iter(|| levene(black_box(&groups), LeveneCenter::Median))
    });
}

fn bench_mann_whitney(c: &mut Criterion) {
    let mut group = c.benchmark_group("mann_whitney_u");

    // Exact path: small group of 8 against a large one.
    let small = random_f64(8, 3);
    let large = random_f64(2_000, 4);
    group.bench_function("exact_8_vs_2k", |b| {
        b.iter(|| mann_whitney_u(black_box(&small), black_box(&large)))
    });

    let x = random_f64(10_000, 5);
    let y = random_f64(10_000, 6);
    group.bench_function("asymptotic_10k_x2", |b| {
        b.iter(|| mann_whitney_u(black_box(&x), black_box(&y)))
    });

    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let x = Sample::new("x", random_f64(1_000, 7)).unwrap();
    let y = Sample::new("y", random_f64(1_000, 8)).unwrap();
    c.bench_function("analyze/1k_x2", |b| {
        b.iter(|| analyze(black_box(&x), black_box(&y)))
    });
}

criterion_group!(
    benches,
    bench_shapiro_wilk,
    bench_levene,
    bench_mann_whitney,
    bench_analyze
);
criterion_main!(benches);

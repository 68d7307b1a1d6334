//! Benchmarks for the regime engine hot path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use regime_core::traits::Indicator;
use regime_core::types::{PricePoint, PriceSeries};
use regime_engine::{RegimeConfig, RegimeEngine, RollingMean};

fn generate_closes(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn generate_series(size: usize) -> PriceSeries {
    PriceSeries::new(
        "BENCH".to_string(),
        generate_closes(size)
            .into_iter()
            .enumerate()
            .map(|(i, p)| PricePoint::new(i as i64 * 86_400_000, p))
            .collect(),
    )
}

fn benchmark_rolling_mean(c: &mut Criterion) {
    let mut group = c.benchmark_group("RollingMean");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_closes(*size);

        group.bench_with_input(BenchmarkId::new("window200", size), &data, |b, data| {
            let mean = RollingMean::new(200);
            b.iter(|| mean.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("RegimeEngine");

    for size in [1000, 10000].iter() {
        let series = generate_series(*size);

        group.bench_with_input(BenchmarkId::new("run", size), &series, |b, series| {
            let engine = RegimeEngine::new(RegimeConfig::default());
            b.iter(|| engine.run(black_box(series)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_rolling_mean, benchmark_engine);
criterion_main!(benches);

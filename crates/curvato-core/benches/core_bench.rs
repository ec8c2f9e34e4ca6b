//! Criterion benchmarks for curvato-core primitives
//!
//! Run with: cargo bench -p curvato-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use curvato_core::{
    CosineEnvelope, Curve, CurveEnvelope, DoubleEmaAdEnvelope, Envelope, ExpAdEnvelope,
    ExponentialEnvelope, Processor, minimize_scalar,
};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("Curve");

    let curve = Curve::new(0.42, 0.0, 0.58, 1.0).unwrap();

    for &block_size in BLOCK_SIZES {
        group.bench_with_input(
            BenchmarkId::new("evaluate", block_size),
            &block_size,
            |b, &size| {
                b.iter(|| {
                    for i in 0..size {
                        let x = i as f32 / size as f32;
                        black_box(curve.evaluate(black_box(x)));
                    }
                });
            },
        );
    }

    // Near-flat handles force the bisection fallback
    let flat = Curve::new(0.0, 0.5, 0.0, 0.5).unwrap();
    group.bench_function("evaluate_bisection", |b| {
        b.iter(|| black_box(flat.evaluate(black_box(1e-4))));
    });

    // Spline table construction cost
    group.bench_function("construction", |b| {
        b.iter(|| black_box(Curve::new(0.42, 0.0, 0.58, 1.0)));
    });

    group.finish();
}

fn bench_envelopes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Envelope");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("exponential", block_size),
            &block_size,
            |b, _| {
                let mut envelope = ExponentialEnvelope::new(48000, 1e-5).unwrap();
                b.iter(|| {
                    for &sample in &input {
                        black_box(envelope.process(black_box(sample)));
                    }
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("cosine", block_size),
            &block_size,
            |b, _| {
                let mut envelope = CosineEnvelope::new(48000).unwrap();
                b.iter(|| {
                    for &sample in &input {
                        black_box(envelope.process(black_box(sample)));
                    }
                });
            },
        );
    }

    // Lazy table sampling, solver cost included
    let shape = CurveEnvelope::new(0.42, 0.0, 0.58, 1.0).unwrap();
    group.bench_function("sampled_table_1024", |b| {
        b.iter(|| {
            for gain in shape.sampled_table(1024) {
                black_box(gain);
            }
        });
    });

    group.finish();
}

fn bench_generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("Generator");

    for &block_size in BLOCK_SIZES {
        group.bench_with_input(
            BenchmarkId::new("exp_ad", block_size),
            &block_size,
            |b, &size| {
                let mut envelope = ExpAdEnvelope::new(480.0, 4800.0).unwrap();
                b.iter(|| {
                    for _ in 0..size {
                        black_box(envelope.advance());
                    }
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("double_ema", block_size),
            &block_size,
            |b, &size| {
                let mut envelope = DoubleEmaAdEnvelope::new(1.0, 480.0, 4800.0);
                b.iter(|| {
                    for _ in 0..size {
                        black_box(envelope.advance());
                    }
                });
            },
        );
    }

    // Construction runs the peak search
    group.bench_function("double_ema_construction", |b| {
        b.iter(|| {
            black_box(DoubleEmaAdEnvelope::new(
                black_box(1.0),
                black_box(480.0),
                black_box(4800.0),
            ))
        });
    });

    group.finish();
}

fn bench_minimizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("Minimizer");

    group.bench_function("parabola", |b| {
        b.iter(|| black_box(minimize_scalar(|x| (x - 3.0) * (x - 3.0) + 2.0)));
    });

    group.bench_function("cosine", |b| {
        b.iter(|| black_box(minimize_scalar(libm::cos)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_curve,
    bench_envelopes,
    bench_generators,
    bench_minimizer,
);

criterion_main!(benches);

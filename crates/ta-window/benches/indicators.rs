//! Performance benchmarks for ta-window indicators.
//!
//! Run with: `cargo bench -p ta-window`
//!
//! Each group measures throughput across input sizes; every indicator runs
//! over the full range into a preallocated output buffer.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ta_window::indicators::*;

/// Generate a deterministic price series.
fn generate_series(size: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(size);
    let mut price = 100.0;
    for i in 0..size {
        let delta = ((i as f64 * 0.1).sin() * 2.0) + ((i as f64 * 0.03).cos() * 1.5);
        price += delta;
        price = price.max(10.0);
        data.push(price);
    }
    data
}

/// Generate deterministic high/low/close bars around [`generate_series`].
fn generate_bars(size: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let close = generate_series(size);
    let high = close
        .iter()
        .enumerate()
        .map(|(i, c)| c + 1.0 + (i as f64 * 0.07).sin().abs())
        .collect();
    let low = close
        .iter()
        .enumerate()
        .map(|(i, c)| c - 1.0 - (i as f64 * 0.05).cos().abs())
        .collect();
    (high, low, close)
}

// Standard sizes for benchmarking
const SIZES: &[usize] = &[1_000, 10_000, 100_000];

/// Benchmarks a single-series indicator `f(data, out)` over every size.
fn bench_single<F>(c: &mut Criterion, name: &str, f: F)
where
    F: Fn(&[f64], &mut [f64]) -> ta_window::Result<ta_window::OutputRange>,
{
    let mut group = c.benchmark_group(name);
    for &size in SIZES {
        let data = generate_series(size);
        let mut out = vec![0.0; size];
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| f(black_box(data), black_box(&mut out)))
        });
    }
    group.finish();
}

fn bench_moving_averages(c: &mut Criterion) {
    bench_single(c, "sma", |d, o| sma_into(.., d, black_box(20), o));
    bench_single(c, "wma", |d, o| wma_into(.., d, black_box(20), o));
    bench_single(c, "trima", |d, o| trima_into(.., d, black_box(20), o));
    bench_single(c, "ema", |d, o| ema_into(.., d, black_box(20), o));
    bench_single(c, "tema", |d, o| tema_into(.., d, black_box(20), o));
    bench_single(c, "t3", |d, o| t3_into(.., d, black_box(5), 0.7, o));
    bench_single(c, "kama", |d, o| kama_into(.., d, black_box(30), o));
}

fn bench_windowed(c: &mut Criterion) {
    bench_single(c, "max", |d, o| max_into(.., d, black_box(20), o));
    bench_single(c, "rsi", |d, o| rsi_into(.., d, black_box(14), o));
    bench_single(c, "stddev", |d, o| stddev_into(.., d, black_box(20), 2.0, o));
    bench_single(c, "linearreg", |d, o| linearreg_into(.., d, black_box(14), o));
}

fn bench_in_place(c: &mut Criterion) {
    let mut group = c.benchmark_group("in_place");
    for &size in SIZES {
        let data = generate_series(size);
        let mut buffer = data.clone();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("sma", size), &data, |b, data| {
            b.iter(|| {
                buffer.copy_from_slice(data);
                sma_in_place(.., black_box(&mut buffer), black_box(20))
            })
        });
        group.bench_with_input(BenchmarkId::new("ema", size), &data, |b, data| {
            b.iter(|| {
                buffer.copy_from_slice(data);
                ema_in_place(.., black_box(&mut buffer), black_box(20))
            })
        });
    }
    group.finish();
}

fn bench_correl(c: &mut Criterion) {
    let mut group = c.benchmark_group("correl");
    for &size in SIZES {
        let (high, low, _) = generate_bars(size);
        let mut out = vec![0.0; size];
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(high, low),
            |b, (h, l)| b.iter(|| correl_into(.., black_box(h), black_box(l), black_box(30), &mut out)),
        );
    }
    group.finish();
}

fn bench_williams_r(c: &mut Criterion) {
    let mut group = c.benchmark_group("willr");
    for &size in SIZES {
        let (high, low, close) = generate_bars(size);
        let mut out = vec![0.0; size];
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(high, low, close),
            |b, (h, l, c)| {
                b.iter(|| {
                    willr_into(
                        ..,
                        black_box(h),
                        black_box(l),
                        black_box(c),
                        black_box(14),
                        &mut out,
                    )
                })
            },
        );
    }
    group.finish();
}

fn bench_bollinger(c: &mut Criterion) {
    let mut group = c.benchmark_group("bbands");
    let bands = BollingerBands::new().period(20);
    for &size in SIZES {
        let data = generate_series(size);
        let (mut upper, mut middle, mut lower) = (vec![0.0; size], vec![0.0; size], vec![0.0; size]);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                bbands_into(
                    ..,
                    black_box(data),
                    black_box(&bands),
                    &mut upper,
                    &mut middle,
                    &mut lower,
                )
            })
        });
    }
    group.finish();
}

fn bench_subrange(c: &mut Criterion) {
    // Cost of a short tail range is bounded by lookback, not by input length
    let mut group = c.benchmark_group("ema_tail_100");
    for &size in SIZES {
        let data = generate_series(size);
        let mut out = vec![0.0; 100];
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| ema_into(size - 100..size, black_box(data), black_box(20), &mut out))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_moving_averages,
    bench_windowed,
    bench_in_place,
    bench_correl,
    bench_williams_r,
    bench_bollinger,
    bench_subrange,
);

criterion_main!(benches);

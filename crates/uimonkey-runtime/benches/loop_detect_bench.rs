//! Loop detection cost across history windows.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use uimonkey_runtime::{LoopHistory, detect_infinite_loop};

/// A history with no period, the worst case for the scan.
fn aperiodic(len: usize) -> Vec<usize> {
    (0..len).map(|i| i * 7 % 13 + i / 13).collect()
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_infinite_loop");
    for len in [10usize, 50, 200] {
        let history = aperiodic(len);
        group.bench_with_input(BenchmarkId::new("aperiodic", len), &history, |b, h| {
            b.iter(|| detect_infinite_loop(black_box(h.as_slice())))
        });
        let periodic: Vec<usize> = (0..len).map(|i| i % 3).collect();
        group.bench_with_input(BenchmarkId::new("period_3", len), &periodic, |b, h| {
            b.iter(|| detect_infinite_loop(black_box(h.as_slice())))
        });
    }
    group.finish();
}

fn bench_history_push(c: &mut Criterion) {
    c.bench_function("loop_history/push_window_10", |b| {
        let mut history = LoopHistory::new(10);
        let mut next = 0usize;
        b.iter(|| {
            next = (next * 31 + 17) % 101;
            black_box(history.push(next))
        })
    });
}

criterion_group!(benches, bench_detect, bench_history_push);
criterion_main!(benches);

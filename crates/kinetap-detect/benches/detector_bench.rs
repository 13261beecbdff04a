//! Benchmarks for the per-frame detection budget.
//!
//! Run with: cargo bench --package kinetap-detect

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use kinetap_core::{LandmarkFrame, Point2, TrackedPoints};
use kinetap_detect::{Sensitivity, TapDetector};

/// Create a realistic tapping trajectory: a sawtooth tip path at 60 fps
/// with small horizontal jitter.
fn create_frames(n: usize) -> Vec<LandmarkFrame> {
    (0..n)
        .map(|i| {
            let ts = i as f64 * 16.7;
            let phase = (i % 20) as f64 / 20.0;
            let tip_y = 0.30 + 0.15 * (1.0 - (2.0 * phase - 1.0).abs());
            let jitter = 0.002 * ((i * 31 % 7) as f64 - 3.0);
            let points = TrackedPoints::new(
                Point2::new(0.5 + jitter, tip_y),
                Point2::new(0.5 + jitter, tip_y + 0.02),
                Point2::new(0.5 + jitter, tip_y + 0.05),
            );
            LandmarkFrame::new(ts, points, 0.95).unwrap()
        })
        .collect()
}

/// Benchmark the per-frame detector path over a full synthetic trial.
fn bench_process_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tap Detection");

    for &n in &[600_usize, 1800] {
        let frames = create_frames(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("process_frame/{n}"), |b| {
            b.iter(|| {
                let mut det = TapDetector::with_sensitivity(Sensitivity::Normal);
                let mut events = 0_usize;
                for frame in &frames {
                    if det.process_frame(black_box(frame)).is_some() {
                        events += 1;
                    }
                }
                black_box(events)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_process_frame);
criterion_main!(benches);

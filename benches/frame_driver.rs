//! Benchmarks for the CPU side of a frame.
//!
//! Run with: `cargo bench`

use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use lorenz_axes::config::DEFAULT_FONT_PATH;
use lorenz_axes::{
    lorenz, Font, FrameDriver, LorenzParams, LorenzState, ManualClock, Scene, VisualizerConfig,
};

fn bench_step(c: &mut Criterion) {
    c.bench_function("lorenz_step", |b| {
        let params = LorenzParams::CLASSIC;
        let mut state = LorenzState::INITIAL;
        b.iter(|| {
            state = lorenz::step(black_box(state), &params);
            state
        })
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_tick");

    for trail in [500usize, 5000, 20_000] {
        group.bench_with_input(BenchmarkId::new("saturated", trail), &trail, |b, &trail| {
            let config = VisualizerConfig {
                trail_capacity: trail,
                log_interval: 0,
                ..VisualizerConfig::default()
            };
            let mut driver = FrameDriver::with_clock(&config, ManualClock::sixty_hz());
            driver.run_frames(trail);
            b.iter(|| black_box(driver.tick()))
        });
    }

    group.finish();
}

fn bench_scene(c: &mut Criterion) {
    let font = match Font::from_path(Path::new(DEFAULT_FONT_PATH)) {
        Ok(font) => font,
        Err(e) => panic!("bundled font failed to load: {e}"),
    };

    c.bench_function("scene_with_labels", |b| {
        b.iter(|| {
            let mut scene = Scene::new();
            scene.attach_labels(black_box(&font));
            scene
        })
    });

    c.bench_function("text_segments", |b| {
        b.iter(|| black_box(font.text_segments(black_box("10"), 0.3)))
    });
}

criterion_group!(benches, bench_step, bench_tick, bench_scene);
criterion_main!(benches);

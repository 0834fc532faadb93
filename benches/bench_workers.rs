use std::num::NonZeroU32;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use laplacian_filter::{FilterEngine, Pixel, PixelBuffer, WorkerCount};

fn noise_image(width: u32, height: u32) -> PixelBuffer {
    let pixels = (0..width * height)
        .map(|i| {
            let v = i.wrapping_mul(2_654_435_761);
            Pixel::new(v as u8, (v >> 8) as u8, (v >> 16) as u8)
        })
        .collect();
    PixelBuffer::from_pixels(
        NonZeroU32::new(width).unwrap(),
        NonZeroU32::new(height).unwrap(),
        pixels,
    )
    .unwrap()
}

pub fn bench_workers(c: &mut Criterion) {
    let src_sizes: [(u32, u32); 3] = [(100, 100), (852, 567), (1920, 1080)];

    let mut group = c.benchmark_group("Laplacian filter with workers");
    group.sample_size(20);
    for (width, height) in src_sizes {
        let src_image = noise_image(width, height);
        for worker_count in 1..=8 {
            let engine = FilterEngine::new(WorkerCount::new(worker_count).unwrap());
            group.bench_with_input(
                BenchmarkId::new(format!("{width}x{height}"), worker_count),
                &src_image,
                |bencher, image| bencher.iter(|| engine.filter(image).unwrap()),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_workers);
criterion_main!(benches);

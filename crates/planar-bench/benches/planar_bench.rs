//! Benchmarks for planar-rs conversions.
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use planar_core::{ColorSpace, Component, ComponentParams, GridOptions, PlanarImage};
use planar_io::{bmp, raw, tga};

/// Builds an `n`-component gradient image.
fn gradient(size: u32, components: usize, precision: u32) -> PlanarImage {
    let params = ComponentParams::new(size, size, precision, false);
    let max = (1i64 << precision) - 1;
    let comps = (0..components)
        .map(|c| {
            let samples = (0..size * size)
                .map(|i| ((i as i64 * (c as i64 + 1)) % (max + 1)) as i32)
                .collect();
            Component::from_samples(params, samples).unwrap()
        })
        .collect();
    PlanarImage::new(comps, ColorSpace::Srgb)
}

/// Benchmark plane extraction at 8 and 16-bit storage.
fn bench_planes(c: &mut Criterion) {
    let mut group = c.benchmark_group("planes");

    for size in [64u32, 256, 1024].iter() {
        group.throughput(Throughput::Elements((*size as u64).pow(2) * 4));

        let image8 = gradient(*size, 4, 8);
        group.bench_with_input(BenchmarkId::new("extract_8bit", size), &image8, |b, img| {
            b.iter(|| bmp::extract_planes(black_box(img)).unwrap())
        });

        let image12 = gradient(*size, 4, 12);
        group.bench_with_input(BenchmarkId::new("extract_16bit", size), &image12, |b, img| {
            b.iter(|| bmp::extract_planes(black_box(img)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark TGA encode and decode.
fn bench_tga(c: &mut Criterion) {
    let mut group = c.benchmark_group("tga");

    for size in [64u32, 256, 1024].iter() {
        group.throughput(Throughput::Elements((*size as u64).pow(2)));

        let rgb = gradient(*size, 3, 8);
        group.bench_with_input(BenchmarkId::new("encode_rgb8", size), &rgb, |b, img| {
            b.iter(|| tga::encode(black_box(img)).unwrap())
        });

        let rgba12 = gradient(*size, 4, 12);
        group.bench_with_input(BenchmarkId::new("encode_rgba12", size), &rgba12, |b, img| {
            b.iter(|| tga::encode(black_box(img)).unwrap())
        });

        let stream = tga::encode(&rgb).unwrap().data;
        let grid = GridOptions::default();
        group.bench_with_input(BenchmarkId::new("decode_rgb8", size), &stream, |b, data| {
            b.iter(|| tga::decode(black_box(data), &grid).unwrap())
        });
    }

    group.finish();
}

/// Benchmark raw bitmap export and import.
fn bench_raw(c: &mut Criterion) {
    let mut group = c.benchmark_group("raw");

    let size = 512u32;
    group.throughput(Throughput::Elements((size as u64).pow(2)));

    let image = gradient(size, 4, 8);
    group.bench_function("to_raw_bitmap_bgra", |b| {
        b.iter(|| raw::to_raw_bitmap(black_box(&image), true).unwrap())
    });

    let bitmap = raw::to_raw_bitmap(&image, true).unwrap().data;
    let grid = GridOptions::default();
    for interleaved in [true, false] {
        let layout = if interleaved {
            raw::RawLayout::interleaved(size, size, 4)
        } else {
            raw::RawLayout::planar(size, size, 4)
        };
        let name = if interleaved { "from_raw_interleaved" } else { "from_raw_planar" };
        group.bench_function(name, |b| {
            b.iter(|| raw::from_raw(black_box(&bitmap), &layout, &grid).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_planes, bench_tga, bench_raw);
criterion_main!(benches);

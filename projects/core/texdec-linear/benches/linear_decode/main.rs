use criterion::{criterion_group, criterion_main, Criterion};
use texdec_common::PixelFormat;
use texdec_linear::{from_linear16, from_linear32};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Linear Decode");
    let width = 1024usize;
    let height = 1024usize;

    let src16 = vec![0x5AA5u16.to_le_bytes(); width * height].concat();
    let src32 = vec![0xDEADBEEFu32.to_le_bytes(); width * height].concat();

    group.throughput(criterion::Throughput::Bytes((width * height * 2) as u64));
    group.bench_function("rgb565 1024x1024", |b| {
        b.iter(|| from_linear16(PixelFormat::Rgb565, width, height, &src16, 0).unwrap())
    });

    group.throughput(criterion::Throughput::Bytes((width * height * 4) as u64));
    group.bench_function("rgba8888 1024x1024", |b| {
        b.iter(|| from_linear32(PixelFormat::Rgba8888, width, height, &src32, 0).unwrap())
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

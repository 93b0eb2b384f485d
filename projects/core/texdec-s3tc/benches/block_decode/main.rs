use criterion::{criterion_group, criterion_main, Criterion};
use texdec_s3tc::{from_dxt1, from_dxt5};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("S3TC Block Decode");
    let width = 1024usize;
    let height = 1024usize;

    let dxt1 = vec![0x5Au8; width * height / 2];
    let dxt5 = vec![0xA5u8; width * height];

    group.throughput(criterion::Throughput::Bytes(dxt1.len() as u64));
    group.bench_function("dxt1 1024x1024", |b| {
        b.iter(|| from_dxt1(width, height, &dxt1).unwrap())
    });

    group.throughput(criterion::Throughput::Bytes(dxt5.len() as u64));
    group.bench_function("dxt5 1024x1024", |b| {
        b.iter(|| from_dxt5(width, height, &dxt5).unwrap())
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

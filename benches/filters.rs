use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use instapy::{get_filter, FilterKind, Implementation};
use ndarray::Array3;

fn test_image(height: usize, width: usize) -> Array3<u8> {
    Array3::from_shape_fn((height, width, 3), |(y, x, c)| ((y * 3 + x * 7 + c * 91) % 256) as u8)
}

fn bench_filters(c: &mut Criterion) {
    let image = test_image(480, 640);

    for kind in FilterKind::ALL {
        let mut group = c.benchmark_group(kind.name());
        group.throughput(Throughput::Elements((480 * 640) as u64));

        for implementation in Implementation::available() {
            let filter = get_filter(kind, implementation).unwrap();
            group.bench_with_input(
                BenchmarkId::from_parameter(implementation),
                &image,
                |b, image| b.iter(|| (filter.func())(black_box(image.view()))),
            );
        }
        group.finish();
    }
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);

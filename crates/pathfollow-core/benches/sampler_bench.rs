use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kurbo::Rect;
use pathfollow_core::{ArrowHead, Eight, OnPath, PathSampler, Pathable, TrailSegment};

fn bench_sampler(c: &mut Criterion) {
    let bounds = Rect::new(0.0, 0.0, 640.0, 360.0);
    let path = Eight.to_path(bounds);

    c.bench_function("measure_eight", |b| {
        b.iter(|| PathSampler::new(black_box(&path)))
    });

    let sampler = PathSampler::new(&path);
    c.bench_function("point_and_angle", |b| {
        b.iter(|| sampler.point_and_angle(black_box(0.37)))
    });

    c.bench_function("wrapped_trail", |b| {
        b.iter(|| TrailSegment::extract(&sampler, black_box(0.1), 0.2).stroked(3.0))
    });

    let on_path = OnPath::new(ArrowHead::default(), Eight, 0.42);
    c.bench_function("on_path_frame", |b| {
        b.iter(|| black_box(&on_path).to_path(bounds))
    });
}

criterion_group!(benches, bench_sampler);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, Criterion};
use ndarray::{ArrayD, IxDyn};
use phaserec_math::fft::RfftPlan;
use phaserec_math::stats::quantile;
use std::hint::black_box;

fn bench_rfftn_2d(c: &mut Criterion) {
    let shape = [128usize, 128];
    let plan = RfftPlan::new(&shape).expect("valid shape");
    let input = ArrayD::from_shape_fn(IxDyn(&shape), |idx| ((idx[0] * 31 + idx[1] * 17) % 13) as f64);

    c.bench_function("rfftn_128x128", |b| {
        b.iter(|| black_box(plan.forward(&input).expect("forward")))
    });

    let spectrum = plan.forward(&input).expect("forward");
    c.bench_function("irfftn_128x128", |b| {
        b.iter(|| black_box(plan.inverse(&spectrum).expect("inverse")))
    });
}

fn bench_rfftn_3d(c: &mut Criterion) {
    let shape = [48usize, 48, 48];
    let plan = RfftPlan::new(&shape).expect("valid shape");
    let input = ArrayD::from_shape_fn(IxDyn(&shape), |idx| ((idx[0] + 3 * idx[1] + 7 * idx[2]) % 5) as f64);

    let mut group = c.benchmark_group("rfftn_48x48x48");
    group.sample_size(20);
    group.bench_function("forward", |b| {
        b.iter(|| black_box(plan.forward(&input).expect("forward")))
    });
    group.finish();
}

fn bench_quantile(c: &mut Criterion) {
    let values: Vec<f64> = (0..65_536).map(|i| ((i * 7919) % 65_536) as f64).collect();
    c.bench_function("quantile_64k", |b| b.iter(|| black_box(quantile(&values, 0.4))));
}

criterion_group!(benches, bench_rfftn_2d, bench_rfftn_3d, bench_quantile);
criterion_main!(benches);

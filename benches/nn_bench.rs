use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nnbits::NnDict;

fn bench_nn_dict(c: &mut Criterion) {
    let mut group = c.benchmark_group("nn_dict");
    let n = 1_000_000; // depth 3, four word probes up and down

    let mut dict = NnDict::new(n);
    for i in (0..n).step_by(67) {
        dict.set(i, true).unwrap();
    }

    group.bench_function("next", |b| {
        b.iter(|| {
            for i in (0..n).step_by(997) {
                black_box(dict.next(i).unwrap());
            }
        })
    });

    group.bench_function("prev", |b| {
        b.iter(|| {
            for i in (0..n).step_by(997) {
                black_box(dict.prev(i).unwrap());
            }
        })
    });

    group.bench_function("toggle", |b| {
        let mut scratch = NnDict::new(n);
        b.iter(|| {
            for i in (0..n).step_by(997) {
                scratch.set(i, true).unwrap();
            }
            for i in (0..n).step_by(997) {
                scratch.set(i, false).unwrap();
            }
        })
    });

    group.bench_function("ones", |b| b.iter(|| black_box(dict.ones().count())));
}

criterion_group!(benches, bench_nn_dict);
criterion_main!(benches);

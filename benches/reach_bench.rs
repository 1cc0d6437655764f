use alice_reach::{bits, Percentiles, ReachAggregator, ReachVector};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_vector(rng: &mut StdRng, len: usize) -> ReachVector {
    let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
    let p25 = rng.gen_range(0.0..1.0);
    ReachVector::with_percentiles(data, Percentiles::new(p25, p25 * 2.0, p25 * 3.0))
}

fn bench_popcount(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut group = c.benchmark_group("popcount");

    for len in [128, 4_096, 65_536] {
        let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        group.bench_with_input(BenchmarkId::new("bytes", len), &data, |b, data| {
            b.iter(|| bits::count_ones(black_box(data)))
        });
    }
    group.finish();
}

fn bench_combine(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let mut group = c.benchmark_group("combine");

    for len in [128, 4_096, 65_536] {
        let a = random_vector(&mut rng, len);
        let b = random_vector(&mut rng, len);

        group.bench_with_input(BenchmarkId::new("and", len), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(a).and(black_box(b)))
        });
        group.bench_with_input(BenchmarkId::new("or", len), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(a).or(black_box(b)))
        });
        group.bench_with_input(BenchmarkId::new("not", len), &a, |bench, a| {
            bench.iter(|| black_box(a).not())
        });
    }
    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1337);
    let vectors: Vec<ReachVector> = (0..64).map(|_| random_vector(&mut rng, 4_096)).collect();

    c.bench_function("aggregate_64_segments", |b| {
        b.iter(|| {
            let mut reach = ReachAggregator::new();
            for v in &vectors {
                let _ = reach.add(black_box(v), 1_000_000);
            }
            black_box(reach.export())
        })
    });
}

criterion_group!(benches, bench_popcount, bench_combine, bench_aggregate);
criterion_main!(benches);

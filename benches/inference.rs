use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hmmgraph::hmm::mocks::mock_random;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("inference");
    for &n_states in [4, 16, 64].iter() {
        let m = mock_random(n_states, 4, 0).unwrap();
        let es = m.sample_seeded(200, 1).unwrap().to_sequence();
        group.bench_with_input(BenchmarkId::new("forward", n_states), &es, |b, es| {
            b.iter(|| m.log_probability(black_box(es)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("viterbi", n_states), &es, |b, es| {
            b.iter(|| m.viterbi(black_box(es)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

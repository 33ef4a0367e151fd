//! Benchmark: build a fitting graph and score every edge, per storage strategy.
//!
//! Run with:
//! `cargo bench --bench assign_weights`
//!
//! The inline strategies need sizes known at compile time, so they only run
//! on the small instance.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use fitting_align::factory::{
    create_array_and_assign, create_bounded_and_assign, create_small_vec_and_assign,
    create_vec_and_assign, ArrayFittingGraph, BoundedFittingGraph, SmallVecFittingGraph,
    VecFittingGraph,
};
use fitting_align::SimpleScorer;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_dna(rng: &mut StdRng, len: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            ALPHABET[idx]
        })
        .collect()
}

fn sequences(v_len: usize, w_len: usize) -> (Vec<u8>, Vec<u8>) {
    let mut rng = StdRng::seed_from_u64(42);
    let v = random_dna(&mut rng, v_len);
    let w = random_dna(&mut rng, w_len);
    (v, w)
}

fn bench_small_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_weights_small");
    let scorer = SimpleScorer::new(1i32, -1, -1);
    let (v, w) = sequences(15, 7);

    group.bench_function("vec", |b| {
        b.iter(|| {
            let g: VecFittingGraph<i32> = create_vec_and_assign(&v, &w, &scorer).unwrap();
            criterion::black_box(g.free_ride_weight());
        })
    });
    group.bench_function("array", |b| {
        b.iter(|| {
            let g: ArrayFittingGraph<i32, 16, 8> =
                create_array_and_assign(&v, &w, &scorer).unwrap();
            criterion::black_box(g.free_ride_weight());
        })
    });
    group.bench_function("small_vec", |b| {
        b.iter(|| {
            let g: SmallVecFittingGraph<i32, 128> =
                create_small_vec_and_assign(&v, &w, &scorer).unwrap();
            criterion::black_box(g.free_ride_weight());
        })
    });
    group.bench_function("bounded", |b| {
        b.iter(|| {
            let g: BoundedFittingGraph<i32, 128> =
                create_bounded_and_assign(&v, &w, &scorer).unwrap();
            criterion::black_box(g.free_ride_weight());
        })
    });

    group.finish();
}

fn bench_large_vec(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_weights_large");
    let scorer = SimpleScorer::new(1i32, -1, -2);

    // Example sizes; tune as needed for your machine.
    for &(v_len, w_len) in &[(1_000usize, 100usize), (4_000, 250)] {
        group.bench_function(format!("vec_{v_len}x{w_len}"), |b| {
            b.iter_batched(
                || sequences(v_len, w_len),
                |(v, w)| {
                    let g: VecFittingGraph<i32> =
                        create_vec_and_assign(&v, &w, &scorer).unwrap();
                    criterion::black_box(g.edge_count());
                },
                BatchSize::PerIteration,
            )
        });

        #[cfg(feature = "parallel")]
        group.bench_function(format!("vec_parallel_{v_len}x{w_len}"), |b| {
            b.iter_batched(
                || sequences(v_len, w_len),
                |(v, w)| {
                    let mut g: VecFittingGraph<i32> =
                        fitting_align::factory::create_vec(v.len() + 1, w.len() + 1).unwrap();
                    fitting_align::weights::assign_weights_parallel(&mut g, &v, &w, &scorer)
                        .unwrap();
                    criterion::black_box(g.edge_count());
                },
                BatchSize::PerIteration,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_small_strategies, bench_large_vec);
criterion_main!(benches);

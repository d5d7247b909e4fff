use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use streamux::{Mux, MuxConfig, Streamable, Streamer};

fn make_mux(children: usize, k: usize) -> Mux<u64> {
    let streamers = (0..children)
        .map(|i| {
            let streamer = Streamer::from_fn(move || (0..).map(move |n| i as u64 * 1_000_000 + n));
            Box::new(streamer) as Box<dyn Streamable<u64>>
        })
        .collect();

    Mux::new(streamers, MuxConfig::new(k).with_seed(42)).expect("valid mux configuration")
}

pub fn pull_one_thousand(c: &mut Criterion) {
    let mut group = c.benchmark_group("Mux::iterate");

    for &(children, k) in &[(4, 2), (16, 4), (64, 8)] {
        group.bench_with_input(
            BenchmarkId::new(format!("{children} children, k={k}"), children),
            &(children, k),
            |b, &(children, k)| {
                b.iter_batched(
                    || make_mux(children, k),
                    |mut mux| {
                        let drawn: Vec<_> = black_box(mux.iterate(Some(1_000), true))
                            .collect::<Result<_, _>>()
                            .expect("infinite sources never error");
                        black_box(drawn)
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }
}

criterion_group!(benches, pull_one_thousand);
criterion_main!(benches);

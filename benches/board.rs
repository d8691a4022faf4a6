//! Benchmarks for board evolution.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use methuselah::{
    compute::evolution::SearchRng,
    schema::{BoardLimits, Chromosome},
    Board,
};

fn bench_board_evolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("board_evolve");

    for box_size in [4, 6, 8, 12] {
        let mut rng = SearchRng::new(42);
        let chromosome = rng.random_chromosome(box_size * box_size, 0.2);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", box_size, box_size)),
            &box_size,
            |b, &box_size| {
                b.iter(|| {
                    let mut board =
                        Board::new(black_box(&chromosome), box_size, BoardLimits::default())
                            .unwrap();
                    board.evolve(100);
                    black_box(board.lifespan())
                });
            },
        );
    }

    group.finish();
}

fn bench_board_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("board_step");

    // Reference seed that stays live for the whole budget.
    let chromosome = Chromosome::from_genes([1, 1, 1, 1, 0, 1, 0, 0, 1]);

    for warmup in [0u64, 25, 50] {
        let mut board = Board::new(&chromosome, 3, BoardLimits::default()).unwrap();
        for _ in 0..warmup {
            board.step();
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("after_{}_steps", warmup)),
            &warmup,
            |b, _| {
                b.iter_batched(
                    || board.clone(),
                    |mut board| {
                        board.step();
                        black_box(board.live_cells())
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_board_evolve, bench_board_step);
criterion_main!(benches);

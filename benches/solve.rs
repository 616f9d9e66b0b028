//! Benchmarks for board expansion and both solvers on small deals.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use calculation_solver::core::{SearchLimits, SearchMode, SolverConfig};
use calculation_solver::game::{get_deck, Board, MoveGenerator};
use calculation_solver::search::{solve, Evaluator, Heuristic};

fn bench_expansion(c: &mut Criterion) {
    let deck = get_deck(13, None, 1).unwrap();
    let generator = MoveGenerator::new();
    let evaluator = Evaluator::default();

    // A mid-game board: park the first twenty cards round-robin
    let mut board = Board::new(&deck);
    for i in 0..20 {
        let moves = generator.generate(&board, &deck);
        let mv = moves[i % moves.len()];
        board = board.apply(mv, &deck).unwrap();
    }

    c.bench_function("expand_and_score", |b| {
        b.iter(|| {
            generator
                .generate(black_box(&board), &deck)
                .into_iter()
                .map(|mv| evaluator.priority(&board.apply(mv, &deck).unwrap()))
                .sum::<f64>()
        });
    });
}

fn bench_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_7");
    group.sample_size(10);

    let deck = get_deck(7, None, 42).unwrap();
    for mode in [SearchMode::BestFirst, SearchMode::IterativeDeepening] {
        let config = SolverConfig::default()
            .with_cards_per_suit(7)
            .with_mode(mode)
            .with_limits(SearchLimits::unlimited().with_max_expansions(50_000));
        group.bench_function(mode.as_str(), |b| {
            b.iter(|| solve(black_box(&deck), &config).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_expansion, bench_solvers);
criterion_main!(benches);

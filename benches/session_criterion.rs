use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chess_session::rules::chess_types::MoveRequest;
use chess_session::session::game_session::GameSession;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    moves: &'static [&'static str],
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "italian",
        moves: &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5", "c2c3", "g8f6"],
    },
    BenchCase {
        name: "exchanges",
        moves: &[
            "e2e4", "d7d5", "e4d5", "d8d5", "b1c3", "d5a5", "d2d4", "c7c6", "g1f3", "c8g4",
            "f1e2", "e7e6",
        ],
    },
];

fn parse_moves(case: &BenchCase) -> Vec<MoveRequest> {
    case.moves
        .iter()
        .map(|lan| lan.parse().expect("benchmark LAN should parse"))
        .collect()
}

fn bench_play_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_play_line");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for case in CASES {
        let moves = parse_moves(case);
        group.throughput(Throughput::Elements(moves.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(case.name), &moves, |b, moves| {
            b.iter(|| {
                let mut session = GameSession::new();
                for request in moves {
                    assert!(session.attempt(black_box(*request)));
                }
                black_box(session.move_history().len())
            });
        });
    }

    group.finish();
}

fn bench_undo_redo(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_undo_redo");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for case in CASES {
        let mut played = GameSession::new();
        for request in parse_moves(case) {
            assert!(played.attempt(request), "benchmark line should be legal");
        }
        let plies = played.move_history().len();
        group.throughput(Throughput::Elements(2 * plies as u64));

        group.bench_with_input(BenchmarkId::from_parameter(case.name), &played, |b, played| {
            b.iter(|| {
                let mut session = played.clone();
                while session.undo() {}
                while session.redo() {}
                black_box(session.snapshot())
            });
        });
    }

    group.finish();
}

criterion_group!(session_benches, bench_play_line, bench_undo_redo);
criterion_main!(session_benches);

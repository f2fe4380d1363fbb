use criterion::{black_box, criterion_group, criterion_main, Criterion};

use trichess_engine::engine::models::{GameConfig, Player};
use trichess_engine::engine::plugin::TypedGamePlugin;
use trichess_engine::games::trichess::movegen;
use trichess_engine::games::trichess::plugin::TriChessPlugin;
use trichess_engine::games::trichess::types::Cell;

fn bench_players() -> Vec<Player> {
    ["p1", "p2", "p3"]
        .iter()
        .enumerate()
        .map(|(i, id)| Player {
            player_id: id.to_string(),
            display_name: format!("Player {}", i + 1),
            seat_index: i as i32,
            is_bot: false,
        })
        .collect()
}

fn bench_valid_actions(c: &mut Criterion) {
    let plugin = TriChessPlugin;
    let players = bench_players();
    let (state, phase, _) = plugin.create_initial_state(&players, &GameConfig::default());

    c.bench_function("get_valid_actions_initial", |b| {
        b.iter(|| {
            let actions = plugin.get_valid_actions(black_box(&state), &phase, "p1");
            black_box(actions)
        })
    });

    let knight: Cell = "B8".parse().unwrap();
    c.bench_function("possible_moves_knight", |b| {
        b.iter(|| black_box(movegen::possible_moves(black_box(&state), knight)))
    });

    let rook: Cell = "A8".parse().unwrap();
    c.bench_function("possible_moves_rook", |b| {
        b.iter(|| black_box(movegen::possible_moves(black_box(&state), rook)))
    });
}

criterion_group!(benches, bench_valid_actions);
criterion_main!(benches);

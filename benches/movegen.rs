use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use keez_engine::board::{Board, BoardState, FieldId, MarbleId};
use keez_engine::cards::{Card, CardValue, Suit};
use keez_engine::core::{GameConfig, PlayerId, Table};
use keez_engine::game::Game;
use keez_engine::ops::{CardOp, OpContext};

/// Every marble on the track, four per block, none on a start field.
fn crowded_board() -> BoardState {
    let mut state = BoardState::initial();
    for block in 0..4u8 {
        for raw in 0..4u8 {
            let marble = MarbleId(block * 4 + raw);
            state.place_marble(marble, FieldId(block * 24 + 7 + raw * 3));
        }
    }
    state
}

fn bench_card_ops(c: &mut Criterion) {
    let table = Table::standard();
    let board = Board::new(&table);
    let ctx = OpContext::new(&board, &table);
    let state = crowded_board();
    let player = PlayerId::new(0);
    let color = table.player(player).color;

    let mut g = c.benchmark_group("keez_ops");
    for (name, op, value) in [
        ("run", CardOp::Run(8), CardValue::Eight),
        ("split", CardOp::Split(7), CardValue::Seven),
        ("switch", CardOp::Switch, CardValue::Jack),
    ] {
        let card = Card::new(Suit::Hearts, value);
        g.bench_with_input(BenchmarkId::new("get_moves", name), &state, |b, s| {
            b.iter(|| black_box(op.get_moves(&ctx, player, color, card, black_box(s))))
        });
    }
    g.finish();
}

fn bench_allowed_moves(c: &mut Criterion) {
    let mut game = Game::new(GameConfig::default()).unwrap();
    let (mut state, _) = game.init_game().unwrap();
    state.board = crowded_board();

    c.bench_function("keez_game/get_allowed_moves", |b| {
        b.iter(|| black_box(game.get_allowed_moves(black_box(&state))))
    });
}

criterion_group!(benches, bench_card_ops, bench_allowed_moves);
criterion_main!(benches);

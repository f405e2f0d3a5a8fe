use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{Board, GameSnapshot, GameState, PieceMatrix};
use blockfall::term::{ControlLayout, FrameBuffer, GameView, Viewport};
use blockfall::types::{GameAction, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            state.tick(black_box(16));
            if !state.running() {
                state.tick(1000);
                state.start();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            board.clear_full_rows()
        })
    });
}

fn bench_collision(c: &mut Criterion) {
    let mut board = Board::new();
    for x in 0..9 {
        board.set(x, 19, Some(PieceKind::J));
    }
    let t = PieceMatrix::template(PieceKind::T);

    c.bench_function("collides", |b| {
        b.iter(|| board.collides(black_box(&t), black_box(4), black_box(17)))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("apply_rotate", |b| {
        b.iter(|| {
            state.apply_action(black_box(GameAction::Rotate));
            state.take_events()
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);
    let mut controls = ControlLayout::new();

    c.bench_function("render_80x24", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(80, 24), &mut fb, &mut controls);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_collision,
    bench_rotate,
    bench_render
);
criterion_main!(benches);

use std::fmt::Write;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use inertia_core::{Direction, GameConfig, GameController, Level, resolve};

fn open_level(size: u8) -> Level {
    let mut text = String::new();
    writeln!(text, "{size} {size}\nunlimited").unwrap();
    for row in 0..size {
        for col in 0..size {
            let ch = match (row, col) {
                (0, 0) => 'P',
                (r, c) if r == size - 1 && c == size - 1 => 'X',
                (r, c) if (r + c) % 7 == 3 => 'G',
                _ => '.',
            };
            text.push(ch);
        }
        text.push('\n');
    }
    Level::parse(&text).unwrap()
}

fn bench_resolve(c: &mut Criterion) {
    let level = open_level(200);
    let board = level.board.clone();

    c.bench_function("resolve_long_slide", |b| {
        b.iter(|| resolve(black_box(&board), black_box((0, 0)), black_box(Direction::Right)))
    });

    c.bench_function("move_and_undo", |b| {
        let mut game = GameController::from_level(level.clone(), &GameConfig::default());
        b.iter(|| {
            game.process_move(black_box(Direction::Down)).unwrap();
            game.process_undo().unwrap();
        })
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use threetris::core::collision::{drop_position, resolve_wall_kick};
use threetris::core::{
    GameSession, InstantAnimator, NullRenderer, Piece, Settings, SettledField,
};
use threetris::types::{Axis, Cube, Direction, Shaft};

fn running_session() -> GameSession<NullRenderer, InstantAnimator> {
    let settings = Settings::default();
    let mut session = GameSession::new(settings.clone(), NullRenderer, InstantAnimator).with_seed(12345);
    session.start(&settings).expect("default settings start");
    session
}

fn bench_update(c: &mut Criterion) {
    let mut session = running_session();

    c.bench_function("session_update_16ms", |b| {
        b.iter(|| {
            if session.is_game_over() {
                session = running_session();
            }
            session.update(black_box(0.016)).expect("update");
        })
    });
}

fn bench_level_clear(c: &mut Criterion) {
    let shaft = Shaft::default();
    c.bench_function("clear_4_levels", |b| {
        b.iter(|| {
            let mut field = SettledField::new(shaft.size_y);
            let mut cubes = Vec::new();
            for y in 0..4 {
                for x in 0..shaft.size_x {
                    for z in 0..shaft.size_z {
                        cubes.push(Cube::new(x, y, z));
                    }
                }
            }
            field.add_cubes(&cubes);
            while let Some(&level) = field.find_full_levels(&shaft).first() {
                field.remove_level(level);
            }
            black_box(field.len())
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut session = running_session();

    c.bench_function("hard_drop_and_settle", |b| {
        b.iter(|| {
            if session.is_game_over() {
                session = running_session();
            }
            session.hard_drop().expect("hard drop");
        })
    });
}

fn bench_drop_position(c: &mut Criterion) {
    let shaft = Shaft::default();
    let field = SettledField::new(shaft.size_y);
    let piece = Piece::new(
        Cube::new(2, 11, 2),
        vec![Cube::new(-1, 0, 0), Cube::ZERO, Cube::new(1, 0, 0), Cube::new(1, 0, 1)],
    );

    c.bench_function("drop_position", |b| {
        b.iter(|| black_box(drop_position(black_box(&piece), &shaft, &field)))
    });
}

fn bench_wall_kick(c: &mut Criterion) {
    let shaft = Shaft::default();
    let field = SettledField::new(shaft.size_y);
    let bar = Piece::new(
        Cube::new(4, 6, 2),
        vec![Cube::new(0, 0, -1), Cube::ZERO, Cube::new(0, 0, 1), Cube::new(0, 0, 2)],
    );
    let rotated = bar.rotated(Axis::Y, Direction::Clockwise);

    c.bench_function("rotate_with_wall_kick", |b| {
        b.iter(|| black_box(resolve_wall_kick(&rotated, Cube::LEFT, &shaft, &field)))
    });
}

criterion_group!(
    benches,
    bench_update,
    bench_level_clear,
    bench_hard_drop,
    bench_drop_position,
    bench_wall_kick
);
criterion_main!(benches);

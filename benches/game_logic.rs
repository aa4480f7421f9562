use criterion::{black_box, criterion_group, criterion_main, Criterion};
use makaton_match::core::{compute_layout, GameState, NullPlayer};
use makaton_match::term::{FrameBuffer, GameView, Viewport};
use makaton_match::types::{
    CardsPerPage, DeviceClass, GameKind, Orientation, Settings, Word, TICK_MS,
};

fn words(n: usize) -> Vec<Word> {
    (0..n)
        .map(|i| Word::new(format!("w{}.png", i), format!("word {}", i)))
        .collect()
}

fn started(per_page: CardsPerPage) -> GameState {
    let settings = Settings {
        cards_per_page: per_page,
        ..Settings::default()
    };
    let mut game = GameState::new(words(40), settings, GameKind::SoundToPicture, 12345, NullPlayer);
    game.set_viewport(1024.0, 768.0, DeviceClass::Tablet, Orientation::Landscape);
    game.initialize_game(0);
    game
}

fn bench_layout(c: &mut Criterion) {
    c.bench_function("compute_layout_8_up", |b| {
        b.iter(|| {
            compute_layout(
                black_box(CardsPerPage::Eight),
                black_box(1024.0),
                black_box(768.0),
                DeviceClass::Tablet,
                Orientation::Landscape,
            )
        })
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut game = started(CardsPerPage::Four);

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            game.tick(black_box(TICK_MS));
        })
    });
}

fn bench_match_cycle(c: &mut Criterion) {
    c.bench_function("match_cycle_to_next_target", |b| {
        b.iter_with_setup(
            || started(CardsPerPage::Eight),
            |mut game| {
                game.auto_match();
                while !game.interactive() {
                    game.tick(TICK_MS);
                }
                game
            },
        )
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let game = started(CardsPerPage::Eight);

    c.bench_function("snapshot_8_up", |b| b.iter(|| black_box(game.snapshot())));
}

fn bench_render(c: &mut Criterion) {
    let game = started(CardsPerPage::Eight);
    let snap = game.snapshot();
    let view = GameView::default();
    let viewport = Viewport::new(128, 48);
    let mut fb = FrameBuffer::new(128, 48);

    c.bench_function("render_frame_128x48", |b| {
        b.iter(|| view.render_into(black_box(&snap), None, viewport, &mut fb))
    });
}

criterion_group!(
    benches,
    bench_layout,
    bench_tick,
    bench_match_cycle,
    bench_snapshot,
    bench_render
);
criterion_main!(benches);

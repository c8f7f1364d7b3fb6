use criterion::{criterion_group, criterion_main, Criterion, SamplingMode};
use std::time::{Duration, Instant};
use grid_snake_common::config::GameConfig;
use grid_snake_common::engine::{GameEvent, GameState, NullRenderer, SessionRng};

const TURNS: [&str; 8] = ["ArrowLeft", "a", "ArrowUp", "w", "ArrowRight", "d", "ArrowDown", "s"];

fn two_player_state() -> GameState {
    let config = GameConfig::default();
    let mut state = GameState::new(&config, SessionRng::new(42));
    state.join("alice").expect("join alice");
    state.join("bob").expect("join bob");
    state
}

fn bench_ticks(ticks: usize) {
    let mut state = two_player_state();
    let mut now = Instant::now();

    for step in 0..ticks {
        now += Duration::from_millis(100);
        state.handle_key(TURNS[step % TURNS.len()], now);
        for event in state.tick() {
            if let GameEvent::PlayerLost { player } = event {
                state.remove_player(&player);
            }
        }
    }
}

fn bench_tick_and_flush(ticks: usize) {
    let config = GameConfig::default();
    let mut state = two_player_state();
    let mut renderer = NullRenderer;
    state.flush(&mut renderer, &config.scales, config.canvas.ui_height);

    for _ in 0..ticks {
        state.tick();
        state.flush(&mut renderer, &config.scales, config.canvas.ui_height);
    }
}

fn tick_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(50)
        .measurement_time(Duration::from_secs(10));

    group.bench_function("100_ticks_two_players", |b| {
        b.iter(|| bench_ticks(100))
    });

    group.bench_function("100_ticks_with_flush", |b| {
        b.iter(|| bench_tick_and_flush(100))
    });

    group.finish();
}

criterion_group!(benches, tick_bench);
criterion_main!(benches);

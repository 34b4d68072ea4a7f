criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        computing_matrix_payoffs,
        computing_counterfactuals,
        sampling_mixed_policy,
        matching_regrets,
        playing_dilemma_rounds,
        validating_oracle_replies,
        rendering_json_trace,
}

fn computing_matrix_payoffs(c: &mut criterion::Criterion) {
    let game = Coordination::default();
    c.bench_function("compute 4x4 Coordination payoffs", |b| {
        b.iter(|| game.payoffs(&[2, 3]))
    });
}

fn computing_counterfactuals(c: &mut criterion::Criterion) {
    let game = Coordination::default();
    c.bench_function("compute 4x4 Coordination counterfactuals", |b| {
        b.iter(|| game.counterfactuals(&[2, 3], 0))
    });
}

fn sampling_mixed_policy(c: &mut criterion::Criterion) {
    let ref mut rng = SmallRng::seed_from_u64(DEFAULT_SEED);
    let policy = vec![0.1, 0.2, 0.3, 0.4];
    c.bench_function("normalize and sample a 4-action Policy", |b| {
        b.iter(|| normalize(&policy).map(|p| sample(&p, rng)))
    });
}

fn matching_regrets(c: &mut criterion::Criterion) {
    let mut player = RegretMatcher::new("rm", 4);
    c.bench_function("update regrets and rematch a 4-action strategy", |b| {
        b.iter(|| {
            player.update_regrets(1, &[1.0, 0.0, 2.0, 0.5]);
            player.strategy()
        })
    });
}

fn playing_dilemma_rounds(c: &mut criterion::Criterion) {
    c.bench_function("play 100 Prisoner's Dilemma rounds", |b| {
        b.iter(|| {
            let players: Vec<Box<dyn Player>> = vec![
                Box::new(TitForTat::new("tft", 2, 0).expect("valid initial action")),
                Box::new(RegretMatcher::new("rm", 2)),
            ];
            let state = GameState::new(100, vec!["tft".into(), "rm".into()], false);
            let game = Arc::new(PrisonersDilemma::default());
            let mut moderator =
                Moderator::new(game, players, state, DEFAULT_SEED).expect("valid roster");
            for _ in 0..100 {
                moderator.play_round().expect("round");
            }
            moderator
        })
    });
}

fn validating_oracle_replies(c: &mut criterion::Criterion) {
    let reply = r#"Here you go: {"policy": [0, 0, 1, 0], "chain_of_thought": "coordinate on 2"}"#;
    c.bench_function("validate a 4-action oracle reply", |b| {
        b.iter(|| validate(reply, 4, true))
    });
}

fn rendering_json_trace(c: &mut criterion::Criterion) {
    let players: Vec<Box<dyn Player>> = vec![
        Box::new(UniformPlayer::new("a", 2)),
        Box::new(RegretMatcher::new("b", 2)),
    ];
    let state = GameState::new(50, vec!["a".into(), "b".into()], false);
    let game = Arc::new(Chicken::default());
    let mut moderator = Moderator::new(game, players, state, DEFAULT_SEED).expect("valid roster");
    for _ in 0..50 {
        moderator.play_round().expect("round");
    }
    let logger = EventLogger::stdout(Format::Json);
    c.bench_function("render a 50-round JSON trace", |b| {
        b.iter(|| logger.render(moderator.state()))
    });
}

use matrixgames::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use memory_match::{
    DeckBuilder, DifficultyCatalog, GameRng, GameSnapshot, Round, SettleTimings, VictorySnapshot,
};

fn hard_round(seed: u64) -> Round {
    let catalog = DifficultyCatalog::standard();
    Round::start(
        catalog.get("Hard").unwrap().clone(),
        &DeckBuilder::new(),
        SettleTimings::default(),
        GameRng::new(seed),
    )
    .unwrap()
}

fn bench_deck_build(c: &mut Criterion) {
    let builder = DeckBuilder::new();
    let mut rng = GameRng::new(12345);

    c.bench_function("build_hard_deck", |b| {
        b.iter(|| builder.build(black_box(18), &mut rng))
    });
}

fn bench_reveal_settle_cycle(c: &mut Criterion) {
    c.bench_function("reveal_settle_pair", |b| {
        b.iter_batched(
            || {
                let round = hard_round(12345);
                let symbol = round.deck().tiles()[0].symbol;
                let ids: Vec<_> = round
                    .deck()
                    .tiles()
                    .iter()
                    .filter(|t| t.symbol == symbol)
                    .map(|t| t.id)
                    .collect();
                (round, ids[0], ids[1])
            },
            |(mut round, first, second)| {
                round.reveal(first);
                round.reveal(second);
                round.settle();
                round
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let round = hard_round(12345);

    c.bench_function("snapshot_hard_round", |b| {
        b.iter(|| GameSnapshot::of_round(black_box(&round), 1, VictorySnapshot::default()))
    });
}

criterion_group!(benches, bench_deck_build, bench_reveal_settle_cycle, bench_snapshot);
criterion_main!(benches);

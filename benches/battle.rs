use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use wordwarrior::combat::{enemy_move_for, Battle, BattleMode, Combatant};
use wordwarrior::data::DataManager;
use wordwarrior::session::{apply_action, Action};
use wordwarrior::Profile;

fn bench_reducer(c: &mut Criterion) {
    let data = DataManager::default();
    let profile = Profile::default();
    let mut group = c.benchmark_group("reducer");

    group.bench_function("word_mastered", |b| {
        b.iter(|| apply_action(black_box(&profile), &data.catalog, &data.config, Action::WordMastered))
    });
    group.bench_function("purchase_rejected", |b| {
        b.iter(|| {
            apply_action(
                black_box(&profile),
                &data.catalog,
                &data.config,
                Action::Purchase("tower_shield".to_string()),
            )
        })
    });

    group.finish();
}

fn bench_battle(c: &mut Criterion) {
    let mut group = c.benchmark_group("battle");

    for boss_hp in [100u32, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("boss_hp", boss_hp), &boss_hp, |b, &boss_hp| {
            b.iter_batched(
                || {
                    let player = Combatant::new("player", 1_000_000, 10, 10);
                    let boss = Combatant::new("boss", boss_hp, 0, 0);
                    (Battle::new(BattleMode::Boss, player, boss), StdRng::seed_from_u64(7))
                },
                |(mut battle, mut rng)| {
                    while !battle.is_over() {
                        let ticket = battle.begin_player_turn().unwrap();
                        battle.resolve_player_turn(ticket, 90.0).unwrap();
                        if !battle.is_over() {
                            battle
                                .resolve_enemy_turn(enemy_move_for(BattleMode::Boss, None, &mut rng))
                                .unwrap();
                        }
                        battle.drain_signals();
                    }
                    battle.match_result()
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(battle_benches, bench_reducer, bench_battle);
criterion_main!(battle_benches);

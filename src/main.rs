//! Word Warrior - Entry Point
//!
//! Small command-line driver over a locally stored profile.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};

use wordwarrior::combat::{enemy_move_for, Battle, BattleMode};
use wordwarrior::data::DataManager;
use wordwarrior::items::ItemType;
use wordwarrior::progression::{evaluate, level_progress, AchievementFilter};
use wordwarrior::ranking::{build_leaderboard, neighbors, LeaderboardKind};
use wordwarrior::save::{LocalStore, Repository};
use wordwarrior::session::{Action, Report, Session};

const USAGE: &str = "usage:
  wordwarrior <user> status
  wordwarrior <user> study <words>
  wordwarrior <user> login
  wordwarrior <user> talk <seconds>
  wordwarrior <user> buy <item_id>
  wordwarrior <user> equip <item_id>
  wordwarrior <user> unequip <weapon|armor|shield>
  wordwarrior <user> battle <score>...
  wordwarrior <user> history [page]
  wordwarrior <user> leaderboard [rank|power|words]";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Word Warrior v{}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (Some(user_id), Some(command)) = (args.first(), args.get(1)) else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };
    let rest = &args[2..];

    let data = DataManager::new();
    let store = LocalStore::new();
    let session = Session::load(
        &store,
        user_id,
        Arc::new(data.catalog.clone()),
        Arc::new(data.config.clone()),
    )
    .with_context(|| format!("loading profile for {}", user_id))?;

    match command.as_str() {
        "status" => {}
        "study" => {
            let words: u32 = rest.first().map(|s| s.parse()).transpose()?.unwrap_or(1);
            for _ in 0..words {
                report(session.dispatch(Action::WordMastered)?);
            }
        }
        "login" => report(session.dispatch(Action::DailyLogin { day: today()? })?),
        "talk" => {
            let elapsed_secs: u32 = rest.first().context("missing seconds")?.parse()?;
            report(session.dispatch(Action::ConversationFinished { elapsed_secs })?);
        }
        "buy" => {
            let item_id = rest.first().context("missing item id")?;
            report(session.dispatch(Action::Purchase(item_id.clone()))?);
        }
        "equip" => {
            let item_id = rest.first().context("missing item id")?;
            let item = data
                .catalog
                .get(item_id)
                .with_context(|| format!("unknown item {}", item_id))?;
            report(session.dispatch(Action::Equip {
                slot: item.item_type,
                item_id: item_id.clone(),
            })?);
        }
        "unequip" => {
            let label = rest.first().context("missing slot")?;
            let Some(slot) = ItemType::from_label(label) else {
                bail!("unknown slot {}", label);
            };
            report(session.dispatch(Action::Unequip(slot))?);
        }
        "battle" => {
            let scores = rest
                .iter()
                .map(|s| s.parse::<f64>())
                .collect::<Result<Vec<_>, _>>()
                .context("scores must be numbers")?;
            let mut battle = session.boss_battle();
            fight(&mut battle, &scores)?;

            let result = battle.match_result().context("battle did not finish")?;
            let opponent = battle.enemy().name.clone();
            let outcome = session
                .finish_match(&store, &opponent, result)
                .context("recording match")?;
            report(outcome);
            print_status(&session);
            return Ok(());
        }
        "history" => {
            let page: usize = rest.first().map(|s| s.parse()).transpose()?.unwrap_or(0);
            let history = store.match_history(user_id, page)?;
            for record in &history.records {
                let score = record
                    .result
                    .score
                    .map_or_else(|| "-".to_string(), |s| s.to_string());
                println!(
                    "#{:<4} {:<8} vs {:<16} {:?} score {:>3} ({:+})",
                    record.seq,
                    record.result.mode.name(),
                    record.opponent,
                    record.result.outcome,
                    score,
                    record.result.score_change.unwrap_or(0)
                );
            }
            if history.has_more {
                println!("... more on page {}", page + 1);
            }
            return Ok(());
        }
        "leaderboard" => {
            let kind = match rest.first().map(String::as_str) {
                None | Some("rank") => LeaderboardKind::RankPoints,
                Some("power") => LeaderboardKind::Power,
                Some("words") => LeaderboardKind::Words,
                Some(other) => bail!("unknown leaderboard {}", other),
            };
            let entries: Vec<_> = store
                .leaderboard_rows()?
                .into_iter()
                .map(|row| row.into_entry(&data.catalog))
                .collect();
            let board = build_leaderboard(&entries, kind, usize::MAX);
            for standing in board.iter().take(10) {
                println!(
                    "{:>3}. {:<16} {:<9} Lv{:<3} {}",
                    standing.position, standing.username, standing.title, standing.level, standing.value
                );
            }
            let around = neighbors(&board, user_id);
            if around.first().is_some_and(|s| s.position > 10) {
                println!("  ...");
                for standing in around {
                    println!("{:>3}. {:<16} {}", standing.position, standing.username, standing.value);
                }
            }
            return Ok(());
        }
        other => {
            eprintln!("unknown command {:?}\n{}", other, USAGE);
            std::process::exit(2);
        }
    }

    session.save(&store).context("saving profile")?;
    print_status(&session);
    Ok(())
}

/// Days since the Unix epoch, in UTC
fn today() -> Result<u32> {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before 1970")?
        .as_secs();
    Ok(u32::try_from(secs / 86_400)?)
}

/// Play the scores in order; running out of scores means giving up
fn fight(battle: &mut Battle, scores: &[f64]) -> Result<()> {
    let mut rng = rand::thread_rng();
    let mut scores = scores.iter();

    while !battle.is_over() {
        let Some(score) = scores.next() else {
            battle.surrender()?;
            break;
        };
        let ticket = battle.begin_player_turn()?;
        let hit = battle.resolve_player_turn(ticket, *score)?;
        println!("You: {}", hit.message);

        if !battle.is_over() {
            let strike = battle.resolve_enemy_turn(enemy_move_for(BattleMode::Boss, None, &mut rng))?;
            println!("{}: {}", battle.enemy().name, strike.message);
        }
        println!(
            "  {} {}/{} HP | {} {}/{} HP",
            battle.player().name,
            battle.player().hp,
            battle.player().max_hp,
            battle.enemy().name,
            battle.enemy().hp,
            battle.enemy().max_hp
        );
        // Nothing renders here
        battle.drain_signals();
    }
    Ok(())
}

fn report(report: Report) {
    if report.levels_gained > 0 {
        println!("Level up! (+{})", report.levels_gained);
    }
    if let Some(change) = report.rank_change {
        if change.promoted() {
            println!("Promoted to {}!", change.new_rank);
        } else if change.demoted() {
            println!("Demoted to {}", change.new_rank);
        }
    }
    for id in report.newly_unlocked {
        println!("Achievement unlocked: {}", id);
    }
}

fn print_status(session: &Session) {
    let profile = session.snapshot();
    let stats = &profile.stats;
    let combat = session.combat_stats();

    println!(
        "{} | Lv {} ({:.0}%) | {} ({} pts, streak {}) | {} gold",
        session.user_id(),
        stats.level,
        level_progress(stats) * 100.0,
        stats.rank,
        stats.rank_points,
        stats.win_streak,
        stats.gold
    );
    println!(
        "ATK {} DEF {} HP {}/{} CRIT {:.1}% | words {}",
        combat.atk,
        combat.def,
        combat.hp,
        combat.max_hp,
        combat.crit * 100.0,
        stats.mastered_words_count
    );
    for (slot, id) in profile.equipped.iter() {
        println!("  {}: {}", slot, id);
    }

    let unlocked = evaluate(stats, AchievementFilter::Unlocked);
    println!("Achievements: {}/{}", unlocked.len(), evaluate(stats, AchievementFilter::All).len());
}

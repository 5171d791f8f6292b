use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use duel::{BattleState, Match, Outcome, TurnPhase};

use crate::banter::BattleSnapshot;
use crate::ledger::Funding;
use crate::services::Services;
use crate::BoxErr;

/// Play one full match against the boss without a browser: a scripted hero
/// picks cards, the banter and voice services color the boss turns, and the
/// verdict lands on the ledger exactly as the web client would record it.
pub fn run(services: &mut Services, seed: Option<u64>, player: &str) -> Result<(), BoxErr> {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut duel = Match::new(&mut rng);
    log::info!(
        "Match begins: hero {} hp, boss {} hp, {} gold",
        duel.state.hero_hp,
        duel.state.boss_hp,
        duel.state.gold
    );

    while !duel.is_over() {
        let index = pick_card(&duel.state);
        log::info!("Hero plays `{}`", duel.state.hand[index].name());
        let outcome = duel.play_card(index)?;
        log::info!("  {}", outcome.log);

        if duel.phase != TurnPhase::CardResolving {
            break;
        }

        let snapshot = BattleSnapshot {
            hero_hp: duel.state.hero_hp,
            boss_hp: duel.state.boss_hp,
            gold: duel.state.gold,
            shielded: duel.state.shield.is_some(),
        };
        let line = match services.banter.taunt(&snapshot) {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Banter fetch failed, skipping boss turn: {e}");
                duel.recover_turn(&mut rng)?;
                continue;
            }
        };
        log::info!("Boss growls: {line}");
        speak_best_effort(services, &line);

        duel.boss_turn(&line, &mut rng)?;
        if let Some(entry) = duel.log.last() {
            log::info!("  {entry}");
        }
    }

    let won = duel.outcome() == Outcome::HeroWin;
    log::info!(
        "Match over: {} (hero {} hp, boss {} hp)",
        if won { "hero wins" } else { "boss wins" },
        duel.state.hero_hp,
        duel.state.boss_hp
    );

    if services.ledger.is_gated() {
        let fee = services.ledger.match_fee();
        match services.ledger.ensure_funded(player, fee)? {
            Funding::Created { deposited } => log::info!("Deposited {deposited} for {player}"),
            Funding::Existing { balance } => log::info!("{player} already holds {balance}"),
        }
    }

    let recorded = services
        .ledger
        .record_match(player, won, duel.state.hero_hp, duel.state.boss_hp)?;
    log::info!("Recorded on chain: tx {}", recorded.tx_hash);
    log::info!(
        "Lifetime for {player}: {} wins / {} losses over {} games, {} prepaid",
        recorded.stats.wins,
        recorded.stats.losses,
        recorded.stats.games_played,
        recorded.balance
    );
    Ok(())
}

/// Voice is flavor. A dead synth never stops the match.
fn speak_best_effort(services: &Services, line: &str) {
    match services.voice.speak(line, true) {
        Ok(audio) if !audio.is_empty() => log::debug!("Voice clip ready: {} bytes", audio.len()),
        Ok(_) => {}
        Err(e) => log::warn!("Voice synthesis skipped: {e}"),
    }
}

/// Greedy card choice: favor raw damage, lean on heals when hurt, grab a
/// shell before the boss swings if one is on offer. Falls back to slot 0
/// when nothing is affordable and lets the fizzle speak for itself.
fn pick_card(state: &BattleState) -> usize {
    let mut best = 0;
    let mut best_score = i32::MIN;
    for (index, card) in state.hand.iter().enumerate() {
        let effect = card.effect();
        if effect.gold_cost > state.gold {
            continue;
        }
        let mut score = effect.damage;
        if state.hero_hp <= 35 {
            score += effect.heal * 2;
        }
        if effect.shield.is_some() && state.shield.is_none() && state.hero_hp <= 60 {
            score += 8;
        }
        score += (effect.gold_gain / 2) as i32;
        if score > best_score {
            best_score = score;
            best = index;
        }
    }
    best
}

use crate::card::{Card, CardEffect};
use crate::state::{BattleState, Shield, HAND_SIZE};
use crate::CATALOG;
use rand::Rng;

/// Raw boss damage is drawn uniformly from this inclusive range.
pub const BOSS_DAMAGE_MIN: i32 = 10;
pub const BOSS_DAMAGE_MAX: i32 = 20;

/// What happened when a card was played. Resolution never fails: a card the
/// hero cannot pay for degrades to a no-op with `fizzled` set and a log line
/// saying so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardOutcome {
    pub log: String,
    pub boss_was_damaged: bool,
    pub fizzled: bool,
}

/// One boss counter-attack: the raw roll, what actually landed after any
/// shield, and the narration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BossAttack {
    pub raw: i32,
    pub dealt: i32,
    pub log: String,
}

/// Apply `card` to `state`. Deterministic: every card maps to fixed deltas on
/// HP, gold and shield. HP results are clamped to `[0, HP_MAX]`.
pub fn resolve_card_effect(card: Card, state: &mut BattleState) -> CardOutcome {
    if state.is_terminal() {
        return CardOutcome {
            log: "The match is already decided.".to_string(),
            boss_was_damaged: false,
            fizzled: true,
        };
    }

    let effect = card.effect();
    if effect.gold_cost > state.gold {
        return CardOutcome {
            log: format!(
                "{} fizzles: {} gold needed, only {} in the pouch.",
                card.name(),
                effect.gold_cost,
                state.gold
            ),
            boss_was_damaged: false,
            fizzled: true,
        };
    }

    state.gold -= effect.gold_cost;
    if effect.damage > 0 {
        state.damage_boss(effect.damage);
    }
    if effect.heal > 0 {
        state.heal_hero(effect.heal);
    }
    state.gold = state.gold.saturating_add(effect.gold_gain);
    if let Some(shield) = effect.shield {
        state.shield = Some(shield);
    }

    CardOutcome {
        log: effect_log(card, &effect),
        boss_was_damaged: effect.damage > 0,
        fizzled: false,
    }
}

/// Roll and apply the boss counter-attack. An active shield soaks the hit
/// (full shield to zero, half shield to `floor(raw / 2)`) and is consumed
/// afterwards in every case: shields last exactly one boss turn.
pub fn roll_boss_attack(state: &mut BattleState, rng: &mut impl Rng) -> BossAttack {
    let raw = rng.gen_range(BOSS_DAMAGE_MIN..=BOSS_DAMAGE_MAX);
    let (dealt, log) = match state.shield {
        Some(Shield::Full) => (
            0,
            format!("The boss swings for {raw} but the hard shell absorbs it all."),
        ),
        Some(Shield::Half) => {
            let halved = raw / 2;
            (
                halved,
                format!("The boss swings for {raw}; the soft shell blunts it to {halved}."),
            )
        }
        None => (raw, format!("The boss rakes the hero for {raw}!")),
    };

    state.shield = None;
    state.damage_hero(dealt);

    BossAttack { raw, dealt, log }
}

/// Draw a fresh hand: one independent uniform pick from the catalog per slot,
/// so duplicates are possible.
pub fn draw_hand(rng: &mut impl Rng) -> Vec<Card> {
    (0..HAND_SIZE)
        .map(|_| CATALOG[rng.gen_range(0..CATALOG.len())])
        .collect()
}

fn effect_log(card: Card, effect: &CardEffect) -> String {
    let mut parts = Vec::new();
    if effect.gold_cost > 0 {
        parts.push(format!("spends {} gold", effect.gold_cost));
    }
    if effect.damage > 0 {
        parts.push(format!("hits the boss for {}", effect.damage));
    }
    if effect.heal > 0 {
        parts.push(format!("restores {} HP", effect.heal));
    }
    if effect.gold_gain > 0 {
        parts.push(format!("banks {} gold", effect.gold_gain));
    }
    match effect.shield {
        Some(Shield::Full) => parts.push("raises a hard shell".to_string()),
        Some(Shield::Half) => parts.push("raises a soft shell".to_string()),
        None => {}
    }
    format!("{} {}.", card.name(), parts.join(" and "))
}

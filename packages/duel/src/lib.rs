mod card;
mod resolve;
mod state;
mod turn;

pub use card::{Card, CardEffect, CATALOG};
pub use resolve::{
    draw_hand, resolve_card_effect, roll_boss_attack, BossAttack, CardOutcome, BOSS_DAMAGE_MAX,
    BOSS_DAMAGE_MIN,
};
pub use state::{
    BattleState, Outcome, Shield, HAND_SIZE, HP_MAX, REROLL_COST, STARTING_GOLD, STARTING_HP,
};
pub use turn::{Match, RerollOutcome, TurnError, TurnPhase};

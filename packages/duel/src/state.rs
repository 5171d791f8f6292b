use crate::Card;
use serde::{Deserialize, Serialize};

/// HP ceiling for both combatants; HP is always clamped to `[0, HP_MAX]`.
pub const HP_MAX: i32 = 100;
/// Starting HP for hero and boss alike.
pub const STARTING_HP: i32 = 100;
/// Gold the hero carries into a fresh match.
pub const STARTING_GOLD: u32 = 50;
/// Number of cards in the hero's hand.
pub const HAND_SIZE: usize = 3;
/// Gold price of redrawing the hand outside of a turn.
pub const REROLL_COST: u32 = 5;

/// Strength of the shield granted by a shell card. The shield soaks the next
/// boss attack and is consumed by it whether or not it helped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shield {
    /// Halves incoming damage (floor).
    Half,
    /// Reduces incoming damage to zero.
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    HeroWin,
    BossWin,
}

impl Outcome {
    /// Classify a pair of HP values. Returns `None` for the unreachable
    /// both-at-zero case so callers validating recorded results can reject it.
    pub fn from_hps(hero_hp: i32, boss_hp: i32) -> Option<Self> {
        match (hero_hp, boss_hp) {
            (0, 0) => None,
            (0, _) => Some(Outcome::BossWin),
            (_, 0) => Some(Outcome::HeroWin),
            _ => Some(Outcome::InProgress),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// The in-memory state of one match, from first card to terminal outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    pub hero_hp: i32,
    pub boss_hp: i32,
    pub gold: u32,
    pub shield: Option<Shield>,
    pub hand: Vec<Card>,
    pub outcome: Outcome,
}

impl BattleState {
    pub fn new() -> Self {
        Self {
            hero_hp: STARTING_HP,
            boss_hp: STARTING_HP,
            gold: STARTING_GOLD,
            shield: None,
            hand: Vec::new(),
            outcome: Outcome::InProgress,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Deal `amount` to the boss, clamping at zero and settling the outcome.
    pub fn damage_boss(&mut self, amount: i32) {
        self.boss_hp = (self.boss_hp - amount).clamp(0, HP_MAX);
        self.settle_outcome();
    }

    /// Deal `amount` to the hero, clamping at zero and settling the outcome.
    pub fn damage_hero(&mut self, amount: i32) {
        self.hero_hp = (self.hero_hp - amount).clamp(0, HP_MAX);
        self.settle_outcome();
    }

    /// Heal the hero, clamping at `HP_MAX`.
    pub fn heal_hero(&mut self, amount: i32) {
        self.hero_hp = (self.hero_hp + amount).clamp(0, HP_MAX);
    }

    fn settle_outcome(&mut self) {
        if self.outcome.is_terminal() {
            return;
        }
        if self.boss_hp == 0 {
            self.outcome = Outcome::HeroWin;
        } else if self.hero_hp == 0 {
            self.outcome = Outcome::BossWin;
        }
    }
}

impl Default for BattleState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_matches_starting_values() {
        let state = BattleState::new();
        assert_eq!(state.hero_hp, 100);
        assert_eq!(state.boss_hp, 100);
        assert_eq!(state.gold, 50);
        assert_eq!(state.shield, None);
        assert_eq!(state.outcome, Outcome::InProgress);
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut state = BattleState::new();
        state.boss_hp = 10;
        state.damage_boss(25);
        assert_eq!(state.boss_hp, 0);
        assert_eq!(state.outcome, Outcome::HeroWin);
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut state = BattleState::new();
        state.hero_hp = 95;
        state.heal_hero(15);
        assert_eq!(state.hero_hp, 100);
    }

    #[test]
    fn test_hero_death_settles_boss_win() {
        let mut state = BattleState::new();
        state.hero_hp = 5;
        state.damage_hero(12);
        assert_eq!(state.hero_hp, 0);
        assert_eq!(state.outcome, Outcome::BossWin);
    }

    #[test]
    fn test_terminal_outcome_is_sticky() {
        let mut state = BattleState::new();
        state.boss_hp = 1;
        state.damage_boss(1);
        assert_eq!(state.outcome, Outcome::HeroWin);

        // A later hero KO must not overwrite the decided match.
        state.damage_hero(200);
        assert_eq!(state.outcome, Outcome::HeroWin);
    }

    #[test]
    fn test_outcome_from_hps() {
        assert_eq!(Outcome::from_hps(50, 50), Some(Outcome::InProgress));
        assert_eq!(Outcome::from_hps(30, 0), Some(Outcome::HeroWin));
        assert_eq!(Outcome::from_hps(0, 80), Some(Outcome::BossWin));
        assert_eq!(Outcome::from_hps(0, 0), None);
    }
}

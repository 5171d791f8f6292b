use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resolve::{draw_hand, resolve_card_effect, roll_boss_attack, CardOutcome};
use crate::state::{BattleState, Outcome, REROLL_COST};
use crate::Card;

/// Where a match sits inside one turn. `CardResolving` means the card half
/// has committed and a boss response is owed; `BossResolving` only exists
/// while that response is being applied.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingInput,
    CardResolving,
    BossResolving,
    Terminal,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TurnError {
    #[error("the match is over")]
    MatchOver,

    #[error("a turn is already in progress")]
    TurnInProgress,

    #[error("no boss response is pending")]
    NoBossTurnPending,

    #[error("no card at hand slot {index}")]
    BadCardIndex { index: usize },
}

/// A reroll never fails; when it cannot happen the hand stays put and the
/// log line says why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RerollOutcome {
    pub rerolled: bool,
    pub log: String,
}

/// One match from fresh HP to a decided outcome. The caller drives the two
/// halves of each turn explicitly: `play_card`, then (after fetching boss
/// flavor text) `boss_turn`. Between the two the match reports
/// `CardResolving` and rejects further input.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Match {
    pub state: BattleState,
    pub phase: TurnPhase,
    pub log: Vec<String>,
}

impl Match {
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut state = BattleState::new();
        state.hand = draw_hand(rng);
        Match {
            state,
            phase: TurnPhase::AwaitingInput,
            log: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == TurnPhase::Terminal
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome
    }

    /// Commit the card half of a turn. On success the match is either
    /// `Terminal` (the card decided it, boss turn skipped) or
    /// `CardResolving` (a boss response is owed).
    pub fn play_card(&mut self, index: usize) -> Result<CardOutcome, TurnError> {
        match self.phase {
            TurnPhase::AwaitingInput => {}
            TurnPhase::Terminal => return Err(TurnError::MatchOver),
            TurnPhase::CardResolving | TurnPhase::BossResolving => {
                return Err(TurnError::TurnInProgress)
            }
        }
        let card = *self
            .state
            .hand
            .get(index)
            .ok_or(TurnError::BadCardIndex { index })?;

        let outcome = resolve_card_effect(card, &mut self.state);
        self.log.push(outcome.log.clone());
        self.phase = if self.state.is_terminal() {
            TurnPhase::Terminal
        } else {
            TurnPhase::CardResolving
        };
        Ok(outcome)
    }

    /// Commit the boss half: banter line, counter-attack, and (if the hero
    /// survives) a fresh hand, all together. Callers that fail to obtain
    /// banter skip this and call `recover_turn` instead, so the half never
    /// commits partially.
    pub fn boss_turn(&mut self, banter: &str, rng: &mut impl Rng) -> Result<(), TurnError> {
        if self.phase != TurnPhase::CardResolving {
            return Err(TurnError::NoBossTurnPending);
        }
        self.phase = TurnPhase::BossResolving;

        if !banter.is_empty() {
            self.log.push(banter.to_string());
        }
        let attack = roll_boss_attack(&mut self.state, rng);
        self.log.push(attack.log);

        if self.state.is_terminal() {
            self.phase = TurnPhase::Terminal;
        } else {
            self.state.hand = draw_hand(rng);
            self.phase = TurnPhase::AwaitingInput;
        }
        Ok(())
    }

    /// Abandon a pending boss response and hand control back to the hero.
    /// The card half stays committed; the boss attack never lands. A fresh
    /// hand is dealt so the turn still ends the way every turn ends.
    pub fn recover_turn(&mut self, rng: &mut impl Rng) -> Result<(), TurnError> {
        if self.phase != TurnPhase::CardResolving {
            return Err(TurnError::NoBossTurnPending);
        }
        self.log.push("The boss hesitates. Play on.".to_string());
        self.state.hand = draw_hand(rng);
        self.phase = TurnPhase::AwaitingInput;
        Ok(())
    }

    /// Swap the whole hand for `REROLL_COST` gold. No-op while a turn is in
    /// progress, after the match, or when gold runs short.
    pub fn reroll(&mut self, rng: &mut impl Rng) -> RerollOutcome {
        if self.phase != TurnPhase::AwaitingInput {
            return RerollOutcome {
                rerolled: false,
                log: "No rerolling mid-turn.".to_string(),
            };
        }
        if self.state.gold < REROLL_COST {
            return RerollOutcome {
                rerolled: false,
                log: format!(
                    "Reroll fizzles: {} gold needed, only {} in the pouch.",
                    REROLL_COST, self.state.gold
                ),
            };
        }
        self.state.gold -= REROLL_COST;
        self.state.hand = draw_hand(rng);
        let log = format!("New hand dealt for {REROLL_COST} gold.");
        self.log.push(log.clone());
        RerollOutcome {
            rerolled: true,
            log,
        }
    }
}

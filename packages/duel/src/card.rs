use crate::state::Shield;
use serde::{Deserialize, Serialize};

/// Fixed numeric deltas a card applies when played. Every field is applied
/// deterministically; a card with `gold_cost > 0` fizzles instead when the
/// hero cannot pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardEffect {
    pub damage: i32,
    pub heal: i32,
    pub gold_gain: u32,
    pub gold_cost: u32,
    pub shield: Option<Shield>,
}

impl CardEffect {
    const NONE: Self = Self {
        damage: 0,
        heal: 0,
        gold_gain: 0,
        gold_cost: 0,
        shield: None,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Card {
    JalapenoJab,
    ElFuego,
    HealingGuac,
    TipJar,
    HardShell,
    SoftShell,
    ChurroChomp,
}

/// Every card in the catalog, in display order.
pub const CATALOG: [Card; 7] = [
    Card::JalapenoJab,
    Card::ElFuego,
    Card::HealingGuac,
    Card::TipJar,
    Card::HardShell,
    Card::SoftShell,
    Card::ChurroChomp,
];

impl Card {
    pub fn id(&self) -> &'static str {
        match self {
            Card::JalapenoJab => "jalapeno-jab",
            Card::ElFuego => "el-fuego",
            Card::HealingGuac => "healing-guac",
            Card::TipJar => "tip-jar",
            Card::HardShell => "hard-shell",
            Card::SoftShell => "soft-shell",
            Card::ChurroChomp => "churro-chomp",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Card::JalapenoJab => "Jalapeño Jab",
            Card::ElFuego => "El Fuego",
            Card::HealingGuac => "Healing Guac",
            Card::TipJar => "Tip Jar",
            Card::HardShell => "Hard Shell",
            Card::SoftShell => "Soft Shell",
            Card::ChurroChomp => "Churro Chomp",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Card::JalapenoJab => "A quick spicy hit for 10 damage.",
            Card::ElFuego => "Burn the boss for 15 damage. Costs 5 gold.",
            Card::HealingGuac => "Restore 15 HP. Extra guac is never extra.",
            Card::TipJar => "Shake the jar for 10 gold.",
            Card::HardShell => "Block the next boss attack completely.",
            Card::SoftShell => "Halve the next boss attack.",
            Card::ChurroChomp => "Bite for 5 damage and recover 5 HP.",
        }
    }

    pub fn effect(&self) -> CardEffect {
        match self {
            Card::JalapenoJab => CardEffect {
                damage: 10,
                ..CardEffect::NONE
            },
            Card::ElFuego => CardEffect {
                damage: 15,
                gold_cost: 5,
                ..CardEffect::NONE
            },
            Card::HealingGuac => CardEffect {
                heal: 15,
                ..CardEffect::NONE
            },
            Card::TipJar => CardEffect {
                gold_gain: 10,
                ..CardEffect::NONE
            },
            Card::HardShell => CardEffect {
                shield: Some(Shield::Full),
                ..CardEffect::NONE
            },
            Card::SoftShell => CardEffect {
                shield: Some(Shield::Half),
                ..CardEffect::NONE
            },
            Card::ChurroChomp => CardEffect {
                damage: 5,
                heal: 5,
                ..CardEffect::NONE
            },
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        CATALOG.iter().copied().find(|card| card.id() == id)
    }
}

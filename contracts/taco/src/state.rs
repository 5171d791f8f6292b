use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    pub denom: String,
    /// Fee burned from the player's prepaid balance per recorded match.
    /// Only charged in gated mode.
    pub match_fee: Uint128,
    /// Privileged recorder. `Some` puts the contract in gated mode: only
    /// this address may record matches. `None` lets players self-report.
    pub operator: Option<Addr>,
}

impl Config {
    pub fn is_gated(&self) -> bool {
        self.operator.is_some()
    }
}

/// Lifetime aggregate for one player. Created on first write, never deleted.
/// `games_played` always equals `wins + losses`.
#[cw_serde]
#[derive(Default)]
pub struct PlayerRecord {
    pub wins: u64,
    pub losses: u64,
    pub games_played: u64,
}

impl PlayerRecord {
    /// Fold one finished match into the aggregate. The single place the
    /// counters move, so the wins + losses invariant holds by construction.
    pub fn absorb(&mut self, won: bool) {
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.games_played += 1;
    }
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const PLAYERS: Map<&Addr, PlayerRecord> = Map::new("players");
pub const BALANCES: Map<&Addr, Uint128> = Map::new("balances");
pub const FEE_POOL: Item<Uint128> = Item::new("fee_pool");

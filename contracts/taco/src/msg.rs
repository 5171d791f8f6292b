use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

pub use crate::state::Config;

#[cw_serde]
pub struct InstantiateMsg {
    pub denom: String,
    pub match_fee: Uint128,
    /// Privileged recorder address. When set, only this address can record
    /// matches and each record burns `match_fee` from the player's prepaid
    /// balance. When unset, players self-report for free.
    pub operator: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    // Append one finished match to the player's lifetime record
    RecordMatch {
        player: String,
        won: bool,
        hero_hp: i32,
        boss_hp: i32,
    },
    // Credit the sender's prepaid fee balance with the attached funds
    Deposit {},
    // Return the sender's entire prepaid balance
    Withdraw {},
    // Operator only: collect the accumulated match fees
    WithdrawFees {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    GetConfig {},
    #[returns(PlayerStatsResponse)]
    GetPlayerStats { player: String },
    #[returns(BalanceResponse)]
    GetBalance { player: String },
    #[returns(Vec<PlayerStatsResponse>)]
    ListPlayers {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct PlayerStatsResponse {
    pub player: String,
    pub wins: u64,
    pub losses: u64,
    pub games_played: u64,
}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: Uint128,
}

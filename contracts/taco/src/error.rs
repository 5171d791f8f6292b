use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("No {denom} sent with the deposit")]
    NoFundsSent { denom: String },

    #[error("Nothing to withdraw")]
    NothingToWithdraw {},

    #[error("Insufficient prepaid balance: fee is {fee}, balance is {balance}")]
    InsufficientBalance { fee: Uint128, balance: Uint128 },

    #[error("Inconsistent match result: won={won}, hero_hp={hero_hp}, boss_hp={boss_hp}")]
    InvalidResult {
        won: bool,
        hero_hp: i32,
        boss_hp: i32,
    },
}

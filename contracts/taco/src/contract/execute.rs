#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    BankMsg, Coin, DepsMut, Env, MessageInfo, Response, StdError, Uint128,
};
use duel::{Outcome, HP_MAX};

use crate::error::ContractError;
use crate::msg::ExecuteMsg;
use crate::state::{BALANCES, CONFIG, FEE_POOL, PLAYERS};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RecordMatch {
            player,
            won,
            hero_hp,
            boss_hp,
        } => execute_record_match(deps, env, info, player, won, hero_hp, boss_hp),
        ExecuteMsg::Deposit {} => execute_deposit(deps, info),
        ExecuteMsg::Withdraw {} => execute_withdraw(deps, info),
        ExecuteMsg::WithdrawFees {} => execute_withdraw_fees(deps, info),
    }
}

pub fn execute_record_match(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    player: String,
    won: bool,
    hero_hp: i32,
    boss_hp: i32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let player = deps.api.addr_validate(&player)?;

    // A recordable result must be a decided match with in-range HP values
    // whose winner agrees with the won flag.
    let hero_won = match Outcome::from_hps(hero_hp, boss_hp) {
        Some(Outcome::HeroWin) => true,
        Some(Outcome::BossWin) => false,
        _ => {
            return Err(ContractError::InvalidResult {
                won,
                hero_hp,
                boss_hp,
            })
        }
    };
    let in_range = (0..=HP_MAX).contains(&hero_hp) && (0..=HP_MAX).contains(&boss_hp);
    if hero_won != won || !in_range {
        return Err(ContractError::InvalidResult {
            won,
            hero_hp,
            boss_hp,
        });
    }

    let mut fee = Uint128::zero();
    match &config.operator {
        // Gated mode: only the operator writes, and the player's prepaid
        // balance pays the fee before any counter moves.
        Some(operator) => {
            if info.sender != *operator {
                return Err(ContractError::Unauthorized {});
            }
            fee = config.match_fee;
            if !fee.is_zero() {
                let balance = BALANCES
                    .may_load(deps.storage, &player)?
                    .unwrap_or_default();
                if balance < fee {
                    return Err(ContractError::InsufficientBalance { fee, balance });
                }
                let new_balance = balance
                    .checked_sub(fee)
                    .map_err(|e| ContractError::Std(StdError::msg(e.to_string())))?;
                BALANCES.save(deps.storage, &player, &new_balance)?;

                let pool = FEE_POOL.load(deps.storage)?;
                let new_pool = pool
                    .checked_add(fee)
                    .map_err(|e| ContractError::Std(StdError::msg(e.to_string())))?;
                FEE_POOL.save(deps.storage, &new_pool)?;
            }
        }
        // Open mode: players report their own matches.
        None => {
            if info.sender != player {
                return Err(ContractError::Unauthorized {});
            }
        }
    }

    let mut record = PLAYERS
        .may_load(deps.storage, &player)?
        .unwrap_or_default();
    record.absorb(won);
    PLAYERS.save(deps.storage, &player, &record)?;

    let mut response = Response::new()
        .add_attribute("action", "record_match")
        .add_attribute("player", player.to_string())
        .add_attribute("won", won.to_string())
        .add_attribute("hero_hp", hero_hp.to_string())
        .add_attribute("boss_hp", boss_hp.to_string())
        .add_attribute("wins", record.wins.to_string())
        .add_attribute("losses", record.losses.to_string())
        .add_attribute("games_played", record.games_played.to_string())
        .add_attribute("recorded_at", env.block.time.seconds().to_string());
    if !fee.is_zero() {
        response = response.add_attribute("fee", fee);
    }
    Ok(response)
}

pub fn execute_deposit(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let deposited = info
        .funds
        .iter()
        .find(|c| c.denom == config.denom)
        .map(|c| Uint128::try_from(c.amount).unwrap_or(Uint128::MAX))
        .unwrap_or_default();
    if deposited.is_zero() {
        return Err(ContractError::NoFundsSent {
            denom: config.denom,
        });
    }

    let balance = BALANCES
        .may_load(deps.storage, &info.sender)?
        .unwrap_or_default();
    let new_balance = balance
        .checked_add(deposited)
        .map_err(|e| ContractError::Std(StdError::msg(e.to_string())))?;
    BALANCES.save(deps.storage, &info.sender, &new_balance)?;

    Ok(Response::new()
        .add_attribute("action", "deposit")
        .add_attribute("player", info.sender)
        .add_attribute("amount", deposited)
        .add_attribute("balance", new_balance))
}

pub fn execute_withdraw(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let balance = BALANCES
        .may_load(deps.storage, &info.sender)?
        .unwrap_or_default();
    if balance.is_zero() {
        return Err(ContractError::NothingToWithdraw {});
    }

    // Zero the stored balance before queuing the transfer.
    BALANCES.save(deps.storage, &info.sender, &Uint128::zero())?;

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: vec![Coin {
                denom: config.denom,
                amount: balance.into(),
            }],
        })
        .add_attribute("action", "withdraw")
        .add_attribute("player", info.sender)
        .add_attribute("amount", balance))
}

pub fn execute_withdraw_fees(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let operator = config.operator.ok_or(ContractError::Unauthorized {})?;
    if info.sender != operator {
        return Err(ContractError::Unauthorized {});
    }

    let pool = FEE_POOL.load(deps.storage)?;
    if pool.is_zero() {
        return Err(ContractError::NothingToWithdraw {});
    }

    // Same ordering as withdraw: empty the pool, then queue the transfer.
    FEE_POOL.save(deps.storage, &Uint128::zero())?;

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: operator.to_string(),
            amount: vec![Coin {
                denom: config.denom,
                amount: pool.into(),
            }],
        })
        .add_attribute("action", "withdraw_fees")
        .add_attribute("amount", pool))
}

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Uint128};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::InstantiateMsg;
use crate::state::{Config, CONFIG, FEE_POOL};

const CONTRACT_NAME: &str = "crates.io:taco";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let operator = msg
        .operator
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let config = Config {
        denom: msg.denom.clone(),
        match_fee: msg.match_fee,
        operator,
    };
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    CONFIG.save(deps.storage, &config)?;
    FEE_POOL.save(deps.storage, &Uint128::zero())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("denom", msg.denom)
        .add_attribute("match_fee", msg.match_fee)
        .add_attribute("mode", if config.is_gated() { "gated" } else { "open" }))
}

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, Env, Order, StdResult};
use cw_storage_plus::Bound;

use crate::msg::{BalanceResponse, PlayerStatsResponse, QueryMsg};
use crate::state::{Config, BALANCES, CONFIG, PLAYERS};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::GetConfig {} => to_json_binary(&query_config(deps)?),
        QueryMsg::GetPlayerStats { player } => to_json_binary(&query_player_stats(deps, player)?),
        QueryMsg::GetBalance { player } => to_json_binary(&query_balance(deps, player)?),
        QueryMsg::ListPlayers { start_after, limit } => {
            to_json_binary(&query_list_players(deps, start_after, limit)?)
        }
    }
}

fn query_config(deps: Deps) -> StdResult<Config> {
    let config = CONFIG.load(deps.storage)?;
    Ok(config)
}

fn query_player_stats(deps: Deps, player: String) -> StdResult<PlayerStatsResponse> {
    let player = deps.api.addr_validate(&player)?;
    // Unknown players read back as the implicit zero record.
    let record = PLAYERS
        .may_load(deps.storage, &player)?
        .unwrap_or_default();
    Ok(PlayerStatsResponse {
        player: player.to_string(),
        wins: record.wins,
        losses: record.losses,
        games_played: record.games_played,
    })
}

fn query_balance(deps: Deps, player: String) -> StdResult<BalanceResponse> {
    let player = deps.api.addr_validate(&player)?;
    let balance = BALANCES
        .may_load(deps.storage, &player)?
        .unwrap_or_default();
    Ok(BalanceResponse { balance })
}

fn query_list_players(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Vec<PlayerStatsResponse>> {
    let max_limit = limit.unwrap_or(30).min(100) as usize;
    let start_addr = start_after
        .map(|s| deps.api.addr_validate(&s))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);

    PLAYERS
        .range(deps.storage, start, None, Order::Ascending)
        .take(max_limit)
        .map(|item| {
            let (player, record) = item?;
            Ok(PlayerStatsResponse {
                player: player.to_string(),
                wins: record.wins,
                losses: record.losses,
                games_played: record.games_played,
            })
        })
        .collect()
}

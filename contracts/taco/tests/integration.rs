//! Integration tests for match recording, prepaid fee accounting, and
//! withdrawals. Uses cw-multi-test with the real bank module so the
//! transfer legs of withdraw/withdraw-fees are exercised end to end.

use cosmwasm_std::testing::MockApi;
use cosmwasm_std::{coins, Addr, Uint128, Uint256};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};

use taco::msg::{BalanceResponse, ExecuteMsg, InstantiateMsg, PlayerStatsResponse, QueryMsg};
use taco::ContractError;

const DENOM: &str = "utaco";

struct TestEnv {
    app: App,
    contract: Addr,
    operator: Addr,
    player: Addr,
}

fn setup(operator_gated: bool, match_fee: u128) -> TestEnv {
    let api = MockApi::default();
    let creator = api.addr_make("creator");
    let operator = api.addr_make("operator");
    let player = api.addr_make("player");

    let mut app = App::new(|router, _api, storage| {
        router
            .bank
            .init_balance(storage, &player, coins(1_000, DENOM))
            .unwrap();
    });

    let code_id = app.store_code(Box::new(ContractWrapper::new(
        taco::contract::execute,
        taco::contract::instantiate,
        taco::contract::query,
    )));

    let msg = InstantiateMsg {
        denom: DENOM.to_string(),
        match_fee: Uint128::new(match_fee),
        operator: operator_gated.then(|| operator.to_string()),
    };
    let contract = app
        .instantiate_contract(code_id, creator, &msg, &[], "taco", None)
        .unwrap();

    TestEnv {
        app,
        contract,
        operator,
        player,
    }
}

fn record_msg(player: &Addr, won: bool) -> ExecuteMsg {
    let (hero_hp, boss_hp) = if won { (45, 0) } else { (0, 30) };
    ExecuteMsg::RecordMatch {
        player: player.to_string(),
        won,
        hero_hp,
        boss_hp,
    }
}

fn query_stats(env: &TestEnv, player: &Addr) -> PlayerStatsResponse {
    env.app
        .wrap()
        .query_wasm_smart(
            &env.contract,
            &QueryMsg::GetPlayerStats {
                player: player.to_string(),
            },
        )
        .unwrap()
}

fn query_prepaid_balance(env: &TestEnv, player: &Addr) -> Uint128 {
    let resp: BalanceResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.contract,
            &QueryMsg::GetBalance {
                player: player.to_string(),
            },
        )
        .unwrap();
    resp.balance
}

fn bank_balance(env: &TestEnv, addr: &Addr) -> Uint256 {
    env.app.wrap().query_balance(addr, DENOM).unwrap().amount
}

fn wasm_attr(resp: &AppResponse, key: &str) -> Option<String> {
    resp.events
        .iter()
        .find(|e| e.ty == "wasm")
        .and_then(|e| e.attributes.iter().find(|a| a.key == key))
        .map(|a| a.value.clone())
}

// ===== Gated mode: deposit, fee deduction, withdrawals =====

#[test]
fn test_gated_lifecycle_deposit_record_withdraw() {
    let mut env = setup(true, 10);

    // Player prepays 50.
    env.app
        .execute_contract(
            env.player.clone(),
            env.contract.clone(),
            &ExecuteMsg::Deposit {},
            &coins(50, DENOM),
        )
        .unwrap();
    assert_eq!(query_prepaid_balance(&env, &env.player), Uint128::new(50));
    assert_eq!(bank_balance(&env, &env.player), Uint256::from(950u128));

    // Operator records a win and a loss; each burns the 10 fee.
    let resp = env
        .app
        .execute_contract(
            env.operator.clone(),
            env.contract.clone(),
            &record_msg(&env.player, true),
            &[],
        )
        .unwrap();
    assert_eq!(wasm_attr(&resp, "fee").as_deref(), Some("10"));
    assert!(wasm_attr(&resp, "recorded_at").is_some());

    env.app
        .execute_contract(
            env.operator.clone(),
            env.contract.clone(),
            &record_msg(&env.player, false),
            &[],
        )
        .unwrap();

    let stats = query_stats(&env, &env.player);
    assert_eq!(stats.wins, 1);
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.games_played, 2);
    assert_eq!(query_prepaid_balance(&env, &env.player), Uint128::new(30));

    // Operator collects the accumulated fees.
    env.app
        .execute_contract(
            env.operator.clone(),
            env.contract.clone(),
            &ExecuteMsg::WithdrawFees {},
            &[],
        )
        .unwrap();
    assert_eq!(bank_balance(&env, &env.operator), Uint256::from(20u128));

    // Player takes the rest back out.
    env.app
        .execute_contract(
            env.player.clone(),
            env.contract.clone(),
            &ExecuteMsg::Withdraw {},
            &[],
        )
        .unwrap();
    assert_eq!(bank_balance(&env, &env.player), Uint256::from(980u128));
    assert_eq!(query_prepaid_balance(&env, &env.player), Uint128::zero());

    // Nothing left to withdraw on either side.
    let err = env
        .app
        .execute_contract(
            env.player.clone(),
            env.contract.clone(),
            &ExecuteMsg::Withdraw {},
            &[],
        )
        .unwrap_err();
    assert!(matches!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::NothingToWithdraw {}
    ));
    let err = env
        .app
        .execute_contract(
            env.operator.clone(),
            env.contract.clone(),
            &ExecuteMsg::WithdrawFees {},
            &[],
        )
        .unwrap_err();
    assert!(matches!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::NothingToWithdraw {}
    ));
}

#[test]
fn test_gated_record_without_prepaid_balance_fails() {
    let mut env = setup(true, 10);

    let err = env
        .app
        .execute_contract(
            env.operator.clone(),
            env.contract.clone(),
            &record_msg(&env.player, true),
            &[],
        )
        .unwrap_err();
    assert!(matches!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::InsufficientBalance { .. }
    ));
    assert_eq!(query_stats(&env, &env.player).games_played, 0);
}

#[test]
fn test_gated_mode_locks_out_self_reports() {
    let mut env = setup(true, 10);

    env.app
        .execute_contract(
            env.player.clone(),
            env.contract.clone(),
            &ExecuteMsg::Deposit {},
            &coins(50, DENOM),
        )
        .unwrap();

    let err = env
        .app
        .execute_contract(
            env.player.clone(),
            env.contract.clone(),
            &record_msg(&env.player, true),
            &[],
        )
        .unwrap_err();
    assert!(matches!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::Unauthorized {}
    ));
}

// ===== Open mode: free self-reporting =====

#[test]
fn test_open_mode_self_report_without_fees() {
    let mut env = setup(false, 10);

    for won in [true, false, true] {
        env.app
            .execute_contract(
                env.player.clone(),
                env.contract.clone(),
                &record_msg(&env.player, won),
                &[],
            )
            .unwrap();
    }

    let stats = query_stats(&env, &env.player);
    assert_eq!(stats.wins, 2);
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.games_played, 3);
    // No deposit was ever needed and no fee was charged.
    assert_eq!(query_prepaid_balance(&env, &env.player), Uint128::zero());
    assert_eq!(bank_balance(&env, &env.player), Uint256::from(1_000u128));
}

#[test]
fn test_open_mode_rejects_reports_for_others() {
    let mut env = setup(false, 0);
    let someone_else = env.app.api().addr_make("someone-else");

    let err = env
        .app
        .execute_contract(
            env.player.clone(),
            env.contract.clone(),
            &record_msg(&someone_else, true),
            &[],
        )
        .unwrap_err();
    assert!(matches!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::Unauthorized {}
    ));
}

// ===== Listing =====

#[test]
fn test_list_players_walks_the_whole_ledger() {
    let mut env = setup(false, 0);
    let api = MockApi::default();

    let mut players: Vec<Addr> = (0..5)
        .map(|i| api.addr_make(&format!("player-{i}")))
        .collect();
    for player in &players {
        env.app
            .execute_contract(
                player.clone(),
                env.contract.clone(),
                &record_msg(player, true),
                &[],
            )
            .unwrap();
    }
    players.sort_by_key(|a| a.to_string());

    // Page through two at a time and stitch the pages back together.
    let mut seen: Vec<String> = Vec::new();
    let mut start_after: Option<String> = None;
    loop {
        let page: Vec<PlayerStatsResponse> = env
            .app
            .wrap()
            .query_wasm_smart(
                &env.contract,
                &QueryMsg::ListPlayers {
                    start_after: start_after.clone(),
                    limit: Some(2),
                },
            )
            .unwrap();
        if page.is_empty() {
            break;
        }
        start_after = Some(page.last().unwrap().player.clone());
        seen.extend(page.into_iter().map(|p| p.player));
    }

    let expected: Vec<String> = players.iter().map(|a| a.to_string()).collect();
    assert_eq!(seen, expected);
}

use cosmwasm_std::testing::{
    message_info, mock_dependencies, mock_env, MockApi, MockQuerier, MockStorage,
};
use cosmwasm_std::{coins, from_json, Addr, Api, Env, OwnedDeps, StdError, Uint128};
use tiny_keccak::{Hasher, Keccak};

use taco::contract::{execute, instantiate, query};
use taco::msg::{BalanceResponse, ExecuteMsg, InstantiateMsg, PlayerStatsResponse, QueryMsg};
use taco::ContractError;

/// Outcome of the idempotent funding check on a prepaid account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Funding {
    /// The account already held at least the requested balance.
    Existing { balance: Uint128 },
    /// A deposit of `deposited` topped the account up to the requested
    /// balance.
    Created { deposited: Uint128 },
}

/// A match committed to the ledger, with the reads the HTTP surface returns
/// alongside the write.
#[derive(Debug, Clone)]
pub struct RecordedMatch {
    pub tx_hash: String,
    pub stats: PlayerStatsResponse,
    pub balance: Uint128,
}

/// Seam between the gateway and wherever match results get settled. All
/// implementations speak contract errors so callers can tell apart
/// authorization, funding, and validation failures.
pub trait ScoreLedger {
    fn is_gated(&self) -> bool;
    fn match_fee(&self) -> Uint128;
    /// Top the player's prepaid balance up to `min_balance` if needed.
    /// Already-funded accounts come back as `Funding::Existing` untouched.
    fn ensure_funded(&mut self, player: &str, min_balance: Uint128)
        -> Result<Funding, ContractError>;
    fn record_match(
        &mut self,
        player: &str,
        won: bool,
        hero_hp: i32,
        boss_hp: i32,
    ) -> Result<RecordedMatch, ContractError>;
    fn player_stats(&self, player: &str) -> Result<PlayerStatsResponse, ContractError>;
    fn balance(&self, player: &str) -> Result<Uint128, ContractError>;
}

/// The result ledger contract hosted in-process on mock chain state. Runs
/// the real contract code, so authorization, fee deduction, and validation
/// behave exactly as they would on chain; only the transport is missing.
pub struct EmbeddedLedger {
    deps: OwnedDeps<MockStorage, MockApi, MockQuerier>,
    env: Env,
    operator: Option<Addr>,
    denom: String,
    match_fee: Uint128,
}

impl EmbeddedLedger {
    pub fn new(denom: &str, match_fee: u128, gated: bool) -> Result<Self, ContractError> {
        let mut deps = mock_dependencies();
        let env = mock_env();
        let creator = deps.api.addr_make("gateway");
        let operator = gated.then(|| deps.api.addr_make("operator"));

        instantiate(
            deps.as_mut(),
            env.clone(),
            message_info(&creator, &[]),
            InstantiateMsg {
                denom: denom.to_string(),
                match_fee: Uint128::new(match_fee),
                operator: operator.as_ref().map(|a| a.to_string()),
            },
        )?;

        Ok(Self {
            deps,
            env,
            operator,
            denom: denom.to_string(),
            match_fee: Uint128::new(match_fee),
        })
    }

    /// A well-formed player address for demo runs.
    pub fn demo_player() -> String {
        MockApi::default().addr_make("demo-player").to_string()
    }

    fn advance_block(&mut self) {
        self.env.block.height += 1;
        self.env.block.time = self.env.block.time.plus_seconds(6);
    }

    fn validate(&self, player: &str) -> Result<Addr, ContractError> {
        Ok(self.deps.api.addr_validate(player)?)
    }

    fn stats_of(&self, player: &Addr) -> Result<PlayerStatsResponse, ContractError> {
        let bin = query(
            self.deps.as_ref(),
            self.env.clone(),
            QueryMsg::GetPlayerStats {
                player: player.to_string(),
            },
        )?;
        Ok(from_json(&bin)?)
    }

    fn balance_of(&self, player: &Addr) -> Result<Uint128, ContractError> {
        let bin = query(
            self.deps.as_ref(),
            self.env.clone(),
            QueryMsg::GetBalance {
                player: player.to_string(),
            },
        )?;
        let resp: BalanceResponse = from_json(&bin)?;
        Ok(resp.balance)
    }

    fn tx_hash(&self, player: &Addr, won: bool, hero_hp: i32, boss_hp: i32) -> String {
        let payload = format!(
            "{}|{}|{}|{}|{}",
            self.env.block.height, player, won, hero_hp, boss_hp
        );
        let mut keccak = Keccak::v256();
        let mut digest = [0u8; 32];
        keccak.update(payload.as_bytes());
        keccak.finalize(&mut digest);
        hex::encode_upper(digest)
    }
}

impl ScoreLedger for EmbeddedLedger {
    fn is_gated(&self) -> bool {
        self.operator.is_some()
    }

    fn match_fee(&self) -> Uint128 {
        self.match_fee
    }

    fn ensure_funded(
        &mut self,
        player: &str,
        min_balance: Uint128,
    ) -> Result<Funding, ContractError> {
        let player = self.validate(player)?;
        let balance = self.balance_of(&player)?;
        if balance >= min_balance {
            return Ok(Funding::Existing { balance });
        }

        let top_up = min_balance
            .checked_sub(balance)
            .map_err(|e| ContractError::Std(StdError::msg(e.to_string())))?;
        self.advance_block();
        execute(
            self.deps.as_mut(),
            self.env.clone(),
            message_info(&player, &coins(top_up.u128(), &self.denom)),
            ExecuteMsg::Deposit {},
        )?;
        Ok(Funding::Created { deposited: top_up })
    }

    fn record_match(
        &mut self,
        player: &str,
        won: bool,
        hero_hp: i32,
        boss_hp: i32,
    ) -> Result<RecordedMatch, ContractError> {
        let player = self.validate(player)?;
        // Gated ledgers sign as the operator; open ones self-report.
        let sender = self.operator.clone().unwrap_or_else(|| player.clone());

        self.advance_block();
        execute(
            self.deps.as_mut(),
            self.env.clone(),
            message_info(&sender, &[]),
            ExecuteMsg::RecordMatch {
                player: player.to_string(),
                won,
                hero_hp,
                boss_hp,
            },
        )?;

        Ok(RecordedMatch {
            tx_hash: self.tx_hash(&player, won, hero_hp, boss_hp),
            stats: self.stats_of(&player)?,
            balance: self.balance_of(&player)?,
        })
    }

    fn player_stats(&self, player: &str) -> Result<PlayerStatsResponse, ContractError> {
        let player = self.validate(player)?;
        self.stats_of(&player)
    }

    fn balance(&self, player: &str) -> Result<Uint128, ContractError> {
        let player = self.validate(player)?;
        self.balance_of(&player)
    }
}

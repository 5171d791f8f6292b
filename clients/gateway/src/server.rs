use std::io::Read;

use cosmwasm_std::Uint128;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tiny_http::{Header, Method, Request, Response, Server};

use taco::msg::PlayerStatsResponse;
use taco::ContractError;

use crate::banter::BattleSnapshot;
use crate::ledger::Funding;
use crate::services::Services;
use crate::BoxErr;

const MAX_BODY_BYTES: u64 = 64 * 1024;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("unknown route")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Ledger(#[from] ContractError),

    #[error("boss banter upstream failed: {0}")]
    Banter(String),

    #[error("voice upstream failed: {0}")]
    Voice(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> u16 {
        match self {
            ApiError::NotFound => 404,
            ApiError::BadRequest(_) => 400,
            ApiError::Ledger(ContractError::Unauthorized {}) => 403,
            ApiError::Ledger(ContractError::InsufficientBalance { .. }) => 402,
            // Bad addresses, invalid results, wrong denoms: the caller's fault.
            ApiError::Ledger(_) => 400,
            ApiError::Banter(_) | ApiError::Voice(_) => 502,
            ApiError::Internal(_) => 500,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpeakRequest {
    text: String,
    is_boss: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordGameRequest {
    player_address: String,
    won: bool,
    hero_hp: i32,
    boss_hp: i32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsDto {
    wins: u64,
    losses: u64,
    games_played: u64,
}

impl From<PlayerStatsResponse> for StatsDto {
    fn from(stats: PlayerStatsResponse) -> Self {
        StatsDto {
            wins: stats.wins,
            losses: stats.losses,
            games_played: stats.games_played,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordGameResponse {
    tx_hash: String,
    stats: StatsDto,
    balance: Uint128,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerSummaryResponse {
    player: String,
    stats: StatsDto,
    balance: Uint128,
}

struct ApiReply {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

fn json_reply(status: u16, value: &impl Serialize) -> Result<ApiReply, ApiError> {
    let body = serde_json::to_vec(value).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(ApiReply {
        status,
        content_type: "application/json",
        body,
    })
}

/// Accept requests forever on `bind`. One thread, one request at a time:
/// every match owns its own state on the client side, so the gateway has no
/// contention to manage.
pub fn serve(bind: &str, mut services: Services) -> Result<(), BoxErr> {
    let server = Server::http(bind)?;
    log::info!("Gateway listening on http://{bind}");

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let reply = match handle(&mut request, &mut services) {
            Ok(reply) => reply,
            Err(err) => {
                log::warn!("{method:?} {url} failed: {err}");
                error_reply(&err)
            }
        };
        log::info!("{method:?} {url} -> {}", reply.status);

        let header = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes())
            .expect("static content-type header");
        let response = Response::from_data(reply.body)
            .with_status_code(reply.status)
            .with_header(header);
        if let Err(e) = request.respond(response) {
            log::warn!("failed to send response: {e}");
        }
    }
    Ok(())
}

fn handle(request: &mut Request, services: &mut Services) -> Result<ApiReply, ApiError> {
    let method = request.method().clone();
    let url = request.url().to_string();
    match (method, url.as_str()) {
        (Method::Post, "/api/boss-action") => boss_action(request, services),
        (Method::Post, "/api/speak") => speak(request, services),
        (Method::Post, "/api/record-game") => record_game(request, services),
        (Method::Get, path) if path == "/api/stats" || path.starts_with("/api/stats?") => {
            match stats_player(path) {
                Some(player) => player_summary(services, player),
                None => Err(ApiError::BadRequest("missing player query".to_string())),
            }
        }
        _ => Err(ApiError::NotFound),
    }
}

/// Pull `player` out of `/api/stats?player=...`. Bech32 addresses are plain
/// lowercase alphanumerics, so no percent-decoding is needed.
fn stats_player(url: &str) -> Option<&str> {
    let query = url.strip_prefix("/api/stats")?.strip_prefix('?')?;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("player="))
        .filter(|player| !player.is_empty())
}

fn read_json<T: serde::de::DeserializeOwned>(request: &mut Request) -> Result<T, ApiError> {
    let mut body = String::new();
    request
        .as_reader()
        .take(MAX_BODY_BYTES)
        .read_to_string(&mut body)
        .map_err(|e| ApiError::BadRequest(format!("unreadable body: {e}")))?;
    serde_json::from_str(&body).map_err(|e| ApiError::BadRequest(format!("malformed body: {e}")))
}

fn boss_action(request: &mut Request, services: &mut Services) -> Result<ApiReply, ApiError> {
    let snapshot: BattleSnapshot = read_json(request)?;
    let message = services
        .banter
        .taunt(&snapshot)
        .map_err(|e| ApiError::Banter(e.to_string()))?;
    json_reply(200, &serde_json::json!({ "message": message }))
}

fn speak(request: &mut Request, services: &mut Services) -> Result<ApiReply, ApiError> {
    let req: SpeakRequest = read_json(request)?;
    let audio = services
        .voice
        .speak(&req.text, req.is_boss)
        .map_err(|e| ApiError::Voice(e.to_string()))?;
    Ok(ApiReply {
        status: 200,
        content_type: "audio/mpeg",
        body: audio,
    })
}

fn record_game(request: &mut Request, services: &mut Services) -> Result<ApiReply, ApiError> {
    let req: RecordGameRequest = read_json(request)?;

    if services.ledger.is_gated() {
        let fee = services.ledger.match_fee();
        match services.ledger.ensure_funded(&req.player_address, fee)? {
            Funding::Created { deposited } => {
                log::info!("deposited {deposited} for {}", req.player_address)
            }
            Funding::Existing { .. } => {}
        }
    }

    let recorded =
        services
            .ledger
            .record_match(&req.player_address, req.won, req.hero_hp, req.boss_hp)?;
    log::info!(
        "recorded match for {}: won={} tx={}",
        req.player_address,
        req.won,
        recorded.tx_hash
    );

    json_reply(
        200,
        &RecordGameResponse {
            tx_hash: recorded.tx_hash,
            stats: recorded.stats.into(),
            balance: recorded.balance,
        },
    )
}

fn player_summary(services: &Services, player: &str) -> Result<ApiReply, ApiError> {
    let stats = services.ledger.player_stats(player)?;
    let balance = services.ledger.balance(player)?;
    json_reply(
        200,
        &PlayerSummaryResponse {
            player: stats.player.clone(),
            stats: stats.into(),
            balance,
        },
    )
}

fn error_reply(err: &ApiError) -> ApiReply {
    let body = serde_json::to_vec(&serde_json::json!({ "error": err.to_string() }))
        .unwrap_or_else(|_| b"{\"error\":\"unrepresentable\"}".to_vec());
    ApiReply {
        status: err.status(),
        content_type: "application/json",
        body,
    }
}

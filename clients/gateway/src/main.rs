use clap::{Parser, Subcommand};

mod banter;
mod demo;
mod ledger;
mod server;
mod services;
mod voice;

use banter::{CannedBanter, HttpBanter};
use ledger::EmbeddedLedger;
use services::Services;
use voice::{HttpVoice, MuteVoice};

pub type BoxErr = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(name = "taco-gateway", about = "TACO battle gateway and demo driver")]
struct Cli {
    /// Token denomination for fees and deposits
    #[arg(long, env = "GAME_DENOM", default_value = "utaco")]
    denom: String,

    /// Fee charged per recorded match in base denom
    #[arg(long, env = "MATCH_FEE", default_value = "10")]
    match_fee: u128,

    /// Gate writes behind the operator (fees on) or allow self-reports
    #[arg(long, env = "GATED", default_value_t = true, action = clap::ArgAction::Set)]
    gated: bool,

    /// Boss banter endpoint; canned lines when unset
    #[arg(long, env = "BANTER_URL")]
    banter_url: Option<String>,

    /// Text-to-speech endpoint; silence when unset
    #[arg(long, env = "VOICE_URL")]
    voice_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the battle HTTP API
    Serve {
        /// Address to bind
        #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8080")]
        bind: String,
    },

    /// Play one scripted match end to end and record it
    Demo {
        /// RNG seed for a reproducible match
        #[arg(long, env = "DEMO_SEED")]
        seed: Option<u64>,

        /// Player address to credit; a demo account when unset
        #[arg(long, env = "PLAYER_ADDR")]
        player: Option<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut services = build_services(&cli);

    match cli.command {
        Command::Serve { bind } => {
            if let Err(e) = server::serve(&bind, services) {
                log::error!("Server failed: {e}");
                std::process::exit(1);
            }
        }
        Command::Demo { seed, player } => {
            let player = player.unwrap_or_else(EmbeddedLedger::demo_player);
            if let Err(e) = demo::run(&mut services, seed, &player) {
                log::error!("Demo match failed: {e}");
                std::process::exit(1);
            }
        }
    }
}

// ── Service wiring ──────────────────────────────────────────────────────────

fn build_services(cli: &Cli) -> Services {
    let banter: Box<dyn banter::BossBanter> = match &cli.banter_url {
        Some(url) => {
            log::info!("Boss banter from {url}");
            Box::new(HttpBanter::new(url.clone()))
        }
        None => {
            log::info!("No banter endpoint configured, using canned lines");
            Box::new(CannedBanter)
        }
    };

    let voice: Box<dyn voice::Voice> = match &cli.voice_url {
        Some(url) => {
            log::info!("Voice synthesis from {url}");
            Box::new(HttpVoice::new(url.clone()))
        }
        None => Box::new(MuteVoice),
    };

    let ledger = EmbeddedLedger::new(&cli.denom, cli.match_fee, cli.gated)
        .expect("Failed to instantiate the result ledger");
    log::info!(
        "Result ledger ready: denom {}, fee {}, {}",
        cli.denom,
        cli.match_fee,
        if cli.gated { "gated" } else { "open" }
    );

    Services {
        banter,
        voice,
        ledger: Box::new(ledger),
    }
}

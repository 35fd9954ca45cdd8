mod cloudflare;
mod config;
mod error;
mod http;
mod public_ip;
mod updater;

use std::convert::Infallible;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Builder;
use log::info;

use crate::cloudflare::CloudflareClient;
use crate::config::{Args, Config};
use crate::error::Error;
use crate::public_ip::PublicIpResolver;
use crate::updater::Updater;

// missing configuration is an operator fix, not a fault
mod exit_status {
    pub const CONFIG_ERROR: u8 = 0;
    pub const FAULT: u8 = 1;
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    Builder::new()
        .filter(None, log::LevelFilter::Info)
        .parse_default_env()
        .init();

    ExitCode::from(execute(args).await)
}

// both messages bypass the log filter so RUST_LOG cannot silence them
async fn execute(args: Args) -> u8 {
    let config = match Config::try_from(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return exit_status::CONFIG_ERROR;
        }
    };

    info!(
        "starting with options: --zone-id {} --record-id {} --record-name {}",
        &config.zone_id, &config.record_id, &config.record_name,
    );

    fault_status(run(config).await)
}

fn fault_status(result: Result<Infallible, Error>) -> u8 {
    match result {
        Ok(never) => match never {},
        Err(e) => {
            eprintln!("{}", e);
            exit_status::FAULT
        }
    }
}

async fn run(config: Config) -> Result<Infallible, Error> {
    let client = http::build_client()?;
    let cloudflare = CloudflareClient::new(client.clone(), config.api_key.clone());
    let resolver = PublicIpResolver::new(client);

    Updater::init(config, cloudflare, resolver).await?.run().await
}

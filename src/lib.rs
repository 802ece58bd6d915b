pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod server;

use cli::Args;
use config::GatewayConfig;
use log::info;
use server::api::AppState;
use server::Server;
use std::error::Error;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = GatewayConfig::from_args(&args)?;

    info!("--- Gateway Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Debug Mode: {}", args.debug);
    info!("TLS Enabled: {}", args.enable_tls);
    config.log_summary();
    info!("-----------------------------");

    let upstream = llm::chat::new_client(&config)?;
    let state = AppState::new(config, upstream);

    let addr = args.server_addr.clone();
    info!("Starting server on: {}", addr);
    let server = Server::new(addr, state, args);
    server.run().await?;

    Ok(())
}

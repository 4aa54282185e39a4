use log::{error, info};
use std::env;
use std::process;

use chain_clash_agent::bot::Bot;
use chain_clash_agent::config::Config;
use chain_clash_agent::controller::TurnController;
use chain_clash_agent::debug_logger::DebugLogger;
use chain_clash_agent::service::GraphQlService;

#[tokio::main]
async fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Chain Clash NPC Agent starting...");

    // Load configuration once at startup
    let config = Config::load_or_default().apply_env_overrides();

    info!("GraphQL endpoint: {}", config.service.endpoint);
    info!("Bot Player ID: {}", config.agent.player_id);
    info!(
        "Using minimax move selection (depth {})",
        config.search.depth
    );

    let service = match GraphQlService::new(&config.service) {
        Ok(service) => service,
        Err(e) => {
            error!("Could not build service client: {}", e);
            process::exit(1);
        }
    };
    let logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;

    let mut controller = TurnController::new(service, Bot::new(config), logger);

    let shutdown = controller.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received SIGINT, stopping after the current tick...");
            shutdown.stop();
        }
    });

    controller.run().await;
}

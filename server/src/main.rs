use matrium_server::{print_banner, setup_environment, Config, Server, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load .env and configuration
    dotenv::dotenv().ok();
    let config = Config::from_env();

    // 2. Environment (work dir, logger)
    setup_environment(&config)?;

    print_banner();
    tracing::info!("Matrium server starting...");

    // 3. Initialize state (database, migrations)
    let state = ServerState::initialize(&config).await?;

    // 4. Run the HTTP server
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

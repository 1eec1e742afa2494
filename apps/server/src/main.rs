//! Staffbook server binary.

use std::net::SocketAddr;

use staffbook_server::{config::Config, create_app, create_state, init_tracing};
use user_store::{MemoryUserStore, SqliteUserStore, UserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    tracing::info!(
        database_url = %config.database_url,
        "Starting Staffbook server"
    );

    if config.use_memory_store() {
        serve(config, MemoryUserStore::new()).await
    } else {
        let store = SqliteUserStore::connect(&config.database_url).await?;
        serve(config, store).await
    }
}

async fn serve<S: UserStore + 'static>(config: Config, store: S) -> anyhow::Result<()> {
    // Create application state and router
    let state = create_state(config.clone(), store);
    let app = create_app(state);

    // Parse server address
    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(addr = %addr, "Server listening");

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use dealership::{
    config::{
        catalog::{load_default_catalog, seed_catalog},
        database::{create_connection, create_tables},
        server::ServerConfig,
    },
    errors::Result,
    web::{AppState, router},
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Connect and make sure every table exists
    let db = create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 4. Seed the catalog from CATALOG_PATH, if present
    let catalog = load_default_catalog()?;
    seed_catalog(&db, &catalog)
        .await
        .inspect_err(|e| error!("Failed to seed catalog: {}", e))?;

    // 5. Serve
    let server = ServerConfig::from_env();
    let addr = server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", addr, e))?;
    info!("Dealership listening on {}", addr);

    axum::serve(listener, router(AppState { db })).await?;
    Ok(())
}

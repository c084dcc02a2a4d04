use std::sync::Arc;

use backend::{
    config::Config,
    routes, seed,
    service::TaskService,
    store::SqliteTaskStore,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let store = Arc::new(SqliteTaskStore::connect(&config.database_url).await?);
    info!("Database URL: {}", config.database_url);

    if config.seed_data {
        let inserted = seed::seed_if_empty(store.as_ref()).await?;
        if inserted > 0 {
            info!(inserted, "seeded sample tasks");
        }
    }

    let service = Arc::new(TaskService::new(store));
    let app = routes::app(service, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

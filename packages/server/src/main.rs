use std::net::SocketAddr;

use tracing::{Level, info};

use admission_server::config::AppConfig;
use admission_server::database::init_db;
use admission_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;
    let db = init_db(&config.database).await?;
    info!("Database schema synced");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = admission_server::build_router(AppState::new(db, config));

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

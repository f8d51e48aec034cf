// crates/server/src/router.rs

use crate::handlers;
use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use bookcaster_config::Config;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builds the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/audio", get(handlers::audio))
        .route("/{endpoint}", get(handlers::endpoint))
        .with_state(state)
}

/// Binds the configured address and serves until the process stops
pub async fn serve(config: &Config) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(
        "Serving {} on http://{}",
        config.library.root.display(),
        listener.local_addr()?
    );

    let app = router(AppState::shared(config));
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await
}

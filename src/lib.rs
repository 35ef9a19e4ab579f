//! Governance Wiki Site
//!
//! Server-rendered documentation site for the blockchain governance wiki.
//! Pages are authored as markdown under `content/`, compiled into document
//! trees at startup, and served with their original heading anchors and
//! internal navigation routes.

pub mod content;
pub mod document;
pub mod handlers;
pub mod markdown;
pub mod router;
pub mod state;
pub mod templates;

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use crate::{router::create_router, state::AppState};

/// Run the website server.
pub async fn run() {
    let state = AppState::new();
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = TcpListener::bind(addr).await.expect("failed to bind to address");

    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
    info!("Shutting down gracefully...");
}

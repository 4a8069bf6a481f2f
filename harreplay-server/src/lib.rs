// Copyright 2026 Harreplay Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Harreplay Server
//!
//! HTTP listener replaying a captured HAR session: the rewritten main
//! document at root, every other path answered by asset lookup.

pub mod api;
pub mod config;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{serve_asset, serve_root, AppState};
use config::ServerConfig;
use harreplay_core::{Har, ReplayContext};

/// Build the replay router over a prepared context.
///
/// Root serves the rewritten main document; the wildcard route answers
/// every other GET by asset lookup. Non-GET methods get axum's default
/// treatment for an unmatched method.
pub fn router(ctx: Arc<ReplayContext>) -> Router {
    Router::new()
        .route("/", get(serve_root))
        .route("/*path", get(serve_asset))
        .with_state(AppState { ctx })
}

pub async fn run_server(config: ServerConfig, har_file: &Path) -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "harreplay_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting HAR replay server with HAR file: {}",
        har_file.display()
    );

    config.validate()?;

    // One-shot load: any failure here is fatal before a port is bound.
    let har = Har::load(har_file)
        .with_context(|| format!("loading HAR archive {}", har_file.display()))?;
    tracing::info!(
        "HAR file successfully read and parsed ({} entries)",
        har.entries().len()
    );

    let ctx = Arc::new(ReplayContext::from_archive(har)?);
    tracing::info!(
        "Replay context ready: main document {} plus {} assets",
        ctx.main().url(),
        ctx.assets().len()
    );

    let app = router(ctx)
        .layer(if config.server.enable_cors {
            if config.server.cors_origins.is_empty() {
                tracing::warn!("CORS: allowing all origins");
            } else {
                tracing::info!("CORS: allowing origins: {:?}", config.server.cors_origins);
            }
            CorsLayer::new()
                .allow_methods(Any)
                .allow_headers(Any)
                .allow_origin(Any)
        } else {
            CorsLayer::new()
        })
        .layer(TraceLayer::new_for_http());

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HAR replay server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

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

//! Request handlers for the two replay routes.

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

use harreplay_core::ReplayContext;

/// API error type
///
/// `NotFound` is the only error path a client sees in normal operation;
/// it never affects other in-flight requests or the process lifetime.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Asset not found")]
    NotFound,

    #[error("Failed to decode stored asset body")]
    Decode,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Decode => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Plain-text bodies: browsers hitting a replayed page expect no
        // JSON envelope here.
        (status, self.to_string()).into_response()
    }
}

/// Shared application state
///
/// The context is fully built before the listener starts and never
/// mutated, so cloning per request is an `Arc` bump.
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<ReplayContext>,
}

/// GET / - serve the rewritten main document
pub async fn serve_root(State(state): State<AppState>) -> impl IntoResponse {
    info!("Served main document at root");
    (
        [(header::CONTENT_TYPE, state.ctx.main().mime_type().to_owned())],
        state.ctx.body().to_owned(),
    )
}

/// GET /<path> - serve a recorded asset by lookup
pub async fn serve_asset(State(state): State<AppState>, uri: Uri) -> Result<Response, ApiError> {
    // Strip exactly one leading slash to form the lookup candidate.
    let path = uri.path();
    let candidate = path.strip_prefix('/').unwrap_or(path);

    let entry = state.ctx.assets().resolve(candidate).ok_or_else(|| {
        warn!("Asset not found: {}", path);
        ApiError::NotFound
    })?;

    let bytes = entry.body_bytes().map_err(|e| {
        warn!("Failed to decode asset {}: {}", entry.url(), e);
        ApiError::Decode
    })?;

    info!("Served asset: {}", path);
    Ok(([(header::CONTENT_TYPE, entry.mime_type().to_owned())], bytes).into_response())
}

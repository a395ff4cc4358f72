// SPDX-License-Identifier: Apache-2.0

//! HTTP surface of the deployment facade.
//!
//! Every logical outcome is an HTTP 200 with a status field in the body;
//! only a malformed or missing JSON body is rejected with a 400 before any
//! business logic runs. This convention is load-bearing for existing callers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::Result;
use crate::facade::Facade;
use crate::request::{DeployRequest, Mode};

pub struct AppState {
    pub facade: Facade,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/",
            post(deploy)
                .get(status)
                .delete(delete)
                .options(options_handler),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: Arc<AppState>, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    info!("Starting deployment facade on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// `POST /` — create or patch a deployment from a JSON request body.
async fn deploy(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<DeployRequest>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(request)) => Json(state.facade.run_safe(Mode::Deploy, &request).await).into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}

/// `GET /` — report the deployment's reconciliation state.
async fn status(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let request = DeployRequest::from_query(&params);
    Json(state.facade.run_safe(Mode::Status, &request).await)
}

/// `DELETE /` — delete a deployment named by query parameters.
async fn delete(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let request = DeployRequest::from_query(&params);
    Json(state.facade.run_safe(Mode::Delete, &request).await)
}

async fn options_handler() -> &'static str {
    "200"
}

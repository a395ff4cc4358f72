// SPDX-License-Identifier: Apache-2.0

//! The prediction HTTP endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::Result;
use crate::serving::loader::ModelService;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub inputs: Vec<Vec<f32>>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predictions: Vec<Vec<f32>>,
}

pub fn router(service: Arc<ModelService>) -> Router {
    Router::new()
        .route("/predict", post(predict).options(options_handler))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(service: Arc<ModelService>, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    info!("Starting model server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router(service)).await?;
    Ok(())
}

async fn predict(
    State(service): State<Arc<ModelService>>,
    payload: std::result::Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = payload else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    match service.predict_batch(&request.inputs) {
        Ok(predictions) => Json(PredictResponse { predictions }).into_response(),
        Err(e) => {
            error!("prediction failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn options_handler() -> &'static str {
    "200"
}

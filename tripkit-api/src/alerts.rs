use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tripkit_alert::{ChannelStatus, DispatchOutcome, QUEUED_NOTICE};
use tripkit_core::location::GeoPoint;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SosRequest {
    pub message: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SosResponse {
    Sent { ids: Vec<String> },
    Queued { message: &'static str, alert_id: i64 },
}

#[derive(Debug, Serialize)]
pub struct RetryResponse {
    pub retried: usize,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/sos", post(send_sos))
        .route("/v1/sos/retry", post(retry_sos))
        .route("/v1/sos/status", get(sos_status))
}

async fn send_sos(
    State(state): State<AppState>,
    payload: Result<Option<Json<SosRequest>>, JsonRejection>,
) -> Result<Json<SosResponse>, AppError> {
    let req = payload?.map(|Json(req)| req).unwrap_or_default();
    let coords = match (req.latitude, req.longitude) {
        (Some(latitude), Some(longitude)) => Some(GeoPoint { latitude, longitude }),
        _ => None,
    };

    let response = match state.alerts.dispatch(req.message.as_deref(), coords).await? {
        DispatchOutcome::Sent { ids } => SosResponse::Sent { ids },
        DispatchOutcome::Queued { record } => SosResponse::Queued {
            message: QUEUED_NOTICE,
            alert_id: record.id,
        },
    };
    Ok(Json(response))
}

async fn retry_sos(State(state): State<AppState>) -> Result<Json<RetryResponse>, AppError> {
    let retried = state.alerts.retry_all_pending().await?;
    Ok(Json(RetryResponse { retried }))
}

async fn sos_status(State(state): State<AppState>) -> Result<Json<ChannelStatus>, AppError> {
    Ok(Json(state.alerts.status().await?))
}

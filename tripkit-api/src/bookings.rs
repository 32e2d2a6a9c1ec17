use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use tripkit_catalog::{BookingConfig, CityTripRequest, FlightInfo, FlightTripRequest, PricedRequest};
use tripkit_shared::Booking;

use crate::error::AppError;
use crate::middleware::{session_auth_middleware, SessionClaims};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Summary {
    #[serde(rename = "type")]
    pub trip_type: String,
    pub text: Vec<String>,
}

impl From<&PricedRequest> for Summary {
    fn from(priced: &PricedRequest) -> Self {
        Self {
            trip_type: priced.trip_type().to_string(),
            text: priced.summary_lines(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub summary: Summary,
    pub pending: Booking,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfirmRequest {
    pub payment_mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConfirmResponse {
    pub saved: Booking,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<Booking>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FlightInfoQuery {
    pub from_city: String,
    pub to_city: String,
}

pub fn routes(state: AppState) -> Router<AppState> {
    let session = Router::new()
        .route("/v1/booking/city/price", post(price_city))
        .route("/v1/booking/flight/price", post(price_flight))
        .route("/v1/booking/confirm", post(confirm))
        .route("/v1/booking/history", get(history))
        .route_layer(axum::middleware::from_fn_with_state(state, session_auth_middleware));

    Router::new()
        .route("/v1/booking/config", get(booking_config))
        .route("/v1/booking/flight_info", get(flight_info))
        .merge(session)
}

async fn booking_config(State(state): State<AppState>) -> Json<BookingConfig> {
    Json(state.pricing.booking_config())
}

async fn flight_info(
    State(state): State<AppState>,
    Query(query): Query<FlightInfoQuery>,
) -> Json<FlightInfo> {
    Json(state.pricing.flight_info(&query.from_city, &query.to_city))
}

async fn price_city(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    payload: Result<Json<CityTripRequest>, JsonRejection>,
) -> Result<Json<PriceResponse>, AppError> {
    let Json(req) = payload?;
    let priced = state.pricing.price_city(&req)?;
    let pending = state.desk.price(&claims.sub, &priced).await;

    Ok(Json(PriceResponse {
        summary: Summary::from(&priced),
        pending,
    }))
}

async fn price_flight(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    payload: Result<Json<FlightTripRequest>, JsonRejection>,
) -> Result<Json<PriceResponse>, AppError> {
    let Json(req) = payload?;
    let priced = state.pricing.price_flight(&req)?;
    let pending = state.desk.price(&claims.sub, &priced).await;

    Ok(Json(PriceResponse {
        summary: Summary::from(&priced),
        pending,
    }))
}

async fn confirm(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    payload: Result<Option<Json<ConfirmRequest>>, JsonRejection>,
) -> Result<Json<ConfirmResponse>, AppError> {
    let req = payload?.map(|Json(req)| req).unwrap_or_default();
    let saved = state.desk.confirm(&claims.sub, req.payment_mode).await?;
    Ok(Json(ConfirmResponse { saved }))
}

async fn history(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<HistoryResponse>, AppError> {
    let history = state.desk.history(&claims.sub).await?;
    Ok(Json(HistoryResponse { history }))
}

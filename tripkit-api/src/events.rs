use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tripkit_catalog::EventSummary;

use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    pub city: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub events: Vec<EventSummary>,
    pub status: &'static str,
    pub count: usize,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/events", get(list_events))
}

async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Json<EventsResponse> {
    let city = query.city.as_deref().map(str::trim).filter(|c| !c.is_empty());
    let events = state.pricing.events(city);

    Json(EventsResponse {
        count: events.len(),
        events,
        status: "success",
    })
}

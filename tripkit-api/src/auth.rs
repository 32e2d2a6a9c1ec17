use axum::{extract::State, routing::post, Json, Router};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::AppError,
    middleware::auth::{SessionClaims, GUEST_ROLE},
    state::AppState,
};

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
    session_id: String,
    expires_in: u64,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/auth/guest", post(login_guest))
}

async fn login_guest(State(state): State<AppState>) -> Result<Json<AuthResponse>, AppError> {
    let claims = SessionClaims {
        sub: format!("guest-{}", Uuid::new_v4()),
        role: GUEST_ROLE.to_owned(),
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.expose().as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))?;

    info!(session_id = %claims.sub, "Guest session issued");
    Ok(Json(AuthResponse {
        token,
        session_id: claims.sub,
        expires_in: state.auth.expiration,
    }))
}

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::auth::dto::{
    AuthResponse, LoginRequest, PublicUser, RegisterRequest, LOGIN_SCHEMA, REGISTER_SCHEMA,
};
use crate::auth::jwt::JwtKeys;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::{is_unique_violation, Role, User};
use crate::errors::ApiError;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    REGISTER_SCHEMA.check(&payload)?;
    let body: RegisterRequest =
        serde_json::from_value(payload).map_err(|e| ApiError::Validation(e.to_string()))?;

    let email = body.email.trim().to_lowercase();
    let role = if body.is_admin { Role::Admin } else { Role::User };

    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::Validation("user already registered".into()));
    }

    let hash = hash_password(&body.password)?;

    let user = match User::create(&state.db, &email, body.username.trim(), &hash, role).await {
        Ok(u) => u,
        // A concurrent registration can still hit the unique index.
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %email, "email already registered");
            return Err(ApiError::Validation("user already registered".into()));
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<AuthResponse>, ApiError> {
    LOGIN_SCHEMA.check(&payload)?;
    let body: LoginRequest =
        serde_json::from_value(payload).map_err(|e| ApiError::Validation(e.to_string()))?;

    let email = body.email.trim().to_lowercase();

    let user = match User::find_by_email(&state.db, &email).await? {
        Some(u) => u,
        None => {
            warn!(email = %email, "login with unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(&body.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(user),
    }))
}

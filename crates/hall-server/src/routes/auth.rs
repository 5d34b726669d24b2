use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};
use hall_core::auth::{self, Session};

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}

/// POST /api/login: check credentials and issue a bearer token.
pub async fn login(
    State(app): State<AppState>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(body) = body?;
    let session = auth::authenticate(&app.config, &body.username, &body.password)?;
    let result = serde_json::json!({
        "token": session.token,
        "user": session.user,
    });
    app.sessions
        .write()
        .await
        .insert(session.token.clone(), session);
    Ok(Json(result))
}

/// POST /api/logout: revoke the caller's token.
pub async fn logout(
    State(app): State<AppState>,
    Extension(session): Extension<Session>,
) -> Json<serde_json::Value> {
    app.sessions.write().await.remove(&session.token);
    tracing::info!(username = %session.user.username, "logout");
    Json(serde_json::json!({ "logged_out": true }))
}

/// GET /api/me: the account behind the caller's token.
pub async fn me(Extension(session): Extension<Session>) -> Json<auth::User> {
    Json(session.user)
}

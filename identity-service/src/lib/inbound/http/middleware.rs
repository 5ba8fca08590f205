use std::str::FromStr;

use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde_json::json;

use crate::domain::user::models::UserRole;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session::SESSION_COOKIE;

/// Extension type carrying the verified session identity
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
    pub email: String,
    pub role: UserRole,
}

/// Middleware that validates the session cookie and adds the session
/// identity to request extensions.
///
/// Every failure mode is a 401; a bad token never aborts the request
/// pipeline.
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| unauthorized("Authentication required"))?;

    let claims = state.token_issuer.verify(&token).map_err(|e| {
        match &e {
            TokenError::Expired => tracing::warn!("Session rejected: token expired"),
            _ => tracing::warn!(error = %e, "Session rejected: invalid token"),
        }
        unauthorized("Invalid or expired token")
    })?;

    // tokens are minted from stored users, so an unknown role here means a
    // forged or stale token
    let role = UserRole::from_str(&claims.role).map_err(|e| {
        tracing::warn!(error = %e, "Session rejected: unrecognized role claim");
        unauthorized("Invalid or expired token")
    })?;

    req.extensions_mut().insert(CurrentUser {
        user_id: claims.id,
        email: claims.email,
        role,
    });

    Ok(next.run(req).await)
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": message })),
    )
        .into_response()
}

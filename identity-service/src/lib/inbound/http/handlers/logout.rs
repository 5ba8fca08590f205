use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::session;

/// Clears the session cookie unconditionally.
///
/// No authentication check and no token inspection: logging out an expired
/// or absent session succeeds the same way a live one does.
pub async fn logout(jar: CookieJar) -> (CookieJar, ApiSuccess<LogoutResponseData>) {
    tracing::info!("User logged out");

    (
        session::detach(jar),
        ApiSuccess::new(
            StatusCode::OK,
            LogoutResponseData {
                message: "User logged out successfully".to_string(),
            },
        ),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}

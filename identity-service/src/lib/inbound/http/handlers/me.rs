use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;

/// Returns the session's own claims.
///
/// Reads only what the verified token proves, no repository round-trip.
pub async fn me(Extension(current): Extension<CurrentUser>) -> ApiSuccess<MeResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        MeResponseData {
            user: SessionUserData {
                id: current.user_id,
                email: current.email,
                role: current.role.to_string(),
            },
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub user: SessionUserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUserData {
    pub id: i64,
    pub email: String,
    pub role: String,
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::FieldError;
use super::UserData;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let user = state.auth_service.login(body.try_into_credentials()?).await?;

    let token = state
        .token_issuer
        .issue(user.id.0, user.email.as_str(), user.role.as_str())
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    Ok((
        session::attach(jar, token, &state.cookie_policy),
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                message: "User logged in successfully".to_string(),
                user: UserData::from(&user),
            },
        ),
    ))
}

/// HTTP request body for login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

impl LoginRequest {
    /// Only the email has a shape worth checking here. The password passes
    /// through untouched: every submitted pair must reach the engine's
    /// uniform accept/reject decision.
    fn try_into_credentials(self) -> Result<Credentials, ApiError> {
        let mut errors = Vec::new();

        let email = match self.email {
            Some(raw) => EmailAddress::new(raw)
                .map_err(|e| errors.push(FieldError::new("email", e)))
                .ok(),
            None => {
                errors.push(FieldError::new("email", "Email is required"));
                None
            }
        };

        let password = match self.password {
            Some(raw) => Some(raw),
            None => {
                errors.push(FieldError::new("password", "Password is required"));
                None
            }
        };

        match (email, password) {
            (Some(email), Some(password)) => Ok(Credentials::new(email, password)),
            _ => Err(ApiError::BadRequest(errors)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub message: String,
    pub user: UserData,
}

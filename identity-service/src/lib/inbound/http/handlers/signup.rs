use std::str::FromStr;

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
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::UserRole;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session;

pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignupRequest>,
) -> Result<(CookieJar, ApiSuccess<SignupResponseData>), ApiError> {
    let user = state.auth_service.signup(body.try_into_command()?).await?;

    let token = state
        .token_issuer
        .issue(user.id.0, user.email.as_str(), user.role.as_str())
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    Ok((
        session::attach(jar, token, &state.cookie_policy),
        ApiSuccess::new(
            StatusCode::CREATED,
            SignupResponseData {
                message: "User signed up successfully".to_string(),
                user: UserData::from(&user),
            },
        ),
    ))
}

/// HTTP request body for signup (raw JSON).
///
/// Fields are optional at the deserialization layer so that absent values
/// surface as field errors instead of a body-level rejection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<String>,
}

impl SignupRequest {
    /// Check every field, collecting all failures rather than stopping at
    /// the first.
    fn try_into_command(self) -> Result<SignupCommand, ApiError> {
        let mut errors = Vec::new();

        let name = match self.name {
            Some(raw) => PersonName::new(raw)
                .map_err(|e| errors.push(FieldError::new("name", e)))
                .ok(),
            None => {
                errors.push(FieldError::new("name", "Name is required"));
                None
            }
        };

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
            Some(raw) => Password::new(raw)
                .map_err(|e| errors.push(FieldError::new("password", e)))
                .ok(),
            None => {
                errors.push(FieldError::new("password", "Password is required"));
                None
            }
        };

        // an absent role is not an error, it defaults to `user`
        let role = match self.role {
            Some(raw) => UserRole::from_str(&raw)
                .map_err(|e| errors.push(FieldError::new("role", e)))
                .ok(),
            None => Some(UserRole::default()),
        };

        match (name, email, password, role) {
            (Some(name), Some(email), Some(password), Some(role)) => {
                Ok(SignupCommand::new(name, email, password, role))
            }
            _ => Err(ApiError::BadRequest(errors)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupResponseData {
    pub message: String,
    pub user: UserData,
}

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::user::models::User;
use crate::user::errors::AuthError;

pub mod login;
pub mod logout;
pub mod me;
pub mod signup;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// A single field-level validation failure.
///
/// Failing fields are collected and reported together, so the client sees
/// every problem in one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl ToString) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Error responses the handlers can produce.
///
/// The mapping from domain outcome to status code lives here and dispatches
/// on variants, never on message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(Vec<FieldError>),
    Conflict(String),
    Unauthorized(String),
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(errors) => {
                tracing::warn!(?errors, "Request validation failed");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorBody {
                        message: "Validation failed".to_string(),
                        errors,
                    }),
                )
                    .into_response()
            }
            ApiError::Conflict(message) => {
                (StatusCode::CONFLICT, Json(ApiErrorBody { message })).into_response()
            }
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, Json(ApiErrorBody { message })).into_response()
            }
            ApiError::InternalServerError(detail) => {
                // the detail stays in the logs; clients get a fixed body
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiErrorBody {
                        message: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserAlreadyExists => ApiError::Conflict(err.to_string()),
            AuthError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::Hashing(_) | AuthError::Database(_) | AuthError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrorBody {
    pub message: String,
    pub errors: Vec<FieldError>,
}

/// Public projection of a user.
///
/// There is intentionally no way to serialize the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_errors_map_to_internal_server_error() {
        for error in [
            AuthError::Hashing("hash backend failure".to_string()),
            AuthError::Database("connection reset".to_string()),
            AuthError::Unknown("join failure".to_string()),
        ] {
            assert!(matches!(
                ApiError::from(error),
                ApiError::InternalServerError(_)
            ));
        }
    }

    #[tokio::test]
    async fn test_internal_failures_render_generic_body() {
        let error = ApiError::from(AuthError::Database(
            "connection to 10.0.0.5:5432 refused".to_string(),
        ));
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        // the detail is logged, never sent; the body is the fixed message
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, r#"{"message":"Internal server error"}"#);
    }
}

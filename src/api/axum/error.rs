use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::AuthError;
use crate::api::ErrorResponse;

/// converts `AuthError` into appropriate HTTP responses
#[derive(Debug)]
pub enum AppError {
    Auth(AuthError),
    /// A required request input was absent or unreadable.
    BadRequest(&'static str),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(err) => match err {
                AuthError::InvalidUserId => StatusCode::BAD_REQUEST,
                AuthError::UserNotFound | AuthError::SessionNotFound => StatusCode::NOT_FOUND,
                AuthError::InvalidAccessToken | AuthError::InvalidRefreshToken => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::MalformedRefreshToken(_)
                | AuthError::PasswordHashError
                | AuthError::ConfigurationError(_)
                | AuthError::DatabaseError(_)
                | AuthError::NotificationError(_)
                | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::BadRequest(code) => ErrorResponse::new(code, code),
            AppError::Auth(err) => {
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    log::error!(target: "sessionguard", "msg=\"request failed\" error=\"{err}\"");
                }
                ErrorResponse::from(err)
            }
        };

        (status, Json(body)).into_response()
    }
}

//! Request-boundary errors
//!
//! Every failure is rendered as `{ "success": false, "message": ... }`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use td_core::wire::MessageResponse;

use crate::auth::AuthError;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<td_core::Error> for ApiError {
    fn from(err: td_core::Error) -> Self {
        use td_core::Error;

        let status = match &err {
            Error::TaskNotFound(_) => StatusCode::NOT_FOUND,
            Error::DuplicateName(_) | Error::EmptySelection | Error::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.user_message())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = match err {
            AuthError::InvalidCredentials | AuthError::NotLoggedIn => StatusCode::UNAUTHORIZED,
            AuthError::EmailTaken | AuthError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        };
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "Request failed");
        } else {
            tracing::warn!(status = %self.status, message = %self.message, "Request rejected");
        }
        (self.status, Json(MessageResponse::failure(self.message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_status_codes() {
        let cases = [
            (td_core::Error::TaskNotFound(4), StatusCode::NOT_FOUND),
            (
                td_core::Error::DuplicateName("Alpha".into()),
                StatusCode::BAD_REQUEST,
            ),
            (td_core::Error::EmptySelection, StatusCode::BAD_REQUEST),
            (
                td_core::Error::Validation("too short".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                td_core::Error::Http("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn auth_errors_map_to_status_codes() {
        assert_eq!(
            ApiError::from(AuthError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AuthError::EmailTaken).status(),
            StatusCode::BAD_REQUEST
        );
    }
}

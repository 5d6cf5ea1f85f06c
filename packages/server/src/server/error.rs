//! HTTP mapping for domain errors.

use appwrite::AppwriteError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domains::auth::AuthError;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::ProvisioningFailed
            | AuthError::DirectoryWriteFailed { .. }
            | AuthError::InvariantViolated(_) => StatusCode::INTERNAL_SERVER_ERROR,
            // Client errors reported by the backend (bad passcode, bad email)
            // pass through; everything else is a gateway failure.
            AuthError::RemoteCallFailed(e) => e
                .downcast_ref::<AppwriteError>()
                .and_then(AppwriteError::status)
                .filter(|status| (400..500).contains(status))
                .and_then(|status| StatusCode::from_u16(status).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_client_errors_pass_through() {
        let err = AuthError::RemoteCallFailed(
            AppwriteError::Api {
                status: 401,
                code: 401,
                kind: "user_invalid_token".to_string(),
                message: "Invalid token passed in the request.".to_string(),
            }
            .into(),
        );
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_backend_outage_is_bad_gateway() {
        let server_side = AuthError::RemoteCallFailed(
            AppwriteError::Api {
                status: 503,
                code: 503,
                kind: "general_server_error".to_string(),
                message: "Server Error".to_string(),
            }
            .into(),
        );
        assert_eq!(server_side.status_code(), StatusCode::BAD_GATEWAY);

        let opaque = AuthError::RemoteCallFailed(anyhow::anyhow!("connection refused"));
        assert_eq!(opaque.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_local_errors() {
        assert_eq!(
            AuthError::InvalidInput("email is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::ProvisioningFailed.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

use axum::http::StatusCode;
use modkit::{Problem, ProblemResponse};

use crate::error::AuthError;

fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    Problem::new(status, title, detail)
        .with_code(code)
        .with_instance(instance)
        .into()
}

/// Login failures share one response so callers cannot tell which accounts exist.
pub fn map_auth_error(e: &AuthError, instance: &str) -> ProblemResponse {
    match e {
        AuthError::InvalidCredentials => from_parts(
            StatusCode::UNAUTHORIZED,
            "AUTH_INVALID_CREDENTIALS",
            "Unauthorized",
            "Invalid email or password",
            instance,
        ),
        AuthError::MissingToken => from_parts(
            StatusCode::UNAUTHORIZED,
            "AUTH_MISSING_TOKEN",
            "Unauthorized",
            "Missing bearer token",
            instance,
        ),
        AuthError::TokenExpired => from_parts(
            StatusCode::UNAUTHORIZED,
            "AUTH_TOKEN_EXPIRED",
            "Unauthorized",
            "Token expired",
            instance,
        ),
        AuthError::InvalidToken(_) => from_parts(
            StatusCode::UNAUTHORIZED,
            "AUTH_INVALID_TOKEN",
            "Unauthorized",
            "Invalid bearer token",
            instance,
        ),
        AuthError::Hash(_) | AuthError::Signing(_) | AuthError::Store(_) => {
            tracing::error!(error = %e, "auth internal error");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "AUTH_INTERNAL",
                "Internal Server Error",
                "An internal error occurred",
                instance,
            )
        }
    }
}

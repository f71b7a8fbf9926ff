//! Bearer-token authentication for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::api::rest::error::map_auth_error;
use crate::contract::{AuthenticatedUser, TokenVerifier};
use crate::error::AuthError;
use modkit::ProblemResponse;

fn bearer_token(headers: &axum::http::HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken("authorization header is not ASCII".into()))?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| AuthError::InvalidToken("expected 'Bearer <token>'".into()))?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(AuthError::InvalidToken("expected 'Bearer <token>'".into()));
    }
    Ok(token.trim())
}

/// Verifies `Authorization: Bearer <jwt>` and inserts [`AuthenticatedUser`]
/// into request extensions. Anything else is a 401 problem.
pub async fn require_bearer(
    State(verifier): State<Arc<dyn TokenVerifier>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ProblemResponse> {
    let path = req.uri().path().to_owned();
    let user = bearer_token(req.headers())
        .and_then(|token| verifier.verify(token))
        .map_err(|e| {
            tracing::debug!(error = %e, %path, "bearer authentication failed");
            map_auth_error(&e, &path)
        })?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedUser {
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| map_auth_error(&AuthError::MissingToken, parts.uri.path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;

    fn headers(v: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, v.parse().unwrap());
        h
    }

    #[test]
    fn parses_bearer_scheme_case_insensitively() {
        assert_eq!(bearer_token(&headers("Bearer abc")).unwrap(), "abc");
        assert_eq!(bearer_token(&headers("bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn rejects_missing_or_foreign_schemes() {
        assert_eq!(bearer_token(&HeaderMap::new()), Err(AuthError::MissingToken));
        assert!(matches!(
            bearer_token(&headers("Basic dXNlcjpwYXNz")),
            Err(AuthError::InvalidToken(_))
        ));
        assert!(matches!(
            bearer_token(&headers("Bearer ")),
            Err(AuthError::InvalidToken(_))
        ));
        assert!(matches!(
            bearer_token(&headers("Bearer")),
            Err(AuthError::InvalidToken(_))
        ));
    }
}

use axum::http::StatusCode;
use modkit::{Problem, ProblemResponse};

use crate::domain::error::DomainError;

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

/// Map domain error to RFC9457 Problem
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::NotFound { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "ORG_NOT_FOUND",
            "Not Found",
            e.to_string(),
            instance,
        ),
        DomainError::Conflict { .. } => from_parts(
            StatusCode::CONFLICT,
            "ORG_CONFLICT",
            "Conflict",
            e.to_string(),
            instance,
        ),
        DomainError::InUse { .. } => from_parts(
            StatusCode::CONFLICT,
            "ORG_IN_USE",
            "Conflict",
            e.to_string(),
            instance,
        ),
        DomainError::Validation { field, message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Bad Request", e.to_string())
                .with_code("ORG_VALIDATION")
                .with_instance(instance)
                .with_field_error(field, message.clone())
                .into()
        }
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            // Details stay in the log.
            tracing::error!(error = %e, "org_admin internal error");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "ORG_INTERNAL",
                "Internal Server Error",
                "An internal error occurred",
                instance,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn maps_statuses_and_codes() {
        let cases = [
            (
                DomainError::not_found("establishment", Uuid::nil()),
                StatusCode::NOT_FOUND,
                "ORG_NOT_FOUND",
            ),
            (
                DomainError::conflict("establishment", "name", "Cafe"),
                StatusCode::CONFLICT,
                "ORG_CONFLICT",
            ),
            (
                DomainError::in_use("employee_role", Uuid::nil(), "employees"),
                StatusCode::CONFLICT,
                "ORG_IN_USE",
            ),
            (
                DomainError::validation("name", "must not be empty"),
                StatusCode::BAD_REQUEST,
                "ORG_VALIDATION",
            ),
            (
                DomainError::database("disk I/O error"),
                StatusCode::INTERNAL_SERVER_ERROR,
                "ORG_INTERNAL",
            ),
        ];

        for (err, status, code) in cases {
            let ProblemResponse(p) = map_domain_error(&err, "/establishments");
            assert_eq!(p.status_code(), status, "{err}");
            assert_eq!(p.code, code);
            assert_eq!(p.instance, "/establishments");
        }
    }

    #[test]
    fn internal_details_are_hidden() {
        let ProblemResponse(p) =
            map_domain_error(&DomainError::database("secret dsn"), "/employees");
        assert!(!p.detail.contains("secret"));
    }

    #[test]
    fn validation_points_at_field() {
        let ProblemResponse(p) = map_domain_error(
            &DomainError::validation("email", "invalid email address"),
            "/employees",
        );
        let errors = p.errors.expect("field errors");
        assert_eq!(errors[0].pointer, "/email");
        assert_eq!(errors[0].detail, "invalid email address");
    }
}

use thiserror::Error;
use uuid::Uuid;

use crate::contract::OrgAdminError;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{entity} with {field} '{value}' already exists")]
    Conflict {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("{entity} {id} is still referenced by {dependents}")]
    InUse {
        entity: &'static str,
        id: Uuid,
        dependents: &'static str,
    },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn conflict(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::Conflict {
            entity,
            field,
            value: value.into(),
        }
    }

    pub fn in_use(entity: &'static str, id: Uuid, dependents: &'static str) -> Self {
        Self::InUse {
            entity,
            id,
            dependents,
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Repository failures carry no domain meaning; they surface as database errors.
impl From<anyhow::Error> for DomainError {
    fn from(e: anyhow::Error) -> Self {
        Self::database(format!("{e:#}"))
    }
}

impl From<DomainError> for OrgAdminError {
    fn from(e: DomainError) -> Self {
        match &e {
            DomainError::NotFound { entity, id } => OrgAdminError::not_found(*entity, *id),
            DomainError::Conflict { entity, .. } | DomainError::InUse { entity, .. } => {
                OrgAdminError::conflict(*entity, e.to_string())
            }
            DomainError::Validation { .. } => OrgAdminError::validation(e.to_string()),
            DomainError::Database { .. } | DomainError::Internal { .. } => {
                OrgAdminError::internal()
            }
        }
    }
}

//! Types and traits other modules use to plug into authentication.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AuthError;

/// JWT claims issued by this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Employee id.
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
    /// Unique token id.
    pub jti: String,
}

/// Caller identity placed into request extensions by
/// [`require_bearer`](crate::middleware::require_bearer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub claims: Claims,
}

pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// What login needs to know about an account.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub subject: Uuid,
    pub email: String,
    pub password_hash: Option<String>,
    pub is_active: bool,
}

/// Seed account written by the bootstrap step.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

/// Account storage owned by another module (org_admin provides employees).
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// `email` is already trimmed and lower-cased.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Credentials>>;

    /// Create the seed account unless one with the same email exists.
    /// Returns `true` when an account was created.
    async fn ensure_admin(&self, seed: AdminSeed) -> anyhow::Result<bool>;
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::contract::Claims;
use crate::domain::jwt::IssuedToken;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenDto {
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: u64,
}

impl From<IssuedToken> for TokenDto {
    fn from(t: IssuedToken) -> Self {
        Self {
            access_token: t.access_token,
            token_type: "Bearer".to_string(),
            expires_in: t.expires_in,
        }
    }
}

/// Verified claims of the caller's token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeDto {
    pub user_id: String,
    pub email: String,
    pub claims: Claims,
}

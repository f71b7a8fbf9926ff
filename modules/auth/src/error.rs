use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email, wrong password, inactive account or no password set.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("missing bearer token")]
    MissingToken,

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("credential store error: {0}")]
    Store(String),
}

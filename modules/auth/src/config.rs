use serde::{Deserialize, Serialize};

pub const MIN_SECRET_BYTES: usize = 32;
/// Upper bound for `token_ttl_secs`: 30 days.
pub const MAX_TOKEN_TTL_SECS: u64 = 30 * 24 * 3600;

/// `modules.auth` section.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// HMAC key for HS256; at least 32 bytes.
    pub jwt_secret: String,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_audience")]
    pub audience: String,
    #[serde(default = "default_ttl")]
    pub token_ttl_secs: u64,
    /// Seed account created on start when no employee has this email.
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    #[serde(default = "default_admin_first_name")]
    pub first_name: String,
    #[serde(default = "default_admin_last_name")]
    pub last_name: String,
}

fn default_issuer() -> String {
    "orgadmin".to_string()
}

fn default_audience() -> String {
    "orgadmin-api".to_string()
}

fn default_ttl() -> u64 {
    3600
}

fn default_admin_first_name() -> String {
    "System".to_string()
}

fn default_admin_last_name() -> String {
    "Administrator".to_string()
}

impl AuthConfig {
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            issuer: default_issuer(),
            audience: default_audience(),
            token_ttl_secs: default_ttl(),
            bootstrap_admin: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < MIN_SECRET_BYTES {
            return Err(format!(
                "jwt_secret must be at least {MIN_SECRET_BYTES} bytes"
            ));
        }
        if self.token_ttl_secs == 0 {
            return Err("token_ttl_secs must be greater than 0".to_string());
        }
        if self.token_ttl_secs > MAX_TOKEN_TTL_SECS {
            return Err(format!("token_ttl_secs must be at most {MAX_TOKEN_TTL_SECS}"));
        }
        Ok(())
    }
}

// Secrets never reach logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("bootstrap_admin", &self.bootstrap_admin)
            .finish()
    }
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_optional_fields() {
        let cfg: AuthConfig = serde_json::from_value(serde_json::json!({
            "jwt_secret": "0123456789abcdef0123456789abcdef"
        }))
        .unwrap();
        assert_eq!(cfg.issuer, "orgadmin");
        assert_eq!(cfg.audience, "orgadmin-api");
        assert_eq!(cfg.token_ttl_secs, 3600);
        assert!(cfg.bootstrap_admin.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn short_secret_is_rejected() {
        let cfg = AuthConfig::with_secret("too-short");
        assert!(cfg.validate().unwrap_err().contains("32 bytes"));
    }

    #[test]
    fn token_ttl_is_bounded() {
        let mut cfg = AuthConfig::with_secret("0123456789abcdef0123456789abcdef");
        cfg.token_ttl_secs = 0;
        assert!(cfg.validate().is_err());
        cfg.token_ttl_secs = u64::MAX;
        assert!(cfg.validate().unwrap_err().contains("at most"));
        cfg.token_ttl_secs = MAX_TOKEN_TTL_SECS;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let mut cfg = AuthConfig::with_secret("0123456789abcdef0123456789abcdef");
        cfg.bootstrap_admin = Some(BootstrapAdmin {
            email: "admin@example.com".into(),
            password: "hunter22hunter22".into(),
            first_name: "A".into(),
            last_name: "B".into(),
        });
        let out = format!("{cfg:?}");
        assert!(!out.contains("0123456789abcdef"));
        assert!(!out.contains("hunter22"));
        assert!(out.contains("admin@example.com"));
    }
}

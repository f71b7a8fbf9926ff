use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::contract::{AuthenticatedUser, Claims, TokenVerifier};
use crate::error::AuthError;

const LEEWAY_SECS: u64 = 60;

/// A freshly signed access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: u64,
    pub claims: Claims,
}

/// HS256 issue/verify bound to one issuer and audience.
pub struct JwtService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    ttl_secs: i64,
}

impl JwtService {
    /// Fails when the config does not pass [`AuthConfig::validate`].
    pub fn new(cfg: &AuthConfig) -> anyhow::Result<Self> {
        cfg.validate().map_err(anyhow::Error::msg)?;
        let ttl_secs = i64::try_from(cfg.token_ttl_secs)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = LEEWAY_SECS;
        validation.set_issuer(&[cfg.issuer.as_str()]);
        validation.set_audience(&[cfg.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
            validation,
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            ttl_secs,
        })
    }

    pub fn issue(&self, subject: Uuid, email: &str) -> Result<IssuedToken, AuthError> {
        self.issue_at(subject, email, chrono::Utc::now().timestamp())
    }

    fn issue_at(&self, subject: Uuid, email: &str, now: i64) -> Result<IssuedToken, AuthError> {
        let claims = Claims {
            sub: subject.to_string(),
            email: email.to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            jti: Uuid::new_v4().to_string(),
        };
        let header = Header::new(Algorithm::HS256);
        let access_token = jsonwebtoken::encode(&header, &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))?;
        Ok(IssuedToken {
            access_token,
            expires_in: self.ttl_secs.unsigned_abs(),
            claims,
        })
    }

    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }
}

impl TokenVerifier for JwtService {
    fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.decode(token)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AuthError::InvalidToken("subject is not a UUID".to_string()))?;
        Ok(AuthenticatedUser {
            user_id,
            email: claims.email.clone(),
            claims,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn service() -> JwtService {
        JwtService::new(&AuthConfig::with_secret(SECRET)).unwrap()
    }

    #[test]
    fn issued_token_verifies() {
        let svc = service();
        let id = Uuid::new_v4();
        let token = svc.issue(id, "ada@example.com").unwrap();
        assert_eq!(token.expires_in, 3600);
        assert_eq!(token.claims.exp - token.claims.iat, 3600);

        let user = svc.verify(&token.access_token).unwrap();
        assert_eq!(user.user_id, id);
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.claims.iss, "orgadmin");
        assert_eq!(user.claims.aud, "orgadmin-api");
    }

    #[test]
    fn every_token_gets_a_fresh_jti() {
        let svc = service();
        let id = Uuid::new_v4();
        let a = svc.issue(id, "a@b.io").unwrap();
        let b = svc.issue(id, "a@b.io").unwrap();
        assert_ne!(a.claims.jti, b.claims.jti);
    }

    #[test]
    fn expired_token_is_rejected_past_leeway() {
        let svc = service();
        let long_ago = chrono::Utc::now().timestamp() - 2 * 3600;
        let token = svc.issue_at(Uuid::new_v4(), "a@b.io", long_ago).unwrap();
        assert_eq!(svc.verify(&token.access_token), Err(AuthError::TokenExpired));
    }

    #[test]
    fn token_within_leeway_is_accepted() {
        let svc = service();
        // Expired 30 seconds ago.
        let iat = chrono::Utc::now().timestamp() - 3600 - 30;
        let token = svc.issue_at(Uuid::new_v4(), "a@b.io", iat).unwrap();
        assert!(svc.verify(&token.access_token).is_ok());
    }

    #[test]
    fn wrong_secret_audience_or_issuer_fails() {
        let token = service().issue(Uuid::new_v4(), "a@b.io").unwrap();

        let other_secret =
            JwtService::new(&AuthConfig::with_secret("ffffffffffffffffffffffffffffffff")).unwrap();
        assert!(matches!(
            other_secret.verify(&token.access_token),
            Err(AuthError::InvalidToken(_))
        ));

        let mut cfg = AuthConfig::with_secret(SECRET);
        cfg.audience = "someone-else".into();
        let other_aud = JwtService::new(&cfg).unwrap();
        assert!(other_aud.verify(&token.access_token).is_err());

        let mut cfg = AuthConfig::with_secret(SECRET);
        cfg.issuer = "not-us".into();
        let other_iss = JwtService::new(&cfg).unwrap();
        assert!(other_iss.verify(&token.access_token).is_err());
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(
            service().verify("not.a.jwt"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn short_secret_fails_construction() {
        assert!(JwtService::new(&AuthConfig::with_secret("short")).is_err());
    }

    #[test]
    fn oversized_ttl_fails_construction() {
        let mut cfg = AuthConfig::with_secret(SECRET);
        cfg.token_ttl_secs = u64::MAX;
        assert!(JwtService::new(&cfg).is_err());
    }

    #[test]
    fn longest_ttl_expires_in_the_future() {
        let mut cfg = AuthConfig::with_secret(SECRET);
        cfg.token_ttl_secs = crate::config::MAX_TOKEN_TTL_SECS;
        let token = JwtService::new(&cfg)
            .unwrap()
            .issue(Uuid::new_v4(), "a@b.io")
            .unwrap();
        assert!(token.claims.exp > chrono::Utc::now().timestamp());
        assert_eq!(token.expires_in, cfg.token_ttl_secs);
    }
}

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::config::BootstrapAdmin;
use crate::contract::{AdminSeed, CredentialStore};
use crate::domain::jwt::{IssuedToken, JwtService};
use crate::domain::password;
use crate::error::AuthError;

/// Login and account bootstrap on top of a [`CredentialStore`].
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>, jwt: Arc<JwtService>) -> Self {
        // Build the dummy hash now rather than on the first rejected login.
        password::verify_dummy("");
        Self { store, jwt }
    }

    pub fn jwt(&self) -> &Arc<JwtService> {
        &self.jwt
    }

    /// Every rejection reason maps to [`AuthError::InvalidCredentials`].
    #[instrument(name = "auth.service.login", skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let email = email.trim().to_lowercase();

        let creds = self
            .store
            .find_by_email(&email)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        let account = match creds {
            None => Err("no account for email"),
            Some(c) if !c.is_active => Err("account inactive"),
            Some(c) => match c.password_hash.clone() {
                Some(hash) => Ok((c, hash)),
                None => Err("account has no password"),
            },
        };
        let (creds, hash) = match account {
            Ok(found) => found,
            Err(reason) => {
                debug!("{reason}");
                password::verify_dummy(password);
                return Err(AuthError::InvalidCredentials);
            }
        };

        match password::verify_password(password, &hash) {
            Ok(true) => {}
            Ok(false) => {
                debug!("password mismatch");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                warn!(error = %e, "stored password hash is unreadable");
                return Err(AuthError::InvalidCredentials);
            }
        }

        let token = self.jwt.issue(creds.subject, &creds.email)?;
        info!(subject = %creds.subject, "login succeeded");
        Ok(token)
    }

    #[instrument(name = "auth.service.bootstrap_admin", skip(self, admin), fields(email = %admin.email))]
    pub async fn bootstrap_admin(&self, admin: &BootstrapAdmin) -> anyhow::Result<bool> {
        let seed = AdminSeed {
            email: admin.email.trim().to_lowercase(),
            first_name: admin.first_name.clone(),
            last_name: admin.last_name.clone(),
            password_hash: password::hash_password(&admin.password)?,
        };
        let created = self.store.ensure_admin(seed).await?;
        if created {
            info!("bootstrap administrator created");
        } else {
            debug!("bootstrap administrator already present");
        }
        Ok(created)
    }
}

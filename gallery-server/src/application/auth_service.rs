use tracing::{instrument, warn};

use crate::domain::error::DomainError;
use crate::infrastructure::security::{ADMIN_SUBJECT, Claims, JwtKeys, verify_password};

#[derive(Clone)]
pub struct AuthService {
    admin_password_hash: Option<String>,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(admin_password_hash: Option<String>, keys: JwtKeys) -> Self {
        Self {
            admin_password_hash,
            keys,
        }
    }

    pub fn keys(&self) -> &JwtKeys {
        &self.keys
    }

    #[instrument(skip_all)]
    pub fn login(&self, password: &str) -> Result<String, DomainError> {
        let hash = self.admin_password_hash.as_deref().ok_or_else(|| {
            warn!("admin login attempted without ADMIN_PASSWORD_HASH configured");
            DomainError::Unauthorized
        })?;

        let valid = verify_password(password, hash).map_err(|err| {
            warn!("stored admin password hash is unreadable: {}", err);
            DomainError::Unauthorized
        })?;
        if !valid {
            return Err(DomainError::Unauthorized);
        }

        self.keys
            .generate_token(ADMIN_SUBJECT)
            .map_err(|err| DomainError::Internal(err.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self
            .keys
            .verify_token(token)
            .map_err(|_| DomainError::Unauthorized)?;
        if claims.sub != ADMIN_SUBJECT {
            return Err(DomainError::Unauthorized);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::security::hash_password;

    fn service(password: Option<&str>) -> AuthService {
        let hash = password.map(|p| hash_password(p).unwrap());
        AuthService::new(hash, JwtKeys::new("test-secret".into()))
    }

    #[test]
    fn login_issues_verifiable_token() {
        let auth = service(Some("hunter2"));
        let token = auth.login("hunter2").unwrap();
        assert_eq!(auth.verify(&token).unwrap().sub, ADMIN_SUBJECT);
    }

    #[test]
    fn login_rejects_wrong_password() {
        let auth = service(Some("hunter2"));
        assert!(matches!(auth.login("nope"), Err(DomainError::Unauthorized)));
    }

    #[test]
    fn login_disabled_without_hash() {
        let auth = service(None);
        assert!(matches!(auth.login("anything"), Err(DomainError::Unauthorized)));
    }

    #[test]
    fn verify_rejects_foreign_subject() {
        let auth = service(Some("hunter2"));
        let token = auth.keys().generate_token("someone-else").unwrap();
        assert!(matches!(auth.verify(&token), Err(DomainError::Unauthorized)));
    }
}

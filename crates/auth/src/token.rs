//! Token verification seam.
//!
//! The serving layer hands the raw bearer token to a [`TokenValidator`]; the
//! core only ever sees the resulting [`PortalClaims`]. Signature schemes
//! beyond HS256 can be added by implementing the trait.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::{PortalClaims, TokenValidationError, validate_claims};

/// Verifies a bearer token and returns its claims.
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<PortalClaims, TokenValidationError>;
}

/// HS256 (shared secret) token validator.
pub struct Hs256TokenValidator {
    decoding_key: DecodingKey,
}

impl Hs256TokenValidator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }
}

impl TokenValidator for Hs256TokenValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<PortalClaims, TokenValidationError> {
        // Claim-window checks are done by `validate_claims` against the caller's
        // clock; the library's numeric `exp` handling is disabled because the
        // claims carry RFC 3339 timestamps.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<PortalClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| TokenValidationError::Malformed)?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header, encode};

    use reporthub_core::UserId;

    use super::*;

    fn mint(secret: &str, claims: &PortalClaims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims() -> PortalClaims {
        let now = Utc::now();
        PortalClaims {
            sub: UserId::new(),
            is_admin: false,
            is_active: true,
            expired_reason: None,
            is_locked_out: false,
            roles: vec![],
            issued_at: now - Duration::minutes(1),
            expires_at: now + Duration::minutes(10),
        }
    }

    #[test]
    fn valid_token_round_trips() {
        let claims = claims();
        let token = mint("secret", &claims);

        let validator = Hs256TokenValidator::new("secret");
        let decoded = validator.validate(&token, Utc::now()).unwrap();
        assert_eq!(decoded.sub, claims.sub);
    }

    #[test]
    fn wrong_secret_is_malformed() {
        let token = mint("secret-a", &claims());

        let validator = Hs256TokenValidator::new("secret-b");
        assert_eq!(
            validator.validate(&token, Utc::now()),
            Err(TokenValidationError::Malformed)
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = claims();
        claims.issued_at = Utc::now() - Duration::hours(2);
        claims.expires_at = Utc::now() - Duration::hours(1);
        let token = mint("secret", &claims);

        let validator = Hs256TokenValidator::new("secret");
        assert_eq!(
            validator.validate(&token, Utc::now()),
            Err(TokenValidationError::Expired)
        );
    }
}

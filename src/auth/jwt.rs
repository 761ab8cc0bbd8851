use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::auth::repo::{Role, User};
use crate::config::JwtConfig;
use crate::state::AppState;

/// Claims embedded in every issued token. Reconstructed per request
/// from the signed wire value, never from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("malformed token")]
    Malformed,
}

/// HS256 signing and verification keys plus the issuance parameters.
/// Built once from configuration; rotating the secret invalidates all
/// outstanding tokens.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    token_ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::from_config(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            token_ttl: Duration::from_secs((cfg.ttl_minutes as u64) * 60),
        }
    }

    pub fn sign(&self, user: &User) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.token_ttl.as_secs() as i64);
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            role: user.role,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user.id, role = ?user.role, "token signed");
        Ok(token)
    }

    /// Decode and validate a token, returning the claims exactly as
    /// issued. Expiry is checked without leeway so the configured ttl
    /// is an exact boundary.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature
                | ErrorKind::ImmatureSignature
                | ErrorKind::InvalidIssuer
                | ErrorKind::InvalidAudience => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            }
        })?;
        debug!(user_id = %data.claims.sub, "token verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_minutes: 60,
        }
    }

    fn make_keys(secret: &str) -> JwtKeys {
        JwtKeys::from_config(&test_config(secret))
    }

    fn make_user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            email: "cook@example.com".into(),
            username: "cook".into(),
            password_hash: "irrelevant".into(),
            role,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    /// Encode claims with an arbitrary expiry using the same key, to
    /// simulate tokens issued in the past.
    fn token_with_exp(keys: &JwtKeys, user: &User, exp: OffsetDateTime) -> String {
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            role: user.role,
            iat: (exp - TimeDuration::hours(1)).unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: "test-issuer".into(),
            aud: "test-aud".into(),
        };
        encode(&Header::default(), &claims, &keys.encoding).expect("encode")
    }

    #[test]
    fn sign_then_verify_returns_the_claims_as_issued() {
        let keys = make_keys("dev-secret");
        let user = make_user(Role::Admin);
        let token = keys.sign(&user).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "cook@example.com");
        assert_eq!(claims.username, "cook");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn wrong_secret_is_an_invalid_signature() {
        let keys = make_keys("dev-secret");
        let other = make_keys("another-secret");
        let token = keys.sign(&make_user(Role::User)).expect("sign");
        assert_eq!(other.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn garbage_is_malformed() {
        let keys = make_keys("dev-secret");
        assert_eq!(keys.verify("not.a.token"), Err(TokenError::Malformed));
        assert_eq!(keys.verify(""), Err(TokenError::Malformed));
    }

    #[test]
    fn token_still_valid_one_minute_before_expiry() {
        let keys = make_keys("dev-secret");
        let user = make_user(Role::User);
        let exp = OffsetDateTime::now_utc() + TimeDuration::minutes(1);
        let token = token_with_exp(&keys, &user, exp);
        assert!(keys.verify(&token).is_ok());
    }

    #[test]
    fn token_rejected_one_minute_after_expiry() {
        let keys = make_keys("dev-secret");
        let user = make_user(Role::User);
        let exp = OffsetDateTime::now_utc() - TimeDuration::minutes(1);
        let token = token_with_exp(&keys, &user, exp);
        assert_eq!(keys.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn issuer_and_audience_are_validated() {
        let keys = make_keys("dev-secret");
        let mut cfg = test_config("dev-secret");
        cfg.issuer = "someone-else".into();
        let other = JwtKeys::from_config(&cfg);
        let token = other.sign(&make_user(Role::User)).expect("sign");
        assert_eq!(keys.verify(&token), Err(TokenError::InvalidSignature));
    }
}

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::auth::jwt::{Claims, JwtKeys};
use crate::errors::ApiError;

/// Gate for recipe mutation routes: extracts the bearer token from the
/// `Authorization` header, verifies it and requires the admin role.
/// Decoded claims are handed to the handler on success.
///
/// No identity at all is `Unauthorized`; a presented-but-rejected
/// identity (bad token, expired, or insufficient role) is `Forbidden`.
#[derive(Debug)]
pub struct AdminUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized("missing authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::Unauthorized("missing bearer token"))?;

        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "token rejected");
            ApiError::Forbidden("invalid or expired token")
        })?;

        if !claims.role.can_mutate_recipes() {
            warn!(user_id = %claims.sub, "non-admin attempted a privileged route");
            return Err(ApiError::Forbidden("admin access required"));
        }

        Ok(AdminUser(claims))
    }
}

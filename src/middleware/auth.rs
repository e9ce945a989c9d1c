//! Bearer token verification
//!
//! Tokens are issued by the platform's identity service; this service only
//! checks the signature and expiry and reads the subject and role.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use coursegate_common::UserRole;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    #[serde(default)]
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authenticated user extracted from JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Verify a token's signature and expiry
pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Turn verified claims into the request's user
fn authenticate(claims: Claims) -> AppResult<AuthenticatedUser> {
    let id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;
    // Tokens without a recognised role get student rights.
    let role = UserRole::parse(&claims.role).unwrap_or_default();

    Ok(AuthenticatedUser { id, role })
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let Some(auth_header) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        debug!(path = %path, "Auth failed: No Authorization header");
        return Err(AppError::Unauthorized);
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        debug!(path = %path, "Auth failed: Invalid Authorization format (expected 'Bearer <token>')");
        return Err(AppError::Unauthorized);
    };

    let claims = verify_token(token, &state.config().jwt.secret).inspect_err(|e| {
        debug!(path = %path, error = ?e, "Auth failed: Token verification failed");
    })?;

    let user = authenticate(claims)?;
    debug!(path = %path, user_id = %user.id, role = %user.role, "User authenticated");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Staff-only guard, layered after `auth_middleware`
pub async fn require_staff(request: Request<Body>, next: Next) -> Result<Response, AppError> {
    let is_staff = request
        .extensions()
        .get::<AuthenticatedUser>()
        .is_some_and(AuthenticatedUser::is_staff);

    if !is_staff {
        return Err(AppError::Forbidden("Staff role required".to_string()));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(sub: &str, role: &str, exp_offset: i64, secret: &str) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: sub.to_string(),
            role: role.to_string(),
            exp: now + exp_offset,
            iat: now,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_verify_and_authenticate() {
        let id = Uuid::new_v4();
        let claims = verify_token(&token(&id.to_string(), "curator", 3600, "secret"), "secret").unwrap();
        let user = authenticate(claims).unwrap();
        assert_eq!(user.id, id);
        assert!(user.is_staff());
    }

    #[test]
    fn test_unknown_role_is_student() {
        let id = Uuid::new_v4();
        let claims = verify_token(&token(&id.to_string(), "guest", 3600, "secret"), "secret").unwrap();
        let user = authenticate(claims).unwrap();
        assert_eq!(user.role, UserRole::Student);
        assert!(!user.is_staff());
    }

    #[test]
    fn test_rejects_bad_tokens() {
        let id = Uuid::new_v4().to_string();
        assert!(matches!(
            verify_token(&token(&id, "admin", 3600, "other"), "secret"),
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(
            verify_token(&token(&id, "admin", -3600, "secret"), "secret"),
            Err(AppError::TokenExpired)
        ));

        let claims = verify_token(&token("not-a-uuid", "admin", 3600, "secret"), "secret").unwrap();
        assert!(matches!(authenticate(claims), Err(AppError::InvalidToken)));
    }
}

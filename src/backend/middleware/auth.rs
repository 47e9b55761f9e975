/**
 * Authentication Middleware
 *
 * Runs on every request. The rules for the Authorization header:
 *
 * 1. Absent (or empty): the request continues unauthenticated.
 * 2. Present: it must be exactly two whitespace-separated parts,
 *    `<scheme> <credential>`, otherwise the request fails.
 * 3. A scheme other than the configured keyword (case-insensitive) is
 *    left alone and the request continues unauthenticated.
 * 4. Otherwise the token is verified and its user resolved; any failure
 *    rejects the request with 401.
 *
 * On success an `AuthenticatedUser` (user record + raw token) is attached
 * to the request extensions. Handlers pick it up with the `AuthUser`
 * (required) or `MaybeAuthUser` (optional) extractors.
 */

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
    middleware::Next,
    response::Response,
};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::backend::auth::sessions::{TokenError, TokenService};
use crate::backend::auth::users::{get_user_by_id, User};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated identity attached to a request
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user: User,
    /// The bearer credential exactly as presented
    pub token: String,
}

/// Reasons an Authorization header is rejected
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid Authorization header format.")]
    MalformedHeader,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("User not found.")]
    UserNotFound,
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

impl From<AuthError> for BackendError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MalformedHeader => {
                BackendError::authentication_failed("Invalid Authorization header format.")
            }
            AuthError::Token(TokenError::Expired) => {
                BackendError::authentication_failed("Token has expired.")
            }
            AuthError::Token(TokenError::Malformed) => {
                BackendError::authentication_failed("Invalid token.")
            }
            AuthError::Token(TokenError::MissingClaim) => {
                BackendError::authentication_failed("Token contained no user id.")
            }
            AuthError::Token(e @ (TokenError::Signing(_) | TokenError::Lifetime)) => {
                BackendError::internal(format!("token signing failed: {}", e))
            }
            AuthError::UserNotFound => BackendError::authentication_failed("User not found."),
            AuthError::Storage(e) => BackendError::Database(e),
        }
    }
}

/// Pull the credential out of an Authorization header value
///
/// `Ok(None)` means "not ours": no credential, or another scheme.
pub fn parse_authorization<'a>(
    value: &'a str,
    keyword: &str,
) -> Result<Option<&'a str>, AuthError> {
    if value.trim().is_empty() {
        return Ok(None);
    }

    let parts: Vec<&str> = value.split_whitespace().collect();
    let [scheme, credential] = parts.as_slice() else {
        return Err(AuthError::MalformedHeader);
    };

    if !scheme.eq_ignore_ascii_case(keyword) {
        return Ok(None);
    }
    Ok(Some(*credential))
}

/// Resolve the header to a user, if it carries our kind of credential
pub async fn authenticate(
    header: Option<&HeaderValue>,
    keyword: &str,
    tokens: &TokenService,
    pool: &SqlitePool,
) -> Result<Option<AuthenticatedUser>, AuthError> {
    let Some(header) = header else {
        return Ok(None);
    };
    let value = header.to_str().map_err(|_| AuthError::MalformedHeader)?;

    let Some(token) = parse_authorization(value, keyword)? else {
        return Ok(None);
    };

    let user_id = tokens.verify(token)?;
    let user = get_user_by_id(pool, user_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Some(AuthenticatedUser {
        user,
        token: token.to_string(),
    }))
}

/// Authentication middleware
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let authenticated = authenticate(
        request.headers().get(AUTHORIZATION),
        &app_state.config.bearer_keyword,
        &app_state.tokens,
        &app_state.db_pool,
    )
    .await
    .map_err(|e| {
        tracing::warn!("Rejected credentials on {} {}: {}", request.method(), request.uri().path(), e);
        BackendError::from(e)
    })?;

    if let Some(authenticated) = authenticated {
        tracing::debug!("Authenticated request as {}", authenticated.user.id);
        request.extensions_mut().insert(authenticated);
    }

    Ok(next.run(request).await)
}

/// Extractor for routes that require an authenticated user
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("Unauthenticated request to {}", parts.uri.path());
                BackendError::NotAuthenticated
            })
    }
}

/// Extractor for routes where authentication is optional
#[derive(Clone, Debug)]
pub struct MaybeAuthUser(pub Option<AuthenticatedUser>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

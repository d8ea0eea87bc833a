//! Identity extractors. The session token is read from the
//! `Authorization: Bearer` header, falling back to the session cookie.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use tracing::debug;

use linkshare_core::error::AppError;
use linkshare_entity::identity::Identity;

use crate::error::ApiError;
use crate::state::AppState;

/// The requester, or `None` when anonymous.
///
/// A missing, malformed, or expired token is treated as anonymous: public
/// links stay reachable and the access policy decides the rest.
#[derive(Debug, Clone)]
pub struct MaybeIdentity(pub Option<Identity>);

impl MaybeIdentity {
    /// Borrow the identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }
}

/// A signed-in requester. Rejects anonymous requests with
/// `AUTHENTICATION_REQUIRED`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl std::ops::Deref for AuthUser {
    type Target = Identity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

async fn session_token(parts: &mut Parts, state: &AppState) -> Option<String> {
    if let Ok(TypedHeader(Authorization(bearer))) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
    {
        return Some(bearer.token().to_string());
    }

    CookieJar::from_headers(&parts.headers)
        .get(&state.config.auth.session_cookie)
        .map(|c| c.value().to_string())
}

impl FromRequestParts<AppState> for MaybeIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = session_token(parts, state).await else {
            return Ok(Self(None));
        };

        match state.jwt_decoder.identity(&token) {
            Ok(identity) => Ok(Self(Some(identity))),
            Err(e) => {
                debug!(error = %e, "Ignoring invalid session token");
                Ok(Self(None))
            }
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let MaybeIdentity(identity) = MaybeIdentity::from_request_parts(parts, state).await?;
        identity
            .map(AuthUser)
            .ok_or_else(|| AppError::authentication_required("Sign in to continue").into())
    }
}

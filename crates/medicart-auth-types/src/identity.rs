//! Bearer-token extractors.

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, Header};
use http::StatusCode;
use http::header::AUTHORIZATION;
use http::request::Parts;

use crate::token::{TokenInfo, validate_access_token};

/// HMAC secret used to validate bearer tokens, pulled from router state.
#[derive(Debug, Clone)]
pub struct JwtSecret(pub String);

/// Raw `Authorization: Bearer <token>` value, not yet validated.
///
/// Returns 401 if the header is absent or not a bearer credential. Handlers
/// that pass the token to a use case (which validates it) extract this.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Caller identity from a validated bearer token.
///
/// Returns 401 for a missing, expired, or forged token. Role enforcement
/// (403) is done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct Identity(pub TokenInfo);

fn bearer_from(parts: &Parts) -> Option<String> {
    let mut values = parts.headers.get_all(AUTHORIZATION).iter();
    Authorization::<Bearer>::decode(&mut values)
        .ok()
        .map(|auth| auth.token().to_owned())
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 declares `fn -> impl Future + Send`; read the header
    // synchronously and hand back a 'static future.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = bearer_from(parts);
        async move { token.map(Self).ok_or(StatusCode::UNAUTHORIZED) }
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = bearer_from(parts);
        let JwtSecret(secret) = JwtSecret::from_ref(state);

        async move {
            let token = token.ok_or(StatusCode::UNAUTHORIZED)?;
            let info =
                validate_access_token(&token, &secret).map_err(|_| StatusCode::UNAUTHORIZED)?;
            Ok(Self(info))
        }
    }
}

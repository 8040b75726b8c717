//! HS256 bearer-token issue and validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
#[cfg(any(feature = "issuer", test))]
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Deserialize;
#[cfg(any(feature = "issuer", test))]
use serde::Serialize;
use uuid::Uuid;

use medicart_domain::role::AccountRole;

/// Access-token lifetime in seconds (24 hours).
pub const ACCESS_TOKEN_EXP: u64 = 86400;

/// Account identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub account_id: Uuid,
    pub email: String,
    pub role: AccountRole,
    pub exp: u64,
}

impl TokenInfo {
    pub fn is_administrator(&self) -> bool {
        self.role.is_administrator()
    }
}

/// Errors returned by [`validate_access_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload.
///
/// | Field | JWT claim | Rust type | Meaning |
/// |-------|-----------|-----------|---------|
/// | `sub` | `sub` | UUID string | account ID |
/// | `email` | custom | string | account email |
/// | `role` | custom | `u8` wire value | see [`AccountRole`] |
/// | `exp` | `exp` | seconds since epoch | token expiration |
///
/// [`Serialize`] requires the **`issuer`** feature; only the service that
/// logs accounts in mints tokens.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "issuer", test), derive(Serialize))]
pub struct JwtClaims {
    pub sub: String,
    pub email: String,
    pub role: u8,
    pub exp: u64,
}

fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a bearer token, returning the identity it carries.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    let account_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    let role = AccountRole::from_u8(claims.role).ok_or(AuthError::Malformed)?;
    Ok(TokenInfo {
        account_id,
        email: claims.email,
        role,
        exp: claims.exp,
    })
}

#[cfg(any(feature = "issuer", test))]
fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Sign an access token for the account. Returns the token and its expiry.
#[cfg(any(feature = "issuer", test))]
pub fn issue_access_token(
    account_id: Uuid,
    email: &str,
    role: AccountRole,
    secret: &str,
) -> Result<(String, u64), jsonwebtoken::errors::Error> {
    let exp = now_secs() + ACCESS_TOKEN_EXP;
    let claims = JwtClaims {
        sub: account_id.to_string(),
        email: email.to_owned(),
        role: role.as_u8(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok((token, exp))
}

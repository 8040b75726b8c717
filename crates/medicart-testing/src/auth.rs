//! Signed bearer credentials for tests.
//!
//! Protected routes validate `Authorization: Bearer <jwt>`. `TestAuth` mints
//! a real token with the test secret so requests go through the same
//! extractor path as production traffic.

use axum::http::HeaderValue;
use medicart_auth_types::token::issue_access_token;
use medicart_domain::role::AccountRole;
use uuid::Uuid;

/// Secret shared by test routers and `TestAuth` tokens.
pub const TEST_JWT_SECRET: &str = "medicart-test-secret";

/// Configurable identity signed into test requests.
pub struct TestAuth {
    pub account_id: Uuid,
    pub email: String,
    pub role: AccountRole,
}

impl TestAuth {
    pub fn new(account_id: Uuid, email: &str, role: AccountRole) -> Self {
        Self {
            account_id,
            email: email.to_owned(),
            role,
        }
    }

    pub fn standard(account_id: Uuid) -> Self {
        Self::new(account_id, "customer@example.com", AccountRole::Standard)
    }

    pub fn administrator(account_id: Uuid) -> Self {
        Self::new(account_id, "admin@example.com", AccountRole::Administrator)
    }

    /// Signed token for this identity.
    pub fn token(&self) -> String {
        issue_access_token(self.account_id, &self.email, self.role, TEST_JWT_SECRET)
            .expect("test token must sign")
            .0
    }

    /// `Authorization` header value, `Bearer <token>`.
    pub fn bearer(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", self.token()))
            .expect("token is a valid header value")
    }
}

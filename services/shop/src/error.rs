use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use medicart_domain::directory::DirectoryError;

/// Shop service error variants.
#[derive(Debug, thiserror::Error)]
pub enum ShopServiceError {
    // 400
    #[error("unknown division")]
    UnknownDivision,
    #[error("unknown district for division")]
    UnknownDistrict,
    #[error("unknown city for district")]
    UnknownCity,
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid verification code")]
    InvalidVerificationCode,
    #[error("password must be at least 6 characters")]
    WeakPassword,
    #[error("order has no items")]
    EmptyOrder,
    #[error("item quantity out of range")]
    InvalidQuantity,
    #[error("amount out of range")]
    AmountOutOfRange,
    #[error("unknown product")]
    UnknownProduct,
    #[error("order total does not match items")]
    TotalMismatch,
    #[error("missing data")]
    MissingData,
    #[error("invalid upload")]
    InvalidUpload,

    // 401
    #[error("invalid or missing credential")]
    InvalidToken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("account not found")]
    UnresolvedAccount,
    #[error("address not found")]
    UnresolvedAddress,
    #[error("invalid reset code")]
    InvalidResetCode,

    // 404
    #[error("account not found")]
    AccountNotFound,
    #[error("address not found")]
    AddressNotFound,
    #[error("category not found")]
    CategoryNotFound,
    #[error("product not found")]
    ProductNotFound,

    #[error("forbidden")]
    Forbidden,
    #[error("resource was modified concurrently")]
    StaleWrite,
    #[error("email delivery failed")]
    EmailDeliveryFailed,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ShopServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownDivision => "UNKNOWN_DIVISION",
            Self::UnknownDistrict => "UNKNOWN_DISTRICT",
            Self::UnknownCity => "UNKNOWN_CITY",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::InvalidVerificationCode => "INVALID_VERIFICATION_CODE",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::EmptyOrder => "EMPTY_ORDER",
            Self::InvalidQuantity => "INVALID_QUANTITY",
            Self::AmountOutOfRange => "AMOUNT_OUT_OF_RANGE",
            Self::UnknownProduct => "UNKNOWN_PRODUCT",
            Self::TotalMismatch => "TOTAL_MISMATCH",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidUpload => "INVALID_UPLOAD",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UnresolvedAccount => "UNRESOLVED_ACCOUNT",
            Self::UnresolvedAddress => "UNRESOLVED_ADDRESS",
            Self::InvalidResetCode => "INVALID_RESET_CODE",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::AddressNotFound => "ADDRESS_NOT_FOUND",
            Self::CategoryNotFound => "CATEGORY_NOT_FOUND",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::StaleWrite => "STALE_WRITE",
            Self::EmailDeliveryFailed => "EMAIL_DELIVERY_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnknownDivision
            | Self::UnknownDistrict
            | Self::UnknownCity
            | Self::EmailTaken
            | Self::InvalidVerificationCode
            | Self::WeakPassword
            | Self::EmptyOrder
            | Self::InvalidQuantity
            | Self::AmountOutOfRange
            | Self::UnknownProduct
            | Self::TotalMismatch
            | Self::MissingData
            | Self::InvalidUpload => StatusCode::BAD_REQUEST,
            Self::InvalidToken
            | Self::InvalidCredentials
            | Self::UnresolvedAccount
            | Self::UnresolvedAddress
            | Self::InvalidResetCode => StatusCode::UNAUTHORIZED,
            Self::AccountNotFound
            | Self::AddressNotFound
            | Self::CategoryNotFound
            | Self::ProductNotFound => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::StaleWrite => StatusCode::CONFLICT,
            Self::EmailDeliveryFailed => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DirectoryError> for ShopServiceError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::UnknownDivision => Self::UnknownDivision,
            DirectoryError::UnknownDistrict => Self::UnknownDistrict,
            DirectoryError::UnknownCity => Self::UnknownCity,
        }
    }
}

impl IntoResponse for ShopServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

/// Failure of an outbound integration (email, chat, file store).
///
/// Never reaches a response directly: callers either log and drop it, or map
/// it to a service error when the integration is the operation itself.
#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    #[error("email transport: {0}")]
    Email(String),
    #[error("chat transport: {0}")]
    Chat(String),
    #[error("file storage: {0}")]
    Storage(String),
}

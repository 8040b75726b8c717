pub mod address;
pub mod categories;
pub mod directory;
pub mod health;
pub mod orders;
pub mod products;
pub mod upload;
pub mod users;
pub mod whatsapp;

use medicart_auth_types::token::TokenInfo;

use crate::error::ShopServiceError;

/// Catalog writes, uploads and chat relay are administrator-only.
pub(crate) fn require_administrator(info: &TokenInfo) -> Result<(), ShopServiceError> {
    if info.is_administrator() {
        Ok(())
    } else {
        Err(ShopServiceError::Forbidden)
    }
}

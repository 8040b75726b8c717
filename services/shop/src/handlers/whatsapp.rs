use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use medicart_auth_types::identity::Identity;

use crate::domain::repository::ChatGateway;
use crate::error::ShopServiceError;
use crate::handlers::require_administrator;
use crate::state::AppState;

// ── POST /whatsapp/send ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendChatRequest {
    pub phone: String,
    pub message: String,
}

/// Relay a chat message. Delivery failures are logged, never returned.
pub async fn send_chat(
    Identity(info): Identity,
    State(state): State<AppState>,
    Json(body): Json<SendChatRequest>,
) -> Result<StatusCode, ShopServiceError> {
    require_administrator(&info)?;
    if body.phone.trim().is_empty() || body.message.is_empty() {
        return Err(ShopServiceError::MissingData);
    }
    match state.chat.send(&body.phone, &body.message).await {
        Ok(()) => tracing::info!(phone = %body.phone, "chat message relayed"),
        Err(e) => tracing::warn!(phone = %body.phone, error = %e, "chat relay failed"),
    }
    Ok(StatusCode::ACCEPTED)
}

//! WhatsApp chat transport.

use std::time::Duration;

use serde::Serialize;

use crate::domain::repository::ChatGateway;
use crate::error::IntegrationError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts `{phone, message}` as JSON to a WhatsApp bridge with a bearer token.
#[derive(Clone)]
pub struct WhatsAppGateway {
    client: reqwest::Client,
    api_url: String,
    api_token: String,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    phone: &'a str,
    message: &'a str,
}

impl WhatsAppGateway {
    pub fn new(api_url: String, api_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_token,
        }
    }
}

impl ChatGateway for WhatsAppGateway {
    async fn send(&self, phone: &str, text: &str) -> Result<(), IntegrationError> {
        self.client
            .post(&self.api_url)
            .bearer_auth(&self.api_token)
            .timeout(REQUEST_TIMEOUT)
            .json(&SendMessage {
                phone,
                message: text,
            })
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| IntegrationError::Chat(e.to_string()))?;
        Ok(())
    }
}

use serde::Deserialize;

use medicart_core::config::Config;

/// Shop service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3000). Env var: `SHOP_PORT`.
    #[serde(default = "default_shop_port")]
    pub shop_port: u16,
    /// HMAC secret for bearer tokens.
    pub jwt_secret: String,

    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    /// `From:` mailbox for every outgoing email.
    pub mail_from: String,

    /// Operator inbox copied on every order.
    pub operator_email: String,
    /// Operator chat number copied on every order.
    pub operator_phone: String,

    /// WhatsApp bridge endpoint accepting `{phone, message}`.
    pub whatsapp_api_url: String,
    pub whatsapp_api_token: String,

    /// Directory uploaded images are written to and served from.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    /// Lifetime of a signup verification code (default 15 minutes).
    #[serde(default = "default_verification_code_ttl_secs")]
    pub verification_code_ttl_secs: u64,
    /// Interval between sweeps of expired pending registrations (default 5 minutes).
    #[serde(default = "default_pending_sweep_interval_secs")]
    pub pending_sweep_interval_secs: u64,
}

impl Config for ShopConfig {}

fn default_shop_port() -> u16 {
    3000
}

fn default_smtp_port() -> u16 {
    587
}

fn default_upload_dir() -> String {
    "uploads".to_owned()
}

fn default_verification_code_ttl_secs() -> u64 {
    900
}

fn default_pending_sweep_interval_secs() -> u64 {
    300
}

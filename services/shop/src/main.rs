use std::time::Duration;

use sea_orm::Database;
use tracing::info;

use medicart_core::config::Config;
use medicart_core::tracing::init_tracing;

use medicart_shop::config::ShopConfig;
use medicart_shop::infra::chat::WhatsAppGateway;
use medicart_shop::infra::db::DbPendingRegistrationRepository;
use medicart_shop::infra::mail::SmtpMailer;
use medicart_shop::infra::notify::{NotificationDispatcher, NotificationQueue};
use medicart_shop::infra::storage::LocalFileStore;
use medicart_shop::infra::sweep::run_pending_sweep;
use medicart_shop::router::build_router;
use medicart_shop::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ShopConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = SmtpMailer::new(&config).expect("invalid SMTP configuration");
    let chat = WhatsAppGateway::new(
        config.whatsapp_api_url.clone(),
        config.whatsapp_api_token.clone(),
    );

    // Notification outbox
    let (notifications, outbox) = NotificationQueue::channel();
    let dispatcher = NotificationDispatcher::new(mailer.clone(), chat.clone());
    tokio::spawn(dispatcher.run(outbox));

    // Expired signup sweep
    let sweep_repo = DbPendingRegistrationRepository { db: db.clone() };
    let sweep_every = Duration::from_secs(config.pending_sweep_interval_secs);
    tokio::spawn(run_pending_sweep(sweep_repo, sweep_every));

    let code_ttl_secs = i64::try_from(config.verification_code_ttl_secs)
        .expect("VERIFICATION_CODE_TTL_SECS out of range");

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
        notifications,
        mailer,
        chat,
        files: LocalFileStore::new(config.upload_dir),
        code_ttl: chrono::Duration::seconds(code_ttl_secs),
        operator_email: config.operator_email,
        operator_phone: config.operator_phone,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.shop_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("shop service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}

use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::json;
use uuid::Uuid;

use medicart_core::config::Config;
use medicart_shop::config::ShopConfig;
use medicart_shop::infra::chat::WhatsAppGateway;
use medicart_shop::infra::mail::SmtpMailer;
use medicart_shop::infra::notify::NotificationQueue;
use medicart_shop::infra::storage::LocalFileStore;
use medicart_shop::router::build_router;
use medicart_shop::state::AppState;
use medicart_testing::auth::{TEST_JWT_SECRET, TestAuth};

// Every request below is rejected before any query runs, so the router is
// built over a disconnected database.
fn server(upload_dir: &tempfile::TempDir) -> TestServer {
    let config = ShopConfig::from_vars(
        [
            ("DATABASE_URL", "postgres://localhost/medicart"),
            ("JWT_SECRET", TEST_JWT_SECRET),
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USERNAME", "mailer"),
            ("SMTP_PASSWORD", "hunter2"),
            ("MAIL_FROM", "Medicart <no-reply@example.com>"),
            ("OPERATOR_EMAIL", "ops@example.com"),
            ("OPERATOR_PHONE", "+8801700000000"),
            ("WHATSAPP_API_URL", "http://wa.local/send"),
            ("WHATSAPP_API_TOKEN", "wa-token"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned())),
    )
    .unwrap();
    let (notifications, _outbox) = NotificationQueue::channel();
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        jwt_secret: config.jwt_secret.clone(),
        notifications,
        mailer: SmtpMailer::new(&config).unwrap(),
        chat: WhatsAppGateway::new(config.whatsapp_api_url, config.whatsapp_api_token),
        files: LocalFileStore::new(upload_dir.path()),
        code_ttl: chrono::Duration::minutes(15),
        operator_email: config.operator_email,
        operator_phone: config.operator_phone,
    };
    TestServer::new(build_router(state)).unwrap()
}

fn product_body() -> serde_json::Value {
    json!({ "name": "Napa 500mg", "price": "10.00" })
}

#[tokio::test]
async fn should_forbid_catalog_writes_for_standard_accounts() {
    let dir = tempfile::tempdir().unwrap();
    let server = server(&dir);

    let response = server
        .post("/products")
        .add_header(AUTHORIZATION, TestAuth::standard(Uuid::now_v7()).bearer())
        .json(&product_body())
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<serde_json::Value>()["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_reject_catalog_writes_without_token() {
    let dir = tempfile::tempdir().unwrap();

    server(&dir)
        .post("/products")
        .json(&product_body())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_forbid_chat_relay_for_standard_accounts() {
    let dir = tempfile::tempdir().unwrap();

    server(&dir)
        .post("/whatsapp/send")
        .add_header(AUTHORIZATION, TestAuth::standard(Uuid::now_v7()).bearer())
        .json(&json!({ "phone": "+8801700000001", "message": "hello" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_let_administrators_past_the_chat_relay_gate() {
    let dir = tempfile::tempdir().unwrap();

    let response = server(&dir)
        .post("/whatsapp/send")
        .add_header(AUTHORIZATION, TestAuth::administrator(Uuid::now_v7()).bearer())
        .json(&json!({ "phone": " ", "message": "hello" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<serde_json::Value>()["kind"], "MISSING_DATA");
}

#[tokio::test]
async fn should_reject_order_without_authorization_header() {
    let dir = tempfile::tempdir().unwrap();

    server(&dir)
        .post("/orders")
        .json(&json!({
            "items": [{ "product_id": 1, "quantity": 1 }],
            "total": "10.00",
            "address_id": Uuid::now_v7(),
        }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_profile_read_with_forged_token() {
    let dir = tempfile::tempdir().unwrap();
    let forged = format!("Bearer {}x", TestAuth::standard(Uuid::now_v7()).token());

    server(&dir)
        .get("/users/me")
        .add_header(AUTHORIZATION, forged.parse::<axum::http::HeaderValue>().unwrap())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

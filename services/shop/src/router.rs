use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use medicart_core::health::healthz;
use medicart_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    address::{create_address, delete_address, list_addresses, update_address},
    categories::{
        create_category, delete_category, get_category, list_categories, update_category,
        upload_category_image,
    },
    directory::directory_router,
    health::readyz,
    orders::{create_order, list_orders},
    products::{
        create_product, delete_product, get_product, list_products, list_products_by_category,
        search_products, update_product, upload_product_image,
    },
    users::{
        get_me, login, reset_password, send_reset_code, signup, update_profile, upload_photo,
        verify_email, verify_reset_code,
    },
    whatsapp::send_chat,
};
use crate::infra::storage::UPLOADS_PATH;
use crate::state::AppState;

/// Largest accepted request body (image uploads).
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.files.root());

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .route("/users/signup", post(signup))
        .route("/users/verify-email", post(verify_email))
        .route("/users/login", post(login))
        .route("/users/me", get(get_me))
        .route("/users/profile", post(update_profile))
        .route("/users/profile/photo", post(upload_photo))
        .route("/users/send-reset-code", post(send_reset_code))
        .route("/users/verify-reset-code", post(verify_reset_code))
        .route("/users/reset-password", post(reset_password))
        // Address book
        .route("/users/address", post(create_address).get(list_addresses))
        .route(
            "/users/address/{id}",
            put(update_address).delete(delete_address),
        )
        // Products
        .route("/products", get(list_products).post(create_product))
        .route("/products/search/name", get(search_products))
        .route("/products/category/{id}", get(list_products_by_category))
        .route("/products/upload", post(upload_product_image))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        // Categories
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/upload", post(upload_category_image))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        // Orders
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/addresses", get(list_addresses))
        // Chat relay
        .route("/whatsapp/send", post(send_chat))
        .with_state(state)
        .merge(directory_router())
        .nest_service(UPLOADS_PATH, uploads)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
}

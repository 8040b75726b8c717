use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use medicart_auth_types::identity::{BearerToken, Identity};

use crate::domain::types::{Order, RequestedItem};
use crate::error::ShopServiceError;
use crate::state::AppState;
use crate::usecase::order::{CreateOrderInput, CreateOrderUseCase, ListOrdersUseCase};

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub product_id: i32,
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub items: Vec<OrderItemResponse>,
    pub total: Decimal,
    pub division: String,
    pub district: String,
    pub city: String,
    pub address_line: String,
    pub recipient_name: String,
    pub phone: String,
    pub email: String,
    pub status: String,
    #[serde(serialize_with = "medicart_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        let s = o.shipping;
        Self {
            id: o.id,
            items: o
                .items
                .into_iter()
                .map(|i| OrderItemResponse {
                    product_id: i.product_id,
                    name: i.name,
                    quantity: i.quantity,
                    price: i.price,
                })
                .collect(),
            total: o.total,
            division: s.division,
            district: s.district,
            city: s.city,
            address_line: s.address_line,
            recipient_name: s.recipient_name,
            phone: s.phone,
            email: s.email,
            status: o.status,
            created_at: o.created_at,
        }
    }
}

// ── POST /orders ─────────────────────────────────────────────────────────────

/// Clients may still send `name` and `price` per item; both are ignored in
/// favor of the catalog.
#[derive(Deserialize)]
pub struct OrderItemRequest {
    #[serde(alias = "productId")]
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub total: Decimal,
    #[serde(alias = "addressId")]
    pub address_id: Uuid,
}

pub async fn create_order(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ShopServiceError> {
    let usecase = CreateOrderUseCase {
        accounts: state.account_repo(),
        addresses: state.address_repo(),
        products: state.product_repo(),
        orders: state.order_repo(),
        notifications: state.notifications.clone(),
        jwt_secret: state.jwt_secret.clone(),
        operator_email: state.operator_email.clone(),
        operator_phone: state.operator_phone.clone(),
    };
    let order = usecase
        .execute(
            &token,
            CreateOrderInput {
                items: body
                    .items
                    .into_iter()
                    .map(|i| RequestedItem {
                        product_id: i.product_id,
                        quantity: i.quantity,
                    })
                    .collect(),
                total: body.total,
                address_id: body.address_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

// ── GET /orders ──────────────────────────────────────────────────────────────

pub async fn list_orders(
    Identity(info): Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, ShopServiceError> {
    let usecase = ListOrdersUseCase {
        orders: state.order_repo(),
    };
    let orders = usecase.execute(info.account_id).await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use medicart_auth_types::identity::Identity;

use crate::domain::types::{Address, AddressFields, AddressPatch};
use crate::error::ShopServiceError;
use crate::state::AppState;
use crate::usecase::address::{
    CreateAddressUseCase, DeleteAddressUseCase, ListAddressesUseCase, UpdateAddressUseCase,
};

#[derive(Serialize)]
pub struct AddressResponse {
    pub id: Uuid,
    pub division: String,
    pub district: String,
    pub city: String,
    pub address_line: String,
    pub recipient_name: String,
    pub phone: String,
    pub email: String,
    #[serde(serialize_with = "medicart_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "medicart_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Address> for AddressResponse {
    fn from(a: Address) -> Self {
        Self {
            id: a.id,
            division: a.division,
            district: a.district,
            city: a.city,
            address_line: a.address_line,
            recipient_name: a.recipient_name,
            phone: a.phone,
            email: a.email,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

// ── POST /users/address ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateAddressRequest {
    pub division: String,
    pub district: String,
    pub city: String,
    #[serde(alias = "address")]
    pub address_line: String,
    #[serde(alias = "name")]
    pub recipient_name: String,
    pub phone: String,
    pub email: String,
}

pub async fn create_address(
    Identity(info): Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateAddressRequest>,
) -> Result<(StatusCode, Json<AddressResponse>), ShopServiceError> {
    let usecase = CreateAddressUseCase {
        repo: state.address_repo(),
    };
    let address = usecase
        .execute(
            info.account_id,
            AddressFields {
                division: body.division,
                district: body.district,
                city: body.city,
                address_line: body.address_line,
                recipient_name: body.recipient_name,
                phone: body.phone,
                email: body.email,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(address.into())))
}

// ── GET /users/address, GET /orders/addresses ────────────────────────────────

pub async fn list_addresses(
    Identity(info): Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<AddressResponse>>, ShopServiceError> {
    let usecase = ListAddressesUseCase {
        repo: state.address_repo(),
    };
    let addresses = usecase.execute(info.account_id).await?;
    Ok(Json(addresses.into_iter().map(Into::into).collect()))
}

// ── PUT /users/address/{id} ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateAddressRequest {
    pub division: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    #[serde(alias = "address")]
    pub address_line: Option<String>,
    #[serde(alias = "name")]
    pub recipient_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

pub async fn update_address(
    Identity(info): Identity,
    State(state): State<AppState>,
    Path(address_id): Path<Uuid>,
    Json(body): Json<UpdateAddressRequest>,
) -> Result<Json<AddressResponse>, ShopServiceError> {
    let usecase = UpdateAddressUseCase {
        repo: state.address_repo(),
    };
    let address = usecase
        .execute(
            info.account_id,
            address_id,
            AddressPatch {
                division: body.division,
                district: body.district,
                city: body.city,
                address_line: body.address_line,
                recipient_name: body.recipient_name,
                phone: body.phone,
                email: body.email,
            },
        )
        .await?;
    Ok(Json(address.into()))
}

// ── DELETE /users/address/{id} ───────────────────────────────────────────────

pub async fn delete_address(
    Identity(info): Identity,
    State(state): State<AppState>,
    Path(address_id): Path<Uuid>,
) -> Result<StatusCode, ShopServiceError> {
    let usecase = DeleteAddressUseCase {
        repo: state.address_repo(),
    };
    usecase.execute(info.account_id, address_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

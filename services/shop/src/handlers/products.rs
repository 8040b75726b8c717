use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use medicart_auth_types::identity::Identity;
use medicart_domain::pagination::PageRequest;

use crate::domain::types::{NewProduct, Product, ProductPatch};
use crate::error::ShopServiceError;
use crate::handlers::require_administrator;
use crate::handlers::upload::read_image_form;
use crate::handlers::users::UploadResponse;
use crate::state::AppState;
use crate::usecase::catalog::{
    CreateProductUseCase, DeleteProductUseCase, GetProductUseCase, ListProductsByCategoryUseCase,
    ListProductsUseCase, SearchProductsUseCase, UpdateProductUseCase, UploadImageUseCase,
};

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image: Option<String>,
    pub category_id: Option<i32>,
    #[serde(serialize_with = "medicart_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "medicart_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            image: p.image,
            category_id: p.category_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

fn respond(products: Vec<Product>) -> Json<Vec<ProductResponse>> {
    Json(products.into_iter().map(Into::into).collect())
}

// ── GET /products ────────────────────────────────────────────────────────────

pub async fn list_products(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<ProductResponse>>, ShopServiceError> {
    let usecase = ListProductsUseCase {
        products: state.product_repo(),
    };
    Ok(respond(usecase.execute(page).await?))
}

// ── GET /products/{id} ───────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>, ShopServiceError> {
    let usecase = GetProductUseCase {
        products: state.product_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── GET /products/search/name?name= ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub name: String,
}

pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ProductResponse>>, ShopServiceError> {
    let usecase = SearchProductsUseCase {
        products: state.product_repo(),
    };
    Ok(respond(usecase.execute(&query.name).await?))
}

// ── GET /products/category/{id} ──────────────────────────────────────────────

pub async fn list_products_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<Json<Vec<ProductResponse>>, ShopServiceError> {
    let usecase = ListProductsByCategoryUseCase {
        categories: state.category_repo(),
        products: state.product_repo(),
    };
    Ok(respond(usecase.execute(category_id).await?))
}

// ── POST /products ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image: Option<String>,
    pub category_id: Option<i32>,
}

pub async fn create_product(
    Identity(info): Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ShopServiceError> {
    require_administrator(&info)?;
    let usecase = CreateProductUseCase {
        categories: state.category_repo(),
        products: state.product_repo(),
    };
    let product = usecase
        .execute(NewProduct {
            name: body.name,
            description: body.description,
            price: body.price,
            image: body.image,
            category_id: body.category_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

// ── PUT /products/{id} ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub category_id: Option<i32>,
}

pub async fn update_product(
    Identity(info): Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, ShopServiceError> {
    require_administrator(&info)?;
    let usecase = UpdateProductUseCase {
        categories: state.category_repo(),
        products: state.product_repo(),
    };
    let product = usecase
        .execute(
            id,
            ProductPatch {
                name: body.name,
                description: body.description,
                price: body.price,
                image: body.image,
                category_id: body.category_id,
            },
        )
        .await?;
    Ok(Json(product.into()))
}

// ── DELETE /products/{id} ────────────────────────────────────────────────────

pub async fn delete_product(
    Identity(info): Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ShopServiceError> {
    require_administrator(&info)?;
    let usecase = DeleteProductUseCase {
        products: state.product_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /products/upload ────────────────────────────────────────────────────

/// Store a product image. With an `id` part the product's image is replaced.
pub async fn upload_product_image(
    Identity(info): Identity,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ShopServiceError> {
    require_administrator(&info)?;
    let form = read_image_form(multipart).await?;
    let usecase = UploadImageUseCase {
        files: state.files.clone(),
    };
    let url = usecase.execute(&form.file_name, form.bytes).await?;

    if let Some(id) = form.id {
        let attach = UpdateProductUseCase {
            categories: state.category_repo(),
            products: state.product_repo(),
        };
        attach
            .execute(
                id,
                ProductPatch {
                    image: Some(url.clone()),
                    ..Default::default()
                },
            )
            .await?;
    }
    Ok(Json(UploadResponse { url }))
}

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use medicart_auth_types::identity::Identity;

use crate::domain::types::{Category, CategoryPatch, NewCategory};
use crate::error::ShopServiceError;
use crate::handlers::require_administrator;
use crate::handlers::upload::read_image_form;
use crate::handlers::users::UploadResponse;
use crate::state::AppState;
use crate::usecase::catalog::{
    CreateCategoryUseCase, DeleteCategoryUseCase, GetCategoryUseCase, ListCategoriesUseCase,
    UpdateCategoryUseCase, UploadImageUseCase,
};

#[derive(Serialize)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(serialize_with = "medicart_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            image: c.image,
            created_at: c.created_at,
        }
    }
}

// ── GET /categories ──────────────────────────────────────────────────────────

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ShopServiceError> {
    let usecase = ListCategoriesUseCase {
        categories: state.category_repo(),
    };
    let categories = usecase.execute().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

// ── GET /categories/{id} ─────────────────────────────────────────────────────

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CategoryResponse>, ShopServiceError> {
    let usecase = GetCategoryUseCase {
        categories: state.category_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /categories ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

pub async fn create_category(
    Identity(info): Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ShopServiceError> {
    require_administrator(&info)?;
    let usecase = CreateCategoryUseCase {
        categories: state.category_repo(),
    };
    let category = usecase
        .execute(NewCategory {
            name: body.name,
            description: body.description,
            image: body.image,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

// ── PUT /categories/{id} ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

pub async fn update_category(
    Identity(info): Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, ShopServiceError> {
    require_administrator(&info)?;
    let usecase = UpdateCategoryUseCase {
        categories: state.category_repo(),
    };
    let category = usecase
        .execute(
            id,
            CategoryPatch {
                name: body.name,
                description: body.description,
                image: body.image,
            },
        )
        .await?;
    Ok(Json(category.into()))
}

// ── DELETE /categories/{id} ──────────────────────────────────────────────────

pub async fn delete_category(
    Identity(info): Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ShopServiceError> {
    require_administrator(&info)?;
    let usecase = DeleteCategoryUseCase {
        categories: state.category_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /categories/upload ──────────────────────────────────────────────────

pub async fn upload_category_image(
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
        let attach = UpdateCategoryUseCase {
            categories: state.category_repo(),
        };
        attach
            .execute(
                id,
                CategoryPatch {
                    image: Some(url.clone()),
                    ..Default::default()
                },
            )
            .await?;
    }
    Ok(Json(UploadResponse { url }))
}

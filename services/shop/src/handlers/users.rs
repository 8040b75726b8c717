use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use medicart_auth_types::identity::Identity;

use crate::domain::types::{Account, ProfilePatch};
use crate::error::ShopServiceError;
use crate::handlers::upload::read_image_form;
use crate::state::AppState;
use crate::usecase::account::{
    GetAccountUseCase, LoginInput, LoginUseCase, SignupInput, SignupUseCase, UpdateProfileUseCase,
    UploadPhotoUseCase, VerifyEmailInput, VerifyEmailUseCase,
};
use crate::usecase::password_reset::{
    ResetPasswordInput, ResetPasswordUseCase, SendResetCodeUseCase, VerifyResetCodeUseCase,
};

#[derive(Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_verified: bool,
    pub picture: Option<String>,
    pub gender: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub role: u8,
    #[serde(serialize_with = "medicart_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "medicart_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            name: a.name,
            email: a.email,
            phone: a.phone,
            is_verified: a.is_verified,
            picture: a.picture,
            gender: a.gender,
            birthdate: a.birthdate,
            role: a.role.as_u8(),
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ── POST /users/signup ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ShopServiceError> {
    let usecase = SignupUseCase {
        accounts: state.account_repo(),
        pending: state.pending_repo(),
        mailer: state.mailer.clone(),
        codes: state.codes(),
        code_ttl: state.code_ttl,
    };
    usecase
        .execute(SignupInput {
            name: body.name,
            email: body.email,
            password: body.password,
            phone: body.phone,
        })
        .await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse {
            message: "verification code sent",
        }),
    ))
}

// ── POST /users/verify-email ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

pub async fn verify_email(
    State(state): State<AppState>,
    Json(body): Json<VerifyEmailRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ShopServiceError> {
    let usecase = VerifyEmailUseCase {
        pending: state.pending_repo(),
    };
    let account = usecase
        .execute(VerifyEmailInput {
            email: body.email,
            code: body.code,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

// ── POST /users/login ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_exp: u64,
    pub account: AccountResponse,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ShopServiceError> {
    let usecase = LoginUseCase {
        accounts: state.account_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(LoginResponse {
        token: out.token,
        token_exp: out.token_exp,
        account: out.account.into(),
    }))
}

// ── GET /users/me ────────────────────────────────────────────────────────────

pub async fn get_me(
    Identity(info): Identity,
    State(state): State<AppState>,
) -> Result<Json<AccountResponse>, ShopServiceError> {
    let usecase = GetAccountUseCase {
        accounts: state.account_repo(),
    };
    let account = usecase.execute(info.account_id).await?;
    Ok(Json(account.into()))
}

// ── POST /users/profile ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub birthdate: Option<NaiveDate>,
}

pub async fn update_profile(
    Identity(info): Identity,
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<AccountResponse>, ShopServiceError> {
    let usecase = UpdateProfileUseCase {
        accounts: state.account_repo(),
    };
    let account = usecase
        .execute(
            info.account_id,
            ProfilePatch {
                name: body.name,
                phone: body.phone,
                gender: body.gender,
                birthdate: body.birthdate,
            },
        )
        .await?;
    Ok(Json(account.into()))
}

// ── POST /users/profile/photo ────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UploadResponse {
    pub url: String,
}

pub async fn upload_photo(
    Identity(info): Identity,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ShopServiceError> {
    let form = read_image_form(multipart).await?;
    let usecase = UploadPhotoUseCase {
        accounts: state.account_repo(),
        files: state.files.clone(),
    };
    let url = usecase
        .execute(info.account_id, &form.file_name, form.bytes)
        .await?;
    Ok(Json(UploadResponse { url }))
}

// ── POST /users/send-reset-code ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendResetCodeRequest {
    pub email: String,
}

pub async fn send_reset_code(
    State(state): State<AppState>,
    Json(body): Json<SendResetCodeRequest>,
) -> Result<Json<MessageResponse>, ShopServiceError> {
    let usecase = SendResetCodeUseCase {
        accounts: state.account_repo(),
        mailer: state.mailer.clone(),
        codes: state.codes(),
    };
    usecase.execute(&body.email).await?;
    Ok(Json(MessageResponse {
        message: "reset code sent",
    }))
}

// ── POST /users/verify-reset-code ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyResetCodeRequest {
    pub email: String,
    pub code: String,
}

pub async fn verify_reset_code(
    State(state): State<AppState>,
    Json(body): Json<VerifyResetCodeRequest>,
) -> Result<Json<MessageResponse>, ShopServiceError> {
    let usecase = VerifyResetCodeUseCase {
        accounts: state.account_repo(),
    };
    usecase.execute(&body.email, &body.code).await?;
    Ok(Json(MessageResponse {
        message: "reset code accepted",
    }))
}

// ── POST /users/reset-password ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    #[serde(alias = "newPassword")]
    pub new_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ShopServiceError> {
    let usecase = ResetPasswordUseCase {
        accounts: state.account_repo(),
    };
    usecase
        .execute(ResetPasswordInput {
            email: body.email,
            code: body.code,
            new_password: body.new_password,
        })
        .await?;
    Ok(Json(MessageResponse {
        message: "password updated",
    }))
}

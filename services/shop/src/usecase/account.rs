use bytes::Bytes;
use chrono::{Duration, Utc};
use uuid::Uuid;

use medicart_auth_types::token::issue_access_token;
use medicart_domain::role::AccountRole;

use crate::domain::repository::{
    AccountRepository, CodeGenerator, FileStore, Mailer, PendingRegistrationRepository,
};
use crate::domain::types::{
    Account, PendingRegistration, ProfilePatch, is_strong_enough, normalize_email,
};
use crate::error::ShopServiceError;
use crate::infra::password::{hash_password, verify_password};
use crate::infra::storage::image_extension;

// ── Signup ───────────────────────────────────────────────────────────────────

pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

pub struct SignupUseCase<A, P, M, G>
where
    A: AccountRepository,
    P: PendingRegistrationRepository,
    M: Mailer,
    G: CodeGenerator,
{
    pub accounts: A,
    pub pending: P,
    pub mailer: M,
    pub codes: G,
    pub code_ttl: Duration,
}

impl<A, P, M, G> SignupUseCase<A, P, M, G>
where
    A: AccountRepository,
    P: PendingRegistrationRepository,
    M: Mailer,
    G: CodeGenerator,
{
    /// Park the signup as pending and email a verification code.
    ///
    /// A repeat signup for the same email replaces the pending entry and its
    /// code. If the code cannot be emailed the entry is removed again.
    pub async fn execute(&self, input: SignupInput) -> Result<(), ShopServiceError> {
        if !is_strong_enough(&input.password) {
            return Err(ShopServiceError::WeakPassword);
        }
        let email = normalize_email(&input.email);
        if self.accounts.find_by_email(&email).await?.is_some() {
            return Err(ShopServiceError::EmailTaken);
        }

        let now = Utc::now();
        let pending = PendingRegistration {
            email: email.clone(),
            name: input.name,
            password_hash: hash_password(&input.password)?,
            phone: input.phone,
            code: self.codes.next_code(),
            expires_at: now + self.code_ttl,
            created_at: now,
        };
        self.pending.upsert(&pending).await?;

        let body = format!(
            "Your Medicart verification code is {}. It expires in {} minutes.",
            pending.code,
            self.code_ttl.num_minutes()
        );
        if let Err(e) = self
            .mailer
            .send(&email, "Verify your Medicart account", &body)
            .await
        {
            tracing::warn!(email = %email, error = %e, "verification email failed");
            self.pending.delete(&email).await?;
            return Err(ShopServiceError::EmailDeliveryFailed);
        }
        tracing::info!(email = %email, "signup pending verification");
        Ok(())
    }
}

// ── VerifyEmail ──────────────────────────────────────────────────────────────

pub struct VerifyEmailInput {
    pub email: String,
    pub code: String,
}

pub struct VerifyEmailUseCase<P: PendingRegistrationRepository> {
    pub pending: P,
}

impl<P: PendingRegistrationRepository> VerifyEmailUseCase<P> {
    /// Turn a pending signup into a verified account. The code is single use.
    pub async fn execute(&self, input: VerifyEmailInput) -> Result<Account, ShopServiceError> {
        let email = normalize_email(&input.email);
        let now = Utc::now();
        let pending = self
            .pending
            .find(&email)
            .await?
            .filter(|p| p.accepts(&input.code, now))
            .ok_or(ShopServiceError::InvalidVerificationCode)?;

        let account = Account {
            id: Uuid::now_v7(),
            name: pending.name,
            email: pending.email,
            password_hash: pending.password_hash,
            phone: pending.phone,
            is_verified: true,
            picture: None,
            gender: None,
            birthdate: None,
            role: AccountRole::Standard,
            reset_code: None,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        // A concurrent verify may have consumed the entry since the lookup.
        if !self.pending.promote(&email, &input.code, &account).await? {
            return Err(ShopServiceError::InvalidVerificationCode);
        }
        tracing::info!(account_id = %account.id, "account verified");
        Ok(account)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub account: Account,
    pub token: String,
    pub token_exp: u64,
}

pub struct LoginUseCase<A: AccountRepository> {
    pub accounts: A,
    pub jwt_secret: String,
}

impl<A: AccountRepository> LoginUseCase<A> {
    /// Unknown email, unverified account and wrong password are indistinguishable.
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ShopServiceError> {
        let email = normalize_email(&input.email);
        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .filter(|a| a.is_verified)
            .ok_or(ShopServiceError::InvalidCredentials)?;
        if !verify_password(&input.password, &account.password_hash) {
            return Err(ShopServiceError::InvalidCredentials);
        }

        let (token, token_exp) =
            issue_access_token(account.id, &account.email, account.role, &self.jwt_secret)
                .map_err(|e| ShopServiceError::Internal(e.into()))?;
        Ok(LoginOutput {
            account,
            token,
            token_exp,
        })
    }
}

// ── GetAccount ───────────────────────────────────────────────────────────────

pub struct GetAccountUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> GetAccountUseCase<A> {
    pub async fn execute(&self, account_id: Uuid) -> Result<Account, ShopServiceError> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or(ShopServiceError::AccountNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> UpdateProfileUseCase<A> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        patch: ProfilePatch,
    ) -> Result<Account, ShopServiceError> {
        if patch.is_empty() {
            return Err(ShopServiceError::MissingData);
        }
        let current = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(ShopServiceError::AccountNotFound)?;
        if !self
            .accounts
            .update_profile(account_id, current.version, &patch)
            .await?
        {
            return Err(ShopServiceError::StaleWrite);
        }
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or(ShopServiceError::AccountNotFound)
    }
}

// ── UploadPhoto ──────────────────────────────────────────────────────────────

pub struct UploadPhotoUseCase<A: AccountRepository, F: FileStore> {
    pub accounts: A,
    pub files: F,
}

impl<A: AccountRepository, F: FileStore> UploadPhotoUseCase<A, F> {
    /// Store the image and point the profile picture at it. Returns the URL.
    pub async fn execute(
        &self,
        account_id: Uuid,
        file_name: &str,
        bytes: Bytes,
    ) -> Result<String, ShopServiceError> {
        let extension = image_extension(file_name).ok_or(ShopServiceError::InvalidUpload)?;
        if bytes.is_empty() {
            return Err(ShopServiceError::InvalidUpload);
        }
        if self.accounts.find_by_id(account_id).await?.is_none() {
            return Err(ShopServiceError::AccountNotFound);
        }
        let url = self
            .files
            .store(&extension, bytes)
            .await
            .map_err(|e| ShopServiceError::Internal(e.into()))?;
        self.accounts.set_picture(account_id, &url).await?;
        Ok(url)
    }
}

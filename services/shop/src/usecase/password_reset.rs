use crate::domain::repository::{AccountRepository, CodeGenerator, Mailer};
use crate::domain::types::{is_strong_enough, normalize_email};
use crate::error::ShopServiceError;
use crate::infra::password::hash_password;

/// Attempts at drawing a reset code no other account holds.
const MAX_CODE_ATTEMPTS: usize = 5;

// ── SendResetCode ────────────────────────────────────────────────────────────

pub struct SendResetCodeUseCase<A: AccountRepository, M: Mailer, G: CodeGenerator> {
    pub accounts: A,
    pub mailer: M,
    pub codes: G,
}

impl<A: AccountRepository, M: Mailer, G: CodeGenerator> SendResetCodeUseCase<A, M, G> {
    /// Store a fresh reset code on the account (replacing any previous one)
    /// and email it. No two accounts ever hold the same outstanding code.
    pub async fn execute(&self, email: &str) -> Result<(), ShopServiceError> {
        let email = normalize_email(email);
        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(ShopServiceError::AccountNotFound)?;

        // The unique key on reset codes arbitrates concurrent draws.
        let mut code = None;
        for _ in 0..MAX_CODE_ATTEMPTS {
            let candidate = self.codes.next_code();
            if self.accounts.set_reset_code(account.id, &candidate).await? {
                code = Some(candidate);
                break;
            }
            tracing::debug!("reset code collision, regenerating");
        }
        let code = code.ok_or_else(|| {
            ShopServiceError::Internal(anyhow::anyhow!(
                "no free reset code after {MAX_CODE_ATTEMPTS} attempts"
            ))
        })?;

        let body = format!("Your Medicart password reset code is {code}.");
        if let Err(e) = self
            .mailer
            .send(&account.email, "Reset your Medicart password", &body)
            .await
        {
            tracing::warn!(account_id = %account.id, error = %e, "reset code email failed");
            return Err(ShopServiceError::EmailDeliveryFailed);
        }
        Ok(())
    }
}

// ── VerifyResetCode ──────────────────────────────────────────────────────────

pub struct VerifyResetCodeUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> VerifyResetCodeUseCase<A> {
    pub async fn execute(&self, email: &str, code: &str) -> Result<(), ShopServiceError> {
        let email = normalize_email(email);
        let holds_code = self
            .accounts
            .find_by_email(&email)
            .await?
            .is_some_and(|a| a.reset_code.as_deref() == Some(code));
        if holds_code {
            Ok(())
        } else {
            Err(ShopServiceError::InvalidResetCode)
        }
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

pub struct ResetPasswordUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> ResetPasswordUseCase<A> {
    /// Requires both email and code. The code is cleared on success.
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), ShopServiceError> {
        let email = normalize_email(&input.email);
        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .filter(|a| a.reset_code.as_deref() == Some(input.code.as_str()))
            .ok_or(ShopServiceError::InvalidResetCode)?;
        if !is_strong_enough(&input.new_password) {
            return Err(ShopServiceError::WeakPassword);
        }

        let hash = hash_password(&input.new_password)?;
        if !self
            .accounts
            .reset_password(account.id, &input.code, &hash)
            .await?
        {
            return Err(ShopServiceError::InvalidResetCode);
        }
        tracing::info!(account_id = %account.id, "password reset");
        Ok(())
    }
}

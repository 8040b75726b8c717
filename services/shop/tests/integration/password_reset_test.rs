use medicart_shop::error::ShopServiceError;
use medicart_shop::infra::password::verify_password;
use medicart_shop::usecase::password_reset::{
    ResetPasswordInput, ResetPasswordUseCase, SendResetCodeUseCase, VerifyResetCodeUseCase,
};

use crate::helpers::{MemAccounts, RecordingMailer, ScriptedCodes, TEST_PASSWORD, test_account};

fn reset_input(email: &str, code: &str, new_password: &str) -> ResetPasswordInput {
    ResetPasswordInput {
        email: email.to_owned(),
        code: code.to_owned(),
        new_password: new_password.to_owned(),
    }
}

// ── SendResetCode ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_store_and_email_reset_code() {
    let account = test_account("rahim@example.com");
    let accounts = MemAccounts::with(vec![account.clone()]);
    let mailer = RecordingMailer::default();

    SendResetCodeUseCase {
        accounts: accounts.clone(),
        mailer: mailer.clone(),
        codes: ScriptedCodes::new(&["314159"]),
    }
    .execute("Rahim@example.com")
    .await
    .unwrap();

    assert_eq!(accounts.get(account.id).unwrap().reset_code.as_deref(), Some("314159"));
    let sent = mailer.sent_handle();
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "rahim@example.com");
    assert!(sent[0].body.contains("314159"));
}

#[tokio::test]
async fn should_regenerate_code_held_by_another_account() {
    let mut other = test_account("other@example.com");
    other.reset_code = Some("111111".to_owned());
    let account = test_account("rahim@example.com");
    let accounts = MemAccounts::with(vec![other.clone(), account.clone()]);

    SendResetCodeUseCase {
        accounts: accounts.clone(),
        mailer: RecordingMailer::default(),
        codes: ScriptedCodes::new(&["111111", "222222"]),
    }
    .execute("rahim@example.com")
    .await
    .unwrap();

    assert_eq!(accounts.get(account.id).unwrap().reset_code.as_deref(), Some("222222"));
    assert_eq!(accounts.get(other.id).unwrap().reset_code.as_deref(), Some("111111"));
}

#[tokio::test]
async fn should_settle_concurrent_draws_of_the_same_code() {
    let first = test_account("first@example.com");
    let second = test_account("second@example.com");
    let accounts = MemAccounts::with(vec![first.clone(), second.clone()]);
    let send = |codes| SendResetCodeUseCase {
        accounts: accounts.clone(),
        mailer: RecordingMailer::default(),
        codes,
    };
    let a = send(ScriptedCodes::new(&["123456", "654321"]));
    let b = send(ScriptedCodes::new(&["123456", "654321"]));

    let (ra, rb) = tokio::join!(a.execute("first@example.com"), b.execute("second@example.com"));
    ra.unwrap();
    rb.unwrap();

    let mut held = vec![
        accounts.get(first.id).unwrap().reset_code.unwrap(),
        accounts.get(second.id).unwrap().reset_code.unwrap(),
    ];
    held.sort();
    assert_eq!(held, vec!["123456", "654321"]);
}

#[tokio::test]
async fn should_give_up_after_repeated_collisions() {
    let mut other = test_account("other@example.com");
    other.reset_code = Some("111111".to_owned());
    let account = test_account("rahim@example.com");
    let mailer = RecordingMailer::default();

    let result = SendResetCodeUseCase {
        accounts: MemAccounts::with(vec![other, account]),
        mailer: mailer.clone(),
        codes: ScriptedCodes::new(&["111111"]),
    }
    .execute("rahim@example.com")
    .await;

    assert!(matches!(result, Err(ShopServiceError::Internal(_))));
    assert!(mailer.sent_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_reset_code_for_unknown_email() {
    let result = SendResetCodeUseCase {
        accounts: MemAccounts::default(),
        mailer: RecordingMailer::default(),
        codes: ScriptedCodes::new(&["123456"]),
    }
    .execute("nobody@example.com")
    .await;

    assert!(matches!(result, Err(ShopServiceError::AccountNotFound)));
}

#[tokio::test]
async fn should_report_reset_email_failure() {
    let account = test_account("rahim@example.com");
    let result = SendResetCodeUseCase {
        accounts: MemAccounts::with(vec![account]),
        mailer: RecordingMailer::failing(),
        codes: ScriptedCodes::new(&["123456"]),
    }
    .execute("rahim@example.com")
    .await;

    assert!(matches!(result, Err(ShopServiceError::EmailDeliveryFailed)));
}

// ── VerifyResetCode ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_verify_reset_code_only_for_its_account() {
    let mut account = test_account("rahim@example.com");
    account.reset_code = Some("271828".to_owned());
    let usecase = VerifyResetCodeUseCase {
        accounts: MemAccounts::with(vec![account, test_account("other@example.com")]),
    };

    assert!(usecase.execute("rahim@example.com", "271828").await.is_ok());
    assert!(matches!(
        usecase.execute("other@example.com", "271828").await,
        Err(ShopServiceError::InvalidResetCode)
    ));
    assert!(matches!(
        usecase.execute("rahim@example.com", "000000").await,
        Err(ShopServiceError::InvalidResetCode)
    ));
}

// ── ResetPassword ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reset_password_once_per_code() {
    let mut account = test_account("rahim@example.com");
    account.reset_code = Some("271828".to_owned());
    let accounts = MemAccounts::with(vec![account.clone()]);
    let usecase = ResetPasswordUseCase {
        accounts: accounts.clone(),
    };

    usecase
        .execute(reset_input("rahim@example.com", "271828", "brand-new"))
        .await
        .unwrap();

    let stored = accounts.get(account.id).unwrap();
    assert!(stored.reset_code.is_none());
    assert!(verify_password("brand-new", &stored.password_hash));
    assert!(!verify_password(TEST_PASSWORD, &stored.password_hash));

    let again = usecase
        .execute(reset_input("rahim@example.com", "271828", "another-one"))
        .await;
    assert!(matches!(again, Err(ShopServiceError::InvalidResetCode)));
}

#[tokio::test]
async fn should_reject_weak_new_password_and_keep_code() {
    let mut account = test_account("rahim@example.com");
    account.reset_code = Some("271828".to_owned());
    let accounts = MemAccounts::with(vec![account.clone()]);

    let result = ResetPasswordUseCase {
        accounts: accounts.clone(),
    }
    .execute(reset_input("rahim@example.com", "271828", "short"))
    .await;

    assert!(matches!(result, Err(ShopServiceError::WeakPassword)));
    assert_eq!(accounts.get(account.id).unwrap().reset_code.as_deref(), Some("271828"));
}

#[tokio::test]
async fn should_reject_code_presented_with_another_email() {
    let mut account = test_account("rahim@example.com");
    account.reset_code = Some("271828".to_owned());
    let accounts = MemAccounts::with(vec![account, test_account("other@example.com")]);

    let result = ResetPasswordUseCase { accounts }
        .execute(reset_input("other@example.com", "271828", "brand-new"))
        .await;

    assert!(matches!(result, Err(ShopServiceError::InvalidResetCode)));
}

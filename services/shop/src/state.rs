use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use medicart_auth_types::identity::JwtSecret;

use crate::infra::chat::WhatsAppGateway;
use crate::infra::codes::RandomCodeGenerator;
use crate::infra::db::{
    DbAccountRepository, DbAddressRepository, DbCategoryRepository, DbOrderRepository,
    DbPendingRegistrationRepository, DbProductRepository,
};
use crate::infra::mail::SmtpMailer;
use crate::infra::notify::NotificationQueue;
use crate::infra::storage::LocalFileStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub notifications: NotificationQueue,
    pub mailer: SmtpMailer,
    pub chat: WhatsAppGateway,
    pub files: LocalFileStore,
    pub code_ttl: chrono::Duration,
    pub operator_email: String,
    pub operator_phone: String,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn pending_repo(&self) -> DbPendingRegistrationRepository {
        DbPendingRegistrationRepository {
            db: self.db.clone(),
        }
    }

    pub fn address_repo(&self) -> DbAddressRepository {
        DbAddressRepository {
            db: self.db.clone(),
        }
    }

    pub fn category_repo(&self) -> DbCategoryRepository {
        DbCategoryRepository {
            db: self.db.clone(),
        }
    }

    pub fn product_repo(&self) -> DbProductRepository {
        DbProductRepository {
            db: self.db.clone(),
        }
    }

    pub fn order_repo(&self) -> DbOrderRepository {
        DbOrderRepository {
            db: self.db.clone(),
        }
    }

    pub fn codes(&self) -> RandomCodeGenerator {
        RandomCodeGenerator
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        JwtSecret(state.jwt_secret.clone())
    }
}

#![allow(async_fn_in_trait)]

use std::future::Future;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use medicart_domain::pagination::PageRequest;

use crate::domain::types::{
    Account, Address, Category, CategoryPatch, NewCategory, NewProduct, Notification, Order,
    PendingRegistration, Product, ProductPatch, ProfilePatch,
};
use crate::error::{IntegrationError, ShopServiceError};

/// Repository for verified accounts.
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, ShopServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ShopServiceError>;

    /// Apply a profile patch if the stored version still equals `expected_version`.
    /// Returns `false` when another write got there first.
    async fn update_profile(
        &self,
        id: Uuid,
        expected_version: i32,
        patch: &ProfilePatch,
    ) -> Result<bool, ShopServiceError>;

    async fn set_picture(&self, id: Uuid, url: &str) -> Result<(), ShopServiceError>;

    /// Store a reset code, replacing any previous one. Returns `false`,
    /// storing nothing, when another account already holds `code`.
    async fn set_reset_code(&self, id: Uuid, code: &str) -> Result<bool, ShopServiceError>;

    /// Replace the password hash and clear the reset code, only while the
    /// account still holds `code`. Returns `false` if the code was not held.
    async fn reset_password(
        &self,
        id: Uuid,
        code: &str,
        password_hash: &str,
    ) -> Result<bool, ShopServiceError>;
}

/// Repository for signups awaiting verification.
pub trait PendingRegistrationRepository: Send + Sync {
    /// Insert or replace the entry for the email.
    async fn upsert(&self, pending: &PendingRegistration) -> Result<(), ShopServiceError>;

    async fn find(&self, email: &str) -> Result<Option<PendingRegistration>, ShopServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, email: &str) -> Result<bool, ShopServiceError>;

    /// Atomically consume the unexpired entry matching (email, code) and insert
    /// `account`. Returns `false`, inserting nothing, when no such entry exists.
    async fn promote(
        &self,
        email: &str,
        code: &str,
        account: &Account,
    ) -> Result<bool, ShopServiceError>;

    /// Delete entries expired at `now`. Returns the number removed.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, ShopServiceError>;
}

/// Repository for address-book entries. Every lookup is scoped to the owner.
pub trait AddressRepository: Send + Sync {
    async fn create(&self, address: &Address) -> Result<(), ShopServiceError>;

    async fn find_owned(
        &self,
        account_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Address>, ShopServiceError>;

    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Address>, ShopServiceError>;

    /// Overwrite the stored row with `address` if its version still equals
    /// `address.version`, bumping the version. Returns `false` on a lost race.
    async fn update(&self, address: &Address) -> Result<bool, ShopServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete_owned(&self, account_id: Uuid, id: Uuid) -> Result<bool, ShopServiceError>;
}

pub trait CategoryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Category>, ShopServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, ShopServiceError>;
    async fn create(&self, category: &NewCategory) -> Result<Category, ShopServiceError>;

    /// Returns `None` if the category does not exist.
    async fn update(
        &self,
        id: i32,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, ShopServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, ShopServiceError>;
}

pub trait ProductRepository: Send + Sync {
    async fn list(&self, page: PageRequest) -> Result<Vec<Product>, ShopServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ShopServiceError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, ShopServiceError>;

    /// Case-insensitive substring match on the product name.
    async fn search_by_name(&self, name: &str) -> Result<Vec<Product>, ShopServiceError>;

    async fn list_by_category(&self, category_id: i32) -> Result<Vec<Product>, ShopServiceError>;
    async fn create(&self, product: &NewProduct) -> Result<Product, ShopServiceError>;

    /// Returns `None` if the product does not exist.
    async fn update(
        &self,
        id: i32,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, ShopServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, ShopServiceError>;
}

pub trait OrderRepository: Send + Sync {
    /// Persist the order and its items in one transaction.
    async fn create(&self, order: &Order) -> Result<(), ShopServiceError>;

    /// The account's orders, newest first.
    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Order>, ShopServiceError>;
}

// ── Outbound ports ───────────────────────────────────────────────────────────
//
// Mail and chat transports are driven from spawned dispatcher tasks, so their
// futures must be `Send`.

pub trait Mailer: Send + Sync + 'static {
    fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> impl Future<Output = Result<(), IntegrationError>> + Send;
}

pub trait ChatGateway: Send + Sync + 'static {
    fn send(
        &self,
        phone: &str,
        text: &str,
    ) -> impl Future<Output = Result<(), IntegrationError>> + Send;
}

/// Stores uploaded files and returns the public URL they are served at.
pub trait FileStore: Send + Sync {
    async fn store(&self, extension: &str, bytes: Bytes) -> Result<String, IntegrationError>;
}

/// Best-effort outbox. Enqueueing never fails and never blocks.
pub trait NotificationPort: Send + Sync {
    fn enqueue(&self, notification: Notification);
}

/// Source of 6-digit one-time codes.
pub trait CodeGenerator: Send + Sync {
    fn next_code(&self) -> String;
}

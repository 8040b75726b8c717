use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use medicart_domain::role::AccountRole;

/// Initial (and only) status an order is created with.
pub const ORDER_STATUS_PROCESSING: &str = "Processing";

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Largest value a `NUMERIC(12,2)` money column holds.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Largest quantity accepted on one order line.
pub const MAX_QUANTITY: i32 = 10_000;

/// Verified account.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub is_verified: bool,
    pub picture: Option<String>,
    pub gender: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub role: AccountRole,
    pub reset_code: Option<String>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Signup awaiting proof of email ownership.
#[derive(Debug, Clone)]
pub struct PendingRegistration {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub phone: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl PendingRegistration {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Exact code match on an unexpired entry.
    pub fn accepts(&self, code: &str, now: DateTime<Utc>) -> bool {
        !self.is_expired(now) && self.code == code
    }
}

/// Partial profile update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub birthdate: Option<NaiveDate>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.gender.is_none()
            && self.birthdate.is_none()
    }
}

/// Shipping destination owned by one account.
#[derive(Debug, Clone)]
pub struct Address {
    pub id: Uuid,
    pub account_id: Uuid,
    pub division: String,
    pub district: String,
    pub city: String,
    pub address_line: String,
    pub recipient_name: String,
    pub phone: String,
    pub email: String,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating an address.
#[derive(Debug, Clone)]
pub struct AddressFields {
    pub division: String,
    pub district: String,
    pub city: String,
    pub address_line: String,
    pub recipient_name: String,
    pub phone: String,
    pub email: String,
}

/// Partial address update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct AddressPatch {
    pub division: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub address_line: Option<String>,
    pub recipient_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl AddressPatch {
    pub fn is_empty(&self) -> bool {
        !self.touches_location()
            && self.address_line.is_none()
            && self.recipient_name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
    }

    /// Whether any of division, district or city is supplied.
    pub fn touches_location(&self) -> bool {
        self.division.is_some() || self.district.is_some() || self.city.is_some()
    }
}

impl Address {
    /// The address with every supplied patch field overwritten.
    pub fn patched(&self, patch: AddressPatch) -> Address {
        Address {
            division: patch.division.unwrap_or_else(|| self.division.clone()),
            district: patch.district.unwrap_or_else(|| self.district.clone()),
            city: patch.city.unwrap_or_else(|| self.city.clone()),
            address_line: patch
                .address_line
                .unwrap_or_else(|| self.address_line.clone()),
            recipient_name: patch
                .recipient_name
                .unwrap_or_else(|| self.recipient_name.clone()),
            phone: patch.phone.unwrap_or_else(|| self.phone.clone()),
            email: patch.email.unwrap_or_else(|| self.email.clone()),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.image.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image: Option<String>,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image: Option<String>,
    pub category_id: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub category_id: Option<i32>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.category_id.is_none()
    }
}

/// Line item as requested by the client.
#[derive(Debug, Clone)]
pub struct RequestedItem {
    pub product_id: i32,
    pub quantity: i32,
}

/// Line item as persisted: name and unit price copied from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub product_id: i32,
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
}

impl OrderItem {
    /// `None` on decimal overflow.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Shipping fields copied from the address at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingSnapshot {
    pub division: String,
    pub district: String,
    pub city: String,
    pub address_line: String,
    pub recipient_name: String,
    pub phone: String,
    pub email: String,
}

impl From<&Address> for ShippingSnapshot {
    fn from(address: &Address) -> Self {
        Self {
            division: address.division.clone(),
            district: address.district.clone(),
            city: address.city.clone(),
            address_line: address.address_line.clone(),
            recipient_name: address.recipient_name.clone(),
            phone: address.phone.clone(),
            email: address.email.clone(),
        }
    }
}

/// Immutable purchase snapshot.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub account_id: Uuid,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub shipping: ShippingSnapshot,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Best-effort outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Email {
        to: String,
        subject: String,
        body: String,
    },
    Chat {
        phone: String,
        text: String,
    },
}

impl Notification {
    /// Channel name used in logs.
    pub fn channel(&self) -> &'static str {
        match self {
            Self::Email { .. } => "email",
            Self::Chat { .. } => "chat",
        }
    }

    /// Recipient used in logs.
    pub fn target(&self) -> &str {
        match self {
            Self::Email { to, .. } => to,
            Self::Chat { phone, .. } => phone,
        }
    }
}

/// Trim and lowercase an email so lookups are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_strong_enough(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

/// Whether `amount` fits a `NUMERIC(12,2)` money column and is not negative.
pub fn is_storable_amount(amount: Decimal) -> bool {
    !amount.is_sign_negative() && amount <= MAX_AMOUNT
}

/// Sum of line subtotals, or `None` when the sum does not fit a money column.
pub fn order_total(items: &[OrderItem]) -> Option<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.subtotal()?))
        .filter(|total| is_storable_amount(*total))
}

/// Whether a client-computed total is within one cent of the server total.
pub fn total_matches(client: Decimal, server: Decimal) -> bool {
    client
        .checked_sub(server)
        .is_some_and(|diff| diff.abs() <= Decimal::new(1, 2))
}

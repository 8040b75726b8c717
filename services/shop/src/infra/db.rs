use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, IntoActiveModel as _, QueryFilter, QueryOrder, QuerySelect, SqlErr,
    TransactionTrait,
    sea_query::{Expr, Func, LikeExpr, OnConflict},
};
use uuid::Uuid;

use medicart_domain::pagination::PageRequest;
use medicart_domain::role::AccountRole;
use medicart_shop_schema::{
    accounts, addresses, categories, order_items, orders, pending_registrations, products,
};

use crate::domain::repository::{
    AccountRepository, AddressRepository, CategoryRepository, OrderRepository,
    PendingRegistrationRepository, ProductRepository,
};
use crate::domain::types::{
    Account, Address, Category, CategoryPatch, NewCategory, NewProduct, Order, OrderItem,
    PendingRegistration, Product, ProductPatch, ProfilePatch, ShippingSnapshot,
};
use crate::error::ShopServiceError;

// ── Account repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, ShopServiceError> {
        let model = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find account by id")?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ShopServiceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find account by email")?;
        Ok(model.map(account_from_model))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        expected_version: i32,
        patch: &ProfilePatch,
    ) -> Result<bool, ShopServiceError> {
        let mut update = accounts::Entity::update_many()
            .col_expr(
                accounts::Column::Version,
                Expr::col(accounts::Column::Version).add(1),
            )
            .col_expr(accounts::Column::UpdatedAt, Expr::value(Utc::now()));
        if let Some(name) = &patch.name {
            update = update.col_expr(accounts::Column::Name, Expr::value(name.clone()));
        }
        if let Some(phone) = &patch.phone {
            update = update.col_expr(accounts::Column::Phone, Expr::value(phone.clone()));
        }
        if let Some(gender) = &patch.gender {
            update = update.col_expr(accounts::Column::Gender, Expr::value(gender.clone()));
        }
        if let Some(birthdate) = patch.birthdate {
            update = update.col_expr(accounts::Column::Birthdate, Expr::value(birthdate));
        }
        let result = update
            .filter(accounts::Column::Id.eq(id))
            .filter(accounts::Column::Version.eq(expected_version))
            .exec(&self.db)
            .await
            .context("update account profile")?;
        Ok(result.rows_affected == 1)
    }

    async fn set_picture(&self, id: Uuid, url: &str) -> Result<(), ShopServiceError> {
        accounts::Entity::update_many()
            .col_expr(accounts::Column::Picture, Expr::value(url.to_owned()))
            .col_expr(
                accounts::Column::Version,
                Expr::col(accounts::Column::Version).add(1),
            )
            .col_expr(accounts::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(accounts::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("set account picture")?;
        Ok(())
    }

    async fn set_reset_code(&self, id: Uuid, code: &str) -> Result<bool, ShopServiceError> {
        let result = accounts::Entity::update_many()
            .col_expr(accounts::Column::ResetCode, Expr::value(code.to_owned()))
            .col_expr(accounts::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(accounts::Column::Id.eq(id))
            .exec(&self.db)
            .await;
        match result {
            Ok(_) => Ok(true),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(false)
            }
            Err(e) => Err(anyhow::Error::new(e).context("set reset code").into()),
        }
    }

    async fn reset_password(
        &self,
        id: Uuid,
        code: &str,
        password_hash: &str,
    ) -> Result<bool, ShopServiceError> {
        let result = accounts::Entity::update_many()
            .col_expr(
                accounts::Column::PasswordHash,
                Expr::value(password_hash.to_owned()),
            )
            .col_expr(accounts::Column::ResetCode, Expr::value(Option::<String>::None))
            .col_expr(
                accounts::Column::Version,
                Expr::col(accounts::Column::Version).add(1),
            )
            .col_expr(accounts::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(accounts::Column::Id.eq(id))
            .filter(accounts::Column::ResetCode.eq(code))
            .exec(&self.db)
            .await
            .context("reset password")?;
        Ok(result.rows_affected == 1)
    }
}

async fn insert_account(txn: &DatabaseTransaction, account: &Account) -> Result<(), DbErr> {
    accounts::ActiveModel {
        id: Set(account.id),
        name: Set(account.name.clone()),
        email: Set(account.email.clone()),
        password_hash: Set(account.password_hash.clone()),
        phone: Set(account.phone.clone()),
        is_verified: Set(account.is_verified),
        picture: Set(account.picture.clone()),
        gender: Set(account.gender.clone()),
        birthdate: Set(account.birthdate),
        role: Set(i16::from(account.role.as_u8())),
        reset_code: Set(account.reset_code.clone()),
        version: Set(account.version),
        created_at: Set(account.created_at),
        updated_at: Set(account.updated_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

fn account_from_model(model: accounts::Model) -> Account {
    Account {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        phone: model.phone,
        is_verified: model.is_verified,
        picture: model.picture,
        gender: model.gender,
        birthdate: model.birthdate,
        role: u8::try_from(model.role)
            .ok()
            .and_then(AccountRole::from_u8)
            .unwrap_or_default(),
        reset_code: model.reset_code,
        version: model.version,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Pending registration repository ──────────────────────────────────────────

#[derive(Clone)]
pub struct DbPendingRegistrationRepository {
    pub db: DatabaseConnection,
}

impl PendingRegistrationRepository for DbPendingRegistrationRepository {
    async fn upsert(&self, pending: &PendingRegistration) -> Result<(), ShopServiceError> {
        let model = pending_registrations::ActiveModel {
            email: Set(pending.email.clone()),
            name: Set(pending.name.clone()),
            password_hash: Set(pending.password_hash.clone()),
            phone: Set(pending.phone.clone()),
            code: Set(pending.code.clone()),
            expires_at: Set(pending.expires_at),
            created_at: Set(pending.created_at),
        };
        pending_registrations::Entity::insert(model)
            .on_conflict(
                OnConflict::column(pending_registrations::Column::Email)
                    .update_columns([
                        pending_registrations::Column::Name,
                        pending_registrations::Column::PasswordHash,
                        pending_registrations::Column::Phone,
                        pending_registrations::Column::Code,
                        pending_registrations::Column::ExpiresAt,
                        pending_registrations::Column::CreatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("upsert pending registration")?;
        Ok(())
    }

    async fn find(&self, email: &str) -> Result<Option<PendingRegistration>, ShopServiceError> {
        let model = pending_registrations::Entity::find_by_id(email.to_owned())
            .one(&self.db)
            .await
            .context("find pending registration")?;
        Ok(model.map(pending_from_model))
    }

    async fn delete(&self, email: &str) -> Result<bool, ShopServiceError> {
        let result = pending_registrations::Entity::delete_many()
            .filter(pending_registrations::Column::Email.eq(email))
            .exec(&self.db)
            .await
            .context("delete pending registration")?;
        Ok(result.rows_affected > 0)
    }

    async fn promote(
        &self,
        email: &str,
        code: &str,
        account: &Account,
    ) -> Result<bool, ShopServiceError> {
        let email = email.to_owned();
        let code = code.to_owned();
        let account = account.clone();
        let promoted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let consumed = pending_registrations::Entity::delete_many()
                        .filter(pending_registrations::Column::Email.eq(email.as_str()))
                        .filter(pending_registrations::Column::Code.eq(code.as_str()))
                        .filter(pending_registrations::Column::ExpiresAt.gt(Utc::now()))
                        .exec(txn)
                        .await?;
                    if consumed.rows_affected == 0 {
                        return Ok(false);
                    }
                    insert_account(txn, &account).await?;
                    Ok(true)
                })
            })
            .await
            .context("promote pending registration")?;
        Ok(promoted)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, ShopServiceError> {
        let result = pending_registrations::Entity::delete_many()
            .filter(pending_registrations::Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await
            .context("delete expired pending registrations")?;
        Ok(result.rows_affected)
    }
}

fn pending_from_model(model: pending_registrations::Model) -> PendingRegistration {
    PendingRegistration {
        email: model.email,
        name: model.name,
        password_hash: model.password_hash,
        phone: model.phone,
        code: model.code,
        expires_at: model.expires_at,
        created_at: model.created_at,
    }
}

// ── Address repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAddressRepository {
    pub db: DatabaseConnection,
}

impl AddressRepository for DbAddressRepository {
    async fn create(&self, address: &Address) -> Result<(), ShopServiceError> {
        addresses::ActiveModel {
            id: Set(address.id),
            account_id: Set(address.account_id),
            division: Set(address.division.clone()),
            district: Set(address.district.clone()),
            city: Set(address.city.clone()),
            address_line: Set(address.address_line.clone()),
            recipient_name: Set(address.recipient_name.clone()),
            phone: Set(address.phone.clone()),
            email: Set(address.email.clone()),
            version: Set(address.version),
            created_at: Set(address.created_at),
            updated_at: Set(address.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create address")?;
        Ok(())
    }

    async fn find_owned(
        &self,
        account_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Address>, ShopServiceError> {
        let model = addresses::Entity::find_by_id(id)
            .filter(addresses::Column::AccountId.eq(account_id))
            .one(&self.db)
            .await
            .context("find owned address")?;
        Ok(model.map(address_from_model))
    }

    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Address>, ShopServiceError> {
        let models = addresses::Entity::find()
            .filter(addresses::Column::AccountId.eq(account_id))
            .order_by_asc(addresses::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list addresses")?;
        Ok(models.into_iter().map(address_from_model).collect())
    }

    async fn update(&self, address: &Address) -> Result<bool, ShopServiceError> {
        let result = addresses::Entity::update_many()
            .col_expr(
                addresses::Column::Division,
                Expr::value(address.division.clone()),
            )
            .col_expr(
                addresses::Column::District,
                Expr::value(address.district.clone()),
            )
            .col_expr(addresses::Column::City, Expr::value(address.city.clone()))
            .col_expr(
                addresses::Column::AddressLine,
                Expr::value(address.address_line.clone()),
            )
            .col_expr(
                addresses::Column::RecipientName,
                Expr::value(address.recipient_name.clone()),
            )
            .col_expr(addresses::Column::Phone, Expr::value(address.phone.clone()))
            .col_expr(addresses::Column::Email, Expr::value(address.email.clone()))
            .col_expr(
                addresses::Column::Version,
                Expr::col(addresses::Column::Version).add(1),
            )
            .col_expr(addresses::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(addresses::Column::Id.eq(address.id))
            .filter(addresses::Column::AccountId.eq(address.account_id))
            .filter(addresses::Column::Version.eq(address.version))
            .exec(&self.db)
            .await
            .context("update address")?;
        Ok(result.rows_affected == 1)
    }

    async fn delete_owned(&self, account_id: Uuid, id: Uuid) -> Result<bool, ShopServiceError> {
        let result = addresses::Entity::delete_many()
            .filter(addresses::Column::Id.eq(id))
            .filter(addresses::Column::AccountId.eq(account_id))
            .exec(&self.db)
            .await
            .context("delete address")?;
        Ok(result.rows_affected > 0)
    }
}

fn address_from_model(model: addresses::Model) -> Address {
    Address {
        id: model.id,
        account_id: model.account_id,
        division: model.division,
        district: model.district,
        city: model.city,
        address_line: model.address_line,
        recipient_name: model.recipient_name,
        phone: model.phone,
        email: model.email,
        version: model.version,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Category repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCategoryRepository {
    pub db: DatabaseConnection,
}

impl CategoryRepository for DbCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, ShopServiceError> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::Id)
            .all(&self.db)
            .await
            .context("list categories")?;
        Ok(models.into_iter().map(category_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, ShopServiceError> {
        let model = categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find category by id")?;
        Ok(model.map(category_from_model))
    }

    async fn create(&self, category: &NewCategory) -> Result<Category, ShopServiceError> {
        let model = categories::ActiveModel {
            name: Set(category.name.clone()),
            description: Set(category.description.clone()),
            image: Set(category.image.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create category")?;
        Ok(category_from_model(model))
    }

    async fn update(
        &self,
        id: i32,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, ShopServiceError> {
        let Some(model) = categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find category for update")?
        else {
            return Ok(None);
        };
        let mut am = model.into_active_model();
        if let Some(name) = &patch.name {
            am.name = Set(name.clone());
        }
        if let Some(description) = &patch.description {
            am.description = Set(Some(description.clone()));
        }
        if let Some(image) = &patch.image {
            am.image = Set(Some(image.clone()));
        }
        let model = am.update(&self.db).await.context("update category")?;
        Ok(Some(category_from_model(model)))
    }

    async fn delete(&self, id: i32) -> Result<bool, ShopServiceError> {
        let result = categories::Entity::delete_many()
            .filter(categories::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete category")?;
        Ok(result.rows_affected > 0)
    }
}

fn category_from_model(model: categories::Model) -> Category {
    Category {
        id: model.id,
        name: model.name,
        description: model.description,
        image: model.image,
        created_at: model.created_at,
    }
}

// ── Product repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProductRepository {
    pub db: DatabaseConnection,
}

impl ProductRepository for DbProductRepository {
    async fn list(&self, page: PageRequest) -> Result<Vec<Product>, ShopServiceError> {
        let models = products::Entity::find()
            .order_by_asc(products::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list products")?;
        Ok(models.into_iter().map(product_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ShopServiceError> {
        let model = products::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find product by id")?;
        Ok(model.map(product_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, ShopServiceError> {
        let models = products::Entity::find()
            .filter(products::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find products by ids")?;
        Ok(models.into_iter().map(product_from_model).collect())
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<Product>, ShopServiceError> {
        let pattern = LikeExpr::new(contains_pattern(name)).escape('\\');
        let models = products::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(products::Column::Name))).like(pattern))
            .order_by_asc(products::Column::Id)
            .all(&self.db)
            .await
            .context("search products by name")?;
        Ok(models.into_iter().map(product_from_model).collect())
    }

    async fn list_by_category(&self, category_id: i32) -> Result<Vec<Product>, ShopServiceError> {
        let models = products::Entity::find()
            .filter(products::Column::CategoryId.eq(category_id))
            .order_by_asc(products::Column::Id)
            .all(&self.db)
            .await
            .context("list products by category")?;
        Ok(models.into_iter().map(product_from_model).collect())
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, ShopServiceError> {
        let now = Utc::now();
        let model = products::ActiveModel {
            name: Set(product.name.clone()),
            description: Set(product.description.clone()),
            price: Set(product.price),
            image: Set(product.image.clone()),
            category_id: Set(product.category_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create product")?;
        Ok(product_from_model(model))
    }

    async fn update(
        &self,
        id: i32,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, ShopServiceError> {
        let Some(model) = products::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find product for update")?
        else {
            return Ok(None);
        };
        let mut am = model.into_active_model();
        if let Some(name) = &patch.name {
            am.name = Set(name.clone());
        }
        if let Some(description) = &patch.description {
            am.description = Set(Some(description.clone()));
        }
        if let Some(price) = patch.price {
            am.price = Set(price);
        }
        if let Some(image) = &patch.image {
            am.image = Set(Some(image.clone()));
        }
        if let Some(category_id) = patch.category_id {
            am.category_id = Set(Some(category_id));
        }
        am.updated_at = Set(Utc::now());
        let model = am.update(&self.db).await.context("update product")?;
        Ok(Some(product_from_model(model)))
    }

    async fn delete(&self, id: i32) -> Result<bool, ShopServiceError> {
        let result = products::Entity::delete_many()
            .filter(products::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete product")?;
        Ok(result.rows_affected > 0)
    }
}

/// Lowercased `%..%` pattern matching `name` literally.
fn contains_pattern(name: &str) -> String {
    let mut pattern = String::with_capacity(name.len() + 2);
    pattern.push('%');
    for c in name.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn product_from_model(model: products::Model) -> Product {
    Product {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        image: model.image,
        category_id: model.category_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Order repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: DatabaseConnection,
}

impl OrderRepository for DbOrderRepository {
    async fn create(&self, order: &Order) -> Result<(), ShopServiceError> {
        let order = order.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    insert_order(txn, &order).await?;
                    insert_order_items(txn, &order).await?;
                    Ok(())
                })
            })
            .await
            .context("create order with items")?;
        Ok(())
    }

    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Order>, ShopServiceError> {
        let rows = orders::Entity::find()
            .filter(orders::Column::AccountId.eq(account_id))
            .find_with_related(order_items::Entity)
            .all(&self.db)
            .await
            .context("list orders with items")?;
        let mut list: Vec<Order> = rows
            .into_iter()
            .map(|(model, items)| order_from_models(model, items))
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }
}

async fn insert_order(txn: &DatabaseTransaction, order: &Order) -> Result<(), DbErr> {
    let shipping = &order.shipping;
    orders::ActiveModel {
        id: Set(order.id),
        account_id: Set(order.account_id),
        total: Set(order.total),
        division: Set(shipping.division.clone()),
        district: Set(shipping.district.clone()),
        city: Set(shipping.city.clone()),
        address_line: Set(shipping.address_line.clone()),
        recipient_name: Set(shipping.recipient_name.clone()),
        phone: Set(shipping.phone.clone()),
        email: Set(shipping.email.clone()),
        status: Set(order.status.clone()),
        created_at: Set(order.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

async fn insert_order_items(txn: &DatabaseTransaction, order: &Order) -> Result<(), DbErr> {
    let models = order.items.iter().map(|item| order_items::ActiveModel {
        id: Set(Uuid::now_v7()),
        order_id: Set(order.id),
        product_id: Set(item.product_id),
        name: Set(item.name.clone()),
        quantity: Set(item.quantity),
        price: Set(item.price),
    });
    order_items::Entity::insert_many(models)
        .exec_without_returning(txn)
        .await?;
    Ok(())
}

fn order_from_models(model: orders::Model, mut items: Vec<order_items::Model>) -> Order {
    // UUIDv7 ids sort in insertion order.
    items.sort_by_key(|item| item.id);
    Order {
        id: model.id,
        account_id: model.account_id,
        items: items
            .into_iter()
            .map(|item| OrderItem {
                product_id: item.product_id,
                name: item.name,
                quantity: item.quantity,
                price: item.price,
            })
            .collect(),
        total: model.total,
        shipping: ShippingSnapshot {
            division: model.division,
            district: model.district,
            city: model.city,
            address_line: model.address_line,
            recipient_name: model.recipient_name,
            phone: model.phone,
            email: model.email,
        },
        status: model.status,
        created_at: model.created_at,
    }
}

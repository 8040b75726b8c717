use sea_orm_migration::prelude::*;

mod m20261016_000001_create_accounts;
mod m20261016_000002_create_pending_registrations;
mod m20261016_000003_create_addresses;
mod m20261016_000004_create_categories;
mod m20261016_000005_create_products;
mod m20261016_000006_create_orders;
mod m20261016_000007_create_order_items;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261016_000001_create_accounts::Migration),
            Box::new(m20261016_000002_create_pending_registrations::Migration),
            Box::new(m20261016_000003_create_addresses::Migration),
            Box::new(m20261016_000004_create_categories::Migration),
            Box::new(m20261016_000005_create_products::Migration),
            Box::new(m20261016_000006_create_orders::Migration),
            Box::new(m20261016_000007_create_order_items::Migration),
        ]
    }
}

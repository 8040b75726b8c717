use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Orders::AccountId).uuid().not_null())
                    .col(ColumnDef::new(Orders::Total).decimal_len(12, 2).not_null())
                    .col(ColumnDef::new(Orders::Division).string().not_null())
                    .col(ColumnDef::new(Orders::District).string().not_null())
                    .col(ColumnDef::new(Orders::City).string().not_null())
                    .col(ColumnDef::new(Orders::AddressLine).string().not_null())
                    .col(ColumnDef::new(Orders::RecipientName).string().not_null())
                    .col(ColumnDef::new(Orders::Phone).string().not_null())
                    .col(ColumnDef::new(Orders::Email).string().not_null())
                    .col(ColumnDef::new(Orders::Status).string().not_null())
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Orders::Table, Orders::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_account_id_created_at")
                    .table(Orders::Table)
                    .col(Orders::AccountId)
                    .col(Orders::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
    AccountId,
    Total,
    Division,
    District,
    City,
    AddressLine,
    RecipientName,
    Phone,
    Email,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PendingRegistrations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PendingRegistrations::Email)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PendingRegistrations::Name).string().not_null())
                    .col(
                        ColumnDef::new(PendingRegistrations::PasswordHash)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PendingRegistrations::Phone).string().not_null())
                    .col(ColumnDef::new(PendingRegistrations::Code).string().not_null())
                    .col(
                        ColumnDef::new(PendingRegistrations::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PendingRegistrations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Expiry sweep scans by expires_at.
        manager
            .create_index(
                Index::create()
                    .name("idx_pending_registrations_expires_at")
                    .table(PendingRegistrations::Table)
                    .col(PendingRegistrations::ExpiresAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PendingRegistrations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PendingRegistrations {
    Table,
    Email,
    Name,
    PasswordHash,
    Phone,
    Code,
    ExpiresAt,
    CreatedAt,
}

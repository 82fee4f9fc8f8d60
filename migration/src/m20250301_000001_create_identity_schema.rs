use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::DisplayName).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    // Permission vector
                    .col(ColumnDef::new(Users::CanCreate).boolean().not_null().default(false))
                    .col(ColumnDef::new(Users::CanRead).boolean().not_null().default(false))
                    .col(ColumnDef::new(Users::CanUpdate).boolean().not_null().default(false))
                    .col(ColumnDef::new(Users::CanDelete).boolean().not_null().default(false))
                    // Soft delete; inactive principals are denied all actions
                    .col(ColumnDef::new(Users::IsActive).boolean().not_null().default(true))
                    // Admin that created this account (subadmins only).
                    // Historical rows may carry either a bare id or a serialized
                    // object; normalization happens in the ownership resolver.
                    .col(ColumnDef::new(Users::CreatedBy).string())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    DisplayName,
    PasswordHash,
    Role,
    CanCreate,
    CanRead,
    CanUpdate,
    CanDelete,
    IsActive,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

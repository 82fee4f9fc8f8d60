use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Properties (PG/hostel listings)
        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Properties::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Properties::Name).string().not_null())
                    .col(ColumnDef::new(Properties::City).string().not_null())
                    .col(ColumnDef::new(Properties::Address).string())
                    .col(ColumnDef::new(Properties::MonthlyRent).big_integer().not_null())
                    .col(ColumnDef::new(Properties::CreatedBy).string().not_null())
                    .col(ColumnDef::new(Properties::IsActive).boolean().not_null().default(true))
                    .col(ColumnDef::new(Properties::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Properties::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_properties_created_by")
                    .table(Properties::Table)
                    .col(Properties::CreatedBy)
                    .to_owned(),
            )
            .await?;

        // Messes (meal services)
        manager
            .create_table(
                Table::create()
                    .table(Messes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Messes::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Messes::Name).string().not_null())
                    .col(ColumnDef::new(Messes::City).string().not_null())
                    .col(ColumnDef::new(Messes::Address).string())
                    .col(ColumnDef::new(Messes::MonthlyPrice).big_integer().not_null())
                    .col(ColumnDef::new(Messes::CreatedBy).string().not_null())
                    .col(ColumnDef::new(Messes::IsActive).boolean().not_null().default(true))
                    .col(ColumnDef::new(Messes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Messes::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_messes_created_by")
                    .table(Messes::Table)
                    .col(Messes::CreatedBy)
                    .to_owned(),
            )
            .await?;

        // Gaming zones
        manager
            .create_table(
                Table::create()
                    .table(GamingZones::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GamingZones::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(GamingZones::Name).string().not_null())
                    .col(ColumnDef::new(GamingZones::City).string().not_null())
                    .col(ColumnDef::new(GamingZones::Address).string())
                    .col(ColumnDef::new(GamingZones::HourlyRate).big_integer().not_null())
                    .col(ColumnDef::new(GamingZones::CreatedBy).string().not_null())
                    .col(ColumnDef::new(GamingZones::IsActive).boolean().not_null().default(true))
                    .col(ColumnDef::new(GamingZones::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(GamingZones::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gaming_zones_created_by")
                    .table(GamingZones::Table)
                    .col(GamingZones::CreatedBy)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GamingZones::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Messes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Properties::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    Id,
    Name,
    City,
    Address,
    MonthlyRent,
    CreatedBy,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Messes {
    Table,
    Id,
    Name,
    City,
    Address,
    MonthlyPrice,
    CreatedBy,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GamingZones {
    Table,
    Id,
    Name,
    City,
    Address,
    HourlyRate,
    CreatedBy,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

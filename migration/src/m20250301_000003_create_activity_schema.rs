use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Append-only activity log. No update/delete surface exists anywhere
        // in the codebase; the auto-increment id doubles as a tiebreaker for
        // records created within the same second.
        manager
            .create_table(
                Table::create()
                    .table(ActivityRecords::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ActivityRecords::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(ActivityRecords::ActorId).string())
                    .col(ColumnDef::new(ActivityRecords::Action).string().not_null())
                    .col(ColumnDef::new(ActivityRecords::ResourceKind).string().not_null())
                    .col(ColumnDef::new(ActivityRecords::ResourceId).string())
                    .col(ColumnDef::new(ActivityRecords::Status).string().not_null())
                    .col(ColumnDef::new(ActivityRecords::Detail).string())
                    .col(ColumnDef::new(ActivityRecords::IpAddress).string())
                    .col(ColumnDef::new(ActivityRecords::UserAgent).string())
                    .col(ColumnDef::new(ActivityRecords::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activity_records_actor_id")
                    .table(ActivityRecords::Table)
                    .col(ActivityRecords::ActorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activity_records_action")
                    .table(ActivityRecords::Table)
                    .col(ActivityRecords::Action)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activity_records_created_at")
                    .table(ActivityRecords::Table)
                    .col(ActivityRecords::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityRecords::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ActivityRecords {
    Table,
    Id,
    ActorId,
    Action,
    ResourceKind,
    ResourceId,
    Status,
    Detail,
    IpAddress,
    UserAgent,
    CreatedAt,
}

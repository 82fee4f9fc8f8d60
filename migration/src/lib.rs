pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_identity_schema;
mod m20250301_000002_create_listing_schema;
mod m20250301_000003_create_activity_schema;

pub struct CoreMigrator;

#[async_trait::async_trait]
impl MigratorTrait for CoreMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_identity_schema::Migration),
            Box::new(m20250301_000002_create_listing_schema::Migration),
        ]
    }
}

pub struct ActivityMigrator;

#[async_trait::async_trait]
impl MigratorTrait for ActivityMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000003_create_activity_schema::Migration),
        ]
    }
}

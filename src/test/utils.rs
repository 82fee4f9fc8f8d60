// Test utilities shared across unit and integration tests

use std::sync::Arc;

use migration::{ActivityMigrator, CoreMigrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, EntityTrait, QueryOrder};

use crate::services::{ActivityRecorder, TokenService};
use crate::stores::{ActivityStore, UserStore};
use crate::types::db::activity_record;
use crate::types::internal::{PermissionSet, Principal, Role};

pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";

/// In-memory databases plus the stores and services most tests need.
pub struct TestEnv {
    pub core_db: DatabaseConnection,
    pub activity_db: DatabaseConnection,
    pub users: Arc<UserStore>,
    pub tokens: Arc<TokenService>,
    pub activity: Arc<ActivityStore>,
    pub recorder: Arc<ActivityRecorder>,
}

impl TestEnv {
    /// Every persisted activity record, oldest first.
    pub async fn activity_rows(&self) -> Vec<activity_record::Model> {
        activity_record::Entity::find()
            .order_by_asc(activity_record::Column::Id)
            .all(&self.activity_db)
            .await
            .expect("Failed to query activity records")
    }
}

/// Creates in-memory databases with migrations applied and standard
/// stores wired up.
pub async fn setup_test_env() -> TestEnv {
    let core_db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    CoreMigrator::up(&core_db, None)
        .await
        .expect("Failed to run core migrations");

    let activity_db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create activity database");
    ActivityMigrator::up(&activity_db, None)
        .await
        .expect("Failed to run activity migrations");

    let activity = Arc::new(ActivityStore::new(activity_db.clone()));
    let recorder = Arc::new(ActivityRecorder::new(activity.clone()));
    let users = Arc::new(UserStore::new(core_db.clone()));
    let tokens = Arc::new(TokenService::new(TEST_JWT_SECRET.to_string()));

    TestEnv {
        core_db,
        activity_db,
        users,
        tokens,
        activity,
        recorder,
    }
}

/// Admin principal with the given permission vector, not backed by a row.
pub fn admin_principal(id: &str, permissions: PermissionSet) -> Principal {
    Principal {
        id: id.to_string(),
        role: Role::Admin,
        permissions,
        is_active: true,
    }
}

/// Subadmin principal with the given permission vector, not backed by a row.
pub fn subadmin_principal(id: &str, permissions: PermissionSet) -> Principal {
    Principal {
        id: id.to_string(),
        role: Role::Subadmin,
        permissions,
        is_active: true,
    }
}

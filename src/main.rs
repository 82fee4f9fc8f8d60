use migration::{ActivityMigrator, CoreMigrator, MigratorTrait};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::Database;

use staynest_backend::api::{ActivityApi, AdminApi, AuthApi, HealthApi, ListingsApi};
use staynest_backend::app_data::AppData;
use staynest_backend::config::{logging, AppConfig};
use staynest_backend::errors::InternalError;
use staynest_backend::services::crypto;
use staynest_backend::types::internal::PermissionSet;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    logging::init_logging().expect("Failed to initialize logging");

    let config = AppConfig::from_env().expect("Invalid configuration");

    let core_db = Database::connect(&config.core_database_url)
        .await
        .expect("Failed to connect to core database");
    CoreMigrator::up(&core_db, None)
        .await
        .expect("Failed to run core migrations");

    let activity_db = Database::connect(&config.activity_database_url)
        .await
        .expect("Failed to connect to activity database");
    ActivityMigrator::up(&activity_db, None)
        .await
        .expect("Failed to run activity migrations");

    tracing::info!("Databases connected and migrated");

    let app_data = AppData::new(core_db, activity_db, config.jwt_secret.clone());

    seed_bootstrap_admin(&app_data, &config).await;

    let auth_api = AuthApi::new(
        app_data.users.clone(),
        app_data.tokens.clone(),
        app_data.recorder.clone(),
    );
    let admin_api = AdminApi::new(
        app_data.users.clone(),
        app_data.tokens.clone(),
        app_data.recorder.clone(),
        app_data.subadmin_gateway.clone(),
    );
    let listings_api = ListingsApi::new(
        app_data.users.clone(),
        app_data.tokens.clone(),
        app_data.recorder.clone(),
        app_data.property_gateway.clone(),
        app_data.property_store.clone(),
        app_data.mess_gateway.clone(),
        app_data.mess_store.clone(),
        app_data.gaming_zone_gateway.clone(),
        app_data.gaming_zone_store.clone(),
    );
    let activity_api = ActivityApi::new(
        app_data.users.clone(),
        app_data.tokens.clone(),
        app_data.recorder.clone(),
    );

    let api_service = OpenApiService::new(
        (HealthApi, auth_api, admin_api, listings_api, activity_api),
        "StayNest Backend",
        env!("CARGO_PKG_VERSION"),
    )
    .server("http://localhost:3000/api");

    let ui = api_service.swagger_ui();

    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    tracing::info!("Starting server on http://{}", config.bind_addr);

    Server::new(TcpListener::bind(config.bind_addr)).run(app).await
}

/// Create the seed admin account when configured and not already present.
async fn seed_bootstrap_admin(app_data: &AppData, config: &AppConfig) {
    let (email, password) = match (
        config.bootstrap_admin_email.as_deref(),
        config.bootstrap_admin_password.as_deref(),
    ) {
        (Some(email), Some(password)) => (email, password),
        _ => return,
    };

    let result = async {
        let password_hash = crypto::hash_password(password)?;
        app_data
            .users
            .create_admin(email, "Administrator", &password_hash, PermissionSet::all())
            .await
    }
    .await;

    match result {
        Ok(id) => tracing::info!("Bootstrap admin created with id {}", id),
        Err(InternalError::Duplicate { .. }) => {
            tracing::info!("Bootstrap admin already exists, skipping creation");
        }
        Err(e) => tracing::error!("Failed to create bootstrap admin: {}", e),
    }
}

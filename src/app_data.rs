use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::services::{ActivityRecorder, ResourceGateway, TokenService};
use crate::stores::{
    ActivityStore, GamingZoneStore, MessStore, PropertyStore, SubadminBackend, UserStore,
};

/// Shared application state wired up once at startup.
///
/// Holds the two database handles plus every store, gateway, and service
/// the API layer needs. Gateways own their backend; the separate reader
/// stores serve the read endpoints, which bypass the gateways.
pub struct AppData {
    pub core_db: DatabaseConnection,
    pub activity_db: DatabaseConnection,

    pub users: Arc<UserStore>,
    pub tokens: Arc<TokenService>,
    pub recorder: Arc<ActivityRecorder>,

    pub subadmin_gateway: Arc<ResourceGateway<SubadminBackend>>,
    pub property_gateway: Arc<ResourceGateway<PropertyStore>>,
    pub property_store: Arc<PropertyStore>,
    pub mess_gateway: Arc<ResourceGateway<MessStore>>,
    pub mess_store: Arc<MessStore>,
    pub gaming_zone_gateway: Arc<ResourceGateway<GamingZoneStore>>,
    pub gaming_zone_store: Arc<GamingZoneStore>,
}

impl AppData {
    pub fn new(
        core_db: DatabaseConnection,
        activity_db: DatabaseConnection,
        jwt_secret: String,
    ) -> Self {
        let users = Arc::new(UserStore::new(core_db.clone()));
        let tokens = Arc::new(TokenService::new(jwt_secret));
        let recorder = Arc::new(ActivityRecorder::new(Arc::new(ActivityStore::new(
            activity_db.clone(),
        ))));

        let subadmin_gateway = Arc::new(ResourceGateway::new(
            SubadminBackend::new(core_db.clone()),
            recorder.clone(),
        ));
        let property_gateway = Arc::new(ResourceGateway::new(
            PropertyStore::new(core_db.clone()),
            recorder.clone(),
        ));
        let property_store = Arc::new(PropertyStore::new(core_db.clone()));
        let mess_gateway = Arc::new(ResourceGateway::new(
            MessStore::new(core_db.clone()),
            recorder.clone(),
        ));
        let mess_store = Arc::new(MessStore::new(core_db.clone()));
        let gaming_zone_gateway = Arc::new(ResourceGateway::new(
            GamingZoneStore::new(core_db.clone()),
            recorder.clone(),
        ));
        let gaming_zone_store = Arc::new(GamingZoneStore::new(core_db.clone()));

        Self {
            core_db,
            activity_db,
            users,
            tokens,
            recorder,
            subadmin_gateway,
            property_gateway,
            property_store,
            mess_gateway,
            mess_store,
            gaming_zone_gateway,
            gaming_zone_store,
        }
    }
}

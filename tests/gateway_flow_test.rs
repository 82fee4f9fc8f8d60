// End-to-end flows through the resource gateways: authorization,
// mutation, and the activity records each outcome leaves behind.

use std::sync::Arc;

use staynest_backend::errors::{AccessError, GatewayError};
use staynest_backend::services::ResourceGateway;
use staynest_backend::stores::property_store::{PropertyDraft, PropertyPatch};
use staynest_backend::stores::PropertyStore;
use staynest_backend::test::utils::{admin_principal, setup_test_env, subadmin_principal};
use staynest_backend::types::internal::context::RequestContext;
use staynest_backend::types::internal::{PermissionSet, Principal, Role};

fn draft(name: &str) -> PropertyDraft {
    PropertyDraft {
        name: name.to_string(),
        city: "Lahore".to_string(),
        address: None,
        monthly_rent: 45_000,
    }
}

fn rename(name: &str) -> PropertyPatch {
    PropertyPatch {
        name: Some(name.to_string()),
        city: None,
        address: None,
        monthly_rent: None,
    }
}

#[tokio::test]
async fn admin_without_delete_flag_is_denied_and_recorded() {
    let env = setup_test_env().await;
    let gateway = ResourceGateway::new(
        PropertyStore::new(env.core_db.clone()),
        env.recorder.clone(),
    );
    let ctx = RequestContext::for_system("test");

    let full_admin = admin_principal("admin-1", PermissionSet::all());
    let id = gateway.create(&ctx, &full_admin, draft("Gulberg Flat")).await.unwrap();

    let limited_admin = admin_principal(
        "admin-2",
        PermissionSet {
            can_create: true,
            can_read: true,
            can_update: true,
            can_delete: false,
        },
    );

    let result = gateway.delete(&ctx, &limited_admin, &id).await;
    assert!(matches!(
        result,
        Err(GatewayError::Access(AccessError::Forbidden { .. }))
    ));

    let records = env.activity_rows().await;
    let denial = records
        .iter()
        .find(|r| r.action == "DELETE" && r.status == "FAILED")
        .expect("denial should be recorded");
    assert_eq!(denial.actor_id.as_deref(), Some("admin-2"));
    assert_eq!(denial.resource_kind, "PROPERTY");
    assert_eq!(denial.resource_id.as_deref(), Some(id.as_str()));

    // The listing survives the denied delete.
    let store = PropertyStore::new(env.core_db.clone());
    assert!(store.get(&id).await.unwrap().unwrap().is_active);
}

#[tokio::test]
async fn subadmin_can_only_update_own_listings() {
    let env = setup_test_env().await;
    let gateway = Arc::new(ResourceGateway::new(
        PropertyStore::new(env.core_db.clone()),
        env.recorder.clone(),
    ));
    let ctx = RequestContext::for_system("test");

    let perms = PermissionSet {
        can_create: true,
        can_read: true,
        can_update: true,
        can_delete: true,
    };
    let sub_a = subadmin_principal("sub-a", perms);
    let sub_b = subadmin_principal("sub-b", perms);

    let id = gateway.create(&ctx, &sub_a, draft("Johar Town House")).await.unwrap();

    // B holds the update flag but did not create the listing.
    let denied = gateway.update(&ctx, &sub_b, &id, rename("Hijacked")).await;
    assert!(matches!(
        denied,
        Err(GatewayError::Access(AccessError::Forbidden { .. }))
    ));

    gateway.update(&ctx, &sub_a, &id, rename("Johar Town Residence")).await.unwrap();

    let store = PropertyStore::new(env.core_db.clone());
    assert_eq!(
        store.get(&id).await.unwrap().unwrap().name,
        "Johar Town Residence"
    );

    let records = env.activity_rows().await;
    let success = records
        .iter()
        .find(|r| r.action == "UPDATE" && r.status == "SUCCESS")
        .expect("successful update should be recorded");
    assert_eq!(success.actor_id.as_deref(), Some("sub-a"));
    assert_eq!(success.resource_id.as_deref(), Some(id.as_str()));

    let failure = records
        .iter()
        .find(|r| r.action == "UPDATE" && r.status == "FAILED")
        .expect("denied update should be recorded");
    assert_eq!(failure.actor_id.as_deref(), Some("sub-b"));
}

#[tokio::test]
async fn inactive_principal_is_unauthorized_before_permission_checks() {
    let env = setup_test_env().await;
    let gateway = ResourceGateway::new(
        PropertyStore::new(env.core_db.clone()),
        env.recorder.clone(),
    );
    let ctx = RequestContext::for_system("test");

    let inactive = Principal {
        id: "sub-gone".to_string(),
        role: Role::Subadmin,
        permissions: PermissionSet::all(),
        is_active: false,
    };

    let result = gateway.create(&ctx, &inactive, draft("Ghost Listing")).await;
    assert!(matches!(
        result,
        Err(GatewayError::Access(AccessError::Unauthorized))
    ));

    let records = env.activity_rows().await;
    assert!(records
        .iter()
        .any(|r| r.action == "CREATE" && r.status == "FAILED"
            && r.actor_id.as_deref() == Some("sub-gone")));
}

#[tokio::test]
async fn missing_resource_is_not_found_and_not_recorded() {
    let env = setup_test_env().await;
    let gateway = ResourceGateway::new(
        PropertyStore::new(env.core_db.clone()),
        env.recorder.clone(),
    );
    let ctx = RequestContext::for_system("test");

    let admin = admin_principal("admin-1", PermissionSet::all());
    let result = gateway.update(&ctx, &admin, "no-such-id", rename("X")).await;
    assert!(matches!(
        result,
        Err(GatewayError::Access(AccessError::NotFound { .. }))
    ));

    assert!(env.activity_rows().await.is_empty());
}

#[tokio::test]
async fn delete_is_a_soft_delete() {
    let env = setup_test_env().await;
    let gateway = ResourceGateway::new(
        PropertyStore::new(env.core_db.clone()),
        env.recorder.clone(),
    );
    let ctx = RequestContext::for_system("test");

    let admin = admin_principal("admin-1", PermissionSet::all());
    let id = gateway.create(&ctx, &admin, draft("Model Town Flat")).await.unwrap();
    gateway.delete(&ctx, &admin, &id).await.unwrap();

    let store = PropertyStore::new(env.core_db.clone());
    let row = store.get(&id).await.unwrap().expect("row still present");
    assert!(!row.is_active);
}

use super::{authorize, can_perform};
use crate::errors::AccessError;
use crate::types::internal::{Action, PermissionSet, Principal, ResourceSnapshot, Role};

fn principal(role: Role, permissions: PermissionSet, is_active: bool) -> Principal {
    Principal {
        id: "p1".to_string(),
        role,
        permissions,
        is_active,
    }
}

fn snapshot(created_by: Option<&str>) -> ResourceSnapshot {
    ResourceSnapshot {
        id: "r1".to_string(),
        created_by: created_by.map(|s| s.to_string()),
        is_active: true,
        updated_at: 0,
    }
}

const ALL_ACTIONS: [Action; 4] = [
    Action::Create,
    Action::Read,
    Action::Update,
    Action::Delete,
];

mod inactive_principals {
    use super::*;

    #[test]
    fn denied_every_action_regardless_of_role_and_permissions() {
        for role in [Role::Admin, Role::Subadmin, Role::User] {
            let p = principal(role, PermissionSet::all(), false);
            for action in ALL_ACTIONS {
                assert!(
                    !can_perform(&p, action, Some(&snapshot(Some("p1")))),
                    "inactive {:?} must be denied {:?}",
                    role,
                    action
                );
            }
        }
    }

    #[test]
    fn denial_is_unauthorized_not_forbidden() {
        let p = principal(Role::Subadmin, PermissionSet::all(), false);
        assert_eq!(
            authorize(&p, Action::Create, None),
            Err(AccessError::Unauthorized)
        );
    }
}

mod admin_principals {
    use super::*;

    #[test]
    fn gated_by_own_permission_vector() {
        let mut perms = PermissionSet::all();
        perms.can_delete = false;
        let p = principal(Role::Admin, perms, true);

        assert!(can_perform(&p, Action::Create, None));
        assert!(can_perform(&p, Action::Update, Some(&snapshot(Some("someone-else")))));
        assert!(!can_perform(&p, Action::Delete, Some(&snapshot(Some("someone-else")))));
    }

    #[test]
    fn ownership_is_never_required() {
        let p = principal(Role::Admin, PermissionSet::all(), true);
        assert!(can_perform(&p, Action::Update, Some(&snapshot(Some("not-p1")))));
        assert!(can_perform(&p, Action::Delete, Some(&snapshot(None))));
    }
}

mod subadmin_principals {
    use super::*;

    #[test]
    fn create_and_read_follow_the_flags() {
        let mut perms = PermissionSet::none();
        perms.can_create = true;
        let p = principal(Role::Subadmin, perms, true);

        assert!(can_perform(&p, Action::Create, None));
        assert!(!can_perform(&p, Action::Read, None));
    }

    #[test]
    fn update_denied_on_foreign_resource_even_with_flag() {
        let p = principal(Role::Subadmin, PermissionSet::all(), true);
        let foreign = snapshot(Some("other-subadmin"));

        assert!(!can_perform(&p, Action::Update, Some(&foreign)));
        assert!(!can_perform(&p, Action::Delete, Some(&foreign)));
    }

    #[test]
    fn ownership_is_necessary_but_not_sufficient() {
        let owned = snapshot(Some("p1"));

        // Owner with the flag: allowed
        let with_flag = principal(Role::Subadmin, PermissionSet::all(), true);
        assert!(can_perform(&with_flag, Action::Update, Some(&owned)));

        // Owner without the flag: denied
        let mut perms = PermissionSet::all();
        perms.can_update = false;
        let without_flag = principal(Role::Subadmin, perms, true);
        assert!(!can_perform(&without_flag, Action::Update, Some(&owned)));
    }

    #[test]
    fn both_created_by_shapes_authorize_identically() {
        let p = principal(Role::Subadmin, PermissionSet::all(), true);
        let bare = snapshot(Some("p1"));
        let populated = snapshot(Some(r#"{"id":"p1","email":"p1@example.com"}"#));

        assert_eq!(
            can_perform(&p, Action::Update, Some(&bare)),
            can_perform(&p, Action::Update, Some(&populated))
        );
        assert!(can_perform(&p, Action::Update, Some(&populated)));
    }

    #[test]
    fn missing_creator_fails_closed() {
        let p = principal(Role::Subadmin, PermissionSet::all(), true);

        assert!(!can_perform(&p, Action::Update, Some(&snapshot(None))));
        assert!(!can_perform(&p, Action::Delete, Some(&snapshot(Some("")))));
        // And with no snapshot at all
        assert!(!can_perform(&p, Action::Update, None));
    }

    #[test]
    fn foreign_resource_denial_is_forbidden_with_reason() {
        let p = principal(Role::Subadmin, PermissionSet::all(), true);
        let result = authorize(&p, Action::Delete, Some(&snapshot(Some("other"))));
        match result {
            Err(AccessError::Forbidden { reason }) => {
                assert!(reason.contains("resources you created"));
            }
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }
}

mod end_users {
    use super::*;

    #[test]
    fn never_authorized_at_the_gateways() {
        let p = principal(Role::User, PermissionSet::all(), true);
        for action in ALL_ACTIONS {
            assert!(!can_perform(&p, action, Some(&snapshot(Some("p1")))));
        }
    }
}

mod determinism {
    use super::*;

    #[test]
    fn re_evaluating_the_same_snapshot_yields_the_same_decision() {
        let p = principal(Role::Subadmin, PermissionSet::all(), true);
        let snap = snapshot(Some("p1"));

        let first = can_perform(&p, Action::Update, Some(&snap));
        let second = can_perform(&p, Action::Update, Some(&snap));
        assert_eq!(first, second);
        assert!(first);
    }
}

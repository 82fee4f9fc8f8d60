use crate::errors::AccessError;
use crate::services::ownership;
use crate::types::internal::{Action, Principal, ResourceSnapshot, Role};

/// Decide whether a principal may perform an action, with the denial reason.
///
/// Pure function: no lookups, no side effects, deterministic for a given
/// (principal, action, snapshot) triple. Precedence:
///
/// 1. Inactive principals are denied everything, before any other check.
/// 2. Admins are gated by their own permission vector; the flag must be
///    held, ownership is never required.
/// 3. Subadmins need the flag for create/read, and the flag AND creatorship
///    of the target for update/delete.
/// 4. End-users never pass; the public read path does not go through here.
///
/// A snapshot with an unresolvable creator denies update/delete even when
/// the flag is set.
pub fn authorize(
    principal: &Principal,
    action: Action,
    resource: Option<&ResourceSnapshot>,
) -> Result<(), AccessError> {
    if !principal.is_active {
        return Err(AccessError::Unauthorized);
    }

    match principal.role {
        Role::Admin => {
            if principal.permissions.allows(action) {
                Ok(())
            } else {
                Err(AccessError::forbidden(format!(
                    "your account does not hold the {} permission",
                    action_name(action)
                )))
            }
        }
        Role::Subadmin => match action {
            Action::Create | Action::Read => {
                if principal.permissions.allows(action) {
                    Ok(())
                } else {
                    Err(AccessError::forbidden(format!(
                        "your account does not hold the {} permission",
                        action_name(action)
                    )))
                }
            }
            Action::Update | Action::Delete => {
                if !principal.permissions.allows(action) {
                    return Err(AccessError::forbidden(format!(
                        "your account does not hold the {} permission",
                        action_name(action)
                    )));
                }
                let Some(snapshot) = resource else {
                    // Ownership-gated action with nothing to own
                    return Err(AccessError::forbidden(
                        "you can only modify resources you created",
                    ));
                };
                if ownership::is_creator(snapshot.created_by.as_deref(), &principal.id) {
                    Ok(())
                } else {
                    Err(AccessError::forbidden(
                        "you can only modify resources you created",
                    ))
                }
            }
        },
        Role::User => Err(AccessError::Unauthorized),
    }
}

/// Boolean form of [`authorize`] for callers that only need the decision.
pub fn can_perform(
    principal: &Principal,
    action: Action,
    resource: Option<&ResourceSnapshot>,
) -> bool {
    authorize(principal, action, resource).is_ok()
}

fn action_name(action: Action) -> &'static str {
    match action {
        Action::Create => "create",
        Action::Read => "read",
        Action::Update => "update",
        Action::Delete => "delete",
    }
}

#[cfg(test)]
#[path = "permission_evaluator_tests.rs"]
mod permission_evaluator_tests;

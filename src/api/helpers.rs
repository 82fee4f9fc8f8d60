use crate::errors::ApiError;
use crate::stores::UserStore;
use crate::types::internal::context::RequestContext;
use crate::types::internal::Principal;

/// Resolve the acting principal for an authenticated endpoint.
///
/// The context carries only the id from the bearer token; the principal
/// itself is always loaded fresh so permission and status changes apply
/// to the very next request.
pub async fn require_principal(
    ctx: &RequestContext,
    users: &UserStore,
) -> Result<Principal, ApiError> {
    let actor_id = ctx
        .actor_id
        .as_deref()
        .ok_or_else(|| ApiError::unauthorized("authentication required"))?;

    users
        .get_principal(actor_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("unknown account"))
}

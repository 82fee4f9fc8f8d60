use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::{AccessError, GatewayError, InternalError};
use crate::services::activity_recorder::ActivityRecorder;
use crate::services::permission_evaluator;
use crate::types::internal::audit::{ActionKind, ActionStatus, ActivityEntry, ResourceKind};
use crate::types::internal::context::RequestContext;
use crate::types::internal::{Action, Principal, ResourceSnapshot};

/// How many times a lost optimistic write is reloaded and retried before
/// giving up.
const UPDATE_RETRIES: u32 = 3;

/// Persistence seam for one resource kind.
///
/// Implementations load snapshots and perform the actual writes; the
/// gateway owns authorization and auditing. `apply_update` and
/// `deactivate` must be conditional on the snapshot's `updated_at` and
/// return `Ok(false)` when the guard no longer matches, so the ownership
/// decision and the write always refer to the same row version.
#[async_trait]
pub trait ResourceBackend: Send + Sync {
    type CreatePayload: Send + 'static;
    type UpdatePayload: Send + Sync + Clone + 'static;

    fn kind(&self) -> ResourceKind;

    async fn load(&self, id: &str) -> Result<Option<ResourceSnapshot>, InternalError>;

    /// Insert a new record owned by `creator_id`; returns the new id.
    async fn insert(
        &self,
        creator_id: &str,
        payload: Self::CreatePayload,
    ) -> Result<String, InternalError>;

    /// Conditional update guarded by `snapshot.updated_at`. `Ok(false)`
    /// means the guard missed (concurrent writer won).
    async fn apply_update(
        &self,
        snapshot: &ResourceSnapshot,
        payload: Self::UpdatePayload,
    ) -> Result<bool, InternalError>;

    /// Conditional soft delete (flips is_active), same guard semantics.
    async fn deactivate(&self, snapshot: &ResourceSnapshot) -> Result<bool, InternalError>;
}

/// Per-resource-kind gateway enforcing authorize -> mutate -> audit.
///
/// Both outcomes are recorded: allowed mutations append a SUCCESS record,
/// denials append a FAILED record at this boundary. Callers pass the
/// acting principal explicitly; there is no ambient session state.
pub struct ResourceGateway<B: ResourceBackend> {
    backend: B,
    recorder: Arc<ActivityRecorder>,
}

impl<B: ResourceBackend> ResourceGateway<B> {
    pub fn new(backend: B, recorder: Arc<ActivityRecorder>) -> Self {
        Self { backend, recorder }
    }

    /// Create a new resource owned by the acting principal.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        principal: &Principal,
        payload: B::CreatePayload,
    ) -> Result<String, GatewayError> {
        if let Err(denied) = permission_evaluator::authorize(principal, Action::Create, None) {
            self.audit_denied(ctx, principal, ActionKind::Create, None, &denied)
                .await;
            return Err(denied.into());
        }

        match self.backend.insert(&principal.id, payload).await {
            Ok(id) => {
                self.audit_success(ctx, principal, ActionKind::Create, &id).await;
                Ok(id)
            }
            Err(e) => {
                self.audit_mutation_failed(ctx, principal, ActionKind::Create, None)
                    .await;
                Err(e.into())
            }
        }
    }

    /// Update an existing resource.
    ///
    /// Loads a snapshot, authorizes against it, then writes conditionally
    /// on the same snapshot. A lost race reloads and re-authorizes; an
    /// intervening ownership or permission change therefore takes effect
    /// immediately rather than being decided from stale data.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        principal: &Principal,
        id: &str,
        payload: B::UpdatePayload,
    ) -> Result<(), GatewayError> {
        for _ in 0..UPDATE_RETRIES {
            let snapshot = self.load_or_not_found(id).await?;

            if let Err(denied) =
                permission_evaluator::authorize(principal, Action::Update, Some(&snapshot))
            {
                self.audit_denied(ctx, principal, ActionKind::Update, Some(id), &denied)
                    .await;
                return Err(denied.into());
            }

            match self.backend.apply_update(&snapshot, payload.clone()).await {
                Ok(true) => {
                    self.audit_success(ctx, principal, ActionKind::Update, id).await;
                    return Ok(());
                }
                Ok(false) => continue, // guard missed, reload and retry
                Err(e) => {
                    self.audit_mutation_failed(ctx, principal, ActionKind::Update, Some(id))
                        .await;
                    return Err(e.into());
                }
            }
        }

        self.audit_mutation_failed(ctx, principal, ActionKind::Update, Some(id))
            .await;
        Err(InternalError::Conflict {
            kind: self.backend.kind().as_str(),
            id: id.to_string(),
        }
        .into())
    }

    /// Soft-delete a resource (deactivation; rows are never removed).
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        principal: &Principal,
        id: &str,
    ) -> Result<(), GatewayError> {
        for _ in 0..UPDATE_RETRIES {
            let snapshot = self.load_or_not_found(id).await?;

            if let Err(denied) =
                permission_evaluator::authorize(principal, Action::Delete, Some(&snapshot))
            {
                self.audit_denied(ctx, principal, ActionKind::Delete, Some(id), &denied)
                    .await;
                return Err(denied.into());
            }

            match self.backend.deactivate(&snapshot).await {
                Ok(true) => {
                    self.audit_success(ctx, principal, ActionKind::Delete, id).await;
                    return Ok(());
                }
                Ok(false) => continue,
                Err(e) => {
                    self.audit_mutation_failed(ctx, principal, ActionKind::Delete, Some(id))
                        .await;
                    return Err(e.into());
                }
            }
        }

        self.audit_mutation_failed(ctx, principal, ActionKind::Delete, Some(id))
            .await;
        Err(InternalError::Conflict {
            kind: self.backend.kind().as_str(),
            id: id.to_string(),
        }
        .into())
    }

    /// NotFound is raised before authorization: ownership cannot be
    /// checked against a record that does not exist. Not audited - the
    /// flow never entered the authorizing state.
    async fn load_or_not_found(&self, id: &str) -> Result<ResourceSnapshot, GatewayError> {
        self.backend
            .load(id)
            .await
            .map_err(GatewayError::from)?
            .ok_or_else(|| AccessError::not_found(self.backend.kind(), id).into())
    }

    async fn audit_success(
        &self,
        ctx: &RequestContext,
        principal: &Principal,
        action: ActionKind,
        resource_id: &str,
    ) {
        self.recorder
            .record(
                ActivityEntry::new(action, self.backend.kind(), ActionStatus::Success)
                    .actor(&principal.id)
                    .resource(resource_id)
                    .with_context(ctx),
            )
            .await;
    }

    async fn audit_denied(
        &self,
        ctx: &RequestContext,
        principal: &Principal,
        action: ActionKind,
        resource_id: Option<&str>,
        denied: &AccessError,
    ) {
        let mut entry = ActivityEntry::new(action, self.backend.kind(), ActionStatus::Failed)
            .actor(&principal.id)
            .detail(format!("denied: {}", denied))
            .with_context(ctx);
        if let Some(id) = resource_id {
            entry = entry.resource(id);
        }
        self.recorder.record(entry).await;
    }

    async fn audit_mutation_failed(
        &self,
        ctx: &RequestContext,
        principal: &Principal,
        action: ActionKind,
        resource_id: Option<&str>,
    ) {
        let mut entry = ActivityEntry::new(action, self.backend.kind(), ActionStatus::Failed)
            .actor(&principal.id)
            .detail("mutation failed after authorization")
            .with_context(ctx);
        if let Some(id) = resource_id {
            entry = entry.resource(id);
        }
        self.recorder.record(entry).await;
    }
}

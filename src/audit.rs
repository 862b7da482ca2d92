use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, Set};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    entity::audit_logs::ActiveModel, error::AppResult, middleware::auth::AuthUser,
    state::AppState,
};

pub async fn log_audit(
    state: &AppState,
    actor: Option<Uuid>,
    action: &str,
    resource: Option<&str>,
    metadata: Option<Value>,
) -> AppResult<()> {
    ActiveModel {
        id: NotSet,
        actor: Set(actor),
        action: Set(action.to_string()),
        resource: Set(resource.map(str::to_string)),
        metadata: Set(metadata),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    Ok(())
}

/// Records an audit entry; a failure is logged and never fails the caller.
/// The acting staff member's role is added to object metadata.
pub async fn record(
    state: &AppState,
    actor: Option<&AuthUser>,
    action: &str,
    resource: &str,
    mut metadata: Value,
) {
    if let (Some(user), Some(fields)) = (actor, metadata.as_object_mut()) {
        fields.insert("actor_role".into(), Value::String(user.role.clone()));
    }
    let actor_id = actor.map(|user| user.user_id);
    if let Err(err) = log_audit(state, actor_id, action, Some(resource), Some(metadata)).await {
        tracing::warn!(error = %err, action, "audit log failed");
    }
}

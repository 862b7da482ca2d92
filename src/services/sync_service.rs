use crate::{audit, error::AppResult, middleware::auth::AuthUser, state::AppState};

/// Runs the external product sync and then prunes stale images.
/// Returns the number of records the sync reported.
pub async fn run_sync(state: &AppState, user: &AuthUser) -> AppResult<u64> {
    let count = state.sync.sync_products().await?;
    tracing::info!(count, "product sync finished");

    state.sync.clean_old_images().await?;
    tracing::debug!("old product images cleaned");

    audit::record(
        state,
        Some(user),
        "product_sync",
        "skus",
        serde_json::json!({ "count": count }),
    )
    .await;

    Ok(count)
}

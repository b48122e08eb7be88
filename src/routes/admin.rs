use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::error::{AppError, Result};
use crate::store;
use crate::AppState;

/// Query parameters for admin stats endpoint
#[derive(Debug, Deserialize)]
pub struct AdminQuery {
    /// Admin secret key for authentication
    pub key: String,
}

/// Database statistics response
#[derive(Debug, Serialize)]
pub struct AdminStatsResponse {
    pub account_count: u64,
    pub form_count: u64,
    pub response_count: u64,
    pub database_size_bytes: u64,
    pub database_size_human: String,
}

/// Format bytes into human-readable string
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Admin stats endpoint
///
/// Returns collection totals for monitoring and diagnostics. Requires the
/// admin secret key passed as a query parameter; disabled entirely when no
/// key is configured.
///
/// GET /admin/stats?key=<admin_secret_key>
pub async fn admin_stats(
    State(state): State<AppState>,
    Query(params): Query<AdminQuery>,
) -> Result<Json<AdminStatsResponse>> {
    let admin_key = state
        .config
        .admin_secret_key
        .as_ref()
        .ok_or(AppError::Unauthorized)?;

    if params.key != *admin_key {
        tracing::warn!("Invalid admin key attempt");
        return Err(AppError::Unauthorized);
    }

    let db_path = state.config.database_path.clone();
    let database_size_bytes = fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

    let db = state.db.clone();
    let stats = tokio::task::spawn_blocking(move || store::collection_stats(&db)).await??;

    tracing::info!(
        "Admin stats requested: {} accounts, {} forms, {} responses, {} database",
        stats.account_count,
        stats.form_count,
        stats.response_count,
        format_bytes(database_size_bytes)
    );

    Ok(Json(AdminStatsResponse {
        account_count: stats.account_count,
        form_count: stats.form_count,
        response_count: stats.response_count,
        database_size_bytes,
        database_size_human: format_bytes(database_size_bytes),
    }))
}

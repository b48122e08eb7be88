use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::AccountProfile;
use crate::store;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub secret: String,
}

/// Authenticate an account owner
///
/// An unknown account and a wrong secret produce the same 401; the response
/// never reveals whether the account exists. On success the profile carries
/// the owner's form summaries but no credential material.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AccountProfile>> {
    let db = state.db.clone();
    let pepper = state.config.credential_pepper.clone();
    let account_id = payload.account_id.clone();

    let profile = tokio::task::spawn_blocking(move || {
        let record = store::authenticate(&db, &payload.account_id, &payload.secret, &pepper)?;
        Ok::<_, AppError>(AccountProfile::from_record(&payload.account_id, &record))
    })
    .await??;

    tracing::info!("Login successful for {}", account_id);
    Ok(Json(profile))
}

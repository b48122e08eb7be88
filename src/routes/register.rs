use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::constants::ERR_INVALID_ACCOUNT_ID;
use crate::error::{AppError, Result};
use crate::models::{validate_account_id, AccountProfile};
use crate::store::{self, NewAccount};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub secret: String,
    #[serde(rename = "givenName")]
    pub given_name: String,
    #[serde(rename = "familyName")]
    pub family_name: String,
}

/// Register a new account
///
/// The secret is hashed with the server-side pepper before storage and never
/// appears in the response. Returns 409 Conflict if the account ID is taken.
pub async fn register_account(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountProfile>)> {
    if !validate_account_id(&payload.account_id) {
        tracing::warn!("Invalid account ID format: {}", payload.account_id);
        return Err(AppError::InvalidInput(ERR_INVALID_ACCOUNT_ID.to_string()));
    }

    if payload.secret.is_empty() {
        return Err(AppError::InvalidInput("Secret must not be empty".to_string()));
    }

    let db = state.db.clone();
    let pepper = state.config.credential_pepper.clone();
    let params = NewAccount {
        account_id: payload.account_id,
        secret: payload.secret,
        given_name: payload.given_name,
        family_name: payload.family_name,
    };

    let profile = tokio::task::spawn_blocking(move || {
        let record = store::create_account(&db, &params, &pepper)?;
        Ok::<_, AppError>(AccountProfile::from_record(&params.account_id, &record))
    })
    .await??;

    Ok((StatusCode::CREATED, Json(profile)))
}

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Result;
use crate::models::{FormRecord, RespondentInfo};
use crate::routes::validation::{require, require_title};
use crate::store;
use crate::AppState;

const ERR_RESPONSE_FIELDS: &str = "Title and responses are required";

#[derive(Debug, Deserialize)]
pub struct AppendResponseRequest {
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub title: Option<String>,
    pub respondent: Option<RespondentInfo>,
    pub responses: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct AppendResponseResponse {
    pub success: bool,
    pub form: FormRecord,
}

/// Submit a response to a form
///
/// No credential check: anyone who knows the account ID and form title may
/// answer. Entries are appended in arrival order and never reordered.
pub async fn append_response(
    State(state): State<AppState>,
    Json(payload): Json<AppendResponseRequest>,
) -> Result<Json<AppendResponseResponse>> {
    let title = require(payload.title, ERR_RESPONSE_FIELDS)?;
    let answers = require(payload.responses, ERR_RESPONSE_FIELDS)?;
    let title = require_title(&title)?;

    let db = state.db.clone();

    let form = tokio::task::spawn_blocking(move || {
        store::append_response(&db, &payload.account_id, &title, payload.respondent, answers)
    })
    .await??;

    Ok(Json(AppendResponseResponse {
        success: true,
        form,
    }))
}

/// Fetch a form's question set
///
/// Public read: account ID and title are the only handle a respondent has.
pub async fn get_questions(
    State(state): State<AppState>,
    Path((account_id, title)): Path<(String, String)>,
) -> Result<Json<Value>> {
    let title = require_title(&title)?;
    let db = state.db.clone();

    let questions = tokio::task::spawn_blocking(move || {
        store::get_questions(&db, &account_id, &title)
    })
    .await??;

    Ok(Json(json!({ "questions": questions })))
}

/// Fetch a form's accumulated responses, in arrival order
pub async fn get_responses(
    State(state): State<AppState>,
    Path((account_id, title)): Path<(String, String)>,
) -> Result<Json<Value>> {
    let title = require_title(&title)?;
    let db = state.db.clone();

    let responses = tokio::task::spawn_blocking(move || {
        store::get_responses(&db, &account_id, &title)
    })
    .await??;

    Ok(Json(json!({ "responses": responses })))
}

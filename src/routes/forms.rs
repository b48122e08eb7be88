use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::models::FormRecord;
use crate::routes::validation::{require, require_title, validate_questions};
use crate::store;
use crate::AppState;

const ERR_FORM_FIELDS: &str = "Title and questions are required";
const ERR_UPDATE_FIELDS: &str = "Form ID, title, and questions are required";

#[derive(Debug, Deserialize)]
pub struct AddFormRequest {
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub secret: String,
    pub title: Option<String>,
    pub questions: Option<Vec<Value>>,
}

#[derive(Debug, Serialize)]
pub struct AddFormResponse {
    pub success: bool,
    pub form: FormRecord,
}

/// Add a form to the account's collection
///
/// Gated by the credential check. Duplicate titles are allowed; the created
/// form's store-assigned ID is returned so clients can address it later.
pub async fn add_form(
    State(state): State<AppState>,
    Json(payload): Json<AddFormRequest>,
) -> Result<Json<AddFormResponse>> {
    let title = require(payload.title, ERR_FORM_FIELDS)?;
    let questions = require(payload.questions, ERR_FORM_FIELDS)?;
    let title = require_title(&title)?;
    validate_questions(&questions)?;

    let db = state.db.clone();
    let pepper = state.config.credential_pepper.clone();

    let form = tokio::task::spawn_blocking(move || {
        store::add_form(
            &db,
            &payload.account_id,
            &payload.secret,
            &pepper,
            title,
            questions,
        )
    })
    .await??;

    Ok(Json(AddFormResponse {
        success: true,
        form,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateFormRequest {
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub secret: String,
    #[serde(rename = "formId")]
    pub form_id: Option<u64>,
    pub title: Option<String>,
    pub questions: Option<Vec<Value>>,
}

/// Replace a form's title and question set
///
/// The form is addressed by its store-assigned ID, not by title. Accumulated
/// responses survive the update.
pub async fn update_form(
    State(state): State<AppState>,
    Json(payload): Json<UpdateFormRequest>,
) -> Result<Json<FormRecord>> {
    let form_id = require(payload.form_id, ERR_UPDATE_FIELDS)?;
    let title = require(payload.title, ERR_UPDATE_FIELDS)?;
    let questions = require(payload.questions, ERR_UPDATE_FIELDS)?;
    let title = require_title(&title)?;
    validate_questions(&questions)?;

    let db = state.db.clone();
    let pepper = state.config.credential_pepper.clone();

    let form = tokio::task::spawn_blocking(move || {
        store::update_form(
            &db,
            &payload.account_id,
            &payload.secret,
            &pepper,
            form_id,
            title,
            questions,
        )
    })
    .await??;

    Ok(Json(form))
}

#[derive(Debug, Deserialize)]
pub struct DeleteFormRequest {
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub secret: String,
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteFormResponse {
    pub success: bool,
    pub message: String,
}

/// Delete the first form whose title matches
///
/// Gated by the credential check. Forms after the removed one shift down a
/// position; a same-titled duplicate survives and becomes addressable.
pub async fn delete_form(
    State(state): State<AppState>,
    Json(payload): Json<DeleteFormRequest>,
) -> Result<Json<DeleteFormResponse>> {
    let title = require_title(&payload.title)?;

    let db = state.db.clone();
    let pepper = state.config.credential_pepper.clone();

    tokio::task::spawn_blocking(move || {
        store::delete_form(&db, &payload.account_id, &payload.secret, &pepper, &title)
    })
    .await??;

    Ok(Json(DeleteFormResponse {
        success: true,
        message: "Form deleted successfully".to_string(),
    }))
}

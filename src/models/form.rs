use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One form embedded in an account record: an ordered question set plus the
/// responses accumulated against it. Questions and answers are opaque JSON;
/// the store imposes no shape on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormRecord {
    /// Store-assigned identifier, unique within the owning account
    #[serde(rename = "formId")]
    pub form_id: u64,
    /// Display title. Not unique; title lookups take the first match.
    pub title: String,
    pub questions: Vec<Value>,
    /// Appended in arrival order, never reordered
    pub responses: Vec<ResponseEntry>,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

impl FormRecord {
    pub fn new(form_id: u64, title: String, questions: Vec<Value>, now: i64) -> Self {
        Self {
            form_id,
            title,
            questions,
            responses: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Who submitted a response. Both fields are optional; anonymous submissions
/// carry neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondentInfo {
    #[serde(rename = "respondentId")]
    pub respondent_id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

/// One submitted response: respondent metadata plus the opaque answer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEntry {
    pub respondent: Option<RespondentInfo>,
    pub answers: Value,
    #[serde(rename = "submittedAt")]
    pub submitted_at: i64,
}

/// Compact form view used in account profiles
#[derive(Debug, Clone, Serialize)]
pub struct FormSummary {
    #[serde(rename = "formId")]
    pub form_id: u64,
    pub title: String,
    #[serde(rename = "questionCount")]
    pub question_count: usize,
    #[serde(rename = "responseCount")]
    pub response_count: usize,
}

impl FormSummary {
    pub fn from_record(record: &FormRecord) -> Self {
        Self {
            form_id: record.form_id,
            title: record.title.clone(),
            question_count: record.questions.len(),
            response_count: record.responses.len(),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::models::form::{FormRecord, FormSummary};

/// Account record stored in redb
///
/// The account ID (an email address) is the table key and is not repeated
/// inside the record. The embedded `forms` vector is the only storage the
/// account's forms have; every mutation rewrites the whole record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Peppered keyed-hash of the account secret (hex). Never reversible,
    /// never exposed through the API.
    pub credential: String,
    pub given_name: String,
    pub family_name: String,
    /// Next form ID to assign. IDs are unique within the account and are
    /// never reused, even after deletes.
    pub next_form_id: u64,
    /// Owned forms, insertion order significant
    pub forms: Vec<FormRecord>,
    /// When the account was created (Unix timestamp)
    pub created_at: i64,
}

impl AccountRecord {
    /// First form whose title matches exactly. Duplicate titles are allowed;
    /// later duplicates are shadowed.
    pub fn find_form(&self, title: &str) -> Option<&FormRecord> {
        self.forms.iter().find(|f| f.title == title)
    }

    pub fn find_form_mut(&mut self, title: &str) -> Option<&mut FormRecord> {
        self.forms.iter_mut().find(|f| f.title == title)
    }

    pub fn find_form_by_id_mut(&mut self, form_id: u64) -> Option<&mut FormRecord> {
        self.forms.iter_mut().find(|f| f.form_id == form_id)
    }

    /// Position of the first form whose title matches exactly
    pub fn position_by_title(&self, title: &str) -> Option<usize> {
        self.forms.iter().position(|f| f.title == title)
    }
}

/// Account view for API responses. Carries no credential material.
#[derive(Debug, Clone, Serialize)]
pub struct AccountProfile {
    #[serde(rename = "accountId")]
    pub account_id: String,
    #[serde(rename = "givenName")]
    pub given_name: String,
    #[serde(rename = "familyName")]
    pub family_name: String,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    pub forms: Vec<FormSummary>,
}

impl AccountProfile {
    pub fn from_record(account_id: &str, record: &AccountRecord) -> Self {
        Self {
            account_id: account_id.to_string(),
            given_name: record.given_name.clone(),
            family_name: record.family_name.clone(),
            created_at: record.created_at,
            forms: record.forms.iter().map(FormSummary::from_record).collect(),
        }
    }
}

/// Validate the shape of an account ID (an email address).
///
/// Not a full RFC 5322 parse; rejects the obviously malformed: blank local
/// part or domain, whitespace, more than one '@'.
pub fn validate_account_id(id: &str) -> bool {
    if id.is_empty() || id.len() > 254 || id.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = id.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && domain.contains('.')
        }
        _ => false,
    }
}

//! The account-scoped form store.
//!
//! Every operation resolves an account record by its ID, optionally runs the
//! credential gate, mutates the embedded `forms` collection in memory, and
//! writes the whole record back. Mutations run inside a single redb write
//! transaction; redb serializes writers, so two concurrent mutations of the
//! same account cannot drop each other's changes.
//!
//! Functions here are synchronous. Handlers call them through
//! `tokio::task::spawn_blocking`.

use chrono::Utc;
use redb::{Database, ReadableTable, ReadableTableMetadata};
use serde_json::Value;

use crate::db::tables;
use crate::error::{AppError, Result};
use crate::models::{
    AccountRecord, FormRecord, RespondentInfo, ResponseEntry, ResponseRateLimit,
};
use crate::security;

const BINCODE_CONFIG: bincode::config::Configuration = bincode::config::standard();

fn encode_account(record: &AccountRecord) -> Result<Vec<u8>> {
    Ok(bincode::serde::encode_to_vec(record, BINCODE_CONFIG)?)
}

fn decode_account(bytes: &[u8]) -> Result<AccountRecord> {
    let (record, _) = bincode::serde::decode_from_slice(bytes, BINCODE_CONFIG)?;
    Ok(record)
}

fn load_account<T>(table: &T, account_id: &str) -> Result<Option<AccountRecord>>
where
    T: ReadableTable<&'static str, &'static [u8]>,
{
    match table.get(account_id)? {
        Some(guard) => Ok(Some(decode_account(guard.value())?)),
        None => Ok(None),
    }
}

/// Verify a presented secret before permitting a mutation.
///
/// A missing account and a failed comparison yield the same error, so callers
/// cannot probe which account IDs exist.
fn credential_gate<T>(
    table: &T,
    account_id: &str,
    secret: &str,
    pepper: &str,
) -> Result<AccountRecord>
where
    T: ReadableTable<&'static str, &'static [u8]>,
{
    let Some(account) = load_account(table, account_id)? else {
        tracing::warn!("Credential check against unknown account");
        return Err(AppError::InvalidCredential);
    };

    if !security::verify_credential(account_id, secret, pepper, &account.credential) {
        tracing::warn!("Credential mismatch for {}", account_id);
        return Err(AppError::InvalidCredential);
    }

    Ok(account)
}

/// Parameters for account creation
#[derive(Debug)]
pub struct NewAccount {
    pub account_id: String,
    pub secret: String,
    pub given_name: String,
    pub family_name: String,
}

/// Create a new account with an empty forms collection.
///
/// Fails with `AccountAlreadyExists` if the ID is taken; the existing record
/// is untouched.
pub fn create_account(db: &Database, params: &NewAccount, pepper: &str) -> Result<AccountRecord> {
    let write_txn = db.begin_write()?;
    let record = {
        let mut accounts = write_txn.open_table(tables::ACCOUNTS)?;

        if accounts.get(params.account_id.as_str())?.is_some() {
            tracing::info!("Account already exists: {}", params.account_id);
            return Err(AppError::AccountAlreadyExists);
        }

        let record = AccountRecord {
            credential: security::hash_credential(&params.account_id, &params.secret, pepper),
            given_name: params.given_name.clone(),
            family_name: params.family_name.clone(),
            next_form_id: 1,
            forms: Vec::new(),
            created_at: Utc::now().timestamp(),
        };
        let bytes = encode_account(&record)?;
        accounts.insert(params.account_id.as_str(), bytes.as_slice())?;
        record
    };
    write_txn.commit()?;

    tracing::info!("New account registered: {}", params.account_id);
    Ok(record)
}

/// Run the credential gate and return the full account record.
///
/// The record includes the hashed credential; the HTTP boundary strips it
/// before responding.
pub fn authenticate(
    db: &Database,
    account_id: &str,
    secret: &str,
    pepper: &str,
) -> Result<AccountRecord> {
    let read_txn = db.begin_read()?;
    let accounts = read_txn.open_table(tables::ACCOUNTS)?;
    credential_gate(&accounts, account_id, secret, pepper)
}

/// Append a new form to the account's collection.
///
/// Duplicate titles are permitted; the new form shadows nothing and is
/// shadowed by any earlier form with the same title. The form ID is assigned
/// from the account's counter and never reused.
pub fn add_form(
    db: &Database,
    account_id: &str,
    secret: &str,
    pepper: &str,
    title: String,
    questions: Vec<Value>,
) -> Result<FormRecord> {
    let write_txn = db.begin_write()?;
    let form = {
        let mut accounts = write_txn.open_table(tables::ACCOUNTS)?;
        let mut account = credential_gate(&accounts, account_id, secret, pepper)?;

        let now = Utc::now().timestamp();
        let form = FormRecord::new(account.next_form_id, title, questions, now);
        account.next_form_id += 1;
        account.forms.push(form.clone());

        let bytes = encode_account(&account)?;
        accounts.insert(account_id, bytes.as_slice())?;
        form
    };
    write_txn.commit()?;

    tracing::info!("Form {} added for {}", form.form_id, account_id);
    Ok(form)
}

/// Replace the title and question set of the form with the given ID.
///
/// Accumulated responses are untouched.
pub fn update_form(
    db: &Database,
    account_id: &str,
    secret: &str,
    pepper: &str,
    form_id: u64,
    title: String,
    questions: Vec<Value>,
) -> Result<FormRecord> {
    let write_txn = db.begin_write()?;
    let updated = {
        let mut accounts = write_txn.open_table(tables::ACCOUNTS)?;
        let mut account = credential_gate(&accounts, account_id, secret, pepper)?;

        let now = Utc::now().timestamp();
        let updated = {
            let form = account
                .find_form_by_id_mut(form_id)
                .ok_or(AppError::FormNotFound)?;
            form.title = title;
            form.questions = questions;
            form.updated_at = now;
            form.clone()
        };

        let bytes = encode_account(&account)?;
        accounts.insert(account_id, bytes.as_slice())?;
        updated
    };
    write_txn.commit()?;

    tracing::info!("Form {} updated for {}", form_id, account_id);
    Ok(updated)
}

/// Remove the first form whose title matches.
///
/// Later forms shift down one position; other forms with the same title are
/// left in place.
pub fn delete_form(
    db: &Database,
    account_id: &str,
    secret: &str,
    pepper: &str,
    title: &str,
) -> Result<()> {
    let write_txn = db.begin_write()?;
    {
        let mut accounts = write_txn.open_table(tables::ACCOUNTS)?;
        let mut account = credential_gate(&accounts, account_id, secret, pepper)?;

        let position = account
            .position_by_title(title)
            .ok_or(AppError::FormNotFound)?;
        account.forms.remove(position);

        let bytes = encode_account(&account)?;
        accounts.insert(account_id, bytes.as_slice())?;
    }
    write_txn.commit()?;

    tracing::info!("Form '{}' deleted for {}", title, account_id);
    Ok(())
}

/// Append one response entry to the first form whose title matches.
///
/// No credential check: respondents are not account holders. Submission is
/// throttled per account instead.
pub fn append_response(
    db: &Database,
    account_id: &str,
    title: &str,
    respondent: Option<RespondentInfo>,
    answers: Value,
) -> Result<FormRecord> {
    let write_txn = db.begin_write()?;
    let form = {
        let mut accounts = write_txn.open_table(tables::ACCOUNTS)?;
        let mut account = load_account(&accounts, account_id)?.ok_or_else(|| {
            tracing::warn!("Response submitted for non-existent account: {}", account_id);
            AppError::AccountNotFound
        })?;

        let now = Utc::now().timestamp();

        let mut limits = write_txn.open_table(tables::RESPONSE_LIMITS)?;
        let mut limit = match limits.get(account_id)? {
            Some(bytes) => {
                let (record, _): (ResponseRateLimit, _) =
                    bincode::serde::decode_from_slice(bytes.value(), BINCODE_CONFIG)?;
                record
            }
            None => ResponseRateLimit::new(now),
        };

        // Errors here abort the transaction, form lookup included
        limit.check_and_increment(now)?;

        let limit_bytes = bincode::serde::encode_to_vec(&limit, BINCODE_CONFIG)?;
        limits.insert(account_id, limit_bytes.as_slice())?;
        drop(limits);

        let form = {
            let form = account.find_form_mut(title).ok_or(AppError::FormNotFound)?;
            form.responses.push(ResponseEntry {
                respondent,
                answers,
                submitted_at: now,
            });
            form.updated_at = now;
            form.clone()
        };

        let bytes = encode_account(&account)?;
        accounts.insert(account_id, bytes.as_slice())?;
        form
    };
    write_txn.commit()?;

    tracing::info!(
        "Response appended to '{}' for {} ({} total)",
        title,
        account_id,
        form.responses.len()
    );
    Ok(form)
}

/// Question set of the first form whose title matches
pub fn get_questions(db: &Database, account_id: &str, title: &str) -> Result<Vec<Value>> {
    let read_txn = db.begin_read()?;
    let accounts = read_txn.open_table(tables::ACCOUNTS)?;
    let account = load_account(&accounts, account_id)?.ok_or(AppError::AccountNotFound)?;
    let form = account.find_form(title).ok_or(AppError::FormNotFound)?;
    Ok(form.questions.clone())
}

/// Accumulated responses of the first form whose title matches, in arrival
/// order
pub fn get_responses(db: &Database, account_id: &str, title: &str) -> Result<Vec<ResponseEntry>> {
    let read_txn = db.begin_read()?;
    let accounts = read_txn.open_table(tables::ACCOUNTS)?;
    let account = load_account(&accounts, account_id)?.ok_or(AppError::AccountNotFound)?;
    let form = account.find_form(title).ok_or(AppError::FormNotFound)?;
    Ok(form.responses.clone())
}

/// Collection totals for the admin stats endpoint
#[derive(Debug)]
pub struct StoreStats {
    pub account_count: u64,
    pub form_count: u64,
    pub response_count: u64,
}

pub fn collection_stats(db: &Database) -> Result<StoreStats> {
    let read_txn = db.begin_read()?;
    let accounts = read_txn.open_table(tables::ACCOUNTS)?;

    let mut stats = StoreStats {
        account_count: accounts.len()?,
        form_count: 0,
        response_count: 0,
    };

    for entry in accounts.iter()? {
        let (_, value) = entry?;
        let account = decode_account(value.value())?;
        stats.form_count += account.forms.len() as u64;
        stats.response_count += account
            .forms
            .iter()
            .map(|f| f.responses.len() as u64)
            .sum::<u64>();
    }

    Ok(stats)
}

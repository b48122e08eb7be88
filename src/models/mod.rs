pub mod account;
pub mod form;
pub mod rate_limit;

pub use account::{validate_account_id, AccountProfile, AccountRecord};
pub use form::{FormRecord, FormSummary, RespondentInfo, ResponseEntry};
pub use rate_limit::ResponseRateLimit;

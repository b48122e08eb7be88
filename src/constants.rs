/// Maximum length of a form title, after trimming
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum number of questions in a single form
pub const MAX_QUESTIONS_PER_FORM: usize = 200;

/// Maximum response submissions per hour per account
///
/// The response endpoint is the only unauthenticated mutation, so it gets
/// per-account throttling. Generous enough for a busy survey.
pub const MAX_RESPONSES_PER_HOUR: u32 = 120;

/// Maximum response submissions per day per account
pub const MAX_RESPONSES_PER_DAY: u32 = 1000;

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for a malformed account identifier
pub const ERR_INVALID_ACCOUNT_ID: &str = "Account ID must be a valid email address";

/// Error message for a missing or blank form title
pub const ERR_TITLE_REQUIRED: &str = "Form title is required";

/// Error message for an over-long form title
pub const ERR_TITLE_TOO_LONG: &str = "Form title is too long";

/// Error message for an oversized question set
pub const ERR_TOO_MANY_QUESTIONS: &str = "Form has too many questions";

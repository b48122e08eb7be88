use serde_json::Value;

use crate::constants::{
    ERR_TITLE_REQUIRED, ERR_TITLE_TOO_LONG, ERR_TOO_MANY_QUESTIONS, MAX_QUESTIONS_PER_FORM,
    MAX_TITLE_LEN,
};
use crate::error::{AppError, Result};

/// Unwrap a required request field, or fail with the operation's
/// missing-field message
pub fn require<T>(field: Option<T>, message: &str) -> Result<T> {
    field.ok_or_else(|| AppError::InvalidInput(message.to_string()))
}

/// Trim and validate a form title.
///
/// Every title-addressed operation matches on the trimmed value, so titles
/// are normalized once here at the boundary.
pub fn require_title(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(ERR_TITLE_REQUIRED.to_string()));
    }
    if trimmed.len() > MAX_TITLE_LEN {
        return Err(AppError::InvalidInput(ERR_TITLE_TOO_LONG.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Cap the question set size
pub fn validate_questions(questions: &[Value]) -> Result<()> {
    if questions.len() > MAX_QUESTIONS_PER_FORM {
        return Err(AppError::InvalidInput(ERR_TOO_MANY_QUESTIONS.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_title_trims() {
        assert_eq!(require_title("  survey \n").unwrap(), "survey");
    }

    #[test]
    fn test_require_title_rejects_blank() {
        assert!(require_title("").is_err());
        assert!(require_title("   ").is_err());
    }

    #[test]
    fn test_require_title_rejects_overlong() {
        assert!(require_title(&"t".repeat(MAX_TITLE_LEN + 1)).is_err());
        assert!(require_title(&"t".repeat(MAX_TITLE_LEN)).is_ok());
    }

    #[test]
    fn test_validate_questions_cap() {
        let ok = vec![json!("q"); MAX_QUESTIONS_PER_FORM];
        assert!(validate_questions(&ok).is_ok());

        let too_many = vec![json!("q"); MAX_QUESTIONS_PER_FORM + 1];
        assert!(validate_questions(&too_many).is_err());
    }

    #[test]
    fn test_require_missing_field() {
        let missing: Option<String> = None;
        assert!(matches!(
            require(missing, "Title is required"),
            Err(AppError::InvalidInput(_))
        ));
        assert_eq!(require(Some(1), "x").unwrap(), 1);
    }
}

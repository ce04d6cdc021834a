//! Reconciliation error types.

use mizan_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

use super::types::ReconciliationStatus;

/// Errors raised by the statement line state machine.
///
/// Lookup failures (unknown line, unknown split) are repository-level
/// concerns and live with the repositories.
#[derive(Debug, Error)]
pub enum ReconciliationError {
    /// Cannot match a line that has already been reconciled.
    #[error("Cannot match a reconciled statement line")]
    CannotMatchReconciled,

    /// Unmatch requires the line to be in MATCHED status.
    #[error("Cannot unmatch a statement line in {0:?} status")]
    CannotUnmatch(ReconciliationStatus),

    /// Reconcile requires the line to be in MATCHED status.
    #[error("Cannot reconcile a statement line in {0:?} status")]
    CannotReconcile(ReconciliationStatus),

    /// Manual match target split is not on the designated bank account.
    #[error("Split {0} is not on the designated bank account")]
    NotBankAccountSplit(Uuid),
}

impl ReconciliationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::CannotMatchReconciled => "CANNOT_MATCH_RECONCILED",
            Self::CannotUnmatch(_) => "CANNOT_UNMATCH",
            Self::CannotReconcile(_) => "CANNOT_RECONCILE",
            Self::NotBankAccountSplit(_) => "NOT_BANK_ACCOUNT_SPLIT",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        400
    }
}

impl From<ReconciliationError> for AppError {
    fn from(err: ReconciliationError) -> Self {
        match err {
            ReconciliationError::NotBankAccountSplit(_) => Self::Validation(err.to_string()),
            _ => Self::InvalidState(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ReconciliationError::CannotUnmatch(ReconciliationStatus::Reconciled).error_code(),
            "CANNOT_UNMATCH"
        );
        assert_eq!(
            ReconciliationError::NotBankAccountSplit(Uuid::nil()).error_code(),
            "NOT_BANK_ACCOUNT_SPLIT"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(
            ReconciliationError::CannotReconcile(ReconciliationStatus::Unmatched)
                .http_status_code(),
            400
        );
    }

    #[test]
    fn test_app_error_mapping() {
        let app: AppError =
            ReconciliationError::CannotUnmatch(ReconciliationStatus::Unmatched).into();
        assert_eq!(app.error_code(), "INVALID_STATE");

        let app: AppError = ReconciliationError::NotBankAccountSplit(Uuid::nil()).into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");
    }
}

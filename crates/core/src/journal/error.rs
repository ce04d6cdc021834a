//! Journal error types for validation and state errors.

use mizan_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during journal operations.
#[derive(Debug, Error)]
pub enum JournalError {
    // ========== Validation Errors ==========
    /// Entry must have at least 2 splits.
    #[error("Journal entry must have at least 2 splits")]
    InsufficientSplits,

    /// Entry is not balanced (debits != credits).
    #[error("Journal entry is not balanced. Debit: {debits}, Credit: {credits}")]
    Unbalanced {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
    },

    /// Split amount cannot be zero.
    #[error("Split amount cannot be zero")]
    ZeroAmount,

    /// Split amount cannot be negative.
    #[error("Split amount cannot be negative")]
    NegativeAmount,

    /// Split must carry either a debit or a credit amount, never both.
    #[error("Split must carry exactly one of debit or credit, not both")]
    DebitCreditExclusive,

    // ========== Account Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Account is inactive and cannot be posted to.
    #[error("Account {0} is inactive")]
    AccountInactive(Uuid),

    // ========== Entry Errors ==========
    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(Uuid),
}

impl JournalError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientSplits => "INSUFFICIENT_SPLITS",
            Self::Unbalanced { .. } => "UNBALANCED_ENTRY",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::DebitCreditExclusive => "DEBIT_CREDIT_EXCLUSIVE",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InsufficientSplits
            | Self::Unbalanced { .. }
            | Self::ZeroAmount
            | Self::NegativeAmount
            | Self::DebitCreditExclusive
            | Self::AccountInactive(_) => 400,
            Self::AccountNotFound(_) | Self::EntryNotFound(_) => 404,
        }
    }
}

impl From<JournalError> for AppError {
    fn from(err: JournalError) -> Self {
        match err {
            JournalError::AccountNotFound(_) | JournalError::EntryNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            _ => Self::Validation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            JournalError::InsufficientSplits.error_code(),
            "INSUFFICIENT_SPLITS"
        );
        assert_eq!(
            JournalError::Unbalanced {
                debits: dec!(100),
                credits: dec!(50),
            }
            .error_code(),
            "UNBALANCED_ENTRY"
        );
        assert_eq!(JournalError::ZeroAmount.error_code(), "ZERO_AMOUNT");
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(JournalError::InsufficientSplits.http_status_code(), 400);
        assert_eq!(
            JournalError::AccountNotFound(Uuid::nil()).http_status_code(),
            404
        );
    }

    #[test]
    fn test_error_display() {
        let err = JournalError::Unbalanced {
            debits: dec!(100.00),
            credits: dec!(50.00),
        };
        assert_eq!(
            err.to_string(),
            "Journal entry is not balanced. Debit: 100.00, Credit: 50.00"
        );
    }

    #[test]
    fn test_app_error_mapping() {
        let app: AppError = JournalError::InsufficientSplits.into();
        assert_eq!(app.status_code(), 400);

        let app: AppError = JournalError::AccountNotFound(Uuid::nil()).into();
        assert_eq!(app.status_code(), 404);
    }
}

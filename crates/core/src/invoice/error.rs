//! Invoice error types.

use mizan_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during invoice operations.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// Payment amount must be strictly positive.
    #[error("Payment amount must be positive")]
    NonPositiveAmount,

    /// Invoice not found.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(Uuid),

    /// Invoice number already exists.
    #[error("Invoice number '{0}' already exists")]
    DuplicateInvoiceNumber(String),
}

impl InvoiceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::InvoiceNotFound(_) => "INVOICE_NOT_FOUND",
            Self::DuplicateInvoiceNumber(_) => "DUPLICATE_INVOICE_NUMBER",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::NonPositiveAmount => 400,
            Self::InvoiceNotFound(_) => 404,
            Self::DuplicateInvoiceNumber(_) => 409,
        }
    }
}

impl From<InvoiceError> for AppError {
    fn from(err: InvoiceError) -> Self {
        match err {
            InvoiceError::NonPositiveAmount => Self::Validation(err.to_string()),
            InvoiceError::InvoiceNotFound(_) => Self::NotFound(err.to_string()),
            InvoiceError::DuplicateInvoiceNumber(_) => Self::Conflict(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_codes() {
        assert_eq!(InvoiceError::NonPositiveAmount.http_status_code(), 400);
        assert_eq!(
            InvoiceError::InvoiceNotFound(Uuid::nil()).http_status_code(),
            404
        );
        assert_eq!(
            InvoiceError::DuplicateInvoiceNumber("INV-1".into()).http_status_code(),
            409
        );
    }

    #[test]
    fn test_app_error_mapping() {
        let app: AppError = InvoiceError::NonPositiveAmount.into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");

        let app: AppError = InvoiceError::DuplicateInvoiceNumber("INV-1".into()).into();
        assert_eq!(app.error_code(), "CONFLICT");
    }
}

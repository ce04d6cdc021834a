//! Recurring entry error types.

use chrono::NaiveDate;
use mizan_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during recurring entry operations.
#[derive(Debug, Error)]
pub enum RecurringError {
    /// Template not found.
    #[error("Recurring entry not found: {0}")]
    TemplateNotFound(Uuid),

    /// Template name already exists.
    #[error("Recurring entry name '{0}' already exists")]
    DuplicateName(String),

    /// Template is paused and cannot fire.
    #[error("Recurring entry {0} is paused")]
    NotActive(Uuid),

    /// Template is not yet due to fire.
    #[error("Recurring entry {id} is not due until {next_run_date}")]
    NotDue {
        /// The template ID.
        id: Uuid,
        /// The date it becomes due.
        next_run_date: NaiveDate,
    },

    /// Template end date has passed.
    #[error("Recurring entry {id} ended on {end_date}")]
    Expired {
        /// The template ID.
        id: Uuid,
        /// The end date that has passed.
        end_date: NaiveDate,
    },
}

impl RecurringError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TemplateNotFound(_) => "RECURRING_ENTRY_NOT_FOUND",
            Self::DuplicateName(_) => "DUPLICATE_RECURRING_NAME",
            Self::NotActive(_) => "RECURRING_ENTRY_NOT_ACTIVE",
            Self::NotDue { .. } => "RECURRING_ENTRY_NOT_DUE",
            Self::Expired { .. } => "RECURRING_ENTRY_EXPIRED",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::TemplateNotFound(_) => 404,
            Self::DuplicateName(_) => 409,
            Self::NotActive(_) | Self::NotDue { .. } | Self::Expired { .. } => 400,
        }
    }
}

impl From<RecurringError> for AppError {
    fn from(err: RecurringError) -> Self {
        match err {
            RecurringError::TemplateNotFound(_) => Self::NotFound(err.to_string()),
            RecurringError::DuplicateName(_) => Self::Conflict(err.to_string()),
            _ => Self::InvalidState(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_codes() {
        assert_eq!(
            RecurringError::TemplateNotFound(Uuid::nil()).http_status_code(),
            404
        );
        assert_eq!(
            RecurringError::DuplicateName("rent".into()).http_status_code(),
            409
        );
        assert_eq!(
            RecurringError::NotActive(Uuid::nil()).http_status_code(),
            400
        );
    }

    #[test]
    fn test_app_error_mapping() {
        let app: AppError = RecurringError::DuplicateName("rent".into()).into();
        assert_eq!(app.error_code(), "CONFLICT");

        let app: AppError = RecurringError::NotActive(Uuid::nil()).into();
        assert_eq!(app.error_code(), "INVALID_STATE");
    }
}

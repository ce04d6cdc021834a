//! Database enum types and conversions to/from the core domain enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reconciliation status of a bank statement line.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "reconciliation_status")]
#[serde(rename_all = "lowercase")]
pub enum ReconciliationStatus {
    /// Not yet matched to any ledger split.
    #[sea_orm(string_value = "unmatched")]
    Unmatched,
    /// Matched to a ledger split.
    #[sea_orm(string_value = "matched")]
    Matched,
    /// Confirmed against the ledger; terminal.
    #[sea_orm(string_value = "reconciled")]
    Reconciled,
}

impl From<ReconciliationStatus> for mizan_core::reconciliation::ReconciliationStatus {
    fn from(status: ReconciliationStatus) -> Self {
        match status {
            ReconciliationStatus::Unmatched => Self::Unmatched,
            ReconciliationStatus::Matched => Self::Matched,
            ReconciliationStatus::Reconciled => Self::Reconciled,
        }
    }
}

/// Posting frequency of a recurring entry.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "recurring_frequency")]
#[serde(rename_all = "lowercase")]
pub enum RecurringFrequency {
    /// Every day.
    #[sea_orm(string_value = "daily")]
    Daily,
    /// Every 7 days.
    #[sea_orm(string_value = "weekly")]
    Weekly,
    /// Every calendar month.
    #[sea_orm(string_value = "monthly")]
    Monthly,
    /// Every 3 calendar months.
    #[sea_orm(string_value = "quarterly")]
    Quarterly,
    /// Every calendar year.
    #[sea_orm(string_value = "annually")]
    Annually,
}

impl From<RecurringFrequency> for mizan_core::recurring::Frequency {
    fn from(frequency: RecurringFrequency) -> Self {
        match frequency {
            RecurringFrequency::Daily => Self::Daily,
            RecurringFrequency::Weekly => Self::Weekly,
            RecurringFrequency::Monthly => Self::Monthly,
            RecurringFrequency::Quarterly => Self::Quarterly,
            RecurringFrequency::Annually => Self::Annually,
        }
    }
}

impl From<mizan_core::recurring::Frequency> for RecurringFrequency {
    fn from(frequency: mizan_core::recurring::Frequency) -> Self {
        use mizan_core::recurring::Frequency;
        match frequency {
            Frequency::Daily => Self::Daily,
            Frequency::Weekly => Self::Weekly,
            Frequency::Monthly => Self::Monthly,
            Frequency::Quarterly => Self::Quarterly,
            Frequency::Annually => Self::Annually,
        }
    }
}

/// Lifecycle status of a recurring entry template.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "recurring_status")]
#[serde(rename_all = "lowercase")]
pub enum RecurringStatus {
    /// Fires when due.
    #[sea_orm(string_value = "active")]
    Active,
    /// Never fires.
    #[sea_orm(string_value = "paused")]
    Paused,
}

impl From<RecurringStatus> for mizan_core::recurring::RecurringStatus {
    fn from(status: RecurringStatus) -> Self {
        match status {
            RecurringStatus::Active => Self::Active,
            RecurringStatus::Paused => Self::Paused,
        }
    }
}

/// Status of a credit invoice.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "invoice_status")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Nothing paid yet.
    #[sea_orm(string_value = "open")]
    Open,
    /// Partially paid.
    #[sea_orm(string_value = "partial")]
    Partial,
    /// Fully paid.
    #[sea_orm(string_value = "paid")]
    Paid,
}

impl From<mizan_core::invoice::InvoiceStatus> for InvoiceStatus {
    fn from(status: mizan_core::invoice::InvoiceStatus) -> Self {
        use mizan_core::invoice::InvoiceStatus as Core;
        match status {
            Core::Open => Self::Open,
            Core::Partial => Self::Partial,
            Core::Paid => Self::Paid,
        }
    }
}

impl From<InvoiceStatus> for mizan_core::invoice::InvoiceStatus {
    fn from(status: InvoiceStatus) -> Self {
        match status {
            InvoiceStatus::Open => Self::Open,
            InvoiceStatus::Partial => Self::Partial,
            InvoiceStatus::Paid => Self::Paid,
        }
    }
}

/// How an invoice payment was settled.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash payment.
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Bank transfer.
    #[sea_orm(string_value = "bank_transfer")]
    BankTransfer,
    /// Card payment.
    #[sea_orm(string_value = "card")]
    Card,
    /// Cheque.
    #[sea_orm(string_value = "cheque")]
    Cheque,
}

impl From<mizan_core::invoice::PaymentMethod> for PaymentMethod {
    fn from(method: mizan_core::invoice::PaymentMethod) -> Self {
        use mizan_core::invoice::PaymentMethod as Core;
        match method {
            Core::Cash => Self::Cash,
            Core::BankTransfer => Self::BankTransfer,
            Core::Card => Self::Card,
            Core::Cheque => Self::Cheque,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconciliation_status_roundtrip() {
        let core: mizan_core::reconciliation::ReconciliationStatus =
            ReconciliationStatus::Matched.into();
        assert_eq!(core, mizan_core::reconciliation::ReconciliationStatus::Matched);
    }

    #[test]
    fn test_frequency_roundtrip() {
        let core: mizan_core::recurring::Frequency = RecurringFrequency::Quarterly.into();
        let back: RecurringFrequency = core.into();
        assert_eq!(back, RecurringFrequency::Quarterly);
    }

    #[test]
    fn test_invoice_status_roundtrip() {
        let db: InvoiceStatus = mizan_core::invoice::InvoiceStatus::Partial.into();
        assert_eq!(db, InvoiceStatus::Partial);
    }
}

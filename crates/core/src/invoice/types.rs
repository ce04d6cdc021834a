//! Invoice domain types and payment application.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::InvoiceError;

/// Status of a credit invoice, derived from amount paid vs total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Nothing paid yet.
    Open,
    /// Partially paid (0 < paid < total).
    Partial,
    /// Fully paid (paid >= total).
    Paid,
}

impl InvoiceStatus {
    /// Derives the status from total and paid amounts.
    #[must_use]
    pub fn derive(total: Decimal, paid: Decimal) -> Self {
        if paid <= Decimal::ZERO {
            Self::Open
        } else if paid < total {
            Self::Partial
        } else {
            Self::Paid
        }
    }
}

/// How an invoice payment was settled.
///
/// Determines which cash/bank account the payment entry debits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash payment.
    Cash,
    /// Bank transfer.
    BankTransfer,
    /// Card payment.
    Card,
    /// Cheque.
    Cheque,
}

/// Result of applying a payment to an invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentApplication {
    /// Amount paid after this payment (monotonically non-decreasing).
    pub new_amount_paid: Decimal,
    /// Status after this payment.
    pub new_status: InvoiceStatus,
}

/// Applies a payment to an invoice's running totals.
///
/// The payment amount must be strictly positive. Overpayment is NOT
/// rejected: amount paid may exceed the total, and the status saturates
/// at PAID. Capping payments at the outstanding balance was considered
/// and deliberately not adopted; callers that want a cap must enforce it
/// before posting.
///
/// # Errors
///
/// Returns `NonPositiveAmount` for a zero or negative payment.
pub fn apply_payment(
    total: Decimal,
    amount_paid: Decimal,
    payment: Decimal,
) -> Result<PaymentApplication, InvoiceError> {
    if payment <= Decimal::ZERO {
        return Err(InvoiceError::NonPositiveAmount);
    }

    let new_amount_paid = amount_paid + payment;
    Ok(PaymentApplication {
        new_amount_paid,
        new_status: InvoiceStatus::derive(total, new_amount_paid),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(1000), dec!(0), InvoiceStatus::Open)]
    #[case(dec!(1000), dec!(0.0001), InvoiceStatus::Partial)]
    #[case(dec!(1000), dec!(999.9999), InvoiceStatus::Partial)]
    #[case(dec!(1000), dec!(1000), InvoiceStatus::Paid)]
    #[case(dec!(1000), dec!(1200), InvoiceStatus::Paid)]
    fn test_status_thresholds(
        #[case] total: Decimal,
        #[case] paid: Decimal,
        #[case] expected: InvoiceStatus,
    ) {
        assert_eq!(InvoiceStatus::derive(total, paid), expected);
    }

    #[test]
    fn test_apply_payment_partial() {
        let applied = apply_payment(dec!(1000), dec!(0), dec!(400)).unwrap();
        assert_eq!(applied.new_amount_paid, dec!(400));
        assert_eq!(applied.new_status, InvoiceStatus::Partial);
    }

    #[test]
    fn test_apply_payment_settles() {
        let applied = apply_payment(dec!(1000), dec!(400), dec!(600)).unwrap();
        assert_eq!(applied.new_amount_paid, dec!(1000));
        assert_eq!(applied.new_status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_overpayment_saturates_at_paid() {
        let applied = apply_payment(dec!(1000), dec!(900), dec!(500)).unwrap();
        assert_eq!(applied.new_amount_paid, dec!(1400));
        assert_eq!(applied.new_status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_non_positive_payment_rejected() {
        assert!(matches!(
            apply_payment(dec!(1000), dec!(0), dec!(0)),
            Err(InvoiceError::NonPositiveAmount)
        ));
        assert!(matches!(
            apply_payment(dec!(1000), dec!(0), dec!(-50)),
            Err(InvoiceError::NonPositiveAmount)
        ));
    }
}

//! Business rule validation for journal entries.
//!
//! These checks run after all splits for an entry are assembled and
//! before the database transaction that persists them is committed.
//! A failed check rejects the whole entry; no partial write survives.

use rust_decimal::Decimal;

use super::error::JournalError;
use super::types::{EntryTotals, SplitInput};

/// Validates a full set of splits for a journal entry.
///
/// Checks, in order:
/// 1. At least 2 splits (a one-sided entry is meaningless)
/// 2. Every split amount is strictly positive
/// 3. Sum of debits equals sum of credits, exactly (no tolerance)
///
/// Returns the computed totals on success so the caller does not
/// need to re-sum.
///
/// # Errors
///
/// Returns a `JournalError` naming the first invariant violated.
pub fn validate_splits(splits: &[SplitInput]) -> Result<EntryTotals, JournalError> {
    if splits.len() < 2 {
        return Err(JournalError::InsufficientSplits);
    }

    let mut debit_total = Decimal::ZERO;
    let mut credit_total = Decimal::ZERO;

    for split in splits {
        if split.amount == Decimal::ZERO {
            return Err(JournalError::ZeroAmount);
        }
        if split.amount < Decimal::ZERO {
            return Err(JournalError::NegativeAmount);
        }

        let (debit, credit) = split.amounts();
        debit_total += debit;
        credit_total += credit;
    }

    let totals = EntryTotals::new(debit_total, credit_total);

    if !totals.is_balanced {
        return Err(JournalError::Unbalanced {
            debits: totals.debit_total,
            credits: totals.credit_total,
        });
    }

    Ok(totals)
}

/// Validates a persisted-form (debit, credit) amount pair.
///
/// Exactly one of the two must be strictly positive; the other must be
/// exactly zero. Mirrors the database check constraint on splits.
///
/// # Errors
///
/// Returns a `JournalError` if the pair violates split exclusivity.
pub fn validate_split_amounts(debit: Decimal, credit: Decimal) -> Result<(), JournalError> {
    if debit < Decimal::ZERO || credit < Decimal::ZERO {
        return Err(JournalError::NegativeAmount);
    }
    if debit > Decimal::ZERO && credit > Decimal::ZERO {
        return Err(JournalError::DebitCreditExclusive);
    }
    if debit == Decimal::ZERO && credit == Decimal::ZERO {
        return Err(JournalError::ZeroAmount);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::types::SplitDirection;
    use mizan_shared::types::AccountId;
    use rust_decimal_macros::dec;

    fn split(direction: SplitDirection, amount: Decimal) -> SplitInput {
        SplitInput {
            account_id: AccountId::new(),
            direction,
            amount,
            memo: None,
        }
    }

    #[test]
    fn test_balanced_splits() {
        let splits = vec![
            split(SplitDirection::Debit, dec!(100.00)),
            split(SplitDirection::Credit, dec!(100.00)),
        ];
        let totals = validate_splits(&splits).unwrap();
        assert!(totals.is_balanced);
        assert_eq!(totals.debit_total, dec!(100.00));
        assert_eq!(totals.credit_total, dec!(100.00));
    }

    #[test]
    fn test_multi_leg_balanced() {
        let splits = vec![
            split(SplitDirection::Debit, dec!(60)),
            split(SplitDirection::Debit, dec!(40)),
            split(SplitDirection::Credit, dec!(100)),
        ];
        assert!(validate_splits(&splits).is_ok());
    }

    #[test]
    fn test_unbalanced_splits() {
        let splits = vec![
            split(SplitDirection::Debit, dec!(100)),
            split(SplitDirection::Credit, dec!(50)),
        ];
        assert!(matches!(
            validate_splits(&splits),
            Err(JournalError::Unbalanced { .. })
        ));
    }

    #[test]
    fn test_no_rounding_tolerance() {
        // Off by the smallest representable step still rejects.
        let splits = vec![
            split(SplitDirection::Debit, dec!(100.0001)),
            split(SplitDirection::Credit, dec!(100.0000)),
        ];
        assert!(matches!(
            validate_splits(&splits),
            Err(JournalError::Unbalanced { .. })
        ));
    }

    #[test]
    fn test_insufficient_splits() {
        let splits = vec![split(SplitDirection::Debit, dec!(100))];
        assert!(matches!(
            validate_splits(&splits),
            Err(JournalError::InsufficientSplits)
        ));

        assert!(matches!(
            validate_splits(&[]),
            Err(JournalError::InsufficientSplits)
        ));
    }

    #[test]
    fn test_zero_amount() {
        let splits = vec![
            split(SplitDirection::Debit, dec!(0)),
            split(SplitDirection::Credit, dec!(100)),
        ];
        assert!(matches!(
            validate_splits(&splits),
            Err(JournalError::ZeroAmount)
        ));
    }

    #[test]
    fn test_negative_amount() {
        let splits = vec![
            split(SplitDirection::Debit, dec!(-100)),
            split(SplitDirection::Credit, dec!(100)),
        ];
        assert!(matches!(
            validate_splits(&splits),
            Err(JournalError::NegativeAmount)
        ));
    }

    #[test]
    fn test_split_amounts_exclusivity() {
        assert!(validate_split_amounts(dec!(100), dec!(0)).is_ok());
        assert!(validate_split_amounts(dec!(0), dec!(100)).is_ok());

        assert!(matches!(
            validate_split_amounts(dec!(100), dec!(100)),
            Err(JournalError::DebitCreditExclusive)
        ));
        assert!(matches!(
            validate_split_amounts(dec!(0), dec!(0)),
            Err(JournalError::ZeroAmount)
        ));
        assert!(matches!(
            validate_split_amounts(dec!(-1), dec!(0)),
            Err(JournalError::NegativeAmount)
        ));
        assert!(matches!(
            validate_split_amounts(dec!(0), dec!(-1)),
            Err(JournalError::NegativeAmount)
        ));
    }
}

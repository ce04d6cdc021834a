//! Statement line state machine transitions.
//!
//! States: UNMATCHED → MATCHED → RECONCILED.
//! - UNMATCHED → MATCHED via auto-match or manual match
//! - MATCHED → UNMATCHED via unmatch
//! - MATCHED → RECONCILED via reconcile (terminal)
//!
//! Everything else is rejected. These checks are pure; the repository
//! layer runs them before mutating anything inside its transaction.

use super::error::ReconciliationError;
use super::types::ReconciliationStatus;

/// Validates a manual match against the current line status.
///
/// Manual matching is a deliberate override: it ignores amount and date
/// similarity entirely, but a reconciled line can never be re-matched.
/// `split_on_bank_account` must reflect whether the target split posts to
/// the designated bank account.
///
/// # Errors
///
/// Returns `CannotMatchReconciled` for a reconciled line and
/// `NotBankAccountSplit` for a split on any other account.
pub fn validate_manual_match(
    status: ReconciliationStatus,
    split_id: uuid::Uuid,
    split_on_bank_account: bool,
) -> Result<(), ReconciliationError> {
    if !split_on_bank_account {
        return Err(ReconciliationError::NotBankAccountSplit(split_id));
    }
    if status == ReconciliationStatus::Reconciled {
        return Err(ReconciliationError::CannotMatchReconciled);
    }
    Ok(())
}

/// Validates an unmatch against the current line status.
///
/// Only a MATCHED line can be unmatched; RECONCILED is terminal and
/// UNMATCHED has nothing to undo.
///
/// # Errors
///
/// Returns `CannotUnmatch` carrying the offending status.
pub fn validate_unmatch(status: ReconciliationStatus) -> Result<(), ReconciliationError> {
    match status {
        ReconciliationStatus::Matched => Ok(()),
        other => Err(ReconciliationError::CannotUnmatch(other)),
    }
}

/// Validates a reconcile against the current line status.
///
/// Only a MATCHED line can be reconciled. Batch reconcile callers must
/// run this for every line BEFORE mutating any of them (fail fast, no
/// partial commit).
///
/// # Errors
///
/// Returns `CannotReconcile` carrying the offending status.
pub fn validate_reconcile(status: ReconciliationStatus) -> Result<(), ReconciliationError> {
    match status {
        ReconciliationStatus::Matched => Ok(()),
        other => Err(ReconciliationError::CannotReconcile(other)),
    }
}

/// Validates a whole reconcile batch, all-or-nothing.
///
/// One line outside MATCHED fails the batch; callers mutate only after
/// an `Ok`.
///
/// # Errors
///
/// Returns `CannotReconcile` for the first offending status.
pub fn validate_reconcile_batch(
    statuses: &[ReconciliationStatus],
) -> Result<(), ReconciliationError> {
    for status in statuses {
        validate_reconcile(*status)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    #[case(ReconciliationStatus::Unmatched, true)]
    #[case(ReconciliationStatus::Matched, true)]
    #[case(ReconciliationStatus::Reconciled, false)]
    fn test_manual_match_status_guard(#[case] status: ReconciliationStatus, #[case] ok: bool) {
        let result = validate_manual_match(status, Uuid::nil(), true);
        assert_eq!(result.is_ok(), ok);
    }

    #[test]
    fn test_manual_match_requires_bank_account() {
        let result = validate_manual_match(ReconciliationStatus::Unmatched, Uuid::nil(), false);
        assert!(matches!(
            result,
            Err(ReconciliationError::NotBankAccountSplit(_))
        ));
    }

    #[test]
    fn test_unmatch_only_from_matched() {
        assert!(validate_unmatch(ReconciliationStatus::Matched).is_ok());
        assert!(matches!(
            validate_unmatch(ReconciliationStatus::Unmatched),
            Err(ReconciliationError::CannotUnmatch(
                ReconciliationStatus::Unmatched
            ))
        ));
        assert!(matches!(
            validate_unmatch(ReconciliationStatus::Reconciled),
            Err(ReconciliationError::CannotUnmatch(
                ReconciliationStatus::Reconciled
            ))
        ));
    }

    #[test]
    fn test_reconcile_only_from_matched() {
        assert!(validate_reconcile(ReconciliationStatus::Matched).is_ok());
        assert!(validate_reconcile(ReconciliationStatus::Unmatched).is_err());
        assert!(validate_reconcile(ReconciliationStatus::Reconciled).is_err());
    }

    #[test]
    fn test_reconcile_batch_all_matched() {
        let statuses = [ReconciliationStatus::Matched, ReconciliationStatus::Matched];
        assert!(validate_reconcile_batch(&statuses).is_ok());
        assert!(validate_reconcile_batch(&[]).is_ok());
    }

    #[test]
    fn test_reconcile_batch_rejects_whole_batch() {
        // Two matched lines plus one unmatched: the whole batch fails,
        // callers must not have touched any of the three.
        let statuses = [
            ReconciliationStatus::Matched,
            ReconciliationStatus::Matched,
            ReconciliationStatus::Unmatched,
        ];
        assert!(matches!(
            validate_reconcile_batch(&statuses),
            Err(ReconciliationError::CannotReconcile(
                ReconciliationStatus::Unmatched
            ))
        ));
    }

    #[test]
    fn test_reconciled_is_closed() {
        // From RECONCILED, both unmatch and reconcile fail.
        assert!(validate_unmatch(ReconciliationStatus::Reconciled).is_err());
        assert!(validate_reconcile(ReconciliationStatus::Reconciled).is_err());
    }
}

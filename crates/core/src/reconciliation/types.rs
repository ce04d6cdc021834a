//! Reconciliation domain types.

use chrono::NaiveDate;
use mizan_shared::types::{SplitId, StatementLineId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reconciliation status of a bank statement line.
///
/// Lines progress UNMATCHED → MATCHED → RECONCILED. Reconciled is
/// terminal; a reconciled line can never be unmatched or re-reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconciliationStatus {
    /// Not yet matched to any ledger split.
    Unmatched,
    /// Matched to a ledger split (auto or manual); reversible.
    Matched,
    /// Confirmed against the ledger; terminal.
    Reconciled,
}

impl ReconciliationStatus {
    /// Returns true if the line can still be (re)matched.
    #[must_use]
    pub fn is_matchable(&self) -> bool {
        !matches!(self, Self::Reconciled)
    }

    /// Returns true if this status is terminal.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Reconciled)
    }
}

/// A statement line as seen by the auto-match planner.
#[derive(Debug, Clone)]
pub struct LineToMatch {
    /// The statement line ID.
    pub line_id: StatementLineId,
    /// Date claimed by the bank.
    pub line_date: NaiveDate,
    /// Signed amount claimed by the bank (positive = money in).
    pub amount: Decimal,
    /// Optional reference text from the statement.
    pub reference: Option<String>,
}

/// A candidate ledger split on the designated bank account.
#[derive(Debug, Clone)]
pub struct CandidateSplit {
    /// The split ID.
    pub split_id: SplitId,
    /// Date of the split's owning journal entry.
    pub entry_date: NaiveDate,
    /// Net signed amount (debit − credit).
    pub net_amount: Decimal,
    /// Reference text of the owning journal entry.
    pub entry_reference: Option<String>,
}

/// One planned line-to-split assignment produced by the auto-matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMatch {
    /// The statement line being matched.
    pub line_id: StatementLineId,
    /// The split it is matched to.
    pub split_id: SplitId,
    /// The winning score.
    pub score: i64,
}

/// Point-in-time reconciliation summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    /// Sum of (debit − credit) over all splits on the bank account,
    /// unfiltered by statement line status.
    pub gl_balance: Decimal,
    /// Sum over all statement lines regardless of status.
    pub statement_balance: Decimal,
    /// Sum over RECONCILED lines only.
    pub reconciled_balance: Decimal,
    /// Number of unmatched lines.
    pub unmatched_count: u64,
    /// Number of matched lines.
    pub matched_count: u64,
    /// Number of reconciled lines.
    pub reconciled_count: u64,
}

impl ReconciliationSummary {
    /// Computes a summary from bank-account split net amounts and
    /// statement line (status, amount) pairs.
    #[must_use]
    pub fn compute(split_nets: &[Decimal], lines: &[(ReconciliationStatus, Decimal)]) -> Self {
        let gl_balance: Decimal = split_nets.iter().copied().sum();

        let mut statement_balance = Decimal::ZERO;
        let mut reconciled_balance = Decimal::ZERO;
        let mut unmatched_count = 0u64;
        let mut matched_count = 0u64;
        let mut reconciled_count = 0u64;

        for (status, amount) in lines {
            statement_balance += *amount;
            match status {
                ReconciliationStatus::Unmatched => unmatched_count += 1,
                ReconciliationStatus::Matched => matched_count += 1,
                ReconciliationStatus::Reconciled => {
                    reconciled_count += 1;
                    reconciled_balance += *amount;
                }
            }
        }

        Self {
            gl_balance,
            statement_balance,
            reconciled_balance,
            unmatched_count,
            matched_count,
            reconciled_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_matchable() {
        assert!(ReconciliationStatus::Unmatched.is_matchable());
        assert!(ReconciliationStatus::Matched.is_matchable());
        assert!(!ReconciliationStatus::Reconciled.is_matchable());
    }

    #[test]
    fn test_status_terminal() {
        assert!(!ReconciliationStatus::Unmatched.is_terminal());
        assert!(!ReconciliationStatus::Matched.is_terminal());
        assert!(ReconciliationStatus::Reconciled.is_terminal());
    }

    #[test]
    fn test_summary_arithmetic() {
        // Splits debiting the bank account 1000.0000 and 500.0000, and
        // two UNMATCHED statement lines of the same amounts.
        let summary = ReconciliationSummary::compute(
            &[dec!(1000.0000), dec!(500.0000)],
            &[
                (ReconciliationStatus::Unmatched, dec!(1000.0000)),
                (ReconciliationStatus::Unmatched, dec!(500.0000)),
            ],
        );

        assert_eq!(summary.gl_balance, dec!(1500.0000));
        assert_eq!(summary.statement_balance, dec!(1500.0000));
        assert_eq!(summary.reconciled_balance, Decimal::ZERO);
        assert_eq!(summary.unmatched_count, 2);
        assert_eq!(summary.matched_count, 0);
        assert_eq!(summary.reconciled_count, 0);
    }

    #[test]
    fn test_summary_partitions_by_status() {
        let summary = ReconciliationSummary::compute(
            &[dec!(250), dec!(-100)],
            &[
                (ReconciliationStatus::Unmatched, dec!(250)),
                (ReconciliationStatus::Matched, dec!(-100)),
                (ReconciliationStatus::Reconciled, dec!(75)),
            ],
        );

        assert_eq!(summary.gl_balance, dec!(150));
        assert_eq!(summary.statement_balance, dec!(225));
        assert_eq!(summary.reconciled_balance, dec!(75));
        assert_eq!(summary.unmatched_count, 1);
        assert_eq!(summary.matched_count, 1);
        assert_eq!(summary.reconciled_count, 1);
    }

    #[test]
    fn test_summary_empty() {
        let summary = ReconciliationSummary::compute(&[], &[]);
        assert_eq!(summary.gl_balance, Decimal::ZERO);
        assert_eq!(summary.statement_balance, Decimal::ZERO);
        assert_eq!(summary.unmatched_count, 0);
    }
}

//! Bank reconciliation logic.
//!
//! This module implements the reconciliation engine core:
//! - The statement line state machine (UNMATCHED → MATCHED → RECONCILED)
//! - Greedy auto-match scoring and planning over candidate splits
//! - Reconciliation summary arithmetic
//!
//! The engine reads ledger splits but never writes them; all mutation is
//! confined to statement lines and their match pointers.

pub mod error;
pub mod matching;
pub mod transitions;
pub mod types;

#[cfg(test)]
mod matching_props;

pub use error::ReconciliationError;
pub use matching::{plan_matches, score_candidate, MAX_DATE_DIFF_DAYS};
pub use transitions::{
    validate_manual_match, validate_reconcile, validate_reconcile_batch, validate_unmatch,
};
pub use types::{
    CandidateSplit, LineToMatch, PlannedMatch, ReconciliationStatus, ReconciliationSummary,
};

//! Double-entry bookkeeping logic.
//!
//! This module implements the journal entry core:
//! - Journal entries and their transaction splits
//! - Split exclusivity (exactly one of debit/credit is positive)
//! - The entry-level balance invariant (sum of debits == sum of credits)
//! - Input types consumed by the posting service

pub mod error;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::JournalError;
pub use types::{
    CreateJournalEntryInput, EntryTotals, JournalEntry, SplitDirection, SplitInput,
    TransactionSplit,
};
pub use validation::{validate_split_amounts, validate_splits};

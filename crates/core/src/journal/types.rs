//! Journal domain types for entry creation and validation.

use chrono::{DateTime, NaiveDate, Utc};
use mizan_shared::types::{AccountId, JournalEntryId, SplitId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a split: either Debit or Credit.
///
/// In double-entry bookkeeping:
/// - Debits increase asset/expense accounts, decrease liability/equity/revenue accounts
/// - Credits decrease asset/expense accounts, increase liability/equity/revenue accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    /// Debit split.
    Debit,
    /// Credit split.
    Credit,
}

/// Input for a single split of a journal entry.
///
/// Amounts are expressed as a direction plus a positive magnitude; the
/// posting service stores them as a (debit, credit) pair where the
/// opposite side is exactly zero.
#[derive(Debug, Clone)]
pub struct SplitInput {
    /// The account to post to.
    pub account_id: AccountId,
    /// Whether this is a debit or credit split.
    pub direction: SplitDirection,
    /// The amount (must be strictly positive).
    pub amount: Decimal,
    /// Optional memo for this line.
    pub memo: Option<String>,
}

impl SplitInput {
    /// Returns the (debit, credit) pair this input persists as.
    #[must_use]
    pub fn amounts(&self) -> (Decimal, Decimal) {
        match self.direction {
            SplitDirection::Debit => (self.amount, Decimal::ZERO),
            SplitDirection::Credit => (Decimal::ZERO, self.amount),
        }
    }
}

/// Input for creating a new journal entry.
#[derive(Debug, Clone)]
pub struct CreateJournalEntryInput {
    /// The date of the entry.
    pub entry_date: NaiveDate,
    /// A description of the entry.
    pub description: String,
    /// Optional free-text reference (e.g. invoice number, statement ref).
    pub reference: Option<String>,
    /// The splits (must have at least 2 and balance exactly).
    pub splits: Vec<SplitInput>,
    /// The user creating the entry.
    pub created_by: UserId,
}

/// An immutable journal entry header.
///
/// Once created, an entry's splits are never edited; corrections are
/// made via new offsetting entries (append-only ledger).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: JournalEntryId,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Free-text reference.
    pub reference: Option<String>,
    /// User who created the entry.
    pub created_by: UserId,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// Splits in display order (populated when needed).
    #[serde(default)]
    pub splits: Vec<TransactionSplit>,
}

/// A single debit-or-credit line referencing an account.
///
/// Invariant: exactly one of `debit_amount` / `credit_amount` is strictly
/// positive, the other is exactly zero, both are non-negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSplit {
    /// Unique identifier.
    pub id: SplitId,
    /// The journal entry this split belongs to.
    pub entry_id: JournalEntryId,
    /// The account affected by this split.
    pub account_id: AccountId,
    /// Debit amount (zero if this is a credit split).
    pub debit_amount: Decimal,
    /// Credit amount (zero if this is a debit split).
    pub credit_amount: Decimal,
    /// Optional memo for this line.
    pub memo: Option<String>,
}

impl TransactionSplit {
    /// Returns the net signed amount (debit − credit).
    ///
    /// This is the amount compared against signed bank statement line
    /// amounts during reconciliation.
    #[must_use]
    pub fn net_amount(&self) -> Decimal {
        self.debit_amount - self.credit_amount
    }

    /// Returns the direction of this split.
    #[must_use]
    pub fn direction(&self) -> SplitDirection {
        if self.debit_amount > Decimal::ZERO {
            SplitDirection::Debit
        } else {
            SplitDirection::Credit
        }
    }
}

/// Entry totals for validation and display.
#[derive(Debug, Clone)]
pub struct EntryTotals {
    /// Total debit amount.
    pub debit_total: Decimal,
    /// Total credit amount.
    pub credit_total: Decimal,
    /// Whether the entry is balanced (debits == credits, exactly).
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates new entry totals from debit and credit sums.
    #[must_use]
    pub fn new(debit_total: Decimal, credit_total: Decimal) -> Self {
        Self {
            debit_total,
            credit_total,
            is_balanced: debit_total == credit_total,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit_total - self.credit_total
    }
}

//! Recurring entry domain types.

use chrono::{DateTime, NaiveDate, Utc};
use mizan_shared::types::{RecurringEntryId, UserId};
use serde::{Deserialize, Serialize};

use crate::journal::SplitInput;

/// Posting frequency of a recurring entry template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Fires every day.
    Daily,
    /// Fires every 7 days.
    Weekly,
    /// Fires every calendar month (month-end clamped).
    Monthly,
    /// Fires every 3 calendar months.
    Quarterly,
    /// Fires every calendar year.
    Annually,
}

/// Lifecycle status of a recurring entry template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringStatus {
    /// Template fires when due.
    Active,
    /// Template is paused; never fires.
    Paused,
}

/// A recurring entry template.
///
/// The split templates must themselves satisfy the double-entry balance
/// invariant at template-definition time, so every firing produces a
/// balanced journal entry by construction.
#[derive(Debug, Clone)]
pub struct RecurringTemplate {
    /// Unique identifier.
    pub id: RecurringEntryId,
    /// Template name (unique).
    pub name: String,
    /// Description copied onto produced journal entries.
    pub description: String,
    /// Prefix for produced entry references (`{prefix}-{n}`).
    pub reference_prefix: String,
    /// Posting frequency.
    pub frequency: Frequency,
    /// Next date this template is due to fire.
    pub next_run_date: NaiveDate,
    /// Optional last date the template may fire.
    pub end_date: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: RecurringStatus,
    /// When the template last produced an entry.
    pub last_posted_at: Option<DateTime<Utc>>,
    /// How many entries this template has produced.
    pub total_posted: i64,
    /// Split templates copied 1:1 into each produced entry (≥2, balanced).
    pub splits: Vec<SplitInput>,
    /// User who created the template.
    pub created_by: UserId,
}

impl RecurringTemplate {
    /// Returns the reference for the next entry this template produces.
    #[must_use]
    pub fn next_reference(&self) -> String {
        format!("{}-{}", self.reference_prefix, self.total_posted + 1)
    }
}

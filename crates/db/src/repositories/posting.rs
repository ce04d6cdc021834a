//! Posting repository: the write path of the ledger.
//!
//! Posting validates the double-entry invariants in `mizan-core`, verifies
//! every referenced account exists and is active, and inserts the entry
//! header, its splits, and the audit row in ONE database transaction. Any
//! failure rolls the whole transaction back; a journal entry is never
//! persisted partially or unbalanced.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use mizan_core::journal::{validate_splits, CreateJournalEntryInput, JournalError};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::{accounts, journal_entries, transaction_splits};
use crate::repositories::audit::{AuditRepository, NewAuditLog};

/// Error types for posting operations.
#[derive(Debug, thiserror::Error)]
pub enum PostingError {
    /// Domain validation failed (unbalanced, bad split, unknown account).
    #[error(transparent)]
    Journal(#[from] JournalError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A persisted journal entry with its splits in display order.
#[derive(Debug, Clone)]
pub struct JournalEntryWithSplits {
    /// Entry header.
    pub entry: journal_entries::Model,
    /// Splits, ordered by position.
    pub splits: Vec<transaction_splits::Model>,
}

/// Posting repository.
#[derive(Debug, Clone)]
pub struct PostingRepository {
    db: DatabaseConnection,
}

impl PostingRepository {
    /// Creates a new posting repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Posts a journal entry in its own database transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There are fewer than 2 splits
    /// - Any split amount is non-positive or carries both sides
    /// - Total debits do not equal total credits exactly
    /// - Any referenced account is missing or inactive
    /// - A database operation fails
    pub async fn post(
        &self,
        input: CreateJournalEntryInput,
    ) -> Result<JournalEntryWithSplits, PostingError> {
        let txn = self.db.begin().await?;
        let result = Self::post_in_txn(&txn, &input).await?;
        txn.commit().await?;

        info!(
            entry_id = %result.entry.id,
            splits = result.splits.len(),
            "journal entry posted"
        );
        Ok(result)
    }

    /// Posts a journal entry inside a caller-owned transaction.
    ///
    /// Recurring and invoice postings use this so the journal entry commits
    /// or rolls back together with their own side records.
    ///
    /// # Errors
    ///
    /// Same as [`Self::post`]; the caller decides whether to commit.
    pub async fn post_in_txn<C: ConnectionTrait>(
        txn: &C,
        input: &CreateJournalEntryInput,
    ) -> Result<JournalEntryWithSplits, PostingError> {
        let totals = validate_splits(&input.splits)?;
        Self::verify_accounts(txn, input).await?;

        let now = Utc::now();
        let entry_id = Uuid::now_v7();

        let entry = journal_entries::ActiveModel {
            id: Set(entry_id),
            entry_date: Set(input.entry_date),
            description: Set(input.description.clone()),
            reference: Set(input.reference.clone()),
            created_by: Set(input.created_by.into_inner()),
            created_at: Set(now.into()),
        };
        let entry = entry.insert(txn).await?;

        let mut splits = Vec::with_capacity(input.splits.len());
        for (position, split_input) in input.splits.iter().enumerate() {
            let (debit, credit) = split_input.amounts();
            let split = transaction_splits::ActiveModel {
                id: Set(Uuid::now_v7()),
                entry_id: Set(entry_id),
                account_id: Set(split_input.account_id.into_inner()),
                debit_amount: Set(debit),
                credit_amount: Set(credit),
                memo: Set(split_input.memo.clone()),
                position: Set(i32::try_from(position).unwrap_or(i32::MAX)),
            };
            splits.push(split.insert(txn).await?);
        }

        AuditRepository::record(
            txn,
            NewAuditLog {
                actor_id: input.created_by.into_inner(),
                action: "journal_entry.posted".to_string(),
                resource_type: "journal_entry".to_string(),
                resource_id: entry_id,
                ip: None,
                changes: Some(serde_json::json!({
                    "debit_total": totals.debit_total,
                    "credit_total": totals.credit_total,
                    "splits": input.splits.len(),
                })),
            },
        )
        .await?;

        debug!(entry_id = %entry_id, debit_total = %totals.debit_total, "entry written");
        Ok(JournalEntryWithSplits { entry, splits })
    }

    /// Gets an entry with its splits ordered by position.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if no entry has this ID.
    pub async fn get_entry(&self, entry_id: Uuid) -> Result<JournalEntryWithSplits, PostingError> {
        let entry = journal_entries::Entity::find_by_id(entry_id)
            .one(&self.db)
            .await?
            .ok_or(JournalError::EntryNotFound(entry_id))?;

        let splits = transaction_splits::Entity::find()
            .filter(transaction_splits::Column::EntryId.eq(entry_id))
            .order_by_asc(transaction_splits::Column::Position)
            .all(&self.db)
            .await?;

        Ok(JournalEntryWithSplits { entry, splits })
    }

    /// Verifies every referenced account exists and is active.
    async fn verify_accounts<C: ConnectionTrait>(
        txn: &C,
        input: &CreateJournalEntryInput,
    ) -> Result<(), PostingError> {
        let account_ids: HashSet<Uuid> = input
            .splits
            .iter()
            .map(|s| s.account_id.into_inner())
            .collect();

        let found: HashMap<Uuid, bool> = accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(account_ids.iter().copied()))
            .all(txn)
            .await?
            .into_iter()
            .map(|a| (a.id, a.is_active))
            .collect();

        for account_id in account_ids {
            match found.get(&account_id) {
                None => return Err(JournalError::AccountNotFound(account_id).into()),
                Some(false) => return Err(JournalError::AccountInactive(account_id).into()),
                Some(true) => {}
            }
        }

        Ok(())
    }
}

//! Reconciliation repository: bank statement lines against the ledger.
//!
//! All pure logic (scoring, greedy planning, state transitions, summary
//! arithmetic) lives in `mizan-core`; this repository loads the data,
//! runs the pure functions, and persists the outcome in one database
//! transaction per operation.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Utc};
use mizan_core::reconciliation::{
    plan_matches, validate_manual_match, validate_reconcile_batch, validate_unmatch,
    CandidateSplit, LineToMatch, ReconciliationError, ReconciliationStatus as LineStatus,
    ReconciliationSummary,
};
use mizan_shared::types::{SplitId, StatementLineId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::{
    accounts, bank_statement_lines, journal_entries, transaction_splits,
    sea_orm_active_enums::ReconciliationStatus,
};
use crate::repositories::audit::{AuditRepository, NewAuditLog};

/// Error types for reconciliation operations.
#[derive(Debug, thiserror::Error)]
pub enum StatementError {
    /// The configured bank account code does not exist.
    #[error("No account with code '{0}' to reconcile against")]
    BankAccountMissing(String),

    /// Statement line not found.
    #[error("Statement line not found: {0}")]
    LineNotFound(Uuid),

    /// Transaction split not found.
    #[error("Transaction split not found: {0}")]
    SplitNotFound(Uuid),

    /// Split is already claimed by another statement line.
    #[error("Split {0} is already matched to another statement line")]
    SplitAlreadyMatched(Uuid),

    /// State machine rejected the transition.
    #[error(transparent)]
    Transition(#[from] ReconciliationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for importing one bank statement line.
#[derive(Debug, Clone)]
pub struct CreateStatementLineInput {
    /// Date claimed by the bank.
    pub line_date: NaiveDate,
    /// Description from the statement.
    pub description: String,
    /// Signed amount (positive = money in).
    pub amount: Decimal,
    /// Optional reference text from the statement.
    pub reference: Option<String>,
}

/// Reconciliation repository.
#[derive(Debug, Clone)]
pub struct ReconciliationRepository {
    db: DatabaseConnection,
    bank_account_code: String,
}

impl ReconciliationRepository {
    /// Creates a new reconciliation repository bound to the designated
    /// bank account code.
    #[must_use]
    pub const fn new(db: DatabaseConnection, bank_account_code: String) -> Self {
        Self {
            db,
            bank_account_code,
        }
    }

    /// Bulk-imports statement lines, all UNMATCHED.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn create_statement_lines(
        &self,
        inputs: Vec<CreateStatementLineInput>,
        actor: Uuid,
    ) -> Result<Vec<bank_statement_lines::Model>, StatementError> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let mut lines = Vec::with_capacity(inputs.len());
        for input in inputs {
            let line = bank_statement_lines::ActiveModel {
                id: Set(Uuid::now_v7()),
                line_date: Set(input.line_date),
                description: Set(input.description),
                amount: Set(input.amount),
                reference: Set(input.reference),
                status: Set(ReconciliationStatus::Unmatched),
                matched_split_id: Set(None),
                reconciled_by: Set(None),
                reconciled_at: Set(None),
                created_by: Set(actor),
                created_at: Set(now.into()),
            };
            lines.push(line.insert(&txn).await?);
        }

        AuditRepository::record(
            &txn,
            NewAuditLog {
                actor_id: actor,
                action: "bank_statement.imported".to_string(),
                resource_type: "bank_statement_lines".to_string(),
                resource_id: Uuid::now_v7(),
                ip: None,
                changes: Some(serde_json::json!({ "count": lines.len() })),
            },
        )
        .await?;

        txn.commit().await?;

        info!(count = lines.len(), "statement lines imported");
        Ok(lines)
    }

    /// Runs the greedy auto-matcher over all UNMATCHED lines.
    ///
    /// Candidates are splits on the designated bank account not already
    /// claimed by any line, enumerated in a stable order (owning entry
    /// date, then split ID). Returns the number of lines matched; zero is
    /// a valid no-op. Idempotent: a second run matches nothing new.
    ///
    /// # Errors
    ///
    /// Returns `BankAccountMissing` if the configured code resolves to no
    /// account, or a database error.
    pub async fn auto_match(&self, actor: Uuid) -> Result<u64, StatementError> {
        let txn = self.db.begin().await?;
        let bank_account = self.bank_account(&txn).await?;

        // Splits claimed by any line, regardless of status.
        let claimed: HashSet<Uuid> = bank_statement_lines::Entity::find()
            .filter(bank_statement_lines::Column::MatchedSplitId.is_not_null())
            .all(&txn)
            .await?
            .into_iter()
            .filter_map(|line| line.matched_split_id)
            .collect();

        let line_models = bank_statement_lines::Entity::find()
            .filter(bank_statement_lines::Column::Status.eq(ReconciliationStatus::Unmatched))
            .order_by_asc(bank_statement_lines::Column::LineDate)
            .order_by_asc(bank_statement_lines::Column::Id)
            .all(&txn)
            .await?;

        let candidate_rows = transaction_splits::Entity::find()
            .filter(transaction_splits::Column::AccountId.eq(bank_account.id))
            .find_also_related(journal_entries::Entity)
            .order_by_asc(journal_entries::Column::EntryDate)
            .order_by_asc(transaction_splits::Column::Id)
            .all(&txn)
            .await?;

        let candidates: Vec<CandidateSplit> = candidate_rows
            .into_iter()
            .filter(|(split, _)| !claimed.contains(&split.id))
            .filter_map(|(split, entry)| {
                entry.map(|entry| CandidateSplit {
                    split_id: SplitId::from_uuid(split.id),
                    entry_date: entry.entry_date,
                    net_amount: split.net_amount(),
                    entry_reference: entry.reference,
                })
            })
            .collect();

        let lines: Vec<LineToMatch> = line_models
            .iter()
            .map(|line| LineToMatch {
                line_id: StatementLineId::from_uuid(line.id),
                line_date: line.line_date,
                amount: line.amount,
                reference: line.reference.clone(),
            })
            .collect();

        let planned = plan_matches(&lines, &candidates);

        let mut by_id: HashMap<Uuid, bank_statement_lines::Model> =
            line_models.into_iter().map(|m| (m.id, m)).collect();

        for planned_match in &planned {
            debug!(
                line_id = %planned_match.line_id,
                split_id = %planned_match.split_id,
                score = planned_match.score,
                "auto-match planned"
            );
            let Some(model) = by_id.remove(&planned_match.line_id.into_inner()) else {
                continue;
            };
            let mut active: bank_statement_lines::ActiveModel = model.into();
            active.status = Set(ReconciliationStatus::Matched);
            active.matched_split_id = Set(Some(planned_match.split_id.into_inner()));
            active.update(&txn).await?;
        }

        let matched = planned.len() as u64;
        if matched > 0 {
            AuditRepository::record(
                &txn,
                NewAuditLog {
                    actor_id: actor,
                    action: "bank_statement.auto_matched".to_string(),
                    resource_type: "bank_statement_lines".to_string(),
                    resource_id: Uuid::now_v7(),
                    ip: None,
                    changes: Some(serde_json::json!({ "matched": matched })),
                },
            )
            .await?;
        }

        txn.commit().await?;

        info!(matched, "auto-match run complete");
        Ok(matched)
    }

    /// Manually matches a line to a split on the bank account.
    ///
    /// This is a deliberate override: amount and date similarity are not
    /// checked. The split must post to the designated bank account and the
    /// line must not be RECONCILED.
    ///
    /// # Errors
    ///
    /// Returns `LineNotFound` / `SplitNotFound` for unknown IDs,
    /// `SplitAlreadyMatched` if another line claims the split, or a state
    /// machine rejection.
    pub async fn manual_match(
        &self,
        line_id: Uuid,
        split_id: Uuid,
        actor: Uuid,
    ) -> Result<bank_statement_lines::Model, StatementError> {
        let txn = self.db.begin().await?;

        let line = bank_statement_lines::Entity::find_by_id(line_id)
            .one(&txn)
            .await?
            .ok_or(StatementError::LineNotFound(line_id))?;

        let split = transaction_splits::Entity::find_by_id(split_id)
            .one(&txn)
            .await?
            .ok_or(StatementError::SplitNotFound(split_id))?;

        let bank_account = self.bank_account(&txn).await?;
        let status: LineStatus = line.status.clone().into();
        validate_manual_match(status, split_id, split.account_id == bank_account.id)?;

        let other = bank_statement_lines::Entity::find()
            .filter(bank_statement_lines::Column::MatchedSplitId.eq(split_id))
            .filter(bank_statement_lines::Column::Id.ne(line_id))
            .one(&txn)
            .await?;
        if other.is_some() {
            return Err(StatementError::SplitAlreadyMatched(split_id));
        }

        let mut active: bank_statement_lines::ActiveModel = line.into();
        active.status = Set(ReconciliationStatus::Matched);
        active.matched_split_id = Set(Some(split_id));
        let line = active.update(&txn).await?;

        AuditRepository::record(
            &txn,
            NewAuditLog {
                actor_id: actor,
                action: "bank_statement.manually_matched".to_string(),
                resource_type: "bank_statement_line".to_string(),
                resource_id: line.id,
                ip: None,
                changes: Some(serde_json::json!({ "split_id": split_id })),
            },
        )
        .await?;

        txn.commit().await?;

        info!(line_id = %line.id, split_id = %split_id, "statement line manually matched");
        Ok(line)
    }

    /// Reverts a MATCHED line back to UNMATCHED.
    ///
    /// # Errors
    ///
    /// Returns `LineNotFound` for an unknown ID or a state machine
    /// rejection for any status other than MATCHED.
    pub async fn unmatch(
        &self,
        line_id: Uuid,
        actor: Uuid,
    ) -> Result<bank_statement_lines::Model, StatementError> {
        let txn = self.db.begin().await?;

        let line = bank_statement_lines::Entity::find_by_id(line_id)
            .one(&txn)
            .await?
            .ok_or(StatementError::LineNotFound(line_id))?;

        let status: LineStatus = line.status.clone().into();
        validate_unmatch(status)?;

        let mut active: bank_statement_lines::ActiveModel = line.into();
        active.status = Set(ReconciliationStatus::Unmatched);
        active.matched_split_id = Set(None);
        let line = active.update(&txn).await?;

        AuditRepository::record(
            &txn,
            NewAuditLog {
                actor_id: actor,
                action: "bank_statement.unmatched".to_string(),
                resource_type: "bank_statement_line".to_string(),
                resource_id: line.id,
                ip: None,
                changes: None,
            },
        )
        .await?;

        txn.commit().await?;

        info!(line_id = %line.id, "statement line unmatched");
        Ok(line)
    }

    /// Reconciles a batch of MATCHED lines, all-or-nothing.
    ///
    /// Every line is validated BEFORE any is mutated: one unknown line or
    /// one line outside MATCHED fails the whole batch and nothing commits.
    ///
    /// # Errors
    ///
    /// Returns `LineNotFound` or a state machine rejection; on success the
    /// count equals the number of distinct lines reconciled.
    pub async fn reconcile(&self, line_ids: &[Uuid], actor: Uuid) -> Result<u64, StatementError> {
        let line_ids = dedup_preserving_order(line_ids);
        let txn = self.db.begin().await?;

        let models = bank_statement_lines::Entity::find()
            .filter(bank_statement_lines::Column::Id.is_in(line_ids.clone()))
            .all(&txn)
            .await?;
        let mut by_id: HashMap<Uuid, bank_statement_lines::Model> =
            models.into_iter().map(|m| (m.id, m)).collect();

        // Validate the full batch before touching anything.
        let mut statuses = Vec::with_capacity(line_ids.len());
        for line_id in &line_ids {
            let line = by_id
                .get(line_id)
                .ok_or(StatementError::LineNotFound(*line_id))?;
            statuses.push(line.status.clone().into());
        }
        validate_reconcile_batch(&statuses)?;

        let now = Utc::now();
        for line_id in &line_ids {
            let Some(line) = by_id.remove(line_id) else {
                continue;
            };
            let mut active: bank_statement_lines::ActiveModel = line.into();
            active.status = Set(ReconciliationStatus::Reconciled);
            active.reconciled_by = Set(Some(actor));
            active.reconciled_at = Set(Some(now.into()));
            active.update(&txn).await?;
        }

        AuditRepository::record(
            &txn,
            NewAuditLog {
                actor_id: actor,
                action: "bank_statement.reconciled".to_string(),
                resource_type: "bank_statement_lines".to_string(),
                resource_id: Uuid::now_v7(),
                ip: None,
                changes: Some(serde_json::json!({ "count": line_ids.len() })),
            },
        )
        .await?;

        txn.commit().await?;

        let count = line_ids.len() as u64;
        info!(count, "statement lines reconciled");
        Ok(count)
    }

    /// Computes the point-in-time reconciliation summary.
    ///
    /// # Errors
    ///
    /// Returns `BankAccountMissing` or a database error.
    pub async fn summary(&self) -> Result<ReconciliationSummary, StatementError> {
        let bank_account = self.bank_account(&self.db).await?;

        let split_nets: Vec<Decimal> = transaction_splits::Entity::find()
            .filter(transaction_splits::Column::AccountId.eq(bank_account.id))
            .all(&self.db)
            .await?
            .iter()
            .map(transaction_splits::Model::net_amount)
            .collect();

        let lines: Vec<(LineStatus, Decimal)> = bank_statement_lines::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|line| (line.status.into(), line.amount))
            .collect();

        Ok(ReconciliationSummary::compute(&split_nets, &lines))
    }

    /// Resolves the designated bank account on the given connection.
    async fn bank_account<C: ConnectionTrait>(
        &self,
        conn: &C,
    ) -> Result<accounts::Model, StatementError> {
        accounts::Entity::find()
            .filter(accounts::Column::Code.eq(self.bank_account_code.as_str()))
            .one(conn)
            .await?
            .ok_or_else(|| StatementError::BankAccountMissing(self.bank_account_code.clone()))
    }
}

/// Drops repeated IDs, keeping first occurrences in order. Batch callers
/// may pass the same line twice; it reconciles (and counts) once.
fn dedup_preserving_order(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter()
        .filter(|id| seen.insert(**id))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        let c = Uuid::now_v7();
        assert_eq!(dedup_preserving_order(&[a, b, a, c, b]), vec![a, b, c]);
    }

    #[test]
    fn test_dedup_passes_distinct_through() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        assert_eq!(dedup_preserving_order(&[a, b]), vec![a, b]);
        assert!(dedup_preserving_order(&[]).is_empty());
    }
}

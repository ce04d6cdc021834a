//! Recurring entry repository: templates that fire journal entries.
//!
//! Firing a template posts a journal entry via the posting repository
//! inside the same transaction that advances the schedule, so the entry
//! and the schedule bump commit or roll back together.

use chrono::{NaiveDate, Utc};
use mizan_core::journal::{validate_splits, CreateJournalEntryInput, JournalError, SplitDirection, SplitInput};
use mizan_core::recurring::{advance_next_run, Frequency, RecurringError as RecurringDomainError};
use mizan_shared::types::{AccountId, UserId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::entities::{
    recurring_entries, recurring_entry_splits, sea_orm_active_enums::RecurringStatus,
};
use crate::repositories::audit::{AuditRepository, NewAuditLog};
use crate::repositories::posting::{JournalEntryWithSplits, PostingError, PostingRepository};

/// Error types for recurring entry operations.
#[derive(Debug, thiserror::Error)]
pub enum RecurringError {
    /// Domain rule violated (not found, duplicate name, paused, not due,
    /// expired).
    #[error(transparent)]
    Domain(#[from] RecurringDomainError),

    /// Split template validation failed.
    #[error(transparent)]
    Journal(#[from] JournalError),

    /// Posting the produced entry failed.
    #[error(transparent)]
    Posting(#[from] PostingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a recurring entry template.
#[derive(Debug, Clone)]
pub struct CreateRecurringInput {
    /// Unique template name.
    pub name: String,
    /// Description copied onto produced journal entries.
    pub description: String,
    /// Prefix for produced entry references (`{prefix}-{n}`).
    pub reference_prefix: String,
    /// Posting frequency.
    pub frequency: Frequency,
    /// First date the template is due to fire.
    pub next_run_date: NaiveDate,
    /// Optional last date the template may fire.
    pub end_date: Option<NaiveDate>,
    /// Split templates (>= 2, must balance exactly).
    pub splits: Vec<SplitInput>,
    /// User creating the template.
    pub created_by: Uuid,
}

/// A persisted template with its split templates.
#[derive(Debug, Clone)]
pub struct RecurringEntryWithSplits {
    /// Template row.
    pub entry: recurring_entries::Model,
    /// Split templates, ordered by position.
    pub splits: Vec<recurring_entry_splits::Model>,
}

/// Recurring entry repository.
#[derive(Debug, Clone)]
pub struct RecurringRepository {
    db: DatabaseConnection,
}

impl RecurringRepository {
    /// Creates a new recurring entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a recurring entry template.
    ///
    /// The split templates are balance-checked at save time, so every
    /// entry the template later produces is balanced by construction.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if the name is taken, a journal validation
    /// error for bad split templates, or a database error.
    pub async fn create_template(
        &self,
        input: CreateRecurringInput,
    ) -> Result<RecurringEntryWithSplits, RecurringError> {
        validate_splits(&input.splits)?;

        let txn = self.db.begin().await?;

        let existing = recurring_entries::Entity::find()
            .filter(recurring_entries::Column::Name.eq(input.name.as_str()))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(RecurringDomainError::DuplicateName(input.name).into());
        }

        let now = Utc::now();
        let entry_id = Uuid::now_v7();

        let entry = recurring_entries::ActiveModel {
            id: Set(entry_id),
            name: Set(input.name.clone()),
            description: Set(input.description),
            reference_prefix: Set(input.reference_prefix),
            frequency: Set(input.frequency.into()),
            next_run_date: Set(input.next_run_date),
            end_date: Set(input.end_date),
            status: Set(RecurringStatus::Active),
            last_posted_at: Set(None),
            total_posted: Set(0),
            created_by: Set(input.created_by),
            created_at: Set(now.into()),
        };
        // A concurrent creator can slip past the check above; the unique
        // index on name turns that race into the same domain error.
        let entry = entry
            .insert(&txn)
            .await
            .map_err(|err| duplicate_name_on_unique(err, &input.name))?;

        let mut splits = Vec::with_capacity(input.splits.len());
        for (position, split_input) in input.splits.iter().enumerate() {
            let (debit, credit) = split_input.amounts();
            let split = recurring_entry_splits::ActiveModel {
                id: Set(Uuid::now_v7()),
                recurring_entry_id: Set(entry_id),
                account_id: Set(split_input.account_id.into_inner()),
                debit_amount: Set(debit),
                credit_amount: Set(credit),
                position: Set(i32::try_from(position).unwrap_or(i32::MAX)),
            };
            splits.push(split.insert(&txn).await?);
        }

        AuditRepository::record(
            &txn,
            NewAuditLog {
                actor_id: input.created_by,
                action: "recurring_entry.created".to_string(),
                resource_type: "recurring_entry".to_string(),
                resource_id: entry_id,
                ip: None,
                changes: Some(serde_json::json!({ "name": input.name })),
            },
        )
        .await?;

        txn.commit().await?;

        info!(entry_id = %entry_id, name = %entry.name, "recurring template created");
        Ok(RecurringEntryWithSplits { entry, splits })
    }

    /// Fires a template today.
    ///
    /// # Errors
    ///
    /// Same as [`Self::post_recurring_as_of`].
    pub async fn post_recurring(
        &self,
        entry_id: Uuid,
        actor: Uuid,
    ) -> Result<JournalEntryWithSplits, RecurringError> {
        self.post_recurring_as_of(entry_id, Utc::now().date_naive(), actor)
            .await
    }

    /// Fires a template as of the given date.
    ///
    /// The template must be ACTIVE, due (`next_run_date <= today`), and
    /// not expired (`end_date` absent or `>= today`). A journal entry
    /// dated `today` with reference `{prefix}-{total_posted + 1}` is
    /// posted, then the schedule advances calendar-aware and the counters
    /// update, all in one transaction. Firing never changes the status;
    /// templates that run past their end date are fenced by the due check,
    /// not auto-paused.
    ///
    /// # Errors
    ///
    /// Returns `TemplateNotFound`, `NotActive`, `NotDue`, `Expired`, a
    /// posting error, or a database error.
    pub async fn post_recurring_as_of(
        &self,
        entry_id: Uuid,
        today: NaiveDate,
        actor: Uuid,
    ) -> Result<JournalEntryWithSplits, RecurringError> {
        let txn = self.db.begin().await?;

        let template = recurring_entries::Entity::find_by_id(entry_id)
            .one(&txn)
            .await?
            .ok_or(RecurringDomainError::TemplateNotFound(entry_id))?;

        if template.status != RecurringStatus::Active {
            return Err(RecurringDomainError::NotActive(entry_id).into());
        }
        if template.next_run_date > today {
            return Err(RecurringDomainError::NotDue {
                id: entry_id,
                next_run_date: template.next_run_date,
            }
            .into());
        }
        if let Some(end_date) = template.end_date {
            if end_date < today {
                return Err(RecurringDomainError::Expired {
                    id: entry_id,
                    end_date,
                }
                .into());
            }
        }

        let split_rows = recurring_entry_splits::Entity::find()
            .filter(recurring_entry_splits::Column::RecurringEntryId.eq(entry_id))
            .order_by_asc(recurring_entry_splits::Column::Position)
            .all(&txn)
            .await?;

        let reference = format!("{}-{}", template.reference_prefix, template.total_posted + 1);
        let input = CreateJournalEntryInput {
            entry_date: today,
            description: template.description.clone(),
            reference: Some(reference.clone()),
            splits: split_rows.iter().map(template_split_to_input).collect(),
            created_by: UserId::from_uuid(actor),
        };

        let posted = PostingRepository::post_in_txn(&txn, &input).await?;

        let frequency: Frequency = template.frequency.clone().into();
        let next_run_date = advance_next_run(template.next_run_date, frequency);
        let total_posted = template.total_posted + 1;

        let mut active: recurring_entries::ActiveModel = template.into();
        active.next_run_date = Set(next_run_date);
        active.total_posted = Set(total_posted);
        active.last_posted_at = Set(Some(Utc::now().into()));
        active.update(&txn).await?;

        AuditRepository::record(
            &txn,
            NewAuditLog {
                actor_id: actor,
                action: "recurring_entry.posted".to_string(),
                resource_type: "recurring_entry".to_string(),
                resource_id: entry_id,
                ip: None,
                changes: Some(serde_json::json!({
                    "journal_entry_id": posted.entry.id,
                    "reference": reference,
                    "next_run_date": next_run_date,
                })),
            },
        )
        .await?;

        txn.commit().await?;

        info!(
            entry_id = %entry_id,
            journal_entry_id = %posted.entry.id,
            %next_run_date,
            "recurring entry posted"
        );
        Ok(posted)
    }

    /// Fires every due ACTIVE template as of the given date.
    ///
    /// This is the operation an external scheduler trigger invokes. Each
    /// firing runs in its own transaction; one failing template is logged
    /// and skipped rather than blocking the rest of the run.
    ///
    /// # Errors
    ///
    /// Returns a database error if the due query itself fails.
    pub async fn process_due(&self, today: NaiveDate, actor: Uuid) -> Result<u64, RecurringError> {
        // SQL mirror of the core due check: active, next run arrived,
        // end date absent or not yet passed.
        let due = recurring_entries::Entity::find()
            .filter(recurring_entries::Column::Status.eq(RecurringStatus::Active))
            .filter(recurring_entries::Column::NextRunDate.lte(today))
            .filter(
                Condition::any()
                    .add(recurring_entries::Column::EndDate.is_null())
                    .add(recurring_entries::Column::EndDate.gte(today)),
            )
            .order_by_asc(recurring_entries::Column::NextRunDate)
            .all(&self.db)
            .await?;

        let mut fired = 0u64;
        for template in due {
            match self.post_recurring_as_of(template.id, today, actor).await {
                Ok(_) => fired += 1,
                Err(err) => {
                    warn!(entry_id = %template.id, error = %err, "recurring entry failed to fire");
                }
            }
        }

        info!(fired, %today, "due recurring entries processed");
        Ok(fired)
    }

    /// Pauses a template so it stops firing.
    ///
    /// # Errors
    ///
    /// Returns `TemplateNotFound` or a database error.
    pub async fn pause(
        &self,
        entry_id: Uuid,
        actor: Uuid,
    ) -> Result<recurring_entries::Model, RecurringError> {
        self.set_status(entry_id, RecurringStatus::Paused, "recurring_entry.paused", actor)
            .await
    }

    /// Resumes a paused template.
    ///
    /// # Errors
    ///
    /// Returns `TemplateNotFound` or a database error.
    pub async fn resume(
        &self,
        entry_id: Uuid,
        actor: Uuid,
    ) -> Result<recurring_entries::Model, RecurringError> {
        self.set_status(entry_id, RecurringStatus::Active, "recurring_entry.resumed", actor)
            .await
    }

    async fn set_status(
        &self,
        entry_id: Uuid,
        status: RecurringStatus,
        action: &str,
        actor: Uuid,
    ) -> Result<recurring_entries::Model, RecurringError> {
        let txn = self.db.begin().await?;

        let template = recurring_entries::Entity::find_by_id(entry_id)
            .one(&txn)
            .await?
            .ok_or(RecurringDomainError::TemplateNotFound(entry_id))?;

        let mut active: recurring_entries::ActiveModel = template.into();
        active.status = Set(status);
        let template = active.update(&txn).await?;

        AuditRepository::record(
            &txn,
            NewAuditLog {
                actor_id: actor,
                action: action.to_string(),
                resource_type: "recurring_entry".to_string(),
                resource_id: entry_id,
                ip: None,
                changes: None,
            },
        )
        .await?;

        txn.commit().await?;
        Ok(template)
    }
}

/// Maps a unique-constraint violation on the name column to
/// `DuplicateName`; everything else stays a database error.
fn duplicate_name_on_unique(err: DbErr, name: &str) -> RecurringError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            RecurringDomainError::DuplicateName(name.to_string()).into()
        }
        _ => err.into(),
    }
}

/// Converts a stored split template into posting input.
fn template_split_to_input(row: &recurring_entry_splits::Model) -> SplitInput {
    let (direction, amount) = if row.debit_amount > Decimal::ZERO {
        (SplitDirection::Debit, row.debit_amount)
    } else {
        (SplitDirection::Credit, row.credit_amount)
    };
    SplitInput {
        account_id: AccountId::from_uuid(row.account_id),
        direction,
        amount,
        memo: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn split_row(debit: Decimal, credit: Decimal) -> recurring_entry_splits::Model {
        recurring_entry_splits::Model {
            id: Uuid::new_v4(),
            recurring_entry_id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            debit_amount: debit,
            credit_amount: credit,
            position: 0,
        }
    }

    #[test]
    fn test_debit_template_split() {
        let input = template_split_to_input(&split_row(dec!(2500), dec!(0)));
        assert_eq!(input.direction, SplitDirection::Debit);
        assert_eq!(input.amount, dec!(2500));
        assert_eq!(input.amounts(), (dec!(2500), dec!(0)));
    }

    #[test]
    fn test_credit_template_split() {
        let input = template_split_to_input(&split_row(dec!(0), dec!(99.9900)));
        assert_eq!(input.direction, SplitDirection::Credit);
        assert_eq!(input.amounts(), (dec!(0), dec!(99.9900)));
    }

    #[test]
    fn test_non_unique_insert_error_stays_database() {
        let err = duplicate_name_on_unique(DbErr::RecordNotInserted, "rent");
        assert!(matches!(err, RecurringError::Database(_)));
    }
}

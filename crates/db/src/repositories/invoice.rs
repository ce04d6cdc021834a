//! Credit invoice repository.
//!
//! Issuing an invoice posts the receivable entry (debit A/R, credit
//! revenue); recording a payment posts the settlement entry (debit the
//! cash/bank account for the method, credit A/R). Invoice row, payment
//! row, journal entry, and audit row always share one transaction.

use chrono::{NaiveDate, Utc};
use mizan_core::invoice::{apply_payment, InvoiceError as InvoiceDomainError, PaymentMethod};
use mizan_core::journal::{CreateJournalEntryInput, SplitDirection, SplitInput};
use mizan_shared::types::{AccountId, UserId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{
    accounts, credit_invoices, invoice_payments, sea_orm_active_enums::InvoiceStatus,
};
use crate::repositories::audit::{AuditRepository, NewAuditLog};
use crate::repositories::posting::{PostingError, PostingRepository};

/// Error types for invoice operations.
#[derive(Debug, thiserror::Error)]
pub enum InvoiceError {
    /// Domain rule violated (not found, duplicate number, bad amount).
    #[error(transparent)]
    Domain(#[from] InvoiceDomainError),

    /// The cash/bank account for the payment method does not exist.
    #[error("No account with code '{0}' to settle payments against")]
    PaymentAccountMissing(String),

    /// Posting the journal entry failed.
    #[error(transparent)]
    Posting(#[from] PostingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for issuing a credit invoice.
#[derive(Debug, Clone)]
pub struct CreateInvoiceInput {
    /// Customer the invoice is billed to.
    pub customer_name: String,
    /// Unique invoice number.
    pub invoice_number: String,
    /// Issue date (also the receivable entry date).
    pub issue_date: NaiveDate,
    /// Payment due date.
    pub due_date: NaiveDate,
    /// Invoice total (must be strictly positive).
    pub total_amount: Decimal,
    /// Accounts receivable account debited now, credited by payments.
    pub receivable_account_id: Uuid,
    /// Revenue account credited by the receivable entry.
    pub revenue_account_id: Uuid,
    /// User issuing the invoice.
    pub created_by: Uuid,
}

/// An invoice with its payment history.
#[derive(Debug, Clone)]
pub struct InvoiceWithPayments {
    /// Invoice row.
    pub invoice: credit_invoices::Model,
    /// Payments in chronological order.
    pub payments: Vec<invoice_payments::Model>,
}

/// Invoice repository.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    db: DatabaseConnection,
    bank_account_code: String,
    cash_account_code: String,
}

impl InvoiceRepository {
    /// Creates a new invoice repository bound to the settlement account
    /// codes: cash payments debit the cash account, every other method
    /// debits the bank account.
    #[must_use]
    pub const fn new(
        db: DatabaseConnection,
        bank_account_code: String,
        cash_account_code: String,
    ) -> Self {
        Self {
            db,
            bank_account_code,
            cash_account_code,
        }
    }

    /// Issues a credit invoice.
    ///
    /// Posts the receivable journal entry (debit A/R, credit revenue) and
    /// inserts the invoice row, status OPEN and nothing paid, in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateInvoiceNumber` if the number is taken, a posting
    /// error (including non-positive totals and bad accounts), or a
    /// database error.
    pub async fn create_invoice(
        &self,
        input: CreateInvoiceInput,
    ) -> Result<credit_invoices::Model, InvoiceError> {
        let txn = self.db.begin().await?;

        let existing = credit_invoices::Entity::find()
            .filter(credit_invoices::Column::InvoiceNumber.eq(input.invoice_number.as_str()))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(InvoiceDomainError::DuplicateInvoiceNumber(input.invoice_number).into());
        }

        let entry_input = CreateJournalEntryInput {
            entry_date: input.issue_date,
            description: format!(
                "Invoice {} for {}",
                input.invoice_number, input.customer_name
            ),
            reference: Some(input.invoice_number.clone()),
            splits: vec![
                SplitInput {
                    account_id: AccountId::from_uuid(input.receivable_account_id),
                    direction: SplitDirection::Debit,
                    amount: input.total_amount,
                    memo: None,
                },
                SplitInput {
                    account_id: AccountId::from_uuid(input.revenue_account_id),
                    direction: SplitDirection::Credit,
                    amount: input.total_amount,
                    memo: None,
                },
            ],
            created_by: UserId::from_uuid(input.created_by),
        };
        let posted = PostingRepository::post_in_txn(&txn, &entry_input).await?;

        let invoice = credit_invoices::ActiveModel {
            id: Set(Uuid::now_v7()),
            customer_name: Set(input.customer_name),
            invoice_number: Set(input.invoice_number.clone()),
            issue_date: Set(input.issue_date),
            due_date: Set(input.due_date),
            total_amount: Set(input.total_amount),
            amount_paid: Set(Decimal::ZERO),
            status: Set(InvoiceStatus::Open),
            journal_entry_id: Set(posted.entry.id),
            receivable_account_id: Set(input.receivable_account_id),
            created_by: Set(input.created_by),
            created_at: Set(Utc::now().into()),
        };
        // The unique index on invoice_number catches a concurrent issuer
        // that slipped past the check above.
        let invoice = invoice
            .insert(&txn)
            .await
            .map_err(|err| duplicate_number_on_unique(err, &input.invoice_number))?;

        AuditRepository::record(
            &txn,
            NewAuditLog {
                actor_id: input.created_by,
                action: "invoice.created".to_string(),
                resource_type: "credit_invoice".to_string(),
                resource_id: invoice.id,
                ip: None,
                changes: Some(serde_json::json!({
                    "invoice_number": input.invoice_number,
                    "total_amount": input.total_amount,
                })),
            },
        )
        .await?;

        txn.commit().await?;

        info!(
            invoice_id = %invoice.id,
            invoice_number = %invoice.invoice_number,
            "invoice created"
        );
        Ok(invoice)
    }

    /// Records a payment against an invoice.
    ///
    /// Posts the settlement entry (debit the method's cash/bank account,
    /// credit the invoice's receivable account), inserts the payment row,
    /// bumps the amount paid and re-derives the status. Overpayment is
    /// permitted; status saturates at PAID.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceNotFound`, `NonPositiveAmount`,
    /// `PaymentAccountMissing`, a posting error, or a database error.
    pub async fn record_payment(
        &self,
        invoice_id: Uuid,
        amount: Decimal,
        method: PaymentMethod,
        payment_date: NaiveDate,
        actor: Uuid,
    ) -> Result<InvoiceWithPayments, InvoiceError> {
        let txn = self.db.begin().await?;

        let invoice = credit_invoices::Entity::find_by_id(invoice_id)
            .one(&txn)
            .await?
            .ok_or(InvoiceDomainError::InvoiceNotFound(invoice_id))?;

        let applied = apply_payment(invoice.total_amount, invoice.amount_paid, amount)
            .map_err(InvoiceError::Domain)?;

        let settlement_code = match method {
            PaymentMethod::Cash => self.cash_account_code.as_str(),
            PaymentMethod::BankTransfer | PaymentMethod::Card | PaymentMethod::Cheque => {
                self.bank_account_code.as_str()
            }
        };
        let settlement_account = accounts::Entity::find()
            .filter(accounts::Column::Code.eq(settlement_code))
            .one(&txn)
            .await?
            .ok_or_else(|| InvoiceError::PaymentAccountMissing(settlement_code.to_string()))?;

        let entry_input = CreateJournalEntryInput {
            entry_date: payment_date,
            description: format!("Payment for invoice {}", invoice.invoice_number),
            reference: Some(invoice.invoice_number.clone()),
            splits: vec![
                SplitInput {
                    account_id: AccountId::from_uuid(settlement_account.id),
                    direction: SplitDirection::Debit,
                    amount,
                    memo: None,
                },
                SplitInput {
                    account_id: AccountId::from_uuid(invoice.receivable_account_id),
                    direction: SplitDirection::Credit,
                    amount,
                    memo: None,
                },
            ],
            created_by: UserId::from_uuid(actor),
        };
        let posted = PostingRepository::post_in_txn(&txn, &entry_input).await?;

        let payment = invoice_payments::ActiveModel {
            id: Set(Uuid::now_v7()),
            invoice_id: Set(invoice.id),
            amount: Set(amount),
            method: Set(method.into()),
            payment_date: Set(payment_date),
            journal_entry_id: Set(posted.entry.id),
            created_by: Set(actor),
            created_at: Set(Utc::now().into()),
        };
        payment.insert(&txn).await?;

        let mut active: credit_invoices::ActiveModel = invoice.into();
        active.amount_paid = Set(applied.new_amount_paid);
        active.status = Set(applied.new_status.into());
        let invoice = active.update(&txn).await?;

        AuditRepository::record(
            &txn,
            NewAuditLog {
                actor_id: actor,
                action: "invoice.payment_recorded".to_string(),
                resource_type: "credit_invoice".to_string(),
                resource_id: invoice.id,
                ip: None,
                changes: Some(serde_json::json!({
                    "amount": amount,
                    "amount_paid": applied.new_amount_paid,
                })),
            },
        )
        .await?;

        txn.commit().await?;

        info!(
            invoice_id = %invoice.id,
            %amount,
            status = ?invoice.status,
            "invoice payment recorded"
        );
        self.get_invoice(invoice.id).await
    }

    /// Gets an invoice with its payment history.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceNotFound` or a database error.
    pub async fn get_invoice(&self, invoice_id: Uuid) -> Result<InvoiceWithPayments, InvoiceError> {
        let invoice = credit_invoices::Entity::find_by_id(invoice_id)
            .one(&self.db)
            .await?
            .ok_or(InvoiceDomainError::InvoiceNotFound(invoice_id))?;

        let payments = invoice_payments::Entity::find()
            .filter(invoice_payments::Column::InvoiceId.eq(invoice_id))
            .order_by_asc(invoice_payments::Column::PaymentDate)
            .order_by_asc(invoice_payments::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(InvoiceWithPayments { invoice, payments })
    }
}

/// Maps a unique-constraint violation on the invoice number column to
/// `DuplicateInvoiceNumber`; everything else stays a database error.
fn duplicate_number_on_unique(err: DbErr, invoice_number: &str) -> InvoiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            InvoiceDomainError::DuplicateInvoiceNumber(invoice_number.to_string()).into()
        }
        _ => err.into(),
    }
}

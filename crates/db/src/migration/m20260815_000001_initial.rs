//! Initial database migration.
//!
//! Creates the ledger, reconciliation, recurring entry, invoice, and
//! audit tables together with their enums and constraints.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: LEDGER
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;
        db.execute_unprepared(TRANSACTION_SPLITS_SQL).await?;

        // ============================================================
        // PART 3: BANK RECONCILIATION
        // ============================================================
        db.execute_unprepared(BANK_STATEMENT_LINES_SQL).await?;

        // ============================================================
        // PART 4: RECURRING ENTRIES
        // ============================================================
        db.execute_unprepared(RECURRING_ENTRIES_SQL).await?;
        db.execute_unprepared(RECURRING_ENTRY_SPLITS_SQL).await?;

        // ============================================================
        // PART 5: CREDIT INVOICES
        // ============================================================
        db.execute_unprepared(CREDIT_INVOICES_SQL).await?;
        db.execute_unprepared(INVOICE_PAYMENTS_SQL).await?;

        // ============================================================
        // PART 6: AUDIT LOG
        // ============================================================
        db.execute_unprepared(AUDIT_LOGS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Bank statement line status
CREATE TYPE reconciliation_status AS ENUM (
    'unmatched',
    'matched',
    'reconciled'
);

-- Recurring entry frequency
CREATE TYPE recurring_frequency AS ENUM (
    'daily',
    'weekly',
    'monthly',
    'quarterly',
    'annually'
);

-- Recurring entry status
CREATE TYPE recurring_status AS ENUM ('active', 'paused');

-- Credit invoice status
CREATE TYPE invoice_status AS ENUM ('open', 'partial', 'paid');

-- Invoice payment method
CREATE TYPE payment_method AS ENUM (
    'cash',
    'bank_transfer',
    'card',
    'cheque'
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    code VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_accounts_code ON accounts(code) WHERE is_active = true;
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY,
    entry_date DATE NOT NULL,
    description VARCHAR(500) NOT NULL,
    reference VARCHAR(100),
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_journal_entries_entry_date ON journal_entries(entry_date);
CREATE INDEX idx_journal_entries_reference ON journal_entries(reference)
    WHERE reference IS NOT NULL;
";

const TRANSACTION_SPLITS_SQL: &str = r"
CREATE TABLE transaction_splits (
    id UUID PRIMARY KEY,
    entry_id UUID NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES accounts(id),
    debit_amount NUMERIC(19,4) NOT NULL DEFAULT 0,
    credit_amount NUMERIC(19,4) NOT NULL DEFAULT 0,
    memo VARCHAR(500),
    position INTEGER NOT NULL DEFAULT 0,

    -- Exactly one side of a split is strictly positive
    CONSTRAINT chk_split_exclusive CHECK (
        (debit_amount > 0 AND credit_amount = 0) OR
        (credit_amount > 0 AND debit_amount = 0)
    )
);

CREATE INDEX idx_transaction_splits_entry ON transaction_splits(entry_id);
CREATE INDEX idx_transaction_splits_account ON transaction_splits(account_id);
";

const BANK_STATEMENT_LINES_SQL: &str = r"
CREATE TABLE bank_statement_lines (
    id UUID PRIMARY KEY,
    line_date DATE NOT NULL,
    description VARCHAR(500) NOT NULL,
    amount NUMERIC(19,4) NOT NULL,
    reference VARCHAR(100),
    status reconciliation_status NOT NULL DEFAULT 'unmatched',
    matched_split_id UUID REFERENCES transaction_splits(id),
    reconciled_by UUID,
    reconciled_at TIMESTAMPTZ,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    -- A matched or reconciled line always carries its split pointer
    CONSTRAINT chk_match_pointer CHECK (
        (status = 'unmatched' AND matched_split_id IS NULL) OR
        (status <> 'unmatched' AND matched_split_id IS NOT NULL)
    )
);

CREATE INDEX idx_bank_statement_lines_status ON bank_statement_lines(status);
CREATE INDEX idx_bank_statement_lines_line_date ON bank_statement_lines(line_date);

-- A ledger split can be claimed by at most one statement line
CREATE UNIQUE INDEX uq_bank_statement_lines_matched_split
    ON bank_statement_lines(matched_split_id)
    WHERE matched_split_id IS NOT NULL;
";

const RECURRING_ENTRIES_SQL: &str = r"
CREATE TABLE recurring_entries (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL UNIQUE,
    description VARCHAR(500) NOT NULL,
    reference_prefix VARCHAR(50) NOT NULL,
    frequency recurring_frequency NOT NULL,
    next_run_date DATE NOT NULL,
    end_date DATE,
    status recurring_status NOT NULL DEFAULT 'active',
    last_posted_at TIMESTAMPTZ,
    total_posted BIGINT NOT NULL DEFAULT 0,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_recurring_entries_due
    ON recurring_entries(next_run_date)
    WHERE status = 'active';
";

const RECURRING_ENTRY_SPLITS_SQL: &str = r"
CREATE TABLE recurring_entry_splits (
    id UUID PRIMARY KEY,
    recurring_entry_id UUID NOT NULL REFERENCES recurring_entries(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES accounts(id),
    debit_amount NUMERIC(19,4) NOT NULL DEFAULT 0,
    credit_amount NUMERIC(19,4) NOT NULL DEFAULT 0,
    position INTEGER NOT NULL DEFAULT 0,

    CONSTRAINT chk_template_split_exclusive CHECK (
        (debit_amount > 0 AND credit_amount = 0) OR
        (credit_amount > 0 AND debit_amount = 0)
    )
);

CREATE INDEX idx_recurring_entry_splits_entry
    ON recurring_entry_splits(recurring_entry_id);
";

const CREDIT_INVOICES_SQL: &str = r"
CREATE TABLE credit_invoices (
    id UUID PRIMARY KEY,
    customer_name VARCHAR(255) NOT NULL,
    invoice_number VARCHAR(100) NOT NULL UNIQUE,
    issue_date DATE NOT NULL,
    due_date DATE NOT NULL,
    total_amount NUMERIC(19,4) NOT NULL,
    amount_paid NUMERIC(19,4) NOT NULL DEFAULT 0,
    status invoice_status NOT NULL DEFAULT 'open',
    journal_entry_id UUID NOT NULL REFERENCES journal_entries(id),
    receivable_account_id UUID NOT NULL REFERENCES accounts(id),
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_invoice_total_positive CHECK (total_amount > 0),
    CONSTRAINT chk_invoice_paid_non_negative CHECK (amount_paid >= 0)
);

CREATE INDEX idx_credit_invoices_status ON credit_invoices(status);
CREATE INDEX idx_credit_invoices_customer ON credit_invoices(customer_name);
";

const INVOICE_PAYMENTS_SQL: &str = r"
CREATE TABLE invoice_payments (
    id UUID PRIMARY KEY,
    invoice_id UUID NOT NULL REFERENCES credit_invoices(id),
    amount NUMERIC(19,4) NOT NULL,
    method payment_method NOT NULL,
    payment_date DATE NOT NULL,
    journal_entry_id UUID NOT NULL REFERENCES journal_entries(id),
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_payment_amount_positive CHECK (amount > 0)
);

CREATE INDEX idx_invoice_payments_invoice ON invoice_payments(invoice_id);
";

const AUDIT_LOGS_SQL: &str = r"
CREATE TABLE audit_logs (
    id UUID PRIMARY KEY,
    actor_id UUID NOT NULL,
    action VARCHAR(100) NOT NULL,
    resource_type VARCHAR(100) NOT NULL,
    resource_id UUID NOT NULL,
    ip VARCHAR(45),
    changes JSONB,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_audit_logs_resource ON audit_logs(resource_type, resource_id);
CREATE INDEX idx_audit_logs_actor ON audit_logs(actor_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS audit_logs CASCADE;
DROP TABLE IF EXISTS invoice_payments CASCADE;
DROP TABLE IF EXISTS credit_invoices CASCADE;
DROP TABLE IF EXISTS recurring_entry_splits CASCADE;
DROP TABLE IF EXISTS recurring_entries CASCADE;
DROP TABLE IF EXISTS bank_statement_lines CASCADE;
DROP TABLE IF EXISTS transaction_splits CASCADE;
DROP TABLE IF EXISTS journal_entries CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;

DROP TYPE IF EXISTS payment_method;
DROP TYPE IF EXISTS invoice_status;
DROP TYPE IF EXISTS recurring_status;
DROP TYPE IF EXISTS recurring_frequency;
DROP TYPE IF EXISTS reconciliation_status;
";

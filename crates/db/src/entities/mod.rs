//! `SeaORM` entity definitions.

pub mod accounts;
pub mod audit_logs;
pub mod bank_statement_lines;
pub mod credit_invoices;
pub mod invoice_payments;
pub mod journal_entries;
pub mod recurring_entries;
pub mod recurring_entry_splits;
pub mod sea_orm_active_enums;
pub mod transaction_splits;

//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Pure domain logic stays in `mizan-core`; repositories
//! orchestrate transactions around it.

pub mod account;
pub mod audit;
pub mod invoice;
pub mod posting;
pub mod reconciliation;
pub mod recurring;

pub use account::{AccountError, AccountRepository, CreateAccountInput};
pub use audit::{AuditRepository, NewAuditLog};
pub use invoice::{CreateInvoiceInput, InvoiceError, InvoiceRepository, InvoiceWithPayments};
pub use posting::{JournalEntryWithSplits, PostingError, PostingRepository};
pub use reconciliation::{
    CreateStatementLineInput, ReconciliationRepository, StatementError,
};
pub use recurring::{
    CreateRecurringInput, RecurringEntryWithSplits, RecurringError, RecurringRepository,
};
